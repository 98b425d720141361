use std::fmt;

const BAR: char = '█';

/// Horizontal bar chart for the terminal
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    title: &'a str,
    label: &'a str,
    width: usize,
    bars: Vec<(&'a str, u64)>,
}

impl<'a> BarChart<'a> {
    pub fn new(title: &'a str, label: &'a str) -> Self {
        Self {
            title,
            label,
            width: 40,
            bars: vec![],
        }
    }

    pub fn bars(mut self, bars: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        self.bars.extend(bars);
        self
    }

    /// Bar length scaled against the largest value
    fn length(&self, value: u64, max: u64) -> usize {
        if max == 0 {
            return 0;
        }
        let scaled = u128::from(value) * self.width as u128 / u128::from(max);
        scaled as usize
    }
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.label)?;
        if self.bars.is_empty() {
            return writeln!(f, "  No data");
        }

        let max = self.bars.iter().map(|(_, value)| *value).max().unwrap_or(0);
        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in &self.bars {
            let bar: String = std::iter::repeat(BAR).take(self.length(*value, max)).collect();
            writeln!(f, "  {:label_width$} | {} {}", label, bar, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_lengths(chart: &BarChart) -> Vec<usize> {
        chart
            .to_string()
            .lines()
            .skip(1)
            .map(|line| line.chars().filter(|c| *c == BAR).count())
            .collect()
    }

    #[test]
    fn bars_are_proportional_to_the_maximum() {
        let chart = BarChart {
            width: 10,
            ..BarChart::new("Attractions Popularity", "Number of Users")
        }
        .bars([("City Museum", 8), ("Lakefront Park", 4), ("Navy Pier", 0)]);
        assert_eq!(bar_lengths(&chart), vec![10, 5, 0]);
    }

    #[test]
    fn all_zero_values_draw_no_bars() {
        let chart = BarChart::new("Restaurants Popularity", "Number of Users").bars([("Deli", 0)]);
        assert_eq!(bar_lengths(&chart), vec![0]);
    }

    #[test]
    fn labels_are_aligned() {
        let chart = BarChart {
            width: 4,
            ..BarChart::new("t", "l")
        }
        .bars([("a", 1), ("abc", 2)]);
        let text = chart.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t (l)");
        assert_eq!(lines[1], "  a   | ██ 1");
        assert_eq!(lines[2], "  abc | ████ 2");
    }

    #[test]
    fn empty_chart_says_so() {
        let chart = BarChart::new("t", "l");
        assert!(chart.to_string().contains("No data"));
    }
}
