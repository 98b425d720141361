use std::fmt;

use log::error;

use crate::{
    api::AdminApi,
    chart::BarChart,
    models::{RankingEntry, Rankings},
};

/// Read-only totals and popularity rankings
#[derive(Debug, Default)]
pub struct AnalyticsScreen {
    total_users: u64,
    rankings: Rankings,
}

impl AnalyticsScreen {
    /// Both requests go out together; a failure keeps that part at its default.
    pub async fn load(&mut self, api: &impl AdminApi) -> bool {
        let (count, rankings) = tokio::join!(api.user_count(), api.rankings());
        let mut loaded = true;

        match count {
            Ok(count) => self.total_users = count,
            Err(e) => {
                error!("Error fetching total users: {}", e);
                loaded = false;
            }
        }
        match rankings {
            Ok(rankings) => self.rankings = rankings,
            Err(e) => {
                error!("Error fetching rankings: {}", e);
                loaded = false;
            }
        }
        loaded
    }
}

fn write_ranking(f: &mut fmt::Formatter, title: &str, entries: &[RankingEntry]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    for (index, entry) in entries.iter().enumerate() {
        writeln!(f, "  {}. {} - Users: {}", index + 1, entry.name, entry.user_count)?;
    }
    Ok(())
}

fn chart<'a>(title: &'a str, entries: &'a [RankingEntry]) -> BarChart<'a> {
    BarChart::new(title, "Number of Users")
        .bars(entries.iter().map(|e| (e.name.as_str(), e.user_count)))
}

impl fmt::Display for AnalyticsScreen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Admin · Analytics")?;
        writeln!(f)?;
        writeln!(f, "Total Users")?;
        writeln!(f, "  {}", self.total_users)?;
        writeln!(f)?;
        write_ranking(f, "Top Attractions", &self.rankings.attractions)?;
        writeln!(f)?;
        write_ranking(f, "Top Restaurants", &self.rankings.restaurants)?;
        writeln!(f)?;
        write!(f, "{}", chart("Attractions Popularity", &self.rankings.attractions))?;
        writeln!(f)?;
        write!(f, "{}", chart("Restaurants Popularity", &self.rankings.restaurants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::FakeApi;

    #[tokio::test]
    async fn shows_count_and_rankings_in_server_order() {
        let api = FakeApi::seeded();
        let mut screen = AnalyticsScreen::default();
        assert!(screen.load(&api).await);

        assert_eq!(screen.total_users, 2);
        let text = screen.to_string();
        assert!(text.contains("  1. City Museum - Users: 5"));
        assert!(text.contains("  2. Lakefront Park - Users: 2"));
        assert!(text.contains("  1. Lou's Deli - Users: 3"));
        let museum = text.find("City Museum").unwrap();
        let park = text.find("Lakefront Park").unwrap();
        assert!(museum < park);
    }

    #[tokio::test]
    async fn count_failure_does_not_block_rankings() {
        let api = FakeApi::seeded();
        api.fail("user_count");
        let mut screen = AnalyticsScreen::default();

        assert!(!screen.load(&api).await);
        assert_eq!(screen.total_users, 0);
        assert_eq!(screen.rankings.attractions.len(), 2);
    }
}
