//! A collection mirrored from the API.
//!
//! The snapshot is loaded once per screen, filtered locally and patched in
//! place after each acknowledged mutation. Failed requests are logged and
//! otherwise leave the state untouched.

use std::future::Future;

use futures::{stream::FuturesUnordered, StreamExt};
use log::{debug, error};

use crate::{api::ApiError, models::Id, screen::ScreenError};

pub trait Record: Clone {
    /// Collection name used in log lines
    const KIND: &'static str;

    fn id(&self) -> &Id;
    fn search_fields(&self) -> Vec<&str>;

    /// `needle` is already trimmed and lowercase
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone)]
pub struct RemoteList<T: Record> {
    snapshot: Vec<T>,
    query: String,
    view: Vec<T>,
    editing: Option<T>,
}

impl<T: Record> Default for RemoteList<T> {
    fn default() -> Self {
        Self {
            snapshot: vec![],
            query: String::new(),
            view: vec![],
            editing: None,
        }
    }
}

impl<T: Record> RemoteList<T> {
    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }
    /// Snapshot narrowed by the last submitted search
    pub fn view(&self) -> &[T] {
        &self.view
    }
    pub fn query(&self) -> &str {
        &self.query
    }
    pub fn editing(&self) -> Option<&T> {
        self.editing.as_ref()
    }
    pub fn editing_mut(&mut self) -> Result<&mut T, ScreenError> {
        self.editing.as_mut().ok_or(ScreenError::NotEditing)
    }
    pub fn get(&self, id: &Id) -> Option<&T> {
        self.snapshot.iter().find(|record| record.id() == id)
    }

    /// Replaces the snapshot wholesale. On failure the previous snapshot stays.
    pub async fn load<F>(&mut self, fetch: F) -> bool
    where
        F: Future<Output = Result<Vec<T>, ApiError>>,
    {
        match fetch.await {
            Ok(records) => {
                debug!("Loaded {} {}", records.len(), T::KIND);
                self.snapshot = records;
                self.refilter();
                true
            }
            Err(e) => {
                error!("Error fetching {}: {}", T::KIND, e);
                false
            }
        }
    }

    pub fn filter(&self, query: &str) -> Vec<&T> {
        let needle = query.trim().to_lowercase();
        self.snapshot
            .iter()
            .filter(|record| needle.is_empty() || record.matches(&needle))
            .collect()
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.view = self.filter(&self.query).into_iter().cloned().collect();
    }

    pub fn begin_edit(&mut self, id: &Id) -> Result<&mut T, ScreenError> {
        let record = self
            .get(id)
            .cloned()
            .ok_or_else(|| ScreenError::UnknownRecord(id.clone()))?;
        Ok(self.editing.insert(record))
    }

    pub fn cancel_edit(&mut self) -> Option<T> {
        self.editing.take()
    }

    /// Sends the record being edited through `save` and swaps the reconciled
    /// result into the snapshot. Edit mode survives a failed save.
    pub async fn update<F, Fut>(&mut self, save: F) -> Result<bool, ScreenError>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let draft = self.editing.clone().ok_or(ScreenError::NotEditing)?;
        let id = draft.id().clone();
        match save(draft).await {
            Ok(record) => {
                self.replace(&id, record);
                self.editing = None;
                Ok(true)
            }
            Err(e) => {
                error!("Error updating {} {}: {}", T::KIND, id, e);
                Ok(false)
            }
        }
    }

    fn replace(&mut self, id: &Id, record: T) {
        for list in [&mut self.snapshot, &mut self.view] {
            if let Some(slot) = list.iter_mut().find(|r| r.id() == id) {
                *slot = record.clone();
            }
        }
    }

    pub async fn remove<F>(&mut self, id: &Id, request: F) -> bool
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        match request.await {
            Ok(()) => {
                self.forget(id);
                true
            }
            Err(e) => {
                error!("Error deleting {} {}: {}", T::KIND, id, e);
                false
            }
        }
    }

    /// Issues every delete at once; each acknowledgement is applied as it
    /// arrives. Returns how many were removed.
    pub async fn remove_all<'a, F, Fut>(&mut self, ids: &'a [Id], request: F) -> usize
    where
        F: Fn(&'a Id) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        let request = &request;
        let mut pending: FuturesUnordered<_> = ids
            .iter()
            .map(|id| async move { (id, request(id).await) })
            .collect();

        let mut removed = 0;
        while let Some((id, result)) = pending.next().await {
            match result {
                Ok(()) => {
                    self.forget(id);
                    removed += 1;
                }
                Err(e) => error!("Error deleting {} {}: {}", T::KIND, id, e),
            }
        }
        removed
    }

    fn forget(&mut self, id: &Id) {
        self.snapshot.retain(|record| record.id() != id);
        self.view.retain(|record| record.id() != id);
        if self.editing.as_ref().is_some_and(|record| record.id() == id) {
            self.editing = None;
        }
    }
}

/// Awaits a create request, logging a failure instead of returning it.
pub async fn create<F, R>(kind: &str, request: F) -> Option<R>
where
    F: Future<Output = Result<R, ApiError>>,
{
    match request.await {
        Ok(created) => Some(created),
        Err(e) => {
            error!("Error adding {}: {}", kind, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::offline;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Id,
        label: String,
    }

    impl Record for Row {
        const KIND: &'static str = "rows";
        fn id(&self) -> &Id {
            &self.id
        }
        fn search_fields(&self) -> Vec<&str> {
            vec![self.label.as_str()]
        }
    }

    fn row(id: u64, label: &str) -> Row {
        Row {
            id: Id::from(id),
            label: label.to_string(),
        }
    }

    fn ids(rows: &[Row]) -> Vec<u64> {
        rows.iter().map(|r| r.id.as_str().parse().unwrap()).collect()
    }

    async fn loaded() -> RemoteList<Row> {
        let mut list = RemoteList::default();
        let rows = vec![row(1, "City Museum"), row(2, "Lakefront Park"), row(3, "Deli")];
        assert!(list.load(async { Ok(rows) }).await);
        list
    }

    #[tokio::test]
    async fn load_keeps_previous_snapshot_on_failure() {
        let mut list = loaded().await;
        assert!(!list.load(async { Err(offline()) }).await);
        assert_eq!(ids(list.snapshot()), vec![1, 2, 3]);

        let mut empty = RemoteList::<Row>::default();
        empty.load(async { Err(offline()) }).await;
        assert!(empty.snapshot().is_empty());
    }

    #[tokio::test]
    async fn blank_query_matches_everything() {
        let list = loaded().await;
        assert_eq!(list.filter("").len(), 3);
        assert_eq!(list.filter("   ").len(), 3);
    }

    #[tokio::test]
    async fn filter_is_case_insensitive_substring() {
        let list = loaded().await;
        let hits = list.filter("museum");
        assert_eq!(hits, vec![&row(1, "City Museum")]);
        assert_eq!(list.filter(" PARK ").len(), 1);
        assert_eq!(list.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn search_narrows_view_only() {
        let mut list = loaded().await;
        list.search("de");
        assert_eq!(ids(list.view()), vec![3]);
        assert_eq!(ids(list.snapshot()), vec![1, 2, 3]);

        list.search("");
        assert_eq!(ids(list.view()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn remove_drops_from_snapshot_and_view() {
        let mut list = loaded().await;
        list.search("e");
        assert!(list.remove(&Id::from(3), async { Ok(()) }).await);
        assert_eq!(ids(list.snapshot()), vec![1, 2]);
        assert!(list.view().iter().all(|r| r.id != Id::from(3)));
    }

    #[tokio::test]
    async fn failed_remove_leaves_record_visible() {
        let mut list = loaded().await;
        assert!(!list.remove(&Id::from(2), async { Err(offline()) }).await);
        assert_eq!(ids(list.view()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn remove_all_applies_each_acknowledgement() {
        let mut list = loaded().await;
        let doomed = [Id::from(1), Id::from(2), Id::from(3)];
        let removed = list
            .remove_all(&doomed, |id| {
                let ok = id != &Id::from(2);
                async move {
                    if ok {
                        Ok(())
                    } else {
                        Err(offline())
                    }
                }
            })
            .await;
        assert_eq!(removed, 2);
        assert_eq!(ids(list.snapshot()), vec![2]);
    }

    #[tokio::test]
    async fn edit_mode_transitions() {
        let mut list = loaded().await;
        assert_eq!(
            list.begin_edit(&Id::from(9)).unwrap_err(),
            ScreenError::UnknownRecord(Id::from(9))
        );

        list.begin_edit(&Id::from(1)).unwrap().label = "Art Museum".to_string();
        assert_eq!(list.cancel_edit().map(|r| r.label), Some("Art Museum".to_string()));
        assert!(list.editing().is_none());
        assert_eq!(list.get(&Id::from(1)).unwrap().label, "City Museum");

        // only one record is edited at a time
        list.begin_edit(&Id::from(1)).unwrap();
        list.begin_edit(&Id::from(2)).unwrap();
        assert_eq!(list.editing().unwrap().id, Id::from(2));
    }

    #[tokio::test]
    async fn update_success_replaces_and_leaves_edit_mode() {
        let mut list = loaded().await;
        list.search("park");
        list.begin_edit(&Id::from(2)).unwrap().label = "Lake Park".to_string();

        let saved = list.update(|row| async move { Ok(row) }).await.unwrap();
        assert!(saved);
        assert!(list.editing().is_none());
        assert_eq!(list.get(&Id::from(2)).unwrap().label, "Lake Park");
        assert_eq!(list.view()[0].label, "Lake Park");
    }

    #[tokio::test]
    async fn update_failure_stays_in_edit_mode() {
        let mut list = loaded().await;
        list.begin_edit(&Id::from(2)).unwrap().label = "Lake Park".to_string();

        let saved = list.update(|_| async { Err(offline()) }).await.unwrap();
        assert!(!saved);
        assert_eq!(list.editing().unwrap().label, "Lake Park");
        assert_eq!(list.get(&Id::from(2)).unwrap().label, "Lakefront Park");
    }

    #[tokio::test]
    async fn update_requires_edit_mode() {
        let mut list = loaded().await;
        let result = list.update(|row| async move { Ok(row) }).await;
        assert_eq!(result, Err(ScreenError::NotEditing));
    }

    #[tokio::test]
    async fn create_swallows_failures() {
        assert_eq!(create("rows", async { Ok::<_, ApiError>(5) }).await, Some(5));
        assert_eq!(create::<_, u8>("rows", async { Err(offline()) }).await, None);
    }
}
