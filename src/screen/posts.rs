use std::{collections::HashMap, fmt};

use log::warn;

use crate::{
    api::AdminApi,
    models::{Id, Place, Post, PostPatch},
    resource::{Record, RemoteList},
};

use super::ScreenError;

impl Record for Post {
    const KIND: &'static str = "posts";

    fn id(&self) -> &Id {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.user_name.as_str()]
    }
}

/// Partitions posts by author, in order of first appearance.
pub fn group_by_user<'a>(posts: &'a [Post]) -> Vec<(&'a str, Vec<&'a Post>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Post>)> = vec![];
    for post in posts {
        let name = post.user_name.as_str();
        match index.get(name) {
            Some(&at) => groups[at].1.push(post),
            None => {
                index.insert(name, groups.len());
                groups.push((name, vec![post]));
            }
        }
    }
    groups
}

/// Posts grouped by user, with the place list used to reassign them
#[derive(Debug, Default)]
pub struct PostsScreen {
    posts: RemoteList<Post>,
    places: RemoteList<Place>,
}

impl PostsScreen {
    /// Posts and places are fetched side by side and fail independently.
    pub async fn load(&mut self, api: &impl AdminApi) -> bool {
        let (posts, _) = tokio::join!(
            self.posts.load(api.list_posts()),
            self.places.load(api.list_places())
        );
        posts
    }

    pub fn groups(&self) -> Vec<(&str, Vec<&Post>)> {
        group_by_user(self.posts.view())
    }

    pub fn search(&mut self, query: &str) {
        self.posts.search(query);
    }

    pub fn edit(&mut self, id: &Id) -> Result<(), ScreenError> {
        self.posts.begin_edit(id)?;
        Ok(())
    }

    pub fn choose_place(&mut self, place_id: Id) -> Result<(), ScreenError> {
        self.posts.editing_mut()?.place_id = Some(place_id);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.posts.cancel_edit();
    }

    /// Looks the chosen place up in the held list, refreshing the list once
    /// when it is missing. An unknown place is rejected before any request.
    async fn resolve_place(
        &mut self,
        api: &impl AdminApi,
        place_id: &Id,
    ) -> Result<Place, ScreenError> {
        if let Some(place) = self.places.get(place_id) {
            return Ok(place.clone());
        }

        warn!("Place {} is not in the loaded list, refreshing places", place_id);
        self.places.load(api.list_places()).await;
        self.places
            .get(place_id)
            .cloned()
            .ok_or_else(|| ScreenError::UnknownPlace(place_id.clone()))
    }

    pub async fn save(&mut self, api: &impl AdminApi) -> Result<bool, ScreenError> {
        let post = self.posts.editing().ok_or(ScreenError::NotEditing)?;
        let place_id = post
            .place_id
            .clone()
            .ok_or_else(|| ScreenError::Invalid("choose a place first".to_string()))?;

        let place = self.resolve_place(api, &place_id).await?;
        let patch = PostPatch {
            place_id: place.id.clone(),
        };

        self.posts
            .update(|post| async move {
                let result = api.update_post(&post.id, &patch).await;
                result.map(|()| post.relocate(&place))
            })
            .await
    }

    pub async fn delete(&mut self, api: &impl AdminApi, id: &Id) -> bool {
        self.posts.remove(id, api.delete_post(id)).await
    }

    pub async fn delete_all(&mut self, api: &impl AdminApi, ids: &[Id]) -> usize {
        self.posts.remove_all(ids, |id| api.delete_post(id)).await
    }
}

impl fmt::Display for PostsScreen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Admin · User Posts")?;
        if !self.posts.query().is_empty() {
            writeln!(f, "Search: {}", self.posts.query())?;
        }
        writeln!(f)?;

        let groups = self.groups();
        if groups.is_empty() {
            return writeln!(f, "No posts found.");
        }

        let editing = self.posts.editing();
        for (user, posts) in groups {
            writeln!(f, "User: {}", user)?;
            for post in posts {
                match editing.filter(|e| e.id == post.id) {
                    Some(draft) => {
                        let chosen = draft.place_id.as_ref().map(Id::as_str).unwrap_or("-");
                        writeln!(f, "  * editing [{}], place: {}", post.id, chosen)?;
                    }
                    None => writeln!(
                        f,
                        "  Place: {} ({})  [{}]",
                        post.place_name.as_deref().unwrap_or("-"),
                        post.place_type.map(|t| t.as_str()).unwrap_or("-"),
                        post.id
                    )?,
                }
            }
        }

        if editing.is_some() {
            writeln!(f)?;
            writeln!(f, "Places:")?;
            for place in self.places.snapshot() {
                writeln!(f, "  {}  {} ({})", place.id, place.name, place.kind)?;
            }
        }
        Ok(())
    }
}
