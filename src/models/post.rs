use serde::{Deserialize, Serialize};

use super::{Id, Place, PlaceType};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Id,
    #[serde(default, alias = "user", alias = "username")]
    pub user_name: String,
    #[serde(default, alias = "description")]
    pub content: String,
    #[serde(default)]
    pub place_id: Option<Id>,
    // denormalized from the referenced place
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub place_type: Option<PlaceType>,
}

impl Post {
    /// Point the post at `place`, refreshing the denormalized fields.
    pub fn relocate(self, place: &Place) -> Self {
        Self {
            place_id: Some(place.id.clone()),
            place_name: Some(place.name.clone()),
            place_type: Some(place.kind),
            ..self
        }
    }
}

/// Body of `PUT /api/posts/{id}`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub place_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_accepts_user_aliases() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[{"id":1,"user":"ana","content":"hi","place_id":3,"place_name":"Deli","place_type":"Restaurant"},
                {"id":"p2","username":"bo","description":"trip","title":"x"}]"#,
        )
        .unwrap();
        assert_eq!(posts[0].user_name, "ana");
        assert_eq!(posts[0].place_id, Some(Id::from(3)));
        assert_eq!(posts[1].user_name, "bo");
        assert_eq!(posts[1].content, "trip");
        assert_eq!(posts[1].place_type, None);
    }

    #[test]
    fn relocate_refreshes_denormalized_fields() {
        let post = Post {
            id: Id::from(1),
            user_name: "ana".to_string(),
            content: String::new(),
            place_id: Some(Id::from(2)),
            place_name: Some("Old".to_string()),
            place_type: Some(PlaceType::Attraction),
        };
        let place = Place {
            id: Id::from(5),
            kind: PlaceType::Restaurant,
            name: "Deli".to_string(),
            address: String::new(),
            code: String::new(),
        };
        let post = post.relocate(&place);
        assert_eq!(post.place_id, Some(Id::from(5)));
        assert_eq!(post.place_name.as_deref(), Some("Deli"));
        assert_eq!(post.place_type, Some(PlaceType::Restaurant));
    }
}
