use std::fmt;

use log::info;

use crate::{
    api::AdminApi,
    models::{PlaceDraft, PlaceField},
    resource,
};

use super::ScreenError;

pub const ADDED: &str = "Place added successfully!";

/// Form for a new attraction or restaurant
#[derive(Debug, Default)]
pub struct AddPlaceForm {
    draft: PlaceDraft,
}

impl AddPlaceForm {
    pub fn with_draft(draft: PlaceDraft) -> Self {
        Self { draft }
    }

    pub fn set(&mut self, field: PlaceField, value: &str) -> Result<(), ScreenError> {
        self.draft.set(field, value).map_err(ScreenError::Invalid)
    }

    /// The form resets only once the server acknowledged the place.
    pub async fn submit(&mut self, api: &impl AdminApi) -> Result<bool, ScreenError> {
        self.draft.validate().map_err(ScreenError::Invalid)?;

        match resource::create("place", api.create_place(&self.draft)).await {
            Some(created) => {
                if let Some(id) = created.id {
                    info!("Created place {}", id);
                }
                self.draft = PlaceDraft::default();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl fmt::Display for AddPlaceForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Admin · Add Attraction/Restaurant")?;
        writeln!(f)?;
        writeln!(f, "  type:    {}", self.draft.kind)?;
        writeln!(f, "  name:    {}", self.draft.name)?;
        writeln!(f, "  address: {}", self.draft.address)?;
        writeln!(f, "  code:    {}", self.draft.code)
    }
}
