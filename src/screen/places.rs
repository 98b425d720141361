use std::fmt;

use crate::{
    api::AdminApi,
    models::{Id, Place, PlaceDraft, PlaceField, PlaceType},
    resource::{Record, RemoteList},
};

use super::ScreenError;

impl Record for Place {
    const KIND: &'static str = "places";

    fn id(&self) -> &Id {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.kind.as_str(),
            self.name.as_str(),
            self.address.as_str(),
            self.code.as_str(),
        ]
    }
}

/// All attractions and restaurants, searched on demand
#[derive(Debug, Default)]
pub struct PlacesScreen {
    places: RemoteList<Place>,
}

impl PlacesScreen {
    pub async fn load(&mut self, api: &impl AdminApi) -> bool {
        self.places.load(api.list_places()).await
    }

    pub fn search(&mut self, query: &str) {
        self.places.search(query);
    }

    pub fn attractions(&self) -> Vec<&Place> {
        self.of_kind(PlaceType::Attraction)
    }

    pub fn restaurants(&self) -> Vec<&Place> {
        self.of_kind(PlaceType::Restaurant)
    }

    fn of_kind(&self, kind: PlaceType) -> Vec<&Place> {
        self.places.view().iter().filter(|p| p.kind == kind).collect()
    }

    pub fn edit(&mut self, id: &Id) -> Result<(), ScreenError> {
        self.places.begin_edit(id)?;
        Ok(())
    }

    pub fn set(&mut self, field: PlaceField, value: &str) -> Result<(), ScreenError> {
        let place = self.places.editing_mut()?;
        let mut draft = place.draft();
        draft.set(field, value).map_err(ScreenError::Invalid)?;
        *place = draft.into_place(place.id.clone());
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.places.cancel_edit();
    }

    pub async fn save(&mut self, api: &impl AdminApi) -> Result<bool, ScreenError> {
        let place = self.places.editing().ok_or(ScreenError::NotEditing)?;
        place.draft().validate().map_err(ScreenError::Invalid)?;

        self.places
            .update(|place| async move {
                let result = api.update_place(&place).await;
                result.map(|()| place)
            })
            .await
    }

    pub async fn delete(&mut self, api: &impl AdminApi, id: &Id) -> bool {
        self.places.remove(id, api.delete_place(id)).await
    }

    pub async fn delete_all(&mut self, api: &impl AdminApi, ids: &[Id]) -> usize {
        self.places.remove_all(ids, |id| api.delete_place(id)).await
    }
}

fn write_group(f: &mut fmt::Formatter, title: &str, places: &[&Place]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    for place in places {
        writeln!(f, "  {} - {}  [{}]", place.kind, place.name, place.id)?;
        writeln!(f, "      {} · {}", place.address, place.code)?;
    }
    if places.is_empty() {
        writeln!(f, "  No results")?;
    }
    Ok(())
}

impl fmt::Display for PlacesScreen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Admin · All Attractions/Restaurants")?;
        if !self.places.query().is_empty() {
            writeln!(f, "Search: {}", self.places.query())?;
        }
        writeln!(f)?;
        write_group(f, "Attractions", &self.attractions())?;
        writeln!(f)?;
        write_group(f, "Restaurants", &self.restaurants())?;

        if let Some(place) = self.places.editing() {
            let PlaceDraft {
                kind,
                name,
                address,
                code,
            } = place.draft();
            writeln!(f)?;
            writeln!(f, "Editing {}", place.id)?;
            writeln!(f, "  type:    {}", kind)?;
            writeln!(f, "  name:    {}", name)?;
            writeln!(f, "  address: {}", address)?;
            writeln!(f, "  code:    {}", code)?;
        }
        Ok(())
    }
}
