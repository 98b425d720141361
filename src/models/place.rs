use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

use super::Id;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq, Default)]
pub enum PlaceType {
    #[default]
    Attraction,
    Restaurant,
    /// Any other category the backend stores (Park, Museum, ...)
    #[serde(other)]
    #[value(skip)]
    Other,
}

impl PlaceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attraction => "Attraction",
            Self::Restaurant => "Restaurant",
            Self::Other => "Other",
        }
    }

    pub const fn is_other(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub id: Id,
    #[serde(rename = "type", alias = "category")]
    pub kind: PlaceType,
    pub name: String,
    #[serde(default, alias = "location_address")]
    pub address: String,
    /// External place identifier (Google Place ID)
    #[serde(default)]
    pub code: String,
}

impl Place {
    pub fn draft(&self) -> PlaceDraft {
        PlaceDraft {
            kind: self.kind,
            name: self.name.clone(),
            address: self.address.clone(),
            code: self.code.clone(),
        }
    }
}

/// Editable fields of a place
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlaceField {
    Type,
    Name,
    Address,
    Code,
}

/// Body of `POST /api/places` and `PUT /api/places/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceDraft {
    pub kind: PlaceType,
    pub name: String,
    pub address: String,
    pub code: String,
}

impl PlaceDraft {
    pub fn set(&mut self, field: PlaceField, value: &str) -> Result<(), String> {
        let value = value.trim();
        match field {
            PlaceField::Type => self.kind = PlaceType::from_str(value, true)?,
            PlaceField::Name => self.name = value.to_string(),
            PlaceField::Address => self.address = value.to_string(),
            PlaceField::Code => self.code = value.to_string(),
        }
        Ok(())
    }

    /// Every text field is required.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("address", &self.address),
            ("code", &self.code),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(format!("`{}` is required", field)),
            None => Ok(()),
        }
    }

    pub fn into_place(self, id: Id) -> Place {
        Place {
            id,
            kind: self.kind,
            name: self.name,
            address: self.address,
            code: self.code,
        }
    }
}

// The backend stores `category` and `location_address`; the form names are
// sent alongside them. An `Other` category is left out so the stored one stays.
impl Serialize for PlaceDraft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "type", skip_serializing_if = "PlaceType::is_other")]
            kind: PlaceType,
            #[serde(skip_serializing_if = "PlaceType::is_other")]
            category: PlaceType,
            name: &'a str,
            address: &'a str,
            location_address: &'a str,
            code: &'a str,
        }

        Body {
            kind: self.kind,
            category: self.kind,
            name: &self.name,
            address: &self.address,
            location_address: &self.address,
            code: &self.code,
        }
        .serialize(serializer)
    }
}

/// Acknowledgement of a create request
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Created {
    #[serde(default)]
    pub id: Option<Id>,
}
