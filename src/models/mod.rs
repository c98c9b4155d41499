use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Amenity list as the store hands it back. Older records carry one
/// comma-delimited string, newer ones a proper list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Amenities {
    List(Vec<String>),
    Csv(String),
}

impl Default for Amenities {
    fn default() -> Self {
        Amenities::List(Vec::new())
    }
}

impl Amenities {
    /// Normalize either wire form into trimmed, non-empty entries.
    /// Deduplication is case-sensitive and keeps the first occurrence.
    pub fn normalize(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Amenities::Csv(joined) => joined.split(',').collect(),
            Amenities::List(items) => items.iter().map(String::as_str).collect(),
        };

        let mut seen = HashSet::new();
        raw.into_iter()
            .map(str::trim)
            .filter(|amenity| !amenity.is_empty())
            .map(|amenity| amenity.to_string())
            .filter(|amenity| seen.insert(amenity.clone()))
            .collect()
    }
}

/// Property record as held by the record store.
///
/// Only `id` is required on the wire; the store omits attributes a record
/// was created without, so everything else falls back to its default. The
/// favorite flag is the one field this crate ever writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "Id")]
    pub id: i64,
    /// Store-managed system fields
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Tags", default)]
    pub tags: Option<String>,
    #[serde(rename = "Owner", default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub square_feet: u32,
    #[serde(default)]
    pub year_built: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Externally defined vocabulary, e.g. "House" or "Apartment"
    #[serde(default)]
    pub property_type: String,
    /// Externally defined vocabulary, e.g. "sale" or "rent"
    #[serde(default)]
    pub listing_type: String,

    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Amenities,

    #[serde(default)]
    pub is_favorite: bool,
}

/// Observed price bounds across the inventory. The default range keeps the
/// price slider usable when the inventory is empty or unreachable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1_000_000.0,
        }
    }
}
