use crate::error::GatewayError;
use crate::models::{Amenities, PriceRange, Property};
use crate::store::query::{ListingFilters, QueryDescriptor, SortDirection};
use crate::store::traits::RecordStore;
use crate::store::types::{FavoritePatch, UpdateRequest};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// Table holding property records on the store
const PROPERTY_TABLE: &str = "property";

/// Typed access to the property inventory held by the external record store.
///
/// Every operation is single-shot: one store request per call (two for the
/// favorite toggle), no retries, no caching. Listing fetches and the toggle
/// propagate failures; the by-id lookup and the facet helpers degrade to a
/// safe default instead, which is what the listing pages expect.
pub struct PropertyGateway<S> {
    store: S,
}

impl<S: RecordStore> PropertyGateway<S> {
    /// Create a gateway over an already-constructed store connection
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch every property matching the given filters
    pub async fn fetch_all(
        &self,
        filters: &ListingFilters,
    ) -> Result<Vec<Property>, GatewayError> {
        self.run_listing_query("fetching properties", QueryDescriptor::listing(filters))
            .await
    }

    /// Fetch the properties the user has marked as favorites
    pub async fn fetch_favorites(&self) -> Result<Vec<Property>, GatewayError> {
        self.run_listing_query("fetching favorite properties", QueryDescriptor::favorites())
            .await
    }

    /// Free-text search across title, city, state, address and description
    pub async fn search(&self, text: &str) -> Result<Vec<Property>, GatewayError> {
        self.run_listing_query("searching properties", QueryDescriptor::search(text))
            .await
    }

    /// Look up a single property.
    ///
    /// Returns `None` both when the record does not exist and when the store
    /// reports a failure; detail pages treat a missing record and a failed
    /// lookup the same way.
    pub async fn fetch_by_id(&self, id: i64) -> Option<Property> {
        let query = QueryDescriptor::by_id();
        let response = match self.store.get_record_by_id(PROPERTY_TABLE, id, &query).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error fetching property with ID {id}: {e:#}");
                return None;
            }
        };

        if !response.success {
            warn!(
                "Error fetching property with ID {id}: {}",
                store_message(response.message)
            );
            return None;
        }

        match serde_json::from_value(response.data?) {
            Ok(property) => Some(property),
            Err(e) => {
                warn!("Error fetching property with ID {id}: undecodable record: {e}");
                None
            }
        }
    }

    /// Flip the favorite flag on a property.
    ///
    /// Two sequential store calls: read the current record, then submit a
    /// partial update carrying only the flag. The read and the write are not
    /// atomic with respect to concurrent store mutation.
    pub async fn toggle_favorite(&self, id: i64) -> Result<Property, GatewayError> {
        let current = match self.fetch_by_id(id).await {
            Some(property) => property,
            None => {
                error!("Error toggling favorite: property {id} not found");
                return Err(GatewayError::NotFound(id));
            }
        };
        let target = !current.is_favorite;

        let request = UpdateRequest {
            records: vec![FavoritePatch {
                id,
                is_favorite: target,
            }],
        };
        let response = self
            .store
            .update_records(PROPERTY_TABLE, &request)
            .await
            .map_err(|e| {
                error!("Error toggling favorite: {e:#}");
                GatewayError::Transport(e)
            })?;

        if !response.success {
            let message = store_message(response.message);
            error!("Error toggling favorite: {message}");
            return Err(GatewayError::Store(message));
        }

        let results = match response.results {
            Some(results) => results,
            // No per-record results echoed; apply the flag locally.
            None => return Ok(Property { is_favorite: target, ..current }),
        };

        let failed: Vec<_> = results.iter().filter(|result| !result.success).collect();
        if !failed.is_empty() {
            error!(
                "Failed to toggle favorite for property {id}: {} record(s) rejected",
                failed.len()
            );
            // Surface the first field-level error; a record-level message
            // only wins for entries that carry no field errors at all.
            for result in &failed {
                if let Some(field_error) = result.errors.first() {
                    return Err(GatewayError::Validation {
                        field_label: field_error.field_label.clone(),
                        message: field_error.message.clone(),
                    });
                }
                if let Some(message) = &result.message {
                    return Err(GatewayError::Store(message.clone()));
                }
            }
            return Err(GatewayError::Store("record update failed".to_string()));
        }

        let echoed = results
            .iter()
            .find(|result| result.success)
            .and_then(|result| result.data.clone());
        match echoed {
            Some(row) => serde_json::from_value(row).map_err(|e| {
                error!("Error toggling favorite: undecodable record: {e}");
                GatewayError::Transport(e.into())
            }),
            None => Ok(Property { is_favorite: target, ..current }),
        }
    }

    /// Distinct property types present in the inventory, unordered.
    /// Empty on store failure; the filter dropdown renders that as "no
    /// choices" rather than an error.
    pub async fn distinct_property_types(&self) -> Vec<String> {
        let query = QueryDescriptor::projection(&["propertyType"]).grouped_by("propertyType");
        let rows = match self.narrow_fetch("fetching property types", query).await {
            Some(rows) => rows,
            None => return Vec::new(),
        };

        let mut seen = HashSet::new();
        rows.iter()
            .filter_map(|row| row.get("propertyType").and_then(Value::as_str))
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .map(|kind| kind.to_string())
            .filter(|kind| seen.insert(kind.clone()))
            .collect()
    }

    /// Every amenity mentioned across the inventory, deduplicated and
    /// sorted. Empty on store failure.
    pub async fn all_amenities(&self) -> Vec<String> {
        let query = QueryDescriptor::projection(&["amenities"]);
        let rows = match self.narrow_fetch("fetching amenities", query).await {
            Some(rows) => rows,
            None => return Vec::new(),
        };

        let mut amenities: Vec<String> = rows
            .iter()
            .filter_map(|row| row.get("amenities"))
            .filter_map(|value| serde_json::from_value::<Amenities>(value.clone()).ok())
            .flat_map(|wire| wire.normalize())
            .collect();
        amenities.sort();
        amenities.dedup();
        amenities
    }

    /// Observed min/max asking price. Falls back to the default range when
    /// the inventory is empty or the store fails.
    pub async fn price_range(&self) -> PriceRange {
        let query = QueryDescriptor::projection(&["price"]).sorted_by("price", SortDirection::Asc);
        let rows = match self.narrow_fetch("fetching price range", query).await {
            Some(rows) => rows,
            None => return PriceRange::default(),
        };

        let prices: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.get("price"))
            .filter_map(numeric_value)
            .collect();
        if prices.is_empty() {
            return PriceRange::default();
        }

        PriceRange {
            min: prices.iter().copied().fold(f64::INFINITY, f64::min),
            max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Shared fetch-decode path for the listing operations
    async fn run_listing_query(
        &self,
        operation: &str,
        query: QueryDescriptor,
    ) -> Result<Vec<Property>, GatewayError> {
        let response = self
            .store
            .fetch_records(PROPERTY_TABLE, &query)
            .await
            .map_err(|e| {
                error!("Error {operation}: {e:#}");
                GatewayError::Transport(e)
            })?;

        if !response.success {
            let message = store_message(response.message);
            error!("Error {operation}: {message}");
            return Err(GatewayError::Store(message));
        }

        let rows = response.data.unwrap_or_default();
        debug!("{operation}: {} record(s) returned", rows.len());
        rows.into_iter()
            .map(serde_json::from_value::<Property>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                error!("Error {operation}: undecodable record: {e}");
                GatewayError::Transport(e.into())
            })
    }

    /// Fetch for the facet helpers: failures are logged and swallowed, the
    /// caller substitutes its safe default
    async fn narrow_fetch(&self, operation: &str, query: QueryDescriptor) -> Option<Vec<Value>> {
        match self.store.fetch_records(PROPERTY_TABLE, &query).await {
            Ok(response) if response.success => Some(response.data.unwrap_or_default()),
            Ok(response) => {
                warn!("Error {operation}: {}", store_message(response.message));
                None
            }
            Err(e) => {
                warn!("Error {operation}: {e:#}");
                None
            }
        }
    }
}

/// Prices come back as JSON numbers or numeric strings depending on the
/// record's age; anything else is discarded
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn store_message(message: Option<String>) -> String {
    message.unwrap_or_else(|| "record store reported a failure".to_string())
}
