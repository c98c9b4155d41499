use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Every attribute of a property record, in schema order. The store-managed
/// system fields (Name, Tags, Owner) come first.
pub const PROPERTY_FIELDS: [&str; 21] = [
    "Name",
    "Tags",
    "Owner",
    "title",
    "price",
    "address",
    "city",
    "state",
    "zipCode",
    "bedrooms",
    "bathrooms",
    "squareFeet",
    "propertyType",
    "listingType",
    "images",
    "description",
    "amenities",
    "yearBuilt",
    "latitude",
    "longitude",
    "isFavorite",
];

/// User-facing search filters for the listing inventory
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListingFilters {
    /// Free-text location, matched against city, state and address
    pub location: Option<String>,
    /// Minimum asking price
    pub min_price: Option<f64>,
    /// Maximum asking price
    pub max_price: Option<f64>,
    /// Minimum number of bedrooms
    pub min_beds: Option<u32>,
    /// Maximum number of bedrooms
    pub max_beds: Option<u32>,
    /// Property types to match exactly (any of)
    pub property_types: Vec<String>,
    /// Amenities the listing must mention (any of)
    pub amenities: Vec<String>,
}

/// Comparison operators understood by the record store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchOperator {
    ExactMatch,
    Contains,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

/// Top-level AND-ed condition. The store expects PascalCase keys here,
/// unlike conditions nested inside an OR group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhereCondition {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: MatchOperator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

impl WhereCondition {
    pub fn new(field_name: &str, operator: MatchOperator, values: Vec<Value>) -> Self {
        Self {
            field_name: field_name.to_string(),
            operator,
            values,
        }
    }
}

/// Condition nested inside an OR sub-group (camelCase keys)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupCondition {
    pub field_name: String,
    pub operator: MatchOperator,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    Or,
    And,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubGroup {
    pub conditions: Vec<GroupCondition>,
    pub operator: GroupOperator,
}

/// Grouped conditions. The store ORs the sub-groups together; each of our
/// sub-groups holds a single condition, so the net effect is one logical OR
/// across fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: GroupOperator,
    pub sub_groups: Vec<SubGroup>,
}

impl WhereGroup {
    /// OR-group matching `needle` as a substring of any of `fields`
    pub fn any_contains(fields: &[&str], needle: &str) -> Self {
        Self {
            operator: GroupOperator::Or,
            sub_groups: fields
                .iter()
                .map(|field| SubGroup {
                    conditions: vec![GroupCondition {
                        field_name: field.to_string(),
                        operator: MatchOperator::Contains,
                        values: vec![json!(needle)],
                    }],
                    operator: GroupOperator::Or,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub field_name: String,
    pub sorttype: SortDirection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub field: FieldName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSpec {
    fn named(name: &str) -> Self {
        Self {
            field: FieldName {
                name: name.to_string(),
            },
        }
    }
}

/// Normalized query sent to the record store: projection, AND-ed scalar
/// conditions, OR-groups, sort order and paging.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub fields: Vec<FieldSpec>,
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty", default)]
    pub conditions: Vec<WhereCondition>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub where_groups: Vec<WhereGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub order_by: Vec<SortSpec>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paging_info: Option<PagingInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub group_by: Vec<String>,
}

impl QueryDescriptor {
    /// Full projection over every property attribute
    fn full() -> Self {
        Self {
            fields: PROPERTY_FIELDS.iter().map(|f| FieldSpec::named(f)).collect(),
            ..Default::default()
        }
    }

    /// Narrow projection used by the facet helpers
    pub fn projection(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| FieldSpec::named(f)).collect(),
            ..Default::default()
        }
    }

    pub fn grouped_by(mut self, field: &str) -> Self {
        self.group_by.push(field.to_string());
        self
    }

    pub fn sorted_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by.push(SortSpec {
            field_name: field.to_string(),
            sorttype: direction,
        });
        self
    }

    /// Descriptor for a filtered inventory listing.
    ///
    /// Absent filter fields emit no condition at all; empty type/amenity
    /// lists and an empty location string count as absent.
    pub fn listing(filters: &ListingFilters) -> Self {
        let mut query = Self::full().sorted_by("title", SortDirection::Asc);
        query.paging_info = Some(PagingInfo {
            limit: 100,
            offset: 0,
        });

        if let Some(location) = filters.location.as_deref().filter(|l| !l.is_empty()) {
            query
                .where_groups
                .push(WhereGroup::any_contains(&["city", "state", "address"], location));
        }

        if let Some(min) = filters.min_price {
            query.conditions.push(WhereCondition::new(
                "price",
                MatchOperator::GreaterThanOrEqualTo,
                vec![json!(min)],
            ));
        }

        if let Some(max) = filters.max_price {
            query.conditions.push(WhereCondition::new(
                "price",
                MatchOperator::LessThanOrEqualTo,
                vec![json!(max)],
            ));
        }

        if let Some(min) = filters.min_beds {
            query.conditions.push(WhereCondition::new(
                "bedrooms",
                MatchOperator::GreaterThanOrEqualTo,
                vec![json!(min)],
            ));
        }

        if let Some(max) = filters.max_beds {
            query.conditions.push(WhereCondition::new(
                "bedrooms",
                MatchOperator::LessThanOrEqualTo,
                vec![json!(max)],
            ));
        }

        if !filters.property_types.is_empty() {
            query.conditions.push(WhereCondition::new(
                "propertyType",
                MatchOperator::ExactMatch,
                filters.property_types.iter().map(|t| json!(t)).collect(),
            ));
        }

        if !filters.amenities.is_empty() {
            query.conditions.push(WhereCondition::new(
                "amenities",
                MatchOperator::Contains,
                filters.amenities.iter().map(|a| json!(a)).collect(),
            ));
        }

        query
    }

    /// Descriptor for a single-record lookup: projection only
    pub fn by_id() -> Self {
        Self::full()
    }

    /// Descriptor for the favorites shelf
    pub fn favorites() -> Self {
        let mut query = Self::full().sorted_by("title", SortDirection::Asc);
        query.conditions.push(WhereCondition::new(
            "isFavorite",
            MatchOperator::ExactMatch,
            vec![json!(true)],
        ));
        query
    }

    /// Descriptor for free-text search across the listing's text fields
    pub fn search(text: &str) -> Self {
        let mut query = Self::full().sorted_by("title", SortDirection::Asc);
        query.where_groups.push(WhereGroup::any_contains(
            &["title", "city", "state", "address", "description"],
            text,
        ));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_emit_no_conditions() {
        let query = QueryDescriptor::listing(&ListingFilters::default());

        assert!(query.conditions.is_empty());
        assert!(query.where_groups.is_empty());
        assert_eq!(query.fields.len(), PROPERTY_FIELDS.len());
        assert_eq!(
            query.order_by,
            vec![SortSpec {
                field_name: "title".to_string(),
                sorttype: SortDirection::Asc,
            }]
        );
        assert_eq!(query.paging_info, Some(PagingInfo { limit: 100, offset: 0 }));
    }

    #[test]
    fn price_and_bedroom_bounds_become_range_conditions() {
        let filters = ListingFilters {
            min_price: Some(250_000.0),
            max_price: Some(750_000.0),
            min_beds: Some(2),
            max_beds: Some(4),
            ..Default::default()
        };
        let query = QueryDescriptor::listing(&filters);

        assert_eq!(
            query.conditions,
            vec![
                WhereCondition::new(
                    "price",
                    MatchOperator::GreaterThanOrEqualTo,
                    vec![json!(250_000.0)]
                ),
                WhereCondition::new(
                    "price",
                    MatchOperator::LessThanOrEqualTo,
                    vec![json!(750_000.0)]
                ),
                WhereCondition::new(
                    "bedrooms",
                    MatchOperator::GreaterThanOrEqualTo,
                    vec![json!(2)]
                ),
                WhereCondition::new("bedrooms", MatchOperator::LessThanOrEqualTo, vec![json!(4)]),
            ]
        );
    }

    #[test]
    fn type_and_amenity_lists_pass_through_verbatim() {
        let filters = ListingFilters {
            property_types: vec!["House".to_string(), "Condo".to_string()],
            amenities: vec!["Pool".to_string()],
            ..Default::default()
        };
        let query = QueryDescriptor::listing(&filters);

        assert_eq!(
            query.conditions,
            vec![
                WhereCondition::new(
                    "propertyType",
                    MatchOperator::ExactMatch,
                    vec![json!("House"), json!("Condo")]
                ),
                WhereCondition::new("amenities", MatchOperator::Contains, vec![json!("Pool")]),
            ]
        );
    }

    #[test]
    fn empty_lists_count_as_absent() {
        let filters = ListingFilters {
            property_types: Vec::new(),
            amenities: Vec::new(),
            ..Default::default()
        };
        let query = QueryDescriptor::listing(&filters);
        assert!(query.conditions.is_empty());
    }

    #[test]
    fn empty_location_counts_as_absent() {
        let filters = ListingFilters {
            location: Some(String::new()),
            ..Default::default()
        };
        let query = QueryDescriptor::listing(&filters);
        assert!(query.where_groups.is_empty());
    }

    #[test]
    fn location_builds_an_or_group_over_three_fields() {
        let filters = ListingFilters {
            location: Some("Portland".to_string()),
            ..Default::default()
        };
        let query = QueryDescriptor::listing(&filters);

        assert_eq!(query.where_groups.len(), 1);
        let group = &query.where_groups[0];
        assert_eq!(group.operator, GroupOperator::Or);

        let fields: Vec<&str> = group
            .sub_groups
            .iter()
            .map(|sub| sub.conditions[0].field_name.as_str())
            .collect();
        assert_eq!(fields, vec!["city", "state", "address"]);
        for sub in &group.sub_groups {
            assert_eq!(sub.conditions.len(), 1);
            assert_eq!(sub.conditions[0].operator, MatchOperator::Contains);
            assert_eq!(sub.conditions[0].values, vec![json!("Portland")]);
        }
    }

    #[test]
    fn search_covers_all_five_text_fields() {
        let query = QueryDescriptor::search("lake");

        assert!(query.conditions.is_empty());
        assert_eq!(query.where_groups.len(), 1);
        let fields: Vec<&str> = query.where_groups[0]
            .sub_groups
            .iter()
            .map(|sub| sub.conditions[0].field_name.as_str())
            .collect();
        assert_eq!(fields, vec!["title", "city", "state", "address", "description"]);
    }

    #[test]
    fn favorites_pins_exactly_one_flag_condition() {
        let query = QueryDescriptor::favorites();
        assert_eq!(
            query.conditions,
            vec![WhereCondition::new(
                "isFavorite",
                MatchOperator::ExactMatch,
                vec![json!(true)]
            )]
        );
        assert!(query.where_groups.is_empty());
    }

    #[test]
    fn by_id_is_projection_only() {
        let query = QueryDescriptor::by_id();
        assert_eq!(query.fields.len(), PROPERTY_FIELDS.len());
        assert!(query.conditions.is_empty());
        assert!(query.where_groups.is_empty());
        assert!(query.order_by.is_empty());
        assert!(query.paging_info.is_none());
    }

    // The store's wire contract mixes key casings; pin it exactly.
    #[test]
    fn serialization_matches_the_store_contract() {
        let filters = ListingFilters {
            location: Some("Austin".to_string()),
            min_price: Some(100_000.0),
            ..Default::default()
        };
        let wire = serde_json::to_value(QueryDescriptor::listing(&filters)).unwrap();

        assert_eq!(wire["fields"][0]["field"]["Name"], json!("Name"));
        assert_eq!(wire["where"][0]["FieldName"], json!("price"));
        assert_eq!(wire["where"][0]["Operator"], json!("GreaterThanOrEqualTo"));
        assert_eq!(wire["where"][0]["Values"], json!([100_000.0]));
        assert_eq!(wire["whereGroups"][0]["operator"], json!("OR"));
        assert_eq!(
            wire["whereGroups"][0]["subGroups"][0]["conditions"][0]["fieldName"],
            json!("city")
        );
        assert_eq!(
            wire["whereGroups"][0]["subGroups"][0]["conditions"][0]["operator"],
            json!("Contains")
        );
        assert_eq!(wire["orderBy"][0]["fieldName"], json!("title"));
        assert_eq!(wire["orderBy"][0]["sorttype"], json!("ASC"));
        assert_eq!(wire["pagingInfo"]["limit"], json!(100));
        assert_eq!(wire["pagingInfo"]["offset"], json!(0));
    }

    #[test]
    fn narrow_projections_support_grouping_and_sorting() {
        let grouped = QueryDescriptor::projection(&["propertyType"]).grouped_by("propertyType");
        assert_eq!(grouped.fields.len(), 1);
        assert_eq!(grouped.group_by, vec!["propertyType"]);

        let sorted = QueryDescriptor::projection(&["price"]).sorted_by("price", SortDirection::Asc);
        let wire = serde_json::to_value(&sorted).unwrap();
        assert_eq!(wire["orderBy"][0]["fieldName"], json!("price"));
        assert!(wire.get("where").is_none());
        assert!(wire.get("groupBy").is_none());
    }
}
