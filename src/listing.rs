//! Listing
//!
//! Turns untrusted list-request parameters into a typed [`ListingQuery`]:
//! filters, sort order, field projection, keyword search and pagination. Every
//! field a request may touch has to be declared in the entity's
//! [`ListingSpec`]; unknown fields are rejected instead of being forwarded to
//! the store.

use std::collections::BTreeMap;

use thiserror::Error;

pub mod fields;
pub mod filter;
pub mod pagination;
pub mod projection;
pub mod search;
pub mod sort;

pub use fields::{FieldKind, FieldSpec, ListingSpec};
pub use filter::{Comparison, Filter, FilterValue};
pub use pagination::{PageRequest, Pagination};
pub use projection::Projection;
pub use search::Search;
pub use sort::{Direction, SortKey};

/// Parameters that drive shaping and are never treated as filters.
pub const RESERVED_PARAMS: [&str; 5] = ["page", "sort", "limit", "fields", "keyword"];

/// Errors raised while shaping a listing request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    /// The parameter names a field that is not listable for this entity.
    #[error("unknown field \"{0}\"")]
    UnknownField(String),

    /// The parameter key carries an unrecognised comparison suffix.
    #[error("unknown comparison operator in \"{0}\"")]
    UnknownOperator(String),

    /// The value could not be coerced to the field's type.
    #[error("invalid value \"{value}\" for field \"{field}\"")]
    InvalidValue {
        /// Field name.
        field: String,

        /// Raw value supplied by the caller.
        value: String,
    },

    /// Range comparisons are not defined for the field's type.
    #[error("field \"{0}\" does not support range comparisons")]
    UnsupportedComparison(String),

    /// The projection mixes included and excluded fields.
    #[error("fields cannot mix inclusions and exclusions")]
    MixedProjection,
}

/// Raw request parameters for a listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    params: BTreeMap<String, String>,
}

impl ListingParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Iterates over every parameter that is not reserved for shaping.
    pub fn filter_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ListingParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// A fully shaped listing query, ready to be rendered by a store adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    /// Equality and range constraints.
    pub filters: Vec<Filter>,

    /// Sort keys in priority order; never empty.
    pub sort: Vec<SortKey>,

    /// Fields to keep in the rendered documents.
    pub projection: Projection,

    /// Case-insensitive keyword search, when requested and supported.
    pub search: Option<Search>,

    /// Requested page.
    pub page: PageRequest,
}

impl ListingQuery {
    /// Shape request parameters against an entity's listing spec.
    ///
    /// # Errors
    ///
    /// Returns a [`ListingError`] when a parameter names an unknown field, uses
    /// an unknown comparison, or carries a value that cannot be coerced.
    pub fn shape(spec: &ListingSpec, params: &ListingParams) -> Result<Self, ListingError> {
        let filters = params
            .filter_params()
            .map(|(key, value)| Filter::parse(spec, key, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filters,
            sort: sort::parse(spec, params.get("sort"))?,
            projection: Projection::parse(spec, params.get("fields"))?,
            search: Search::parse(spec, params.get("keyword")),
            page: PageRequest::from_params(params.get("page"), params.get("limit")),
        })
    }

    /// Unfiltered query with default sort and pagination.
    pub fn unshaped(spec: &ListingSpec) -> Self {
        Self {
            filters: Vec::new(),
            sort: vec![spec.default_sort()],
            projection: Projection::All,
            search: None,
            page: PageRequest::default(),
        }
    }
}
