//! Sorting

use super::{ListingError, fields::ListingSpec};

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first.
    Ascending,

    /// Largest first.
    Descending,
}

impl Direction {
    /// SQL keyword for the direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// One sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    /// Column to sort on.
    pub column: &'static str,

    /// Direction.
    pub direction: Direction,
}

/// Parse a comma-separated sort parameter; `-` prefixes mean descending.
///
/// Falls back to the spec's default sort when the parameter is absent or
/// contains no keys.
///
/// # Errors
///
/// Returns [`ListingError::UnknownField`] when a key is not listable.
pub fn parse(spec: &ListingSpec, raw: Option<&str>) -> Result<Vec<SortKey>, ListingError> {
    let keys = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| {
            let (name, direction) = match key.strip_prefix('-') {
                Some(name) => (name, Direction::Descending),
                None => (key, Direction::Ascending),
            };

            spec.field(name)
                .map(|field| SortKey {
                    column: field.column,
                    direction,
                })
                .ok_or_else(|| ListingError::UnknownField(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Ok(vec![spec.default_sort()]);
    }

    Ok(keys)
}
