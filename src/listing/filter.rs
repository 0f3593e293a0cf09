//! Filters

use jiff::Timestamp;
use uuid::Uuid;

use super::{
    ListingError,
    fields::{FieldKind, ListingSpec},
};

/// Comparison applied by a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// `field=value`
    Eq,

    /// `field[gt]=value`
    Gt,

    /// `field[gte]=value`
    Gte,

    /// `field[lt]=value`
    Lt,

    /// `field[lte]=value`
    Lte,
}

impl Comparison {
    /// SQL operator for the comparison.
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gt" => Some(Comparison::Gt),
            "gte" => Some(Comparison::Gte),
            "lt" => Some(Comparison::Lt),
            "lte" => Some(Comparison::Lte),
            _ => None,
        }
    }
}

/// A filter value coerced to its field's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    /// Text value
    Text(String),

    /// Integer value
    Integer(i64),

    /// Boolean value
    Boolean(bool),

    /// UUID value
    Uuid(Uuid),

    /// Timestamp value
    Timestamp(Timestamp),
}

/// A single shaped constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// Column the constraint applies to.
    pub column: &'static str,

    /// Comparison operator.
    pub comparison: Comparison,

    /// Typed right-hand side.
    pub value: FilterValue,
}

impl Filter {
    /// Parse a `field` or `field[op]` parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`ListingError`] for unknown fields or operators, values that
    /// fail to coerce, and range comparisons on booleans or UUIDs.
    pub fn parse(spec: &ListingSpec, key: &str, raw: &str) -> Result<Self, ListingError> {
        let (name, comparison) = split_key(key)?;

        let field = spec
            .field(name)
            .ok_or_else(|| ListingError::UnknownField(name.to_string()))?;

        if comparison != Comparison::Eq && matches!(field.kind, FieldKind::Boolean | FieldKind::Uuid)
        {
            return Err(ListingError::UnsupportedComparison(name.to_string()));
        }

        let invalid = || ListingError::InvalidValue {
            field: name.to_string(),
            value: raw.to_string(),
        };

        let value = match field.kind {
            FieldKind::Text => FilterValue::Text(raw.to_string()),
            FieldKind::Integer => FilterValue::Integer(raw.trim().parse().map_err(|_err| invalid())?),
            FieldKind::Boolean => FilterValue::Boolean(raw.trim().parse().map_err(|_err| invalid())?),
            FieldKind::Uuid => FilterValue::Uuid(raw.trim().parse().map_err(|_err| invalid())?),
            FieldKind::Timestamp => {
                FilterValue::Timestamp(raw.trim().parse().map_err(|_err| invalid())?)
            }
        };

        Ok(Self {
            column: field.column,
            comparison,
            value,
        })
    }
}

fn split_key(key: &str) -> Result<(&str, Comparison), ListingError> {
    let Some((name, rest)) = key.split_once('[') else {
        return Ok((key, Comparison::Eq));
    };

    rest.strip_suffix(']')
        .and_then(Comparison::from_suffix)
        .map(|comparison| (name, comparison))
        .ok_or_else(|| ListingError::UnknownOperator(key.to_string()))
}
