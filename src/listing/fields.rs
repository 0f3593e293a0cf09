//! Listable fields

use super::sort::{Direction, SortKey};

/// Type a field's raw parameter values are coerced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, compared as-is.
    Text,

    /// Signed 64-bit integer; money fields are minor units.
    Integer,

    /// `true` / `false`.
    Boolean,

    /// Hyphenated UUID.
    Uuid,

    /// RFC 3339 timestamp.
    Timestamp,
}

/// A field that list requests may filter, sort or project on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used in request parameters and response documents.
    pub name: &'static str,

    /// Column the field is stored in.
    pub column: &'static str,

    /// Value type.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Declare a listable field.
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }
}

/// The allow-list of listable fields for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingSpec {
    fields: &'static [FieldSpec],
    search: &'static [&'static str],
    projection: Option<&'static [&'static str]>,
}

impl ListingSpec {
    /// Declare an entity's listable fields and the columns keyword search
    /// matches against. An empty `search` disables keyword search.
    pub const fn new(fields: &'static [FieldSpec], search: &'static [&'static str]) -> Self {
        Self {
            fields,
            search,
            projection: None,
        }
    }

    /// Declare the response keys `fields` may select, for entities whose
    /// rendered documents nest or rename their columns. Without this, the
    /// listable field names are used.
    #[must_use]
    pub const fn with_projection(self, keys: &'static [&'static str]) -> Self {
        Self {
            projection: Some(keys),
            ..self
        }
    }

    /// Look up a field by its public name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// All listable fields.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Look up a response key that a projection may keep or drop.
    pub fn projectable(&self, name: &str) -> Option<&'static str> {
        match self.projection {
            Some(keys) => keys.iter().copied().find(|key| *key == name),
            None => self.field(name).map(|field| field.name),
        }
    }

    /// Columns matched by keyword search.
    pub fn search_columns(&self) -> &'static [&'static str] {
        self.search
    }

    /// Newest first.
    pub fn default_sort(&self) -> SortKey {
        SortKey {
            column: "created_at",
            direction: Direction::Descending,
        }
    }
}
