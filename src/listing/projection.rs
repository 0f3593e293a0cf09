//! Field projection

use serde_json::Value;

use super::{ListingError, fields::ListingSpec};

/// Field kept in every projected document.
pub const IDENTITY_FIELD: &str = "uuid";

/// Which fields of a rendered document survive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Keep everything.
    All,

    /// Keep only the named fields.
    Only(Vec<&'static str>),

    /// Drop the named fields.
    Except(Vec<&'static str>),
}

impl Projection {
    /// Parse a comma-separated `fields` parameter.
    ///
    /// `fields=title,price` keeps those fields; `fields=-description` drops
    /// one. Both forms cannot be combined.
    ///
    /// # Errors
    ///
    /// Returns a [`ListingError`] for unknown fields or mixed forms.
    pub fn parse(spec: &ListingSpec, raw: Option<&str>) -> Result<Self, ListingError> {
        let mut only = Vec::new();
        let mut except = Vec::new();

        for key in raw.unwrap_or_default().split(',').map(str::trim) {
            if key.is_empty() {
                continue;
            }

            let (name, excluded) = match key.strip_prefix('-') {
                Some(name) => (name, true),
                None => (key, false),
            };

            let key = spec
                .projectable(name)
                .ok_or_else(|| ListingError::UnknownField(name.to_string()))?;

            if excluded {
                except.push(key);
            } else {
                only.push(key);
            }
        }

        match (only.is_empty(), except.is_empty()) {
            (true, true) => Ok(Projection::All),
            (false, true) => Ok(Projection::Only(only)),
            (true, false) => Ok(Projection::Except(except)),
            (false, false) => Err(ListingError::MixedProjection),
        }
    }

    /// Apply the projection to a rendered JSON object. Non-objects pass
    /// through untouched.
    #[must_use]
    pub fn apply(&self, mut document: Value) -> Value {
        if let Value::Object(map) = &mut document {
            match self {
                Projection::All => {}
                Projection::Only(keep) => {
                    map.retain(|key, _| key == IDENTITY_FIELD || keep.contains(&key.as_str()));
                }
                Projection::Except(drop) => {
                    map.retain(|key, _| key == IDENTITY_FIELD || !drop.contains(&key.as_str()));
                }
            }
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::listing::{FieldKind, FieldSpec};

    const SPEC: ListingSpec = ListingSpec::new(
        &[
            FieldSpec::new("uuid", "uuid", FieldKind::Uuid),
            FieldSpec::new("title", "title", FieldKind::Text),
            FieldSpec::new("description", "description", FieldKind::Text),
            FieldSpec::new("price", "price", FieldKind::Integer),
        ],
        &[],
    );

    #[test]
    fn only_keeps_named_fields_and_identity() -> TestResult {
        let projection = Projection::parse(&SPEC, Some("title,price"))?;

        let document = projection.apply(json!({
            "uuid": "0198f1d2-0000-7000-8000-000000000000",
            "title": "Lamp",
            "description": "Bright",
            "price": 1200,
        }));

        assert_eq!(
            document,
            json!({
                "uuid": "0198f1d2-0000-7000-8000-000000000000",
                "title": "Lamp",
                "price": 1200,
            })
        );

        Ok(())
    }

    #[test]
    fn except_drops_named_fields() -> TestResult {
        let projection = Projection::parse(&SPEC, Some("-description"))?;

        let document = projection.apply(json!({"uuid": "x", "title": "Lamp", "description": "Bright"}));

        assert_eq!(document, json!({"uuid": "x", "title": "Lamp"}));

        Ok(())
    }

    const NESTED: ListingSpec = ListingSpec::new(
        &[
            FieldSpec::new("uuid", "uuid", FieldKind::Uuid),
            FieldSpec::new("owner_uuid", "owner_uuid", FieldKind::Uuid),
        ],
        &[],
    )
    .with_projection(&["uuid", "owner", "lines"]);

    #[test]
    fn declared_response_keys_replace_listable_fields() -> TestResult {
        let projection = Projection::parse(&NESTED, Some("owner,lines"))?;

        let document = projection.apply(json!({
            "uuid": "x",
            "owner": {"uuid": "y"},
            "lines": [],
            "note": "gift",
        }));

        assert_eq!(
            document,
            json!({"uuid": "x", "owner": {"uuid": "y"}, "lines": []})
        );

        assert_eq!(
            Projection::parse(&NESTED, Some("owner_uuid")),
            Err(ListingError::UnknownField("owner_uuid".to_string()))
        );

        Ok(())
    }

    #[test]
    fn mixed_forms_are_rejected() {
        assert_eq!(
            Projection::parse(&SPEC, Some("title,-price")),
            Err(ListingError::MixedProjection)
        );
    }

    #[test]
    fn unknown_projection_field_is_rejected() {
        assert_eq!(
            Projection::parse(&SPEC, Some("password_hash")),
            Err(ListingError::UnknownField("password_hash".to_string()))
        );
    }
}
