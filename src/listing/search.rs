//! Keyword search

use super::fields::ListingSpec;

/// Case-insensitive substring search over an entity's search columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search {
    columns: &'static [&'static str],
    keyword: String,
}

impl Search {
    /// Build a search from the `keyword` parameter.
    ///
    /// Returns `None` when the keyword is absent or blank, or when the entity
    /// has no search columns.
    pub fn parse(spec: &ListingSpec, raw: Option<&str>) -> Option<Self> {
        let keyword = raw.map(str::trim).filter(|keyword| !keyword.is_empty())?;
        let columns = spec.search_columns();

        if columns.is_empty() {
            return None;
        }

        Some(Self {
            columns,
            keyword: keyword.to_string(),
        })
    }

    /// Columns matched; a row matches when any of them does.
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// The trimmed keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// `ILIKE` pattern with the keyword's wildcard characters escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.keyword.len() + 2);

        pattern.push('%');

        for ch in self.keyword.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }

            pattern.push(ch);
        }

        pattern.push('%');

        pattern
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::listing::{FieldKind, FieldSpec};

    const SEARCHABLE: ListingSpec =
        ListingSpec::new(&[FieldSpec::new("name", "name", FieldKind::Text)], &["name"]);

    const UNSEARCHABLE: ListingSpec =
        ListingSpec::new(&[FieldSpec::new("name", "name", FieldKind::Text)], &[]);

    #[test]
    fn wildcards_are_escaped() -> TestResult {
        let search = Search::parse(&SEARCHABLE, Some("50%_off")).ok_or("expected search")?;

        assert_eq!(search.keyword(), "50%_off");
        assert_eq!(search.like_pattern(), r"%50\%\_off%");

        Ok(())
    }

    #[test]
    fn blank_keyword_is_ignored() {
        assert_eq!(Search::parse(&SEARCHABLE, Some("   ")), None);
        assert_eq!(Search::parse(&SEARCHABLE, None), None);
    }

    #[test]
    fn entities_without_search_columns_ignore_keyword() {
        assert_eq!(Search::parse(&UNSEARCHABLE, Some("lamp")), None);
    }
}
