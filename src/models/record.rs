/// One row of the dataset as seen by the lookup pipeline.
///
/// `country` starts as a copy of `raw_location` and is only overwritten when
/// a lookup is performed for the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub raw_location: Option<String>,
    pub country: Option<String>,
}

impl Record {
    pub fn new(raw_location: Option<String>) -> Self {
        Self {
            country: raw_location.clone(),
            raw_location,
        }
    }

    /// Build from a CSV field, where an empty cell means missing.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Self::new(None)
        } else {
            Self::new(Some(field.to_string()))
        }
    }

    /// The location to look up, if the row has one.
    pub fn location(&self) -> Option<&str> {
        self.raw_location.as_deref().filter(|raw| !raw.is_empty())
    }

    /// The value persisted in the output `country` column.
    pub fn country_field(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_starts_as_copy() {
        let record = Record::new(Some("(51.5074, -0.1278)".to_string()));
        assert_eq!(record.country.as_deref(), Some("(51.5074, -0.1278)"));
        assert_eq!(record.location(), Some("(51.5074, -0.1278)"));
    }

    #[test]
    fn test_empty_field_is_missing() {
        let record = Record::from_field("");
        assert_eq!(record.raw_location, None);
        assert_eq!(record.country, None);
        assert_eq!(record.location(), None);
        assert_eq!(record.country_field(), "");
    }

    #[test]
    fn test_explicit_empty_string_is_skipped() {
        let record = Record::new(Some(String::new()));
        assert_eq!(record.location(), None);
        assert_eq!(record.country.as_deref(), Some(""));
    }
}
