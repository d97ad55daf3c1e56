use std::borrow::Cow;

/// Strip parentheses from a raw location string to get a lookup token.
///
/// Whitespace, separators and numeric text pass through untouched; numeric
/// validity is left to the geocoder.
///
/// # Examples
/// ```
/// use geo_country_enricher::utils::normalize_coordinate;
///
/// assert_eq!(normalize_coordinate("(51.5074, -0.1278)"), "51.5074, -0.1278");
/// ```
pub fn normalize_coordinate(raw: &str) -> Cow<'_, str> {
    if raw.contains(['(', ')']) {
        Cow::Owned(raw.chars().filter(|c| !matches!(c, '(' | ')')).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// Normalize an optional raw value, treating empty strings as missing.
pub fn normalize_optional(raw: Option<&str>) -> Option<Cow<'_, str>> {
    raw.filter(|value| !value.is_empty()).map(normalize_coordinate)
}
