//! Station query types.
//!
//! A [`StationQuery`] says how candidate stations are located. Its payload
//! types are valid by construction, so the pipeline never re-checks them.

use std::fmt;

use super::error::ResolveError;

/// Maximum number of stations returned by any list query.
pub const MAX_RESULTS: usize = 100;

/// A well-formed station UUID.
///
/// # Examples
///
/// ```
/// use radio_server::domain::StationId;
///
/// let id = StationId::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
/// assert_eq!(id.to_string(), "123e4567-e89b-12d3-a456-426614174000");
///
/// assert!(StationId::parse("not-a-uuid").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(uuid::Uuid);

impl StationId {
    /// Parse a station id from its textual form.
    pub fn parse(s: &str) -> Result<Self, ResolveError> {
        uuid::Uuid::parse_str(s)
            .map(StationId)
            .map_err(|e| ResolveError::InvalidIdentifier(format!("{s:?}: {e}")))
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated lowercase, the form the directory indexes by.
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Free-text station search.
///
/// Only ASCII letters, digits and spaces are allowed, and at least one
/// character must be a letter or digit.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SearchText(String);

impl SearchText {
    /// Validate raw search input.
    pub fn parse(s: &str) -> Result<Self, ResolveError> {
        if !s.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(ResolveError::InvalidQuery(format!(
                "{s:?}: must contain a letter or digit"
            )));
        }

        if let Some(bad) = s.chars().find(|c| !c.is_ascii_alphanumeric() && *c != ' ') {
            return Err(ResolveError::InvalidQuery(format!(
                "{s:?}: disallowed character {bad:?}"
            )));
        }

        Ok(SearchText(s.to_string()))
    }

    /// Returns the search text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SearchText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchText({:?})", self.0)
    }
}

impl fmt::Display for SearchText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sample size for a random query, always within `1..=MAX_RESULTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomLimit(usize);

impl RandomLimit {
    /// Clamp a requested sample size into the allowed range.
    pub fn clamped(n: usize) -> Self {
        RandomLimit(n.clamp(1, MAX_RESULTS))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for RandomLimit {
    fn default() -> Self {
        RandomLimit(MAX_RESULTS)
    }
}

/// How candidate stations are to be located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationQuery {
    /// A single station by its directory UUID.
    ByUuid(StationId),
    /// Stations whose name matches the search text.
    ByName(SearchText),
    /// Stations near the given caller address.
    ByLocation(String),
    /// A random sample of the directory.
    Random(RandomLimit),
}

impl StationQuery {
    pub fn by_uuid(raw: &str) -> Result<Self, ResolveError> {
        StationId::parse(raw).map(StationQuery::ByUuid)
    }

    pub fn by_name(raw: &str) -> Result<Self, ResolveError> {
        SearchText::parse(raw).map(StationQuery::ByName)
    }

    pub fn by_location(address: impl Into<String>) -> Self {
        StationQuery::ByLocation(address.into())
    }

    pub fn random(limit: Option<usize>) -> Self {
        StationQuery::Random(limit.map(RandomLimit::clamped).unwrap_or_default())
    }
}
