//! Participant data models.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use super::errors::{ParticipantError, ParticipantResult};

/// Minimum length of a remotely registered first or last name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of a remotely registered first or last name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Stable participant identifier, unique within a registry.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    /// Derive an id from a full name for sources that don't assign one.
    ///
    /// The same person always maps to the same id, regardless of where
    /// they appeared in the source. First and last name stay separate
    /// parts, so "Mary Ann" "Lee" and "Mary" "Ann Lee" don't collide.
    pub fn derived(first_name: &str, last_name: &str) -> Self {
        let part = |name: &str| normalize_name(name).replace(' ', "-");
        Self(format!("{}|{}", part(first_name), part(last_name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for ParticipantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Where a participant came from.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// File import. The id was derived from the name, so the display
    /// name also counts towards duplicate detection.
    Import,
    /// Remote registration with a caller-assigned stable id.
    Registration,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Import => write!(f, "import"),
            Origin::Registration => write!(f, "registration"),
        }
    }
}

/// A raffle participant. Immutable once created.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub first_name: String,
    pub last_name: String,
    /// Short name shown on the reel, e.g. "Jane D."
    pub display_name: String,
    pub origin: Origin,
}

impl Participant {
    /// Create a participant with an explicit id.
    pub fn new(
        id: impl Into<ParticipantId>,
        first_name: &str,
        last_name: &str,
        origin: Origin,
    ) -> Self {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        let display_name = display_name(&first_name, &last_name);
        Self {
            id: id.into(),
            first_name,
            last_name,
            display_name,
            origin,
        }
    }

    /// Create an import participant whose id is derived from the name.
    pub fn imported(first_name: &str, last_name: &str) -> Self {
        let id = ParticipantId::derived(first_name, last_name);
        Self::new(id, first_name, last_name, Origin::Import)
    }

    /// Validate a remote registration and assign it a fresh stable id.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantError`] if either name is empty or falls
    /// outside [`MIN_NAME_LENGTH`]..=[`MAX_NAME_LENGTH`] characters.
    pub fn register(first_name: &str, last_name: &str) -> ParticipantResult<Self> {
        validate_name("first name", first_name)?;
        validate_name("last name", last_name)?;
        let id = Uuid::new_v4().to_string();
        Ok(Self::new(id, first_name, last_name, Origin::Registration))
    }

    /// Name used when announcing a winner.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Display name key used for import de-duplication.
    pub fn normalized_display_name(&self) -> String {
        normalize_name(&self.display_name)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_name.fmt(f)
    }
}

/// "First L." from a first and last name.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    match last_name.chars().next() {
        Some(initial) => format!("{first_name} {initial}."),
        None => first_name.to_string(),
    }
}

/// Trim, lowercase and collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn validate_name(field: &'static str, value: &str) -> ParticipantResult<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ParticipantError::EmptyName(field));
    }
    if len < MIN_NAME_LENGTH {
        return Err(ParticipantError::NameTooShort {
            field,
            min: MIN_NAME_LENGTH,
        });
    }
    if len > MAX_NAME_LENGTH {
        return Err(ParticipantError::NameTooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_last_initial() {
        let p = Participant::imported("Jane", "Doe");
        assert_eq!(p.display_name, "Jane D.");
        assert_eq!(p.full_name(), "Jane Doe");
        assert_eq!(p.origin, Origin::Import);
    }

    #[test]
    fn test_derived_id_ignores_case_and_spacing() {
        let a = ParticipantId::derived("Jane ", "Doe");
        let b = ParticipantId::derived("jane", "  DOE");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "jane|doe");
    }

    #[test]
    fn test_derived_id_keeps_name_boundary() {
        let a = Participant::imported("Mary Ann", "Lee");
        let b = Participant::imported("Mary", "Ann Lee");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.as_str(), "mary-ann|lee");
        assert_eq!(b.id.as_str(), "mary|ann-lee");
        assert_ne!(a.display_name, b.display_name);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jane   D. "), "jane d.");
    }

    #[test]
    fn test_register_assigns_unique_ids() {
        let a = Participant::register("Jane", "Doe").unwrap();
        let b = Participant::register("Jane", "Doe").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.origin, Origin::Registration);
    }

    #[test]
    fn test_register_rejects_short_and_long_names() {
        assert!(matches!(
            Participant::register("J", "Doe"),
            Err(ParticipantError::NameTooShort { .. })
        ));
        assert!(matches!(
            Participant::register("Jane", &"x".repeat(51)),
            Err(ParticipantError::NameTooLong { .. })
        ));
        assert!(matches!(
            Participant::register("   ", "Doe"),
            Err(ParticipantError::EmptyName("first name"))
        ));
    }

    #[test]
    fn test_participant_id_deserialize_trims() {
        let id: ParticipantId = serde_json::from_str("\" p1 \"").unwrap();
        assert_eq!(id, ParticipantId::new("p1"));
    }
}
