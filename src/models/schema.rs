//! Versioned mode and division schema.
//!
//! The upstream API's key vocabulary changes as game modes are added, so the
//! descriptor lists are data rather than code. The built-in schema is
//! embedded from `schema/duels.toml`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_SCHEMA: &str = include_str!("../../schema/duels.toml");

/// Schema loading errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse schema: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid schema: {0}")]
    ValidationError(String),
}

/// A game mode and the prefix namespacing its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDescriptor {
    /// Empty for the overall aggregate row
    pub key_prefix: String,
    pub display_name: String,
}

impl ModeDescriptor {
    pub fn new(key_prefix: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            display_name: display_name.into(),
        }
    }

    /// The overall row aggregates every mode and is never a most-played candidate.
    pub fn is_overall(&self) -> bool {
        self.key_prefix.is_empty()
    }
}

/// A division tier and its display color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionDescriptor {
    pub name: String,
    pub color: String,
}

impl DivisionDescriptor {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Descriptor lists for one stats section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSchema {
    pub version: u32,

    /// Accordion title
    pub title: String,

    /// Lowest rank first
    pub divisions: Vec<DivisionDescriptor>,

    /// Display order
    pub modes: Vec<ModeDescriptor>,
}

impl StatsSchema {
    /// The embedded Duels schema.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_SCHEMA).unwrap_or_else(|e| {
            tracing::error!("Embedded schema is invalid: {}", e);
            Self::empty()
        })
    }

    /// A schema with no divisions or modes. Every lookup against it resolves
    /// to its sentinel.
    pub fn empty() -> Self {
        Self {
            version: 1,
            title: "Duels".to_string(),
            divisions: Vec::new(),
            modes: Vec::new(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SchemaError> {
        let schema: StatsSchema = toml::from_str(contents)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path)?;
        let schema = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded schema v{} from {} ({} divisions, {} modes)",
            schema.version,
            path.display(),
            schema.divisions.len(),
            schema.modes.len()
        );
        Ok(schema)
    }

    /// Validate the schema.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.version == 0 {
            return Err(SchemaError::ValidationError(
                "Schema version must be greater than 0".to_string(),
            ));
        }

        if self.title.trim().is_empty() {
            return Err(SchemaError::ValidationError(
                "Schema title must not be empty".to_string(),
            ));
        }

        if self.divisions.is_empty() || self.modes.is_empty() {
            return Err(SchemaError::ValidationError(
                "Schema needs at least one division and one mode".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for division in &self.divisions {
            if division.name.trim().is_empty() {
                return Err(SchemaError::ValidationError(
                    "Division name must not be empty".to_string(),
                ));
            }
            if !names.insert(division.name.to_lowercase()) {
                return Err(SchemaError::ValidationError(format!(
                    "Duplicate division: {}",
                    division.name
                )));
            }
        }

        let mut prefixes = HashSet::new();
        for mode in &self.modes {
            if !prefixes.insert(mode.key_prefix.as_str()) {
                return Err(SchemaError::ValidationError(format!(
                    "Duplicate mode prefix: {:?}",
                    mode.key_prefix
                )));
            }
        }

        Ok(())
    }
}

impl Default for StatsSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schema() {
        let schema = StatsSchema::from_toml_str(BUILTIN_SCHEMA).unwrap();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.title, "Duels");
        assert_eq!(schema.divisions.len(), 8);
        assert_eq!(schema.divisions[0], DivisionDescriptor::new("Rookie", "darkgray"));
        assert_eq!(schema.divisions[7], DivisionDescriptor::new("Godlike", "purple"));
        assert_eq!(schema.modes.len(), 20);
        assert_eq!(schema.modes[0], ModeDescriptor::new("uhc_duel_", "UHC 1v1"));
        assert!(schema.modes.last().unwrap().is_overall());
        assert_eq!(schema.modes.iter().filter(|m| m.is_overall()).count(), 1);
    }

    #[test]
    fn test_default_is_builtin() {
        assert_eq!(StatsSchema::default(), StatsSchema::builtin());
        assert_ne!(StatsSchema::default(), StatsSchema::empty());
    }

    #[test]
    fn test_validation_duplicate_prefix() {
        let mut schema = StatsSchema::builtin();
        schema.modes.push(ModeDescriptor::new("sumo_duel_", "Sumo again"));

        assert!(matches!(
            schema.validate(),
            Err(SchemaError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_duplicate_division_case_insensitive() {
        let mut schema = StatsSchema::builtin();
        schema.divisions.push(DivisionDescriptor::new("GOLD", "gold"));

        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_validation_bad_version() {
        let mut schema = StatsSchema::builtin();
        schema.version = 0;

        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_validation_requires_descriptors() {
        assert!(StatsSchema::empty().validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = StatsSchema::from_toml_str("version = \"one\"").unwrap_err();
        assert!(matches!(err, SchemaError::ParseError(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        std::fs::write(
            &path,
            r#"
version = 2
title = "Duels"

[[divisions]]
name = "Iron"
color = "white"

[[modes]]
key_prefix = "sumo_duel_"
display_name = "Sumo 1v1"

[[modes]]
key_prefix = ""
display_name = "Overall"
"#,
        )
        .unwrap();

        let schema = StatsSchema::from_file(&path).unwrap();
        assert_eq!(schema.version, 2);
        assert_eq!(schema.modes.len(), 2);

        let missing = StatsSchema::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(SchemaError::ReadError(_))));
    }
}
