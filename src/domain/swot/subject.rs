//! AnalysisSubject value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One named entity being analyzed, optionally pinned to a location.
///
/// Immutable once constructed; names are trimmed and must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSubject")]
pub struct AnalysisSubject {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_qualifier: Option<String>,
}

#[derive(Deserialize)]
struct RawSubject {
    name: String,
    #[serde(default)]
    location_qualifier: Option<String>,
}

impl TryFrom<RawSubject> for AnalysisSubject {
    type Error = ValidationError;

    fn try_from(raw: RawSubject) -> Result<Self, Self::Error> {
        match raw.location_qualifier {
            Some(location) => Self::at_location(raw.name, location),
            None => Self::new(raw.name),
        }
    }
}

impl AnalysisSubject {
    /// Creates a subject from a shop or brand name.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_blank("name", name.into())?,
            location_qualifier: None,
        })
    }

    /// Creates a subject for one branch of a brand.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if either the name or the location is blank.
    pub fn at_location(
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_blank("name", name.into())?,
            location_qualifier: Some(non_blank("location", location.into())?),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location_qualifier(&self) -> Option<&str> {
        self.location_qualifier.as_deref()
    }
}

impl fmt::Display for AnalysisSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location_qualifier {
            Some(location) => write!(f, "{} - {}", self.name, location),
            None => write!(f, "{}", self.name),
        }
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
