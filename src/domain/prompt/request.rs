//! AnalysisRequest: the mode plus its validated subjects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::swot::{AnalysisMode, AnalysisSubject};

/// What to analyze. Subject arity is fixed by the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalysisRequest {
    Single {
        shop: AnalysisSubject,
    },
    /// The subject always carries a location qualifier.
    Branch {
        branch: AnalysisSubject,
    },
    Pairwise {
        my_shop: AnalysisSubject,
        competitor: AnalysisSubject,
    },
    /// Shop names are inferred by the model from the context text.
    AutoDetect,
    /// An empty competitor list asks the model to find them in the context.
    Multi {
        my_shop: AnalysisSubject,
        competitors: Vec<AnalysisSubject>,
    },
}

impl AnalysisRequest {
    pub fn single(shop: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(AnalysisRequest::Single {
            shop: AnalysisSubject::new(shop)?,
        })
    }

    pub fn branch(
        brand: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(AnalysisRequest::Branch {
            branch: AnalysisSubject::at_location(brand, location)?,
        })
    }

    pub fn pairwise(
        my_shop: impl Into<String>,
        competitor: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(AnalysisRequest::Pairwise {
            my_shop: AnalysisSubject::new(my_shop)?,
            competitor: AnalysisSubject::new(competitor)?,
        })
    }

    pub fn auto_detect() -> Self {
        AnalysisRequest::AutoDetect
    }

    pub fn multi<I, S>(my_shop: impl Into<String>, competitors: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let competitors = competitors
            .into_iter()
            .map(AnalysisSubject::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AnalysisRequest::Multi {
            my_shop: AnalysisSubject::new(my_shop)?,
            competitors,
        })
    }

    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisRequest::Single { .. } => AnalysisMode::Single,
            AnalysisRequest::Branch { .. } => AnalysisMode::Branch,
            AnalysisRequest::Pairwise { .. } => AnalysisMode::Pairwise,
            AnalysisRequest::AutoDetect => AnalysisMode::AutoDetect,
            AnalysisRequest::Multi { .. } => AnalysisMode::Multi,
        }
    }

    /// Named subjects, my shop first.
    pub fn subjects(&self) -> Vec<&AnalysisSubject> {
        match self {
            AnalysisRequest::Single { shop } => vec![shop],
            AnalysisRequest::Branch { branch } => vec![branch],
            AnalysisRequest::Pairwise { my_shop, competitor } => vec![my_shop, competitor],
            AnalysisRequest::AutoDetect => Vec::new(),
            AnalysisRequest::Multi {
                my_shop,
                competitors,
            } => std::iter::once(my_shop).chain(competitors.iter()).collect(),
        }
    }

    /// Checks invariants that deserialization cannot express.
    ///
    /// # Errors
    ///
    /// A branch subject without a location qualifier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let AnalysisRequest::Branch { branch } = self {
            if branch.location_qualifier().is_none() {
                return Err(ValidationError::empty_field("location"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_mode() {
        assert_eq!(AnalysisRequest::single("A").unwrap().mode(), AnalysisMode::Single);
        assert_eq!(AnalysisRequest::branch("A", "D1").unwrap().mode(), AnalysisMode::Branch);
        assert_eq!(AnalysisRequest::pairwise("A", "B").unwrap().mode(), AnalysisMode::Pairwise);
        assert_eq!(AnalysisRequest::auto_detect().mode(), AnalysisMode::AutoDetect);
        assert_eq!(
            AnalysisRequest::multi("A", ["B", "C"]).unwrap().mode(),
            AnalysisMode::Multi
        );
    }

    #[test]
    fn blank_competitor_is_rejected() {
        assert!(AnalysisRequest::pairwise("A", " ").is_err());
        assert!(AnalysisRequest::multi("A", ["B", ""]).is_err());
    }

    #[test]
    fn subjects_list_my_shop_first() {
        let request = AnalysisRequest::multi("Mine", ["C1", "C2"]).unwrap();
        let names: Vec<_> = request.subjects().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Mine", "C1", "C2"]);
        assert!(AnalysisRequest::auto_detect().subjects().is_empty());
    }

    #[test]
    fn deserializes_tagged_body() {
        let request: AnalysisRequest = serde_json::from_value(serde_json::json!({
            "mode": "branch",
            "branch": {"name": "Highlands", "location_qualifier": "District 1"}
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.subjects()[0].location_qualifier(), Some("District 1"));
    }

    #[test]
    fn branch_without_location_fails_validation() {
        let request: AnalysisRequest = serde_json::from_value(serde_json::json!({
            "mode": "branch",
            "branch": {"name": "Highlands"}
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
