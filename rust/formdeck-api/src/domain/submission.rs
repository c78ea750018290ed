//! Submissions and answer values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One answer value. Scalar for text/number/date/dropdown/radio fields; a
/// label-to-selected map for checkbox groups. Untagged on the wire so the
/// shapes match what the form renderer posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Answer {
    /// Single value (text, number, date, dropdown, radio).
    Scalar(String),
    /// Per-option selected state (checkbox groups).
    Checks(BTreeMap<String, bool>),
}

impl Answer {
    /// The scalar value, if this is a scalar answer.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Checks(_) => None,
        }
    }

    /// Labels of selected options, if this is a checkbox answer.
    #[must_use]
    pub fn selected_labels(&self) -> Option<Vec<&str>> {
        match self {
            Self::Scalar(_) => None,
            Self::Checks(map) => Some(
                map.iter()
                    .filter(|(_, selected)| **selected)
                    .map(|(label, _)| label.as_str())
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

/// Field identifier to answer mapping as posted by a respondent. Keys are
/// not checked against live fields; stale keys simply null-fill at report
/// time.
pub type ResponseMap = BTreeMap<String, Answer>;

/// One respondent's set of answers to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Unique submission identifier.
    pub id: String,
    /// Owning form identifier.
    pub form_id: String,
    /// Field identifier to answer mapping.
    pub responses: ResponseMap,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
