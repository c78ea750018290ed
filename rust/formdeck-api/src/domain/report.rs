//! The submissions report: each stored submission paired with the form's
//! current field definitions.
//!
//! Answers are stored sparsely and loosely keyed, and the field set may have
//! drifted since a submission was made. The pairing walks the form's fields
//! in order and looks each one up in the submission's response map, so the
//! paired list always has exactly one entry per field: answers for deleted
//! fields drop out, answers missing for new fields come back as null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form::{ChoiceOption, FieldType, Form};
use super::submission::{Answer, Submission};

/// One field paired with one submission's answer for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PairedAnswer {
    /// Field label at view time.
    pub question: String,
    /// Field type tag.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Field options at view time; null for non-choice fields.
    pub options: Option<Vec<ChoiceOption>>,
    /// The submission's answer for this field; null if absent.
    pub answer: Option<Answer>,
}

/// One submission with its answers paired against the form's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetail {
    /// Submission identifier.
    pub submission_id: String,
    /// When the submission was made.
    pub submitted_at: DateTime<Utc>,
    /// One entry per form field, in field order.
    pub responses: Vec<PairedAnswer>,
}

/// The full report for a form: metadata plus all paired submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// Form title.
    pub form_title: String,
    /// Form description.
    pub form_description: String,
    /// All submissions, paired.
    pub submissions: Vec<SubmissionDetail>,
}

impl SubmissionReport {
    /// Pair every submission against the form's current fields.
    #[must_use]
    pub fn build(form: &Form, submissions: Vec<Submission>) -> Self {
        let submissions = submissions
            .into_iter()
            .map(|submission| SubmissionDetail {
                submission_id: submission.id,
                submitted_at: submission.created_at,
                responses: form
                    .fields
                    .iter()
                    .map(|field| PairedAnswer {
                        question: field.label.clone(),
                        field_type: field.kind.field_type(),
                        options: field.kind.options().map(<[ChoiceOption]>::to_vec),
                        answer: submission.responses.get(&field.id).cloned(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            form_title: form.title.clone(),
            form_description: form.description.clone(),
            submissions,
        }
    }
}
