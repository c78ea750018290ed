//! Answer accumulation for the form renderer.
//!
//! While a respondent fills a form, answers collect in local state keyed by
//! field identifier: one scalar per text/number/date/dropdown/radio field,
//! and a label-to-selected map built up one checkbox at a time. The result
//! is exactly the `responses` body the submission endpoint expects.

use std::collections::BTreeMap;

use crate::api::submissions::SubmitRequest;
use crate::domain::{Answer, ResponseMap};

/// Answers collected for one form fill.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    responses: ResponseMap,
}

impl AnswerSheet {
    /// Start an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar answer (text, number, date, dropdown, radio),
    /// replacing any previous answer for the field.
    pub fn set_answer(&mut self, field_id: &str, value: impl Into<String>) {
        self.responses
            .insert(field_id.to_string(), Answer::Scalar(value.into()));
    }

    /// Toggle one checkbox option, merging into the field's existing map.
    /// A previous scalar answer for the field is replaced by a fresh map.
    pub fn set_check(&mut self, field_id: &str, option_label: &str, selected: bool) {
        let entry = self
            .responses
            .entry(field_id.to_string())
            .or_insert_with(|| Answer::Checks(BTreeMap::new()));

        match entry {
            Answer::Checks(map) => {
                map.insert(option_label.to_string(), selected);
            }
            Answer::Scalar(_) => {
                let mut map = BTreeMap::new();
                map.insert(option_label.to_string(), selected);
                *entry = Answer::Checks(map);
            }
        }
    }

    /// Collected answers so far.
    #[must_use]
    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    /// Produce the submission request body.
    #[must_use]
    pub fn into_request(self) -> SubmitRequest {
        SubmitRequest {
            responses: self.responses,
        }
    }
}
