//! Core domain models: forms, fields, submissions, and the submissions
//! report that pairs the two.

pub mod form;
pub mod report;
pub mod submission;

pub use form::{ChoiceOption, Field, FieldKind, FieldSpec, FieldType, FieldUpsert, Form, FormSummary};
pub use report::{PairedAnswer, SubmissionDetail, SubmissionReport};
pub use submission::{Answer, ResponseMap, Submission};
