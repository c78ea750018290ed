//! Client-side form logic: the editor's draft state machine, the renderer's
//! answer accumulation, and CSV export of the submissions report.
//!
//! These are the in-browser pieces of the system expressed as plain library
//! code; nothing here talks to the store directly.

pub mod answers;
pub mod draft;
pub mod export;

pub use answers::AnswerSheet;
pub use draft::{DraftField, DraftFieldPatch, FormDraft, SavePayload};
pub use export::{csv_filename, report_to_csv};
