//! In-memory draft editing for the form builder.
//!
//! The builder holds one mutable draft at a time: title, description, and an
//! ordered field list. Every operation here is a plain list edit in memory;
//! the service is untouched until an explicit save produces a create or
//! update payload via [`FormDraft::save_payload`].
//!
//! There is no undo and no conflict resolution: a single active editor is
//! assumed.

use crate::api::forms::{CreateFormRequest, UpdateFormRequest};
use crate::domain::{ChoiceOption, FieldKind, FieldSpec, FieldType, FieldUpsert, Form};

/// One field in the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftField {
    /// Draft-local or persisted identifier.
    pub id: String,
    /// Question label.
    pub label: String,
    /// Per-type data.
    pub kind: FieldKind,
    /// Whether the identifier came from the store (set when the draft was
    /// loaded from an existing form).
    persisted: bool,
}

/// Partial field update; only present attributes are applied.
#[derive(Debug, Clone, Default)]
pub struct DraftFieldPatch {
    /// New label, if any.
    pub label: Option<String>,
    /// New default value, if any. Ignored for choice fields.
    pub value: Option<String>,
}

/// What an explicit save sends to the form service.
#[derive(Debug, Clone, PartialEq)]
pub enum SavePayload {
    /// New form: a create request.
    Create(CreateFormRequest),
    /// Existing form: its identifier plus an update request.
    Update {
        /// Form identifier.
        id: String,
        /// Update request body.
        body: UpdateFormRequest,
    },
}

/// A single editable draft form.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    form_id: Option<String>,
    /// Form title.
    pub title: String,
    /// Form description.
    pub description: String,
    fields: Vec<DraftField>,
    next_local_id: u64,
}

impl FormDraft {
    /// Start a new, empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing form.
    #[must_use]
    pub fn from_form(form: &Form) -> Self {
        Self {
            form_id: Some(form.id.clone()),
            title: form.title.clone(),
            description: form.description.clone(),
            fields: form
                .fields
                .iter()
                .map(|field| DraftField {
                    id: field.id.clone(),
                    label: field.label.clone(),
                    kind: field.kind.clone(),
                    persisted: true,
                })
                .collect(),
            next_local_id: 0,
        }
    }

    /// Current fields in draft order.
    #[must_use]
    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    /// Append a field of the chosen type with builder defaults. Returns the
    /// new field's draft identifier.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        self.next_local_id += 1;
        let id = format!("draft-{}", self.next_local_id);

        let kind = match field_type {
            FieldType::Text => FieldKind::Text {
                value: Some(String::new()),
            },
            FieldType::Number => FieldKind::Number {
                value: Some(String::new()),
            },
            FieldType::Date => FieldKind::Date { value: None },
            FieldType::Dropdown => FieldKind::Dropdown {
                options: vec![ChoiceOption::new("Option 1")],
            },
            FieldType::Checkbox => FieldKind::Checkbox {
                options: vec![ChoiceOption::new("Option 1"), ChoiceOption::new("Option 2")],
            },
            FieldType::Radio => FieldKind::Radio {
                options: vec![ChoiceOption::new("Option 1"), ChoiceOption::new("Option 2")],
            },
        };

        self.fields.push(DraftField {
            id: id.clone(),
            label: default_label(field_type),
            kind,
            persisted: false,
        });

        id
    }

    /// Move a field from one index to another (drag-reorder): the field is
    /// removed at `from` and re-inserted at `to`. Out-of-range indexes are
    /// ignored.
    pub fn move_field(&mut self, from: usize, to: usize) {
        if from >= self.fields.len() || to >= self.fields.len() || from == to {
            return;
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
    }

    /// Merge a partial update into a field. Returns false if the field is
    /// unknown.
    pub fn update_field(&mut self, id: &str, patch: DraftFieldPatch) -> bool {
        let Some(field) = self.field_mut(id) else {
            return false;
        };
        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(value) = patch.value {
            field.kind.set_default_value(Some(value));
        }
        true
    }

    /// Append an option ("Option N") to a choice field. Returns false for
    /// unknown or non-choice fields.
    pub fn add_option(&mut self, id: &str) -> bool {
        self.with_options(id, |options| {
            let label = format!("Option {}", options.len() + 1);
            options.push(ChoiceOption::new(label));
            true
        })
    }

    /// Rename one option of a choice field.
    pub fn rename_option(&mut self, id: &str, index: usize, label: impl Into<String>) -> bool {
        let label = label.into();
        self.with_options(id, |options| match options.get_mut(index) {
            Some(option) => {
                option.label = label;
                true
            }
            None => false,
        })
    }

    /// Flip one option's builder-time default selection.
    pub fn toggle_option(&mut self, id: &str, index: usize) -> bool {
        self.with_options(id, |options| match options.get_mut(index) {
            Some(option) => {
                option.checked = !option.checked;
                true
            }
            None => false,
        })
    }

    /// Remove a field. Returns false if the field is unknown.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.id != id);
        self.fields.len() != before
    }

    /// Produce the request the save action sends: a create when the draft
    /// is new, an update when it was loaded from an existing form. Draft
    /// identifiers are local only and never sent; persisted identifiers are
    /// kept so the update matches fields in place.
    #[must_use]
    pub fn save_payload(&self) -> SavePayload {
        match &self.form_id {
            Some(form_id) => SavePayload::Update {
                id: form_id.clone(),
                body: UpdateFormRequest {
                    title: self.title.clone(),
                    description: self.description.clone(),
                    fields: self
                        .fields
                        .iter()
                        .map(|field| FieldUpsert {
                            id: field.persisted.then(|| field.id.clone()),
                            label: field.label.clone(),
                            kind: field.kind.clone(),
                        })
                        .collect(),
                },
            },
            None => SavePayload::Create(CreateFormRequest {
                title: self.title.clone(),
                description: self.description.clone(),
                fields: self
                    .fields
                    .iter()
                    .map(|field| FieldSpec {
                        label: field.label.clone(),
                        kind: field.kind.clone(),
                    })
                    .collect(),
            }),
        }
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut DraftField> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    fn with_options(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Vec<ChoiceOption>) -> bool,
    ) -> bool {
        self.field_mut(id)
            .and_then(|field| field.kind.options_mut())
            .is_some_and(edit)
    }
}

fn default_label(field_type: FieldType) -> String {
    let name = match field_type {
        FieldType::Text => "Text",
        FieldType::Number => "Number",
        FieldType::Date => "Date",
        FieldType::Dropdown => "Dropdown",
        FieldType::Checkbox => "Checkbox",
        FieldType::Radio => "Radio",
    };
    format!("{name} Field")
}
