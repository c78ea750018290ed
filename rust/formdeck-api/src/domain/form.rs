//! Form and field definitions.
//!
//! A [`Form`] owns an ordered list of [`Field`]s. Each field's shape varies
//! by its type tag, so the per-type data lives in the [`FieldKind`] sum type
//! rather than a bag of optional members: choice kinds carry options, scalar
//! kinds carry an optional default value, and the invariant "options exist
//! only for choice fields" holds by construction.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form single-line text.
    Text,
    /// Numeric input (answers travel as strings, like every scalar).
    Number,
    /// Calendar date.
    Date,
    /// Single-select dropdown.
    Dropdown,
    /// Multi-select checkbox group.
    Checkbox,
    /// Single-choice radio group.
    Radio,
}

impl FieldType {
    /// Convert the tag to its wire/database string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }

    /// Parse the tag from its stored string.
    ///
    /// # Errors
    ///
    /// Returns error if the tag string is not a known field type.
    #[allow(clippy::should_implement_trait, reason = "Different signature than std::str::FromStr")]
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "dropdown" => Ok(Self::Dropdown),
            "checkbox" => Ok(Self::Checkbox),
            "radio" => Ok(Self::Radio),
            _ => anyhow::bail!("Invalid field type: {s}"),
        }
    }

    /// Whether fields of this type carry an options list.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Checkbox | Self::Radio)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable choice within a choice-type field.
///
/// `checked` is a builder-time default only; it carries no meaning once a
/// submission has been made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChoiceOption {
    /// Option label shown to respondents.
    pub label: String,
    /// Pre-selected state in the builder.
    #[serde(default)]
    pub checked: bool,
}

impl ChoiceOption {
    /// Create an unchecked option.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }
}

/// Per-type field data, tagged on the wire by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Text input with an optional default value.
    Text {
        /// Builder-provided default value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Number input with an optional default value.
    Number {
        /// Builder-provided default value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Date input with an optional default value.
    Date {
        /// Builder-provided default value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Dropdown with an ordered options list.
    Dropdown {
        /// Ordered selectable options.
        options: Vec<ChoiceOption>,
    },
    /// Checkbox group with an ordered options list.
    Checkbox {
        /// Ordered selectable options.
        options: Vec<ChoiceOption>,
    },
    /// Radio group with an ordered options list.
    Radio {
        /// Ordered selectable options.
        options: Vec<ChoiceOption>,
    },
}

impl FieldKind {
    /// The type tag for this kind.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text { .. } => FieldType::Text,
            Self::Number { .. } => FieldType::Number,
            Self::Date { .. } => FieldType::Date,
            Self::Dropdown { .. } => FieldType::Dropdown,
            Self::Checkbox { .. } => FieldType::Checkbox,
            Self::Radio { .. } => FieldType::Radio,
        }
    }

    /// Options list, present only for choice kinds.
    #[must_use]
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            Self::Dropdown { options } | Self::Checkbox { options } | Self::Radio { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Mutable options list, present only for choice kinds.
    pub fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>> {
        match self {
            Self::Dropdown { options } | Self::Checkbox { options } | Self::Radio { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Default value, present only for scalar kinds.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        match self {
            Self::Text { value } | Self::Number { value } | Self::Date { value } => {
                value.as_deref()
            }
            _ => None,
        }
    }

    /// Set the default value on a scalar kind. Returns false (and does
    /// nothing) for choice kinds.
    pub fn set_default_value(&mut self, new_value: Option<String>) -> bool {
        match self {
            Self::Text { value } | Self::Number { value } | Self::Date { value } => {
                *value = new_value;
                true
            }
            _ => false,
        }
    }

    /// Reassemble a kind from its stored parts (type tag, default value,
    /// options). This is the inverse of the column split the store uses.
    ///
    /// # Errors
    ///
    /// Returns error if the type tag is unknown.
    pub fn from_parts(
        type_tag: &str,
        value: Option<String>,
        options: Option<Vec<ChoiceOption>>,
    ) -> Result<Self> {
        let kind = match FieldType::from_str(type_tag)? {
            FieldType::Text => Self::Text { value },
            FieldType::Number => Self::Number { value },
            FieldType::Date => Self::Date { value },
            FieldType::Dropdown => Self::Dropdown {
                options: options.unwrap_or_default(),
            },
            FieldType::Checkbox => Self::Checkbox {
                options: options.unwrap_or_default(),
            },
            FieldType::Radio => Self::Radio {
                options: options.unwrap_or_default(),
            },
        };
        Ok(kind)
    }
}

/// One typed input definition within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Field {
    /// Unique field identifier.
    pub id: String,
    /// Question label shown to respondents.
    pub label: String,
    /// Per-type data (type tag, options or default value).
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Field specification submitted when creating a form. Identifiers are
/// generated by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldSpec {
    /// Question label.
    pub label: String,
    /// Per-type data.
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Field submitted on update. A matching identifier updates the existing
/// field in place; a missing or unknown identifier inserts a new field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldUpsert {
    /// Existing field identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Question label.
    pub label: String,
    /// Per-type data.
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// A named, ordered collection of fields; the unit of creation, sharing,
/// and deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Primary identifier.
    pub id: String,
    /// Public share token, distinct from the primary identifier and
    /// immutable once assigned.
    pub share_id: String,
    /// Form title.
    pub title: String,
    /// Form description.
    pub description: String,
    /// Fields in stored order.
    pub fields: Vec<Field>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Listing projection: identifiers and metadata only, fields and
/// submissions excluded for payload size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    /// Primary identifier.
    pub id: String,
    /// Public share token.
    pub share_id: String,
    /// Form title.
    pub title: String,
    /// Form description.
    pub description: String,
}
