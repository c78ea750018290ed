//! Form, field, and submission storage.
//!
//! Provides CRUD operations over the three related tables, including the
//! nested field writes that back form create/update.
//!
//! # Example
//!
//! ```rust,ignore
//! use formdeck_api::database::FormStore;
//!
//! let store = FormStore::new("./formdeck.db").await?;
//!
//! let form = store.create_form("Survey".into(), String::new(), specs).await?;
//! let fetched = store.get_form_by_share(&form.share_id).await?;
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;
use uuid::Uuid;

use super::schema::SQLITE_SCHEMA;
use crate::domain::{
    ChoiceOption, Field, FieldKind, FieldSpec, FieldUpsert, Form, FormSummary, ResponseMap,
    Submission,
};

const FORM_BY_ID: &str =
    "SELECT id, share_id, title, description, created_at FROM forms WHERE id = ?1";
const FORM_BY_SHARE: &str =
    "SELECT id, share_id, title, description, created_at FROM forms WHERE share_id = ?1";

/// Form store over a SQLite database file.
///
/// # Thread Safety
///
/// All operations use `tokio::spawn_blocking` so database work runs on the
/// blocking thread pool, making the store safe for concurrent async access.
#[derive(Debug, Clone)]
pub struct FormStore {
    /// Path to the SQLite database file.
    db_path: PathBuf,
}

impl FormStore {
    /// Create a new form store.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema migration
    /// fails.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let db_path = path.into();

        let store = Self { db_path };
        store.migrate_schema().await?;

        Ok(store)
    }

    /// Migrate the database schema to the latest version.
    async fn migrate_schema(&self) -> Result<()> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Connection::open(&db_path).context("Failed to open database")?;

            conn.pragma_update(None, "journal_mode", "WAL")
                .context("Failed to enable WAL mode")?;

            conn.execute_batch(SQLITE_SCHEMA)
                .context("Failed to apply schema")?;

            Ok(())
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// Create a form together with its fields.
    ///
    /// The form row and every field row are written in one transaction, so
    /// the caller observes either the whole form or nothing.
    ///
    /// # Errors
    ///
    /// Returns error if any write fails.
    pub async fn create_form(
        &self,
        title: String,
        description: String,
        fields: Vec<FieldSpec>,
    ) -> Result<Form> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Form> {
            let conn = Connection::open(&db_path)?;

            let id = Uuid::new_v4().to_string();
            let share_id = Uuid::new_v4().to_string();
            let now = Utc::now().timestamp();

            conn.execute("BEGIN IMMEDIATE", [])?;

            match (|| -> Result<Vec<Field>> {
                conn.execute(
                    r"
                    INSERT INTO forms (id, share_id, title, description, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ",
                    params![&id, &share_id, &title, &description, now],
                )
                .context("Failed to insert form")?;

                (0_i64..)
                    .zip(fields.iter())
                    .map(|(position, spec)| {
                        insert_field(&conn, &id, position, &spec.label, &spec.kind)
                    })
                    .collect()
            })() {
                Ok(stored) => {
                    conn.execute("COMMIT", [])?;
                    Ok(Form {
                        id,
                        share_id,
                        title,
                        description,
                        fields: stored,
                        created_at: ts_to_datetime(now),
                    })
                }
                Err(e) => {
                    conn.execute("ROLLBACK", []).ok();
                    Err(e)
                }
            }
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// Get a form with its fields in stored order.
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails.
    pub async fn get_form(&self, id: &str) -> Result<Option<Form>> {
        let id = id.to_string();
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Option<Form>> {
            let conn = Connection::open(&db_path)?;
            load_form(&conn, FORM_BY_ID, &id)
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// Get a form by its public share identifier. Same contract as
    /// [`Self::get_form`], keyed on the share token instead of the primary
    /// key.
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails.
    pub async fn get_form_by_share(&self, share_id: &str) -> Result<Option<Form>> {
        let share_id = share_id.to_string();
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Option<Form>> {
            let conn = Connection::open(&db_path)?;
            load_form(&conn, FORM_BY_SHARE, &share_id)
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// List all forms as summaries (no fields, no submissions).
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails.
    pub async fn list_forms(&self) -> Result<Vec<FormSummary>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Vec<FormSummary>> {
            let conn = Connection::open(&db_path)?;

            let mut stmt = conn.prepare(
                "SELECT id, share_id, title, description FROM forms ORDER BY created_at, rowid",
            )?;
            let summaries = stmt
                .query_map([], |row| {
                    Ok(FormSummary {
                        id: row.get(0)?,
                        share_id: row.get(1)?,
                        title: row.get(2)?,
                        description: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(summaries)
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// Update a form's title, description, and field set.
    ///
    /// Submitted fields with a matching identifier are updated in place,
    /// the rest are inserted; fields absent from the submitted set are
    /// deleted. The submitted order becomes the stored order. Returns
    /// `None` if no form matches.
    ///
    /// # Errors
    ///
    /// Returns error if any write fails.
    pub async fn update_form(
        &self,
        id: &str,
        title: String,
        description: String,
        fields: Vec<FieldUpsert>,
    ) -> Result<Option<Form>> {
        let id = id.to_string();
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Option<Form>> {
            let conn = Connection::open(&db_path)?;

            conn.execute("BEGIN IMMEDIATE", [])?;

            let result = (|| -> Result<bool> {
                let updated = conn
                    .execute(
                        "UPDATE forms SET title = ?1, description = ?2 WHERE id = ?3",
                        params![&title, &description, &id],
                    )
                    .context("Failed to update form")?;
                if updated == 0 {
                    return Ok(false);
                }

                let existing = {
                    let mut stmt = conn.prepare("SELECT id FROM fields WHERE form_id = ?1")?;
                    let ids = stmt
                        .query_map(params![&id], |row| row.get::<_, String>(0))?
                        .collect::<rusqlite::Result<HashSet<String>>>()?;
                    ids
                };

                let mut kept = HashSet::new();
                for (position, field) in (0_i64..).zip(fields.iter()) {
                    let known = field.id.as_deref().filter(|fid| existing.contains(*fid));
                    match known {
                        Some(fid) => {
                            let (value, options) = kind_to_columns(&field.kind)?;
                            conn.execute(
                                r"
                                UPDATE fields
                                SET position = ?1, type = ?2, label = ?3, value = ?4, options = ?5
                                WHERE id = ?6 AND form_id = ?7
                                ",
                                params![
                                    position,
                                    field.kind.field_type().as_str(),
                                    &field.label,
                                    &value,
                                    &options,
                                    fid,
                                    &id
                                ],
                            )
                            .context("Failed to update field")?;
                            kept.insert(fid.to_string());
                        }
                        None => {
                            let stored =
                                insert_field(&conn, &id, position, &field.label, &field.kind)?;
                            kept.insert(stored.id);
                        }
                    }
                }

                // Fields dropped from the submitted set are removed
                for stale in existing.difference(&kept) {
                    conn.execute(
                        "DELETE FROM fields WHERE id = ?1 AND form_id = ?2",
                        params![stale, &id],
                    )
                    .context("Failed to delete removed field")?;
                }

                Ok(true)
            })();

            match result {
                Ok(true) => {
                    conn.execute("COMMIT", [])?;
                    load_form(&conn, FORM_BY_ID, &id)
                }
                Ok(false) => {
                    conn.execute("ROLLBACK", []).ok();
                    Ok(None)
                }
                Err(e) => {
                    conn.execute("ROLLBACK", []).ok();
                    Err(e)
                }
            }
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// Delete a form, its fields, and its submissions. Returns false if no
    /// form matches.
    ///
    /// The three deletes run as separate statements in referential order;
    /// a failure partway leaves the later rows in place for a retry.
    ///
    /// # Errors
    ///
    /// Returns error if any delete fails.
    pub async fn delete_form(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<bool> {
            let conn = Connection::open(&db_path)?;

            let exists = conn
                .query_row("SELECT 1 FROM forms WHERE id = ?1", params![&id], |_| {
                    Ok(())
                })
                .optional()?
                .is_some();
            if !exists {
                return Ok(false);
            }

            conn.execute("DELETE FROM fields WHERE form_id = ?1", params![&id])
                .context("Failed to delete fields")?;
            conn.execute("DELETE FROM submissions WHERE form_id = ?1", params![&id])
                .context("Failed to delete submissions")?;
            conn.execute("DELETE FROM forms WHERE id = ?1", params![&id])
                .context("Failed to delete form")?;

            Ok(true)
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// Persist one respondent's answers. Returns `None` without writing if
    /// the form does not exist.
    ///
    /// Answer keys are not checked against live fields; unmatched keys
    /// null-fill at report time.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn create_submission(
        &self,
        form_id: &str,
        responses: ResponseMap,
    ) -> Result<Option<Submission>> {
        let form_id = form_id.to_string();
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Option<Submission>> {
            let conn = Connection::open(&db_path)?;

            // Existence check only; the submit-vs-delete race window is
            // accepted
            let exists = conn
                .query_row(
                    "SELECT 1 FROM forms WHERE id = ?1",
                    params![&form_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }

            let id = Uuid::new_v4().to_string();
            let now = Utc::now().timestamp();
            let encoded =
                serde_json::to_string(&responses).context("Failed to encode responses")?;

            conn.execute(
                r"
                INSERT INTO submissions (id, form_id, responses, created_at)
                VALUES (?1, ?2, ?3, ?4)
                ",
                params![&id, &form_id, &encoded, now],
            )
            .context("Failed to insert submission")?;

            Ok(Some(Submission {
                id,
                form_id,
                responses,
                created_at: ts_to_datetime(now),
            }))
        })
        .await
        .context("Failed to spawn blocking task")?
    }

    /// List all submissions for a form, oldest first.
    ///
    /// # Errors
    ///
    /// Returns error if the database operation fails.
    pub async fn list_submissions(&self, form_id: &str) -> Result<Vec<Submission>> {
        let form_id = form_id.to_string();
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || -> Result<Vec<Submission>> {
            let conn = Connection::open(&db_path)?;

            let mut stmt = conn.prepare(
                r"
                SELECT id, form_id, responses, created_at
                FROM submissions
                WHERE form_id = ?1
                ORDER BY created_at, rowid
                ",
            )?;
            let rows = stmt
                .query_map(params![&form_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(id, form_id, encoded, created_at)| {
                    let responses: ResponseMap = serde_json::from_str(&encoded)
                        .context("Failed to decode responses")?;
                    Ok(Submission {
                        id,
                        form_id,
                        responses,
                        created_at: ts_to_datetime(created_at),
                    })
                })
                .collect()
        })
        .await
        .context("Failed to spawn blocking task")?
    }
}

/// Load a form plus its fields by one of the `FORM_BY_*` queries.
fn load_form(conn: &Connection, sql: &str, key: &str) -> Result<Option<Form>> {
    let head = conn
        .query_row(sql, params![key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })
        .optional()?;

    let Some((id, share_id, title, description, created_at)) = head else {
        return Ok(None);
    };

    let fields = load_fields(conn, &id)?;

    Ok(Some(Form {
        id,
        share_id,
        title,
        description,
        fields,
        created_at: ts_to_datetime(created_at),
    }))
}

/// Load a form's fields in stored order.
fn load_fields(conn: &Connection, form_id: &str) -> Result<Vec<Field>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, label, value, options FROM fields WHERE form_id = ?1 ORDER BY position",
    )?;
    let rows = stmt
        .query_map(params![form_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(id, type_tag, label, value, options_json)| {
            let options = options_json
                .as_deref()
                .map(serde_json::from_str::<Vec<ChoiceOption>>)
                .transpose()
                .context("Failed to decode field options")?;
            let kind = FieldKind::from_parts(&type_tag, value, options)?;
            Ok(Field { id, label, kind })
        })
        .collect()
}

/// Insert one field row at the given position, generating its identifier.
fn insert_field(
    conn: &Connection,
    form_id: &str,
    position: i64,
    label: &str,
    kind: &FieldKind,
) -> Result<Field> {
    let id = Uuid::new_v4().to_string();
    let (value, options) = kind_to_columns(kind)?;

    conn.execute(
        r"
        INSERT INTO fields (id, form_id, position, type, label, value, options)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ",
        params![
            &id,
            form_id,
            position,
            kind.field_type().as_str(),
            label,
            &value,
            &options
        ],
    )
    .context("Failed to insert field")?;

    Ok(Field {
        id,
        label: label.to_string(),
        kind: kind.clone(),
    })
}

/// Split a field kind into its value/options columns.
fn kind_to_columns(kind: &FieldKind) -> Result<(Option<String>, Option<String>)> {
    let value = kind.default_value().map(ToString::to_string);
    let options = kind
        .options()
        .map(serde_json::to_string)
        .transpose()
        .context("Failed to encode field options")?;
    Ok((value, options))
}

fn ts_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
