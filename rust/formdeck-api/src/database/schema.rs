//! Database schema definitions.

/// SQLite schema, applied idempotently at startup.
///
/// Field options and submission responses are JSON columns: their shapes
/// vary by field type, and the store never queries inside them.
pub const SQLITE_SCHEMA: &str = r"
-- Forms table
CREATE TABLE IF NOT EXISTS forms (
    id TEXT PRIMARY KEY,
    share_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_forms_share ON forms(share_id);

-- Fields table; position preserves the authored field order
CREATE TABLE IF NOT EXISTS fields (
    id TEXT PRIMARY KEY,
    form_id TEXT NOT NULL REFERENCES forms(id),
    position INTEGER NOT NULL,
    type TEXT NOT NULL,
    label TEXT NOT NULL,
    value TEXT,
    options TEXT
);
CREATE INDEX IF NOT EXISTS idx_fields_form ON fields(form_id, position);

-- Submissions table; no foreign key, rows are removed explicitly on
-- form delete
CREATE TABLE IF NOT EXISTS submissions (
    id TEXT PRIMARY KEY,
    form_id TEXT NOT NULL,
    responses TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_submissions_form ON submissions(form_id);
";
