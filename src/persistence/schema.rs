//! Table definition for stored records.

/// Name of the records table.
pub const INPUTS_TABLE: &str = "inputs";

/// Idempotent DDL applied at startup by
/// [`PostgresStore::ensure_schema`](super::postgres::PostgresStore::ensure_schema).
pub const CREATE_INPUTS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS inputs (id SERIAL PRIMARY KEY, value TEXT NOT NULL)";

/// Inserts one value and returns the generated id.
pub const INSERT_INPUT: &str = "INSERT INTO inputs (value) VALUES ($1) RETURNING id";

/// Reads every row. No ordering is requested.
pub const SELECT_ALL_INPUTS: &str = "SELECT id, value FROM inputs";

/// Readiness round trip.
pub const PING: &str = "SELECT 1";
