//! Persistence layer: PostgreSQL-backed record storage.
//!
//! [`postgres::PostgresStore`] owns the `sqlx::PgPool` and implements
//! [`RecordStore`](crate::domain::RecordStore). The table definition lives
//! in [`schema`] and is applied once at startup.

pub mod postgres;
pub mod schema;
