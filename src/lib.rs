//! # input-gateway
//!
//! HTML form gateway that stores submitted values in PostgreSQL.
//!
//! The service renders a one-field form, stores each submission as a row
//! in the `inputs` table and lists every stored row. Liveness and readiness
//! checks plus a Prometheus endpoint make it fit for a container
//! orchestrator. Database credentials come from AWS Secrets Manager, the
//! environment, or both.
//!
//! ## Architecture
//!
//! ```text
//! Browser / orchestrator / Prometheus
//!     │
//!     ├── Handlers (api/)          form, submit, list, healthz, ready, metrics
//!     ├── Pages (templates)        Tera, compiled in
//!     │
//!     ├── RecordStore (domain/)    trait seam
//!     │
//!     └── PostgresStore (persistence/)
//!             ▲
//!             └── ConnectionParams (config/) ← secrets service + env
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod persistence;
pub mod templates;
