//! # Sutra Billing Database Layer
//!
//! SQLite persistence for Sutra Billing, built on sqlx.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         sutra-db                                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  pool.rs        Database handle + connection pool (WAL mode)     │  │
//! │  │  migrations.rs  Embedded SQL migrations (sqlx::migrate!)         │  │
//! │  │  repository/    BillRepository: CRUD over the bills table        │  │
//! │  │  error.rs       DbError taxonomy + sqlx conversions              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Data flow:                                                             │
//! │    Service op ──► Database::bills() ──► BillRepository ──► SQLite      │
//! │                                                                         │
//! │  The domain types live in sutra-core; this crate only maps them        │
//! │  to and from rows. No business arithmetic happens here.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use sutra_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("/path/to/sutra.db")).await?;
//! let bills = db.bills().list_all().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::bill::BillRepository;
