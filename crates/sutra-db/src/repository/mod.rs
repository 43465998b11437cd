//! # Repository Module
//!
//! Database repository implementations for Sutra Billing.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service Operation                                                     │
//! │       │                                                                 │
//! │       │  db.bills().list_all()                                          │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BillRepository                                                        │
//! │  ├── list_all(&self)                                                    │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── create(&self, bill)                                                │
//! │  ├── update(&self, id, bill)                                            │
//! │  ├── set_drive_file(&self, id, file_id, link)                           │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • The core never sees the storage medium, only Bill values            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bill;
