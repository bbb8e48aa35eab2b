//! # caja-store: Persistence Gateway + Service Shell
//!
//! Where caja-core's pure operations meet the storage blob.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  View layer (external)                                              │
//! │        │ named operations                                           │
//! │        ▼                                                            │
//! │  PosService ──► caja-core mutation ──► gateway.save_state()         │
//! │        │                                     │                      │
//! │        │                                     ▼                      │
//! │        │                               BlobStore (key → JSON)       │
//! │        └── derived reads (search, dashboard, receipts) — no save    │
//! │                                                                     │
//! │  Every mutating operation persists before returning. If the save    │
//! │  fails, the in-memory effect stands and the error is surfaced —     │
//! │  a known gap, never silent.                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`blob`] - the BlobStore trait plus file and in-memory stores
//! - [`gateway`] - state/profile (de)serialization over a store
//! - [`service`] - PosService, the operation surface the view layer calls
//! - [`error`] - StoreError / ServiceError

pub mod blob;
pub mod error;
pub mod gateway;
pub mod service;

pub use blob::{BlobStore, JsonFileStore, MemoryStore};
pub use error::{ServiceError, StoreError};
pub use gateway::StateGateway;
pub use service::{PosService, ProfileUpdate};
