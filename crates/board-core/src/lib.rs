//! Platform-neutral core of the sprint Kanban board: domain types, the
//! report client, board state, filtering, the status transition workflow
//! and persisted preferences.

pub mod api_key;
pub mod attendance;
pub mod board;
pub mod client;
pub mod config;
pub mod debounce;
pub mod domain;
pub mod error;
pub mod filter;
pub mod identity;
pub mod repository;
pub mod workflow;

pub use board::BoardState;
pub use client::{ReportApi, ReportClient, ReqwestTransport, TaskBatch};
pub use config::{BoardConfig, CommitPolicy};
pub use error::{ReportError, ReportResult, StoreError, StoreResult};
pub use filter::BoardFilter;
pub use identity::{IdentityProvider, Session};
pub use workflow::{DropOutcome, DropTarget, Settlement, TransitionWorkflow};
