//! # Spaced Architecture
//!
//! Spaced is a **UI-agnostic review engine**: it schedules spaced-repetition
//! intervals from learner feedback, accumulates per-skill mastery and reports
//! which items are due. The `spaced` binary is one client; an HTTP handler
//! or a test harness would call the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Request validation (MissingField / InvalidRating)        │
//! │  - Supplies the clock, dispatches to commands               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One load → mutate → save cycle per operation             │
//! │  - Returns CmdResult values with structured messages        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Policy (scheduler.rs, mastery.rs, due.rs, recommend.rs)    │
//! │  - Pure functions over a Snapshot                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ReviewStore: revision-checked whole-document saves       │
//! │  - FsBackend (JSON), SqliteBackend, MemBackend (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust values, returns `Result`s and
//! never writes to stdout/stderr or exits the process. Diagnostics go through
//! `tracing`; installing a subscriber is the client's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The request boundary
//! - [`commands`]: One module per operation
//! - [`scheduler`]: Interval policy
//! - [`mastery`]: Mastery accumulation and percentages
//! - [`due`]: Due-set evaluation
//! - [`recommend`]: Due items ranked weakest first
//! - [`store`]: Storage abstraction and backends
//! - [`model`]: Core data types (`Rating`, `ReviewRecord`, `MasteryRecord`, `Snapshot`)
//! - [`config`]: Layered configuration
//! - [`init`]: Scope detection and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod due;
pub mod error;
pub mod init;
pub mod mastery;
pub mod model;
pub mod recommend;
pub mod scheduler;
pub mod store;
