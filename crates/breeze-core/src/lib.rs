//! breeze-core — city search core library.
//!
//! This crate holds everything that is independent of the terminal and the
//! network: the shared types, the application config, the trailing-edge
//! [`Debouncer`](debounce::Debouncer), and the [`SearchSession`](search::SearchSession)
//! that mediates between keystrokes, the debounced lookup trigger, and the
//! result list.
//!
//! # Architecture
//!
//! ```text
//! keystrokes ──► SearchSession ──► Debouncer ──► LookupRequest
//!                      ▲                              │
//!                      └──── LookupOutcome ◄── geocoding task
//! ```
//!
//! The UI drives the main thread; lookups run on background tasks and rejoin
//! through a `tokio` channel. The session never performs I/O itself.

pub mod config;
pub mod debounce;
pub mod search;
pub mod types;

pub use types::{Location, LookupStatus};
