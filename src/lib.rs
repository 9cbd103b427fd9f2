//! Library crate for user-admin-tui.
//!
//! This crate exposes the building blocks of the TUI:
//! - Backend seam and HTTP client (`api`)
//! - Application state, controller and update loop (`app`)
//! - Command-line configuration and logging (`config`)
//! - Error and result types (`error`)
//! - UI rendering (`ui`)
//!
//! It is used by the `user-admin-tui` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{ApiError, DynError, Result};
