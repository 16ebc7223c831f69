//! Common utilities and shared types for fedifeed.
//!
//! This crate provides foundational components used across all fedifeed
//! crates:
//!
//! - **Configuration**: Read-only session context via [`Session`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use fedifeed_common::{AppResult, Session};
//!
//! fn example() -> AppResult<()> {
//!     let session = Session::load()?;
//!     println!("Feed for {}", session.base_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{Session, SnsVariant};
pub use error::{AppError, AppResult};
