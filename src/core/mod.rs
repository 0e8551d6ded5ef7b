//! Core components of the `creditsafe-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`CreditsafeClient`] and its builder.
//! - The primary [`CreditsafeError`] type.
//! - The [`Environment`] a client is bound to.

/// The main client (`CreditsafeClient`), builder, and transport options.
pub mod client;
/// The primary error type (`CreditsafeError`) for the crate.
pub mod error;
/// Environment selection.
pub mod models;

// convenient re-exports so most code can just `use crate::core::CreditsafeClient`
pub use client::{CreditsafeClient, CreditsafeClientBuilder, Credentials, TransportOptions};
pub use error::{CreditsafeError, Result};
pub use models::Environment;
