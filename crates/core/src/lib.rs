//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `auth` - Password hashing and verification
//! - `summary` - Trailing-window and monthly financial summaries

pub mod auth;
pub mod summary;
