//! # Domain Layer
//!
//! Core definitions, types, and traits that define the team-management domain.
//! Independent of the chat transport, serving as the contract for other layers.

pub mod config;
pub mod error;
pub mod schedule;
pub mod traits;
pub mod types;
