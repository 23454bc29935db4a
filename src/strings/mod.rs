//! # Strings Module
//!
//! Centralizes user-facing strings and prompt rendering.
//! Ensures consistency in messaging and easier localization/updates.

pub mod messages;
pub mod wizard;
