//! # Teambot
//!
//! Conversational team management for chat rooms. Users start guided wizards
//! (`add team`, `edit team`, `remove team`) and the dialog engine tracks, per
//! user, which step their next message answers.
//!
//! - Domain: Configuration, Types, Collaborator traits
//! - Application: Context store, Wizard state machine, Router
//! - Infrastructure: Matrix messenger, In-memory team repository

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod strings;
