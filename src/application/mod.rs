//! # Application Layer
//!
//! Contains the dialog engine of the bot.
//! This includes the per-user context store, the wizard state machine, parameter parsing and the router.

pub mod audit;
pub mod context;
pub mod dialog;
pub mod parsing;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;
