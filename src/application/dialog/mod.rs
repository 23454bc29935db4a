//! Team wizard state machine
//!
//! Each wizard step is a `DialogState` value. `transition` maps the current
//! state and the user's next message to the following state plus the effects
//! the router has to carry out.

mod effect;
pub mod state;
pub(crate) mod transition;

pub use effect::Effect;
pub use state::{Collaborators, DialogState, TeamPurpose, Wizard};
pub use transition::{Transition, cancel, start, transition};
