//! Effects produced by wizard transitions

use crate::application::audit::AuditEvent;
use crate::domain::types::{PostOptions, Team};

/// Externally visible actions, executed in order after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Post to the channel the triggering message came from
    Reply { text: String, options: PostOptions },

    /// Post to another channel or directly to a user
    Notify { channel: String, text: String },

    CreateTeam(Team),

    DeleteTeam { team: String },

    AddMember { team: String, username: String },

    RemoveMember { team: String, username: String },

    /// Structured log entry, never fails
    Audit(AuditEvent),
}

impl Effect {
    pub fn reply(text: impl Into<String>) -> Self {
        Effect::Reply {
            text: text.into(),
            options: PostOptions::default(),
        }
    }

    pub fn reply_with(text: impl Into<String>, options: PostOptions) -> Self {
        Effect::Reply {
            text: text.into(),
            options,
        }
    }

    /// True for effects that change the team repository
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Effect::CreateTeam(_)
                | Effect::DeleteTeam { .. }
                | Effect::AddMember { .. }
                | Effect::RemoveMember { .. }
        )
    }
}
