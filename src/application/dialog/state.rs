//! Wizard states and the collaborators transitions read from

use crate::domain::config::TeamDefaults;
use crate::domain::traits::{Messenger, TeamRepository};
use crate::domain::types::UserInfo;
use std::sync::Arc;

/// What the selected team will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamPurpose {
    Edit,
    Delete,
}

/// The step a user's next message belongs to.
///
/// `actor` is the requester, resolved once when the wizard starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// Team creation: waiting for the new team's name
    AwaitingTeamName { actor: UserInfo },

    /// Waiting for an index into `teams`, which is sorted by name
    ChoosingTeam {
        actor: UserInfo,
        purpose: TeamPurpose,
        teams: Vec<String>,
    },

    /// Team edition: waiting for `add <@user>` or `remove <@user>`
    ChoosingMemberAction { actor: UserInfo, team: String },

    /// Team deletion: waiting for the exact confirmation text
    ConfirmingDeletion { actor: UserInfo, team: String },
}

impl DialogState {
    pub fn actor(&self) -> &UserInfo {
        match self {
            DialogState::AwaitingTeamName { actor }
            | DialogState::ChoosingTeam { actor, .. }
            | DialogState::ChoosingMemberAction { actor, .. }
            | DialogState::ConfirmingDeletion { actor, .. } => actor,
        }
    }

    pub fn step_name(&self) -> &'static str {
        match self {
            DialogState::AwaitingTeamName { .. } => "awaiting_team_name",
            DialogState::ChoosingTeam { .. } => "choosing_team",
            DialogState::ChoosingMemberAction { .. } => "choosing_member_action",
            DialogState::ConfirmingDeletion { .. } => "confirming_deletion",
        }
    }
}

/// Top-level wizards a user can start when no context is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wizard {
    CreateTeam,
    EditTeam,
    DeleteTeam,
}

impl Wizard {
    /// Checked in order against the lowercased message text
    const TRIGGERS: [(&'static str, Wizard); 3] = [
        ("edit team", Wizard::EditTeam),
        ("add team", Wizard::CreateTeam),
        ("remove team", Wizard::DeleteTeam),
    ];

    pub fn match_trigger(text: &str) -> Option<Self> {
        let folded = text.to_lowercase();
        Self::TRIGGERS
            .iter()
            .find(|(prefix, _)| folded.starts_with(prefix))
            .map(|(_, wizard)| *wizard)
    }
}

/// Read access to the outside world, plus the settings wizards need
#[derive(Clone)]
pub struct Collaborators {
    pub messenger: Arc<dyn Messenger>,
    pub teams: Arc<dyn TeamRepository>,
    pub defaults: TeamDefaults,
    pub quit_keyword: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_are_case_folded_prefixes() {
        assert_eq!(Wizard::match_trigger("Edit Team please"), Some(Wizard::EditTeam));
        assert_eq!(Wizard::match_trigger("ADD TEAM"), Some(Wizard::CreateTeam));
        assert_eq!(Wizard::match_trigger("remove team Core"), Some(Wizard::DeleteTeam));
        assert_eq!(Wizard::match_trigger("  add team"), None);
        assert_eq!(Wizard::match_trigger("hello"), None);
    }
}
