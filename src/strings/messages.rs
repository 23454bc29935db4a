//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes error messages, confirmations, and notification templates.

pub const WIZARD_CANCELLED: &str = "Team edition was cancelled. Better luck next time!";
pub const WIZARD_FAILED: &str = "There was an error editing the team, please try again";
pub const USER_NOT_FOUND: &str = "Hmmmm, I couldn't find the user. Try again!";
pub const NO_TEAMS: &str = "There is no teams, use `add team` to create a new team";
pub const TEAM_NAME_PROMPT: &str = "What should be the team name?";

pub fn wrong_choice(quit_keyword: &str) -> String {
    format!("Wrong choices, please try again :p or type `{quit_keyword}`")
}

pub fn team_name_empty(quit_keyword: &str) -> String {
    format!("The team name can't be empty, choose a name or type `{quit_keyword}`")
}

pub fn team_exists(quit_keyword: &str) -> String {
    format!("Team already exists, choose a new name or type `{quit_keyword}`")
}

pub fn member_added(username: &str, team: &str) -> String {
    format!("I've added @{username} to team {team}")
}

pub fn member_removed(username: &str, team: &str) -> String {
    format!("I've removed @{username} from team {team}")
}

pub fn added_to_team_notice(team: &str, author: &str) -> String {
    format!("You've been added in team {team} by @{author}.")
}

pub fn removed_from_team_notice(team: &str, author: &str) -> String {
    format!("You've been removed from team {team} by @{author}.")
}

pub fn team_deleted(team: &str) -> String {
    format!("I've deleted the team {team}")
}

pub fn team_updated_but_undelivered(channel: &str) -> String {
    format!("The team was updated, but I could not send the message to {channel}")
}
