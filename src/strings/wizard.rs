//! # Wizard Strings
//!
//! Prompts and menus rendered by the team wizards.

/// Numbered team menu. `teams` must already be in display order.
pub fn format_team_menu(teams: &[String]) -> String {
    let choices: Vec<String> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| format!("{i} - {team}"))
        .collect();
    format!("Choose a team :\n{}", choices.join("\n"))
}

pub fn member_action_prompt(team: &str) -> String {
    format!("What do you want to do with team {team}?")
}

pub const MEMBER_ACTION_HELP: &str =
    "- `add @name`: Add *@name* to team\n- `remove @name`: Remove *@name* from team";

/// Exact text a user has to type to confirm deleting `team`.
pub fn deletion_confirmation(team: &str) -> String {
    format!("remove team {team}")
}

pub fn deletion_prompt(team: &str, quit_keyword: &str) -> String {
    format!(
        "Type `{}` to delete the team or type `{quit_keyword}`",
        deletion_confirmation(team)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_numbers_from_zero() {
        let menu = format_team_menu(&["Alpha".to_string(), "Bravo".to_string()]);
        assert_eq!(menu, "Choose a team :\n0 - Alpha\n1 - Bravo");
    }

    #[test]
    fn test_deletion_prompt_mentions_exact_confirmation() {
        let prompt = deletion_prompt("Core", "quit");
        assert!(prompt.contains("`remove team Core`"));
        assert!(prompt.ends_with("`quit`"));
    }
}
