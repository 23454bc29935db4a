//! # Parsing Utils
//!
//! Extracts structured parameters (named regex groups) out of free-form chat text.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Maps every named group of `pattern` that took part in the match to its captured text.
/// Returns an empty map when the pattern does not match.
pub fn extract_params(pattern: &Regex, subject: &str) -> HashMap<String, String> {
    let Some(caps) = pattern.captures(subject) else {
        return HashMap::new();
    };

    pattern
        .capture_names()
        .flatten()
        .filter_map(|name| {
            caps.name(name)
                .map(|value| (name.to_string(), value.as_str().to_string()))
        })
        .collect()
}

/// `add <@user>` / `remove <@user>`, case-insensitive, nothing else on the line.
/// A bare `@user:server` mention is captured as `bare`.
pub fn member_action_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(?P<action>add|remove)\s+(?:<@(?P<user>[^>\s]+)>|(?P<bare>@[^\s<>]+))\s*$",
        )
        .expect("valid member action regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Add,
    Remove,
}

/// Parses a membership instruction into the action and the mentioned user id.
pub fn parse_member_action(text: &str) -> Option<(MemberAction, String)> {
    let params = extract_params(member_action_regex(), text);

    let action = match params.get("action")?.to_lowercase().as_str() {
        "add" => MemberAction::Add,
        "remove" => MemberAction::Remove,
        _ => return None,
    };
    let user = params
        .get("user")
        .or_else(|| params.get("bare"))
        .filter(|u| !u.is_empty())?;

    Some((action, user.clone()))
}
