//! # Domain Traits
//!
//! Abstract interfaces for the collaborators of the dialog engine (chat transport, team storage).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::types::{PostOptions, Team, UserInfo};
use async_trait::async_trait;

/// Abstract interface for a messaging client (e.g., Matrix, Slack)
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post a message to a channel. A channel starting with `@` addresses a user directly.
    async fn post(&self, channel: &str, text: &str, options: &PostOptions) -> Result<(), String>;

    /// Resolve a user id to its profile
    async fn user_info(&self, user_id: &str) -> Result<UserInfo, String>;
}

/// Abstract interface for the team store
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// All team names, in name order
    async fn list_teams(&self) -> Result<Vec<String>, String>;

    /// Names of the teams the given member belongs to
    async fn list_teams_for_user(&self, username: &str) -> Result<Vec<String>, String>;

    async fn add_team(&self, team: Team) -> Result<(), String>;

    async fn delete_team(&self, name: &str) -> Result<(), String>;

    async fn add_member(&self, team: &str, username: &str) -> Result<(), String>;

    async fn remove_member(&self, team: &str, username: &str) -> Result<(), String>;
}
