//! # In-Memory Team Repository
//!
//! Keeps team records in process memory, ordered by name.
//! Nothing is written to disk: teams live as long as the bot process.

use crate::domain::traits::TeamRepository;
use crate::domain::types::Team;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct MemoryTeamRepository {
    teams: RwLock<BTreeMap<String, Team>>,
}

impl MemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        Self {
            teams: RwLock::new(
                teams
                    .into_iter()
                    .map(|team| (team.name.clone(), team))
                    .collect(),
            ),
        }
    }

    /// Snapshot of a single team
    pub fn team(&self, name: &str) -> Option<Team> {
        self.read().ok()?.get(name).cloned()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Team>>, String> {
        self.teams.read().map_err(|e| format!("team store poisoned: {e}"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Team>>, String> {
        self.teams.write().map_err(|e| format!("team store poisoned: {e}"))
    }
}

#[async_trait]
impl TeamRepository for MemoryTeamRepository {
    async fn list_teams(&self) -> Result<Vec<String>, String> {
        Ok(self.read()?.keys().cloned().collect())
    }

    async fn list_teams_for_user(&self, username: &str) -> Result<Vec<String>, String> {
        Ok(self
            .read()?
            .values()
            .filter(|team| team.members.iter().any(|m| m == username))
            .map(|team| team.name.clone())
            .collect())
    }

    async fn add_team(&self, team: Team) -> Result<(), String> {
        let mut teams = self.write()?;
        if teams.contains_key(&team.name) {
            return Err(format!("team `{}` already exists", team.name));
        }
        tracing::debug!("Storing team {}", team.name);
        teams.insert(team.name.clone(), team);
        Ok(())
    }

    async fn delete_team(&self, name: &str) -> Result<(), String> {
        self.write()?
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| format!("team `{name}` not found"))
    }

    async fn add_member(&self, team: &str, username: &str) -> Result<(), String> {
        let mut teams = self.write()?;
        let record = teams
            .get_mut(team)
            .ok_or_else(|| format!("team `{team}` not found"))?;
        if !record.members.iter().any(|m| m == username) {
            record.members.push(username.to_string());
        }
        Ok(())
    }

    async fn remove_member(&self, team: &str, username: &str) -> Result<(), String> {
        let mut teams = self.write()?;
        let record = teams
            .get_mut(team)
            .ok_or_else(|| format!("team `{team}` not found"))?;
        record.members.retain(|m| m != username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::team_named;

    #[tokio::test]
    async fn test_lists_are_name_ordered() {
        let repo = MemoryTeamRepository::with_teams([
            team_named("Bravo", &["alice"]),
            team_named("Alpha", &["bob"]),
            team_named("Charlie", &["alice", "bob"]),
        ]);

        assert_eq!(repo.list_teams().await.unwrap(), vec!["Alpha", "Bravo", "Charlie"]);
        assert_eq!(
            repo.list_teams_for_user("alice").await.unwrap(),
            vec!["Bravo", "Charlie"]
        );
        assert!(repo.list_teams_for_user("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_delete_team() {
        let repo = MemoryTeamRepository::new();
        repo.add_team(team_named("Core", &["alice"])).await.unwrap();
        assert!(repo.add_team(team_named("Core", &["bob"])).await.is_err());
        assert_eq!(repo.team("Core").unwrap().members, vec!["alice"]);

        repo.delete_team("Core").await.unwrap();
        assert!(repo.team("Core").is_none());
        assert!(repo.delete_team("Core").await.is_err());
    }

    #[tokio::test]
    async fn test_membership_changes() {
        let repo = MemoryTeamRepository::with_teams([team_named("Core", &["alice"])]);

        repo.add_member("Core", "bob").await.unwrap();
        repo.add_member("Core", "bob").await.unwrap();
        assert_eq!(repo.team("Core").unwrap().members, vec!["alice", "bob"]);

        repo.remove_member("Core", "alice").await.unwrap();
        repo.remove_member("Core", "carol").await.unwrap();
        assert_eq!(repo.team("Core").unwrap().members, vec!["bob"]);

        assert!(repo.add_member("Nope", "bob").await.is_err());
    }
}
