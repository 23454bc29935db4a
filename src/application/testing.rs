//! Test doubles shared by the application tests.

use crate::application::dialog::Collaborators;
use crate::domain::config::TeamDefaults;
use crate::domain::schedule::ReportSchedule;
use crate::domain::traits::{Messenger, TeamRepository};
use crate::domain::types::{PostOptions, QuestionSet, Team, UserInfo};
use async_trait::async_trait;
use chrono::TimeDelta;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub channel: String,
    pub text: String,
    pub options: PostOptions,
}

/// Messenger that records every post and knows a fixed set of users.
#[derive(Debug, Default)]
pub struct FakeMessenger {
    users: HashMap<String, String>,
    posts: Mutex<Vec<Post>>,
    fail_posts: AtomicBool,
    fail_direct: AtomicBool,
}

impl FakeMessenger {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        Self {
            users: users
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.posts().into_iter().map(|p| p.text).collect()
    }

    pub fn clear(&self) {
        self.posts.lock().unwrap().clear();
    }

    pub fn fail_posts(&self, fail: bool) {
        self.fail_posts.store(fail, Ordering::SeqCst);
    }

    /// Fails only posts addressed to a user id, i.e. direct messages.
    pub fn fail_direct_posts(&self, fail: bool) {
        self.fail_direct.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Messenger for FakeMessenger {
    async fn post(&self, channel: &str, text: &str, options: &PostOptions) -> Result<(), String> {
        if self.fail_posts.load(Ordering::SeqCst)
            || (channel.starts_with('@') && self.fail_direct.load(Ordering::SeqCst))
        {
            return Err("connection reset".to_string());
        }
        self.posts.lock().unwrap().push(Post {
            channel: channel.to_string(),
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(())
    }

    async fn user_info(&self, user_id: &str) -> Result<UserInfo, String> {
        let id = if user_id.starts_with('@') {
            user_id.to_string()
        } else {
            format!("@{user_id}")
        };
        self.users
            .get(&id)
            .map(|name| UserInfo {
                id: id.clone(),
                name: name.clone(),
            })
            .ok_or_else(|| format!("user {id} not found"))
    }
}

pub fn collaborators(
    messenger: Arc<dyn Messenger>,
    teams: Arc<dyn TeamRepository>,
) -> Collaborators {
    Collaborators {
        messenger,
        teams,
        defaults: TeamDefaults::default(),
        quit_keyword: "quit".to_string(),
    }
}

pub fn team_named(name: &str, members: &[&str]) -> Team {
    Team {
        name: name.to_string(),
        channel: "!reports:example.org".to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        split_report: true,
        out_of_office: Vec::new(),
        question_sets: vec![QuestionSet {
            questions: vec!["How is it going?".to_string()],
            first_reminder_before_report: TimeDelta::seconds(-8),
            last_reminder_before_report: TimeDelta::seconds(-8),
            report_schedule_cron: "@daily".to_string(),
            report_schedule: ReportSchedule::Daily,
        }],
    }
}
