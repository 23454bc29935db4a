//! # Domain Types
//!
//! Common data structures used across the dialog engine and its collaborators.

use crate::domain::schedule::ReportSchedule;
use chrono::TimeDelta;

/// An incoming chat message. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub user_id: String,
    pub channel_id: String,
    pub text: String,
}

impl Message {
    pub fn new(
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            text: text.into(),
        }
    }
}

/// A user resolved through the messaging client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    /// Display name, which is also the member name stored on teams
    pub name: String,
}

/// Extra rendering hints for an outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOptions {
    /// Markdown blocks shown below the main text
    pub attachments: Vec<String>,
}

impl PostOptions {
    pub fn with_attachment(text: impl Into<String>) -> Self {
        Self {
            attachments: vec![text.into()],
        }
    }
}

/// Questions asked to every member for one periodic report.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub questions: Vec<String>,
    /// Offset from the report time, negative means "before"
    pub first_reminder_before_report: TimeDelta,
    pub last_reminder_before_report: TimeDelta,
    pub report_schedule_cron: String,
    pub report_schedule: ReportSchedule,
}

/// A team record as handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    /// Where reports are posted
    pub channel: String,
    pub members: Vec<String>,
    pub split_report: bool,
    pub out_of_office: Vec<String>,
    pub question_sets: Vec<QuestionSet>,
}
