//! # Audit Events
//!
//! Structured records of every team change made through a wizard.
//! Emitted through `tracing`, so they land in the same sinks as the rest of the logs.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    TeamCreated { team: String, done_by: String },
    TeamDeleted { team: String, done_by: String },
    MemberAdded { team: String, user: String, done_by: String },
    MemberRemoved { team: String, user: String, done_by: String },
    WizardCancelled { step: &'static str, done_by: String },
}

impl AuditEvent {
    pub fn emit(&self) {
        match self {
            AuditEvent::TeamCreated { team, done_by } => {
                tracing::info!(team = %team, done_by = %done_by, "Team was created.");
            }
            AuditEvent::TeamDeleted { team, done_by } => {
                tracing::info!(team = %team, done_by = %done_by, "Team was deleted.");
            }
            AuditEvent::MemberAdded { team, user, done_by } => {
                tracing::info!(user = %user, team = %team, done_by = %done_by, "User was added to team.");
            }
            AuditEvent::MemberRemoved { team, user, done_by } => {
                tracing::info!(user = %user, team = %team, done_by = %done_by, "User was removed from team.");
            }
            AuditEvent::WizardCancelled { step, done_by } => {
                tracing::info!(step = %step, done_by = %done_by, "Team wizard was cancelled.");
            }
        }
    }
}
