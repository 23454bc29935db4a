//! Wizard transitions
//!
//! Transitions may read from the collaborators (team lists, user lookups) but
//! never change anything themselves: every visible action is returned as an
//! `Effect` for the router to execute.

use super::{Collaborators, DialogState, Effect, TeamPurpose, Wizard};
use crate::application::audit::AuditEvent;
use crate::application::parsing::{MemberAction, parse_member_action};
use crate::domain::config::TeamDefaults;
use crate::domain::error::{DialogError, Result};
use crate::domain::schedule::ReportSchedule;
use crate::domain::types::{Message, PostOptions, QuestionSet, Team, UserInfo};
use crate::strings::{messages, wizard};
use chrono::TimeDelta;

/// Result of a transition
#[derive(Debug, PartialEq)]
pub struct Transition {
    /// Context to install afterwards, `None` ends the wizard
    pub next: Option<DialogState>,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn to(state: DialogState) -> Self {
        Self {
            next: Some(state),
            effects: vec![],
        }
    }

    pub fn finish() -> Self {
        Self {
            next: None,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    fn with_effects_first(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        let mut ordered: Vec<Effect> = effects.into_iter().collect();
        ordered.append(&mut self.effects);
        self.effects = ordered;
        self
    }
}

/// First step of a wizard, for a user without an active context.
pub async fn start(wizard: Wizard, message: &Message, ctx: &Collaborators) -> Result<Transition> {
    let actor = ctx
        .messenger
        .user_info(&message.user_id)
        .await
        .map_err(DialogError::Messaging)?;

    match wizard {
        Wizard::CreateTeam => Ok(Transition::to(DialogState::AwaitingTeamName { actor })
            .with_effect(Effect::reply(messages::TEAM_NAME_PROMPT))),
        Wizard::EditTeam => choose_team(actor, TeamPurpose::Edit, ctx).await,
        Wizard::DeleteTeam => choose_team(actor, TeamPurpose::Delete, ctx).await,
    }
}

/// Aborts whatever step is active.
pub fn cancel(state: &DialogState) -> Transition {
    Transition::finish()
        .with_effect(Effect::reply(messages::WIZARD_CANCELLED))
        .with_effect(Effect::Audit(AuditEvent::WizardCancelled {
            step: state.step_name(),
            done_by: state.actor().name.clone(),
        }))
}

pub async fn transition(
    state: &DialogState,
    message: &Message,
    ctx: &Collaborators,
) -> Result<Transition> {
    match state {
        DialogState::AwaitingTeamName { actor } => name_team(actor, &message.text, ctx).await,

        DialogState::ChoosingTeam {
            actor,
            purpose,
            teams,
        } => {
            let Some(team) = parse_choice(&message.text, teams) else {
                return Ok(Transition::to(state.clone()).with_effects([
                    Effect::reply(messages::wrong_choice(&ctx.quit_keyword)),
                    Effect::reply(wizard::format_team_menu(teams)),
                ]));
            };

            Ok(match purpose {
                TeamPurpose::Edit => edit_team(actor.clone(), team.to_string()),
                TeamPurpose::Delete => confirm_deletion(actor.clone(), team.to_string(), ctx),
            })
        }

        DialogState::ChoosingMemberAction { actor, team } => {
            let Some((action, user_id)) = parse_member_action(&message.text) else {
                return Ok(Transition::to(state.clone())
                    .with_effect(Effect::reply(messages::wrong_choice(&ctx.quit_keyword)))
                    .with_effect(member_action_prompt(team)));
            };

            let target = match ctx.messenger.user_info(&user_id).await {
                Ok(target) => target,
                Err(e) => {
                    tracing::warn!(user = %user_id, error = %e, "Fail to get mentioned user information.");
                    return Ok(Transition::to(state.clone())
                        .with_effect(Effect::reply(messages::USER_NOT_FOUND))
                        .with_effect(member_action_prompt(team)));
                }
            };

            Ok(apply_member_action(actor, team, action, &target))
        }

        DialogState::ConfirmingDeletion { actor, team } => {
            if message.text != wizard::deletion_confirmation(team) {
                return Ok(Transition::to(state.clone())
                    .with_effect(Effect::reply(wizard::deletion_prompt(team, &ctx.quit_keyword))));
            }

            Ok(Transition::finish()
                .with_effect(Effect::DeleteTeam { team: team.clone() })
                .with_effect(Effect::reply(messages::team_deleted(team)))
                .with_effect(Effect::Audit(AuditEvent::TeamDeleted {
                    team: team.clone(),
                    done_by: actor.name.clone(),
                })))
        }
    }
}

async fn choose_team(
    actor: UserInfo,
    purpose: TeamPurpose,
    ctx: &Collaborators,
) -> Result<Transition> {
    let mut teams = ctx
        .teams
        .list_teams_for_user(&actor.name)
        .await
        .map_err(DialogError::Repository)?;

    if teams.is_empty() {
        return Ok(Transition::finish().with_effect(Effect::reply(messages::NO_TEAMS)));
    }

    teams.sort();
    let menu = wizard::format_team_menu(&teams);
    Ok(Transition::to(DialogState::ChoosingTeam {
        actor,
        purpose,
        teams,
    })
    .with_effect(Effect::reply(menu)))
}

fn parse_choice<'a>(text: &str, teams: &'a [String]) -> Option<&'a str> {
    let index: usize = text.trim().parse().ok()?;
    teams.get(index).map(String::as_str)
}

async fn name_team(actor: &UserInfo, text: &str, ctx: &Collaborators) -> Result<Transition> {
    let retry = |notice: String| {
        Transition::to(DialogState::AwaitingTeamName {
            actor: actor.clone(),
        })
        .with_effect(Effect::reply(notice))
        .with_effect(Effect::reply(messages::TEAM_NAME_PROMPT))
    };

    let name = text.trim();
    if name.is_empty() {
        return Ok(retry(messages::team_name_empty(&ctx.quit_keyword)));
    }

    let existing = ctx.teams.list_teams().await.map_err(DialogError::Repository)?;
    if existing.iter().any(|team| team == name) {
        return Ok(retry(messages::team_exists(&ctx.quit_keyword)));
    }

    let team = new_team(name, actor, &ctx.defaults)?;
    Ok(edit_team(actor.clone(), name.to_string()).with_effects_first([
        Effect::CreateTeam(team),
        Effect::Audit(AuditEvent::TeamCreated {
            team: name.to_string(),
            done_by: actor.name.clone(),
        }),
    ]))
}

/// Team record seeded with the configured question set, the creator as sole member.
fn new_team(name: &str, actor: &UserInfo, defaults: &TeamDefaults) -> Result<Team> {
    let report_schedule = ReportSchedule::parse(&defaults.report_schedule)?;
    let reminder = |secs: i64| {
        TimeDelta::try_seconds(secs)
            .ok_or_else(|| DialogError::Schedule(format!("reminder offset out of range: {secs}s")))
    };

    Ok(Team {
        name: name.to_string(),
        channel: actor.id.clone(),
        members: vec![actor.name.clone()],
        split_report: defaults.split_report,
        out_of_office: Vec::new(),
        question_sets: vec![QuestionSet {
            questions: defaults.questions.clone(),
            first_reminder_before_report: reminder(defaults.first_reminder_before_secs)?,
            last_reminder_before_report: reminder(defaults.last_reminder_before_secs)?,
            report_schedule_cron: defaults.report_schedule.clone(),
            report_schedule,
        }],
    })
}

fn member_action_prompt(team: &str) -> Effect {
    Effect::reply_with(
        wizard::member_action_prompt(team),
        PostOptions::with_attachment(wizard::MEMBER_ACTION_HELP),
    )
}

fn edit_team(actor: UserInfo, team: String) -> Transition {
    let prompt = member_action_prompt(&team);
    Transition::to(DialogState::ChoosingMemberAction { actor, team }).with_effect(prompt)
}

fn confirm_deletion(actor: UserInfo, team: String, ctx: &Collaborators) -> Transition {
    let prompt = wizard::deletion_prompt(&team, &ctx.quit_keyword);
    Transition::to(DialogState::ConfirmingDeletion { actor, team }).with_effect(Effect::reply(prompt))
}

fn apply_member_action(
    actor: &UserInfo,
    team: &str,
    action: MemberAction,
    target: &UserInfo,
) -> Transition {
    let username = target.name.clone();
    let (mutation, reply, notice, audit) = match action {
        MemberAction::Add => (
            Effect::AddMember {
                team: team.to_string(),
                username: username.clone(),
            },
            messages::member_added(&username, team),
            messages::added_to_team_notice(team, &actor.name),
            AuditEvent::MemberAdded {
                team: team.to_string(),
                user: username.clone(),
                done_by: actor.name.clone(),
            },
        ),
        MemberAction::Remove => (
            Effect::RemoveMember {
                team: team.to_string(),
                username: username.clone(),
            },
            messages::member_removed(&username, team),
            messages::removed_from_team_notice(team, &actor.name),
            AuditEvent::MemberRemoved {
                team: team.to_string(),
                user: username.clone(),
                done_by: actor.name.clone(),
            },
        ),
    };

    Transition::finish()
        .with_effect(mutation)
        .with_effect(Effect::reply(reply))
        .with_effect(Effect::Notify {
            channel: target.id.clone(),
            text: notice,
        })
        .with_effect(Effect::Audit(audit))
}
