//! # Dialog Router
//!
//! Entry point for every incoming message. Resumes the sender's active wizard,
//! or starts a new one when the text matches a top-level trigger.
//! The quit keyword is intercepted here, before any wizard step sees the message.

use crate::application::context::ContextStore;
use crate::application::dialog::{self, Collaborators, Effect, Transition, Wizard};
use crate::domain::error::{DialogError, Result};
use crate::domain::types::{Message, PostOptions};
use crate::strings::messages;

pub struct DialogRouter {
    contexts: ContextStore,
    collaborators: Collaborators,
}

impl DialogRouter {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            contexts: ContextStore::new(),
            collaborators,
        }
    }

    pub fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    /// Returns `true` when the message was not for the dialog engine and should be
    /// passed on, `false` when it was fully consumed.
    pub async fn handle(&self, message: &Message) -> bool {
        let mut context = self.contexts.lock(&message.user_id).await;

        let outcome = match context.as_ref() {
            Some(state) if message.text == self.collaborators.quit_keyword => {
                Ok(dialog::cancel(state))
            }
            Some(state) => {
                tracing::debug!(
                    "Resuming step '{}' for {}",
                    state.step_name(),
                    message.user_id
                );
                dialog::transition(state, message, &self.collaborators).await
            }
            None => match Wizard::match_trigger(&message.text) {
                Some(wizard) => {
                    tracing::info!("Starting {:?} wizard for {}", wizard, message.user_id);
                    dialog::start(wizard, message, &self.collaborators).await
                }
                None => {
                    drop(context);
                    self.contexts.release(&message.user_id).await;
                    return true;
                }
            },
        };

        let applied = match outcome {
            Ok(Transition { next, effects }) => self
                .apply(message, effects)
                .await
                .map(|undelivered| (next, undelivered)),
            Err(e) => Err(e),
        };

        match applied {
            Ok((next, undelivered)) => {
                *context = next;
                self.report_undelivered(message, &undelivered).await;
            }
            Err(e) => {
                *context = None;
                self.fail(message, &e).await;
            }
        }

        drop(context);
        self.contexts.release(&message.user_id).await;
        false
    }

    /// Runs effects in order. A failure before the repository changed aborts the
    /// step. After a mutation, failed effects are logged and skipped, and the
    /// channels that missed a message are returned.
    async fn apply(&self, message: &Message, effects: Vec<Effect>) -> Result<Vec<String>> {
        let mut mutated = false;
        let mut undelivered = Vec::new();

        for effect in effects {
            let mutation = effect.is_mutation();
            let channel = match &effect {
                Effect::Notify { channel, .. } => channel.clone(),
                _ => message.channel_id.clone(),
            };

            match self.run(message, effect).await {
                Ok(()) => mutated |= mutation,
                Err(e) if mutated => {
                    tracing::warn!(
                        user = %message.user_id,
                        channel = %channel,
                        error = %e,
                        "Team updated, but a follow-up effect failed."
                    );
                    undelivered.push(channel);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(undelivered)
    }

    async fn run(&self, message: &Message, effect: Effect) -> Result<()> {
        let messenger = &self.collaborators.messenger;
        let teams = &self.collaborators.teams;

        match effect {
            Effect::Reply { text, options } => messenger
                .post(&message.channel_id, &text, &options)
                .await
                .map_err(DialogError::Messaging),
            Effect::Notify { channel, text } => messenger
                .post(&channel, &text, &PostOptions::default())
                .await
                .map_err(DialogError::Messaging),
            Effect::CreateTeam(team) => teams.add_team(team).await.map_err(DialogError::Repository),
            Effect::DeleteTeam { team } => teams
                .delete_team(&team)
                .await
                .map_err(DialogError::Repository),
            Effect::AddMember { team, username } => teams
                .add_member(&team, &username)
                .await
                .map_err(DialogError::Repository),
            Effect::RemoveMember { team, username } => teams
                .remove_member(&team, &username)
                .await
                .map_err(DialogError::Repository),
            Effect::Audit(event) => {
                event.emit();
                Ok(())
            }
        }
    }

    /// The change is kept; tell the requester which messages were lost, best effort.
    async fn report_undelivered(&self, message: &Message, undelivered: &[String]) {
        for channel in undelivered {
            if let Err(e) = self
                .collaborators
                .messenger
                .post(
                    &message.channel_id,
                    &messages::team_updated_but_undelivered(channel),
                    &PostOptions::default(),
                )
                .await
            {
                tracing::warn!("Failed to tell {} about a lost message: {}", message.user_id, e);
            }
        }
    }

    /// The wizard is already cleared; tell the user, best effort.
    async fn fail(&self, message: &Message, error: &DialogError) {
        tracing::error!(
            user = %message.user_id,
            channel = %message.channel_id,
            error = %error,
            "Team wizard aborted."
        );

        if let Err(e) = self
            .collaborators
            .messenger
            .post(
                &message.channel_id,
                messages::WIZARD_FAILED,
                &PostOptions::default(),
            )
            .await
        {
            tracing::warn!("Failed to notify {} about the aborted wizard: {}", message.user_id, e);
        }
    }
}
