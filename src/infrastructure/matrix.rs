//! # Matrix Messenger Adapter
//!
//! Implements the `Messenger` trait for the Matrix protocol using the `matrix_sdk`.
//! Channels are room ids (`!abc:server`) or user ids (`@alice:server`); the latter
//! are reached through a direct-message room that is created when missing.

use crate::domain::traits::Messenger;
use crate::domain::types::{PostOptions, UserInfo};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use matrix_sdk::ruma::{RoomId, UserId};

#[derive(Clone)]
pub struct MatrixMessenger {
    client: Client,
}

impl MatrixMessenger {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Helper to find the room a channel refers to
    async fn resolve_room(&self, channel: &str) -> Result<Room> {
        if channel.starts_with('@') {
            let user_id = UserId::parse(channel)?;
            if let Some(room) = self.client.get_dm_room(&user_id) {
                return Ok(room);
            }
            tracing::info!("Opening direct message room with {}", user_id);
            return Ok(self.client.create_dm(&user_id).await?);
        }

        let room_id = RoomId::parse(channel)?;
        self.client
            .get_room(&room_id)
            .ok_or_else(|| anyhow!("Room {} is not joined", channel))
    }
}

/// Appends attachments below the text as quoted blocks.
fn render(text: &str, options: &PostOptions) -> String {
    let mut body = text.to_string();
    for attachment in &options.attachments {
        body.push_str("\n\n");
        let quoted: Vec<String> = attachment.lines().map(|line| format!("> {line}")).collect();
        body.push_str(&quoted.join("\n"));
    }
    body
}

/// Mentions carry the id with or without its leading `@`.
fn normalize_user_id(user_id: &str) -> String {
    if user_id.starts_with('@') {
        user_id.to_string()
    } else {
        format!("@{user_id}")
    }
}

#[async_trait]
impl Messenger for MatrixMessenger {
    async fn post(&self, channel: &str, text: &str, options: &PostOptions) -> Result<(), String> {
        let room = self.resolve_room(channel).await.map_err(|e| e.to_string())?;
        tracing::info!("Bot sending message to {}: {}", channel, text);
        room.send(RoomMessageEventContent::text_markdown(render(text, options)))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn user_info(&self, user_id: &str) -> Result<UserInfo, String> {
        let id = normalize_user_id(user_id);
        let user_id = UserId::parse(&id).map_err(|e| format!("Invalid user id {id}: {e}"))?;

        for room in self.client.joined_rooms() {
            match room.get_member(&user_id).await {
                Ok(Some(member)) => {
                    let name = member
                        .display_name()
                        .unwrap_or_else(|| user_id.localpart())
                        .to_string();
                    return Ok(UserInfo { id, name });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("Member lookup in {} failed: {}", room.room_id(), e);
                }
            }
        }

        Err(format!("User {id} not found in any joined room"))
    }
}
