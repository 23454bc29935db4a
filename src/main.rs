//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration
//! - Infrastructure: Matrix messenger, Team repository
//! - Application: Dialog router fed by the Matrix sync loop
//!

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::path::PathBuf;
use std::sync::Arc;

use teambot::application::dialog::Collaborators;
use teambot::application::router::DialogRouter;
use teambot::domain::config::AppConfig;
use teambot::domain::types::Message;
use teambot::infrastructure::matrix::MatrixMessenger;
use teambot::infrastructure::memory::MemoryTeamRepository;

#[derive(Debug, Parser)]
#[command(name = "teambot", about = "Team management bot for Matrix rooms")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    std::fs::create_dir_all(&config.system.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.system.log_dir))?;

    let file_appender = tracing_appender::rolling::never(&config.system.log_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting Teambot...");

    // 3. Matrix Setup
    let matrix = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await
        .context("Failed to build Matrix client")?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password)
        .send()
        .await
        .context("Matrix login failed")?;

    tracing::info!("Logged in as {}", matrix.username);

    if let Some(name) = &matrix.display_name {
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("Failed to set display name: {}", e);
        }
    }

    // 4. Dialog Engine
    let collaborators = Collaborators {
        messenger: Arc::new(MatrixMessenger::new(client.clone())),
        teams: Arc::new(MemoryTeamRepository::new()),
        defaults: config.teams.clone(),
        quit_keyword: config.dialog.quit_keyword.clone(),
    };
    let router = Arc::new(DialogRouter::new(collaborators));

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let event_time = std::time::UNIX_EPOCH
                + std::time::Duration::from_millis(ev.origin_server_ts().get().into());
            if event_time < start_time {
                return;
            }

            if original_msg.sender == room.own_user_id() {
                return;
            }

            if let MessageType::Text(text_content) = &original_msg.content.msgtype {
                let message = Message::new(
                    original_msg.sender.as_str(),
                    room.room_id().as_str(),
                    text_content.body.as_str(),
                );
                tracing::info!("Received message from {}: \n{}", message.user_id, message.text);

                if router.handle(&message).await {
                    tracing::debug!("Message from {} not handled by the dialog engine", message.user_id);
                }
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            if let Err(e) = room.join().await {
                tracing::warn!("Failed to join room {} after invite: {}", room.room_id(), e);
            }
        }
    });

    // 6. Sync until stopped
    tracing::info!("Starting sync loop...");
    client
        .sync(SyncSettings::default())
        .await
        .context("Matrix sync loop failed")?;

    Ok(())
}
