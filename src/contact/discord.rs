use crate::config::{Config, ConfigError, DiscordCredentials};
use crate::contact::message::NotificationMessage;
use crate::contact::sink::{NotificationSink, SinkError, SinkProvider};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Accent color of the contact embed.
pub const EMBED_COLOR: u32 = 0x6366f1;

const ANNOUNCEMENT: &str = "📬 新しいお問い合わせが届きました。";
const CONFIRM_BUTTON_ID: &str = "contact-confirmed";
const CONFIRM_BUTTON_LABEL: &str = "確認済み";
const CONFIRM_BUTTON_EMOJI: &str = "✅";

/// Discord rejects embed field values longer than this many characters.
pub const EMBED_FIELD_VALUE_LIMIT: usize = 1024;

// Discord component type and button style codes
const COMPONENT_ACTION_ROW: u8 = 1;
const COMPONENT_BUTTON: u8 = 2;
const BUTTON_STYLE_SUCCESS: u8 = 3;

// Discord REST payload types
#[derive(Debug, Serialize)]
struct CreateMessageRequest {
    content: String,
    embeds: Vec<Embed>,
    components: Vec<ActionRow>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    fields: Vec<EmbedField>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    components: Vec<Button>,
}

#[derive(Debug, Serialize)]
struct Button {
    #[serde(rename = "type")]
    kind: u8,
    style: u8,
    label: String,
    emoji: Emoji,
    custom_id: String,
    disabled: bool,
}

#[derive(Debug, Serialize)]
struct Emoji {
    name: String,
}

impl CreateMessageRequest {
    fn from_notification(message: &NotificationMessage) -> Self {
        let embed = Embed {
            title: message.title.clone(),
            description: message.body.clone(),
            color: EMBED_COLOR,
            fields: message
                .fields
                .iter()
                .map(|f| EmbedField {
                    name: f.name.clone(),
                    value: clamp_chars(&f.value, EMBED_FIELD_VALUE_LIMIT),
                    inline: f.inline,
                })
                .collect(),
            timestamp: message.timestamp.to_rfc3339(),
        };

        // Disabled confirmation marker
        let confirm_row = ActionRow {
            kind: COMPONENT_ACTION_ROW,
            components: vec![Button {
                kind: COMPONENT_BUTTON,
                style: BUTTON_STYLE_SUCCESS,
                label: CONFIRM_BUTTON_LABEL.to_string(),
                emoji: Emoji {
                    name: CONFIRM_BUTTON_EMOJI.to_string(),
                },
                custom_id: CONFIRM_BUTTON_ID.to_string(),
                disabled: true,
            }],
        };

        Self {
            content: ANNOUNCEMENT.to_string(),
            embeds: vec![embed],
            components: vec![confirm_row],
        }
    }
}

/// Cut `value` to at most `limit` characters, ending in `…` when cut.
fn clamp_chars(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let mut clamped: String = value.chars().take(limit.saturating_sub(1)).collect();
    clamped.push('…');
    clamped
}

/// Posts contact notifications to a Discord channel through the bot API.
pub struct DiscordNotifier {
    client: reqwest::Client,
    credentials: DiscordCredentials,
}

impl DiscordNotifier {
    pub fn new(client: reqwest::Client, credentials: DiscordCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/channels/{}/messages",
            self.credentials.api_base, self.credentials.channel_id
        )
    }
}

#[async_trait]
impl NotificationSink for DiscordNotifier {
    async fn send(&self, message: &NotificationMessage) -> Result<(), SinkError> {
        let request = CreateMessageRequest::from_notification(message);
        let url = self.messages_url();
        debug!("Posting contact notification to Discord channel {}", self.credentials.channel_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.credentials.bot_token))
            .json(&request)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Api { status, body });
        }

        info!("Contact notification delivered to Discord");
        Ok(())
    }
}

/// Builds a [`DiscordNotifier`] from configuration on demand.
pub struct DiscordSinkProvider {
    config: Arc<Config>,
    client: reqwest::Client,
}

impl DiscordSinkProvider {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

impl SinkProvider for DiscordSinkProvider {
    fn sink(&self) -> Result<Arc<dyn NotificationSink>, ConfigError> {
        let credentials = self.config.discord_credentials()?;
        Ok(Arc::new(DiscordNotifier::new(self.client.clone(), credentials)))
    }
}
