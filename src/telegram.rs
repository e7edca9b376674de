//! Minimal Telegram Bot API types
//!
//! Only the fields this bot actually reads are modeled; everything else in an
//! incoming update is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// An incoming update delivered to the webhook endpoint
#[derive(Deserialize, Debug, Clone)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

/// A chat message (commands and free text arrive as messages)
#[derive(Deserialize, Debug, Clone)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<TgUser>,
    pub text: Option<String>,
}

/// The chat a message belongs to; replies are addressed to `chat.id`
#[derive(Deserialize, Debug, Clone)]
pub struct Chat {
    pub id: i64,
}

/// The Telegram user who sent a message or pressed a button
#[derive(Deserialize, Debug, Clone)]
pub struct TgUser {
    pub id: u64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl TgUser {
    /// Full display name, mirroring Telegram's `full_name` convention
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// A button press on an inline keyboard
#[derive(Deserialize, Debug, Clone)]
pub struct CallbackQuery {
    pub id: String,
    pub from: TgUser,
    pub data: Option<String>,
    pub message: Option<Message>,
}

/// One button of an inline keyboard
///
/// Exactly one of `url` or `callback_data` is set per button.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InlineKeyboardButton {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    /// Button that opens a URL when pressed
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineKeyboardButton {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
        }
    }

    /// Button that sends an opaque callback token back to the bot
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        InlineKeyboardButton {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
        }
    }
}
