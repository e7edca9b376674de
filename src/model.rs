//! Data models for the link shortener bot
//!
//! This module defines all the data structures used throughout the application:
//! the persisted records stored in redb and the reply payload produced by the
//! action handlers.
//!
//! Serde field names of the persisted records match the columns of the original
//! SQLite schema, so JSON values stay compatible with data exported from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a short link record stored in the database
///
/// This structure contains all information about a shortened URL including:
/// - The unique short identifier
/// - The original URL
/// - The creator (Telegram user id) for ownership tracking
/// - Optional folder assignment
/// - Creation timestamp
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinkRecord {
    /// Unique 12-character identifier of the shortened URL (e.g., "aB3dE5fG7hJ9")
    pub short_id: String,

    /// The original long URL that was shortened
    pub original_url: String,

    /// Telegram user ID of the link creator
    /// Used for filtering links by owner in listings
    pub creator_id: u64,

    /// Optional folder this link is assigned to
    /// None for links created outside any folder (the common case)
    pub folder_id: Option<String>,

    /// Timestamp when this link record was created
    pub created_at: DateTime<Utc>,
}

/// Represents a registered user
///
/// Created exactly once, on first contact with the bot, and never mutated
/// or deleted afterwards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserRecord {
    /// Telegram user ID (numeric platform id, primary key)
    pub telegram_id: u64,

    /// Telegram @username, if the user has one
    pub username: Option<String>,

    /// Display name of the user
    pub nickname: String,

    /// Reference to the metadata record created alongside this user
    pub meta_data_id: String,
}

/// Metadata record owned by exactly one user
///
/// The device/browser fields are placeholders: the Telegram Bot API does not
/// expose real client information, so fixed strings are stored instead.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MetaRecord {
    /// Generated 12-character identifier (primary key, never reused)
    pub id: String,

    /// Telegram-side registration date (not available via the Bot API)
    pub user_tg_reg_date: String,

    /// Timestamp of first contact with this bot
    pub user_bot_reg_date: DateTime<Utc>,

    /// Device placeholder string
    pub device_meta: String,

    /// Browser placeholder string
    pub browser: String,
}

/// Represents a folder for organizing links
///
/// Folders are flat: there is no parent/child relation and no update or
/// delete path in the current scope.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FolderRecord {
    /// Generated 12-character folder identifier (primary key)
    pub folder_id: String,

    /// Display name of the folder
    pub name: String,

    /// Telegram user ID of the folder creator
    pub creator_id: u64,
}

/// Audit record of a deleted link
///
/// Written when a link is deleted: the original URL itself is discarded and
/// only its SHA-256 digest is retained, proving a link existed and was removed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeletedLinkRecord {
    /// The short ID of the deleted link (primary key)
    pub hash_id: String,

    /// Lowercase hex SHA-256 digest of the original URL
    pub original_url_hash: String,

    /// Timestamp of the deletion event
    pub deleted_at: DateTime<Utc>,

    /// Telegram user ID of the link creator at deletion time
    pub creator_id: u64,
}

/// Response payload produced by an action handler
///
/// A reply is plain text plus an optional inline keyboard: rows of buttons
/// carrying either a navigable URL or an opaque callback token. The webhook
/// layer converts this into a Telegram `sendMessage` method call.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Message text shown to the user
    pub text: String,

    /// Inline keyboard rows; empty when the reply is text-only
    pub buttons: Vec<Vec<crate::telegram::InlineKeyboardButton>>,

    /// Whether the text should be sent with Markdown parse mode
    /// (used for replies embedding ids/links in code spans)
    pub markdown: bool,
}

impl Reply {
    /// Creates a plain-text reply without buttons
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            buttons: Vec::new(),
            markdown: false,
        }
    }

    /// Creates a Markdown-formatted reply without buttons
    pub fn markdown(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            buttons: Vec::new(),
            markdown: true,
        }
    }

    /// Attaches inline keyboard rows to this reply
    pub fn with_buttons(
        mut self,
        buttons: Vec<Vec<crate::telegram::InlineKeyboardButton>>,
    ) -> Self {
        self.buttons = buttons;
        self
    }
}
