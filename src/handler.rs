//! Action handlers for the link shortener bot
//!
//! This module implements the core business logic for:
//! - Registering users on first contact
//! - Creating short links from submitted URLs
//! - Resolving deep-link arguments back to original URLs
//! - Listing and deleting a user's links
//! - Listing and creating folders
//!
//! Each action handler is a pure translation from a parsed inbound action to
//! a [`Reply`] (text plus optional inline keyboard). The webhook dispatcher
//! at the bottom is the only Telegram-specific glue: it routes an incoming
//! `Update` to the right handler and wraps the reply into a webhook-reply
//! method call.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use url::Url;

use crate::database::AppState;
use crate::error::{Error, Result};
use crate::model::Reply;
use crate::store;
use crate::telegram::{InlineKeyboardButton, TgUser, Update};

/// Maximum number of URL characters shown per entry in link listings
const LIST_URL_PREVIEW_LEN: usize = 30;

/// Syntactic URL validation for submitted text
///
/// Accepts absolute http/https URLs with a host. Anything else (bare words,
/// other schemes, relative references) is rejected before any row is written.
fn validate_url(text: &str) -> Result<()> {
    match Url::parse(text) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(Error::InvalidUrl(text.to_string())),
    }
}

/// Composes the shareable deep link for a short id
///
/// Opening the link routes the user back into this bot with the short id as
/// the /start argument.
fn deep_link(state: &AppState, short_id: &str) -> String {
    format!("https://t.me/{}?start={}", state.bot_username, short_id)
}

/// Handles /start, with or without a deep-link argument
///
/// With an argument, the argument is treated as a short id and resolved:
/// the reply carries the original URL and an "Open" button, or a not-found
/// message if no such link exists.
///
/// Without an argument, the user is registered on first contact (a no-op for
/// known users) and greeted with the command overview.
pub async fn start(state: &AppState, from: &TgUser, arg: Option<&str>) -> Result<Reply> {
    if let Some(short_id) = arg {
        return match store::resolve_link(&state.db, short_id) {
            Ok(record) => Ok(Reply::text(format!(
                "🔗 Here is your link:\n{}",
                record.original_url
            ))
            .with_buttons(vec![vec![InlineKeyboardButton::url(
                "Open",
                record.original_url.clone(),
            )]])),
            Err(Error::NotFound(_)) => {
                Ok(Reply::text("❌ Link not found or already deleted."))
            }
            Err(err) => Err(err),
        };
    }

    let created =
        store::register_user(&state.db, from.id, from.username.as_deref(), &from.full_name())?;
    if created {
        tracing::info!(telegram_id = from.id, "registered new user");
    }

    Ok(Reply::text(
        "👋 Hi! I'm a link shortening bot.\n\n\
         🔹 Send me any link and I'll shorten it.\n\
         🔹 Use /my_links to manage your links.\n\
         🔹 Use /folders to manage your folders.",
    ))
}

/// Handles a submitted URL
///
/// Validates the text syntactically, creates a short link owned by the
/// sender and replies with the shareable deep link in a Markdown code span.
///
/// # Response
///
/// - Valid URL: "✅ Link shortened!" with original and short link
/// - Invalid URL: validation message, no row created
pub async fn submit_url(state: &AppState, from: &TgUser, text: &str) -> Result<Reply> {
    let url = text.trim();

    if let Err(err) = validate_url(url) {
        tracing::debug!(error = %err, "rejected link submission");
        return Ok(Reply::text("❌ That doesn't look like a valid link."));
    }

    let record = store::create_link(&state.db, url, from.id)?;
    let short_url = deep_link(state, &record.short_id);

    Ok(Reply::markdown(format!(
        "✅ Link shortened!\n\nOriginal: {}\nShort: `{}`",
        record.original_url, short_url
    )))
}

/// Handles /my_links: lists the sender's links with per-link delete buttons
///
/// Each entry shows a truncated preview of the original URL and its short id.
/// Every link gets one "Delete" button carrying the `del_{short_id}` callback
/// token.
pub async fn my_links(state: &AppState, from: &TgUser) -> Result<Reply> {
    let links = store::links_by_creator(&state.db, from.id)?;

    if links.is_empty() {
        return Ok(Reply::text("You don't have any shortened links yet."));
    }

    let mut text = String::from("📂 Your links:\n\n");
    let mut buttons = Vec::new();
    for link in &links {
        let preview: String = link.original_url.chars().take(LIST_URL_PREVIEW_LEN).collect();
        let ellipsis = if link.original_url.chars().count() > LIST_URL_PREVIEW_LEN {
            "..."
        } else {
            ""
        };
        text.push_str(&format!(
            "• {}{} (ID: `{}`)\n",
            preview, ellipsis, link.short_id
        ));
        buttons.push(vec![InlineKeyboardButton::callback(
            format!("Delete {}", link.short_id),
            format!("del_{}", link.short_id),
        )]);
    }

    Ok(Reply::markdown(text).with_buttons(buttons))
}

/// Handles a `del_{short_id}` button press
///
/// Deletes the link and confirms, or reports not-found when the id is
/// unknown (including a second press for an already-deleted link).
pub async fn delete_link_action(state: &AppState, short_id: &str) -> Result<Reply> {
    match store::delete_link(&state.db, short_id) {
        Ok(_) => Ok(Reply::text("✅ Link deleted and hashed.")),
        Err(Error::NotFound(_)) => Ok(Reply::text("❌ Link not found.")),
        Err(err) => Err(err),
    }
}

/// Handles /folders: lists the sender's folders
///
/// When the user has no folders yet, the reply offers a single fixed
/// "create folder" button instead.
pub async fn folders(state: &AppState, from: &TgUser) -> Result<Reply> {
    let folders = store::folders_by_creator(&state.db, from.id)?;

    if folders.is_empty() {
        return Ok(
            Reply::text("You don't have any folders yet.").with_buttons(vec![vec![
                InlineKeyboardButton::callback("Create folder 'Work'", "create_folder_work"),
            ]]),
        );
    }

    let mut text = String::from("🗂 Your folders:\n");
    for folder in &folders {
        text.push_str(&format!("• {} (ID: `{}`)\n", folder.name, folder.folder_id));
    }

    Ok(Reply::markdown(text))
}

/// Handles the fixed folder-creation button
///
/// Creates one folder with the hard-coded name "Work" for the sender.
pub async fn create_folder_action(state: &AppState, from: &TgUser) -> Result<Reply> {
    let folder = store::create_folder(&state.db, "Work", from.id)?;

    Ok(Reply::markdown(format!(
        "✅ Created folder 'Work' with ID: `{}`",
        folder.folder_id
    )))
}

/// Webhook endpoint: receives a Telegram update and answers it
///
/// The reply is delivered through Telegram's webhook-reply mechanism: the
/// HTTP response body carries a single bot API method call (`sendMessage`),
/// so no outbound request to the Bot API is needed.
///
/// # Response
///
/// - **200 OK** with a `sendMessage` payload for handled updates
/// - **200 OK** with an empty body for updates this bot ignores
/// - **500 Internal Server Error** on storage failures; only this one update
///   is affected and the store state is left untouched
pub async fn webhook(State(state): State<AppState>, Json(update): Json<Update>) -> Response {
    match dispatch(&state, update).await {
        Ok(Some((chat_id, reply))) => Json(method_payload(chat_id, reply)).into_response(),
        Ok(None) => StatusCode::OK.into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to handle update");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
    }
}

/// Routes an update to the matching action handler
///
/// Returns the chat to answer and the reply, or None for updates outside the
/// bot's command surface (which still must be acknowledged with 200).
async fn dispatch(state: &AppState, update: Update) -> Result<Option<(i64, Reply)>> {
    if let Some(message) = update.message {
        let (Some(from), Some(text)) = (message.from.as_ref(), message.text.as_deref()) else {
            return Ok(None);
        };
        let chat_id = message.chat.id;

        let mut parts = text.split_whitespace();
        let reply = match parts.next() {
            Some("/start") => start(state, from, parts.next()).await?,
            Some("/my_links") => my_links(state, from).await?,
            Some("/folders") => folders(state, from).await?,
            _ if text.starts_with("http://") || text.starts_with("https://") => {
                submit_url(state, from, text).await?
            }
            _ => return Ok(None),
        };
        return Ok(Some((chat_id, reply)));
    }

    if let Some(callback) = update.callback_query {
        let Some(data) = callback.data.as_deref() else {
            return Ok(None);
        };
        // Answer into the chat the keyboard was shown in
        let Some(chat_id) = callback.message.as_ref().map(|m| m.chat.id) else {
            return Ok(None);
        };

        let reply = if let Some(short_id) = data.strip_prefix("del_") {
            delete_link_action(state, short_id).await?
        } else if data == "create_folder_work" {
            create_folder_action(state, &callback.from).await?
        } else {
            return Ok(None);
        };
        return Ok(Some((chat_id, reply)));
    }

    Ok(None)
}

/// Builds the webhook-reply body: one `sendMessage` method call
fn method_payload(chat_id: i64, reply: Reply) -> serde_json::Value {
    let mut payload = json!({
        "method": "sendMessage",
        "chat_id": chat_id,
        "text": reply.text,
    });
    if reply.markdown {
        payload["parse_mode"] = json!("Markdown");
    }
    if !reply.buttons.is_empty() {
        payload["reply_markup"] = json!({ "inline_keyboard": reply.buttons });
    }
    payload
}
