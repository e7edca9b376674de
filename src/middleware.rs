use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::env;

/// Header Telegram attaches to webhook requests when a secret token was
/// passed to setWebhook
const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Middleware to verify that updates really come from Telegram
///
/// This middleware checks if the `WEBHOOK_SECRET` environment variable is set.
/// If it is set, it verifies that the request carries the
/// `X-Telegram-Bot-Api-Secret-Token` header with the matching value — the
/// token registered with Telegram via setWebhook.
///
/// If the environment variable is not set, the check is skipped.
pub async fn webhook_secret_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Ok(secret) = env::var("WEBHOOK_SECRET") {
        if !secret.is_empty() {
            let unauthorized_response = || {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "Unauthorized",
                        "message": "Invalid or missing webhook secret token"
                    })),
                )
                    .into_response()
            };

            match headers.get(SECRET_TOKEN_HEADER) {
                Some(header_value) => match header_value.to_str() {
                    Ok(header_str) => {
                        if header_str != secret {
                            return Err(unauthorized_response());
                        }
                    }
                    Err(_) => return Err(unauthorized_response()),
                },
                None => return Err(unauthorized_response()),
            }
        }
    }

    // If env var is not set or empty, or the token matches, proceed
    Ok(next.run(request).await)
}
