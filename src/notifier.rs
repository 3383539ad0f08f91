//! # Manager Notifier
//!
//! Delivers intake notifications to the manager chat with bounded retry.
//! The transport is abstracted behind [`MessageSender`] so tests can count
//! delivery attempts without a network.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::ApiError;
use teloxide::RequestError;
use tracing::{info, warn};

use crate::errors::error_logging;

/// Coarse classification of a failed send, for logging only.
/// Every kind is retried the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendErrorKind {
    /// The recipient blocked the bot or the chat is gone (HTTP 403)
    Blocked,
    /// Malformed request, e.g. bad markup (HTTP 400)
    BadRequest,
    /// Flood control kicked in (HTTP 429)
    RateLimited,
    /// Transport-level failure
    Network,
    /// Anything else
    Other,
}

impl fmt::Display for SendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SendErrorKind::Blocked => "blocked",
            SendErrorKind::BadRequest => "bad_request",
            SendErrorKind::RateLimited => "rate_limited",
            SendErrorKind::Network => "network",
            SendErrorKind::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// A failed delivery attempt
#[derive(Debug)]
pub struct SendError {
    pub kind: SendErrorKind,
    pub message: String,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for SendError {}

impl From<RequestError> for SendError {
    fn from(err: RequestError) -> Self {
        let kind = match &err {
            RequestError::Api(api) => match api {
                ApiError::BotBlocked
                | ApiError::BotKicked
                | ApiError::BotKickedFromSupergroup
                | ApiError::UserDeactivated
                | ApiError::ChatNotFound => SendErrorKind::Blocked,
                _ => SendErrorKind::BadRequest,
            },
            RequestError::RetryAfter(_) => SendErrorKind::RateLimited,
            RequestError::Network(_) | RequestError::Io(_) => SendErrorKind::Network,
            _ => SendErrorKind::Other,
        };
        SendError {
            kind,
            message: err.to_string(),
        }
    }
}

/// Transport used to deliver a message to a chat
pub trait MessageSender {
    fn send_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl Future<Output = Result<(), SendError>> + Send;
}

impl MessageSender for Bot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), SendError> {
        Requester::send_message(self, ChatId(chat_id), text)
            .parse_mode(ParseMode::Markdown)
            .await?;
        Ok(())
    }
}

/// Notifier that pages the manager chat, retrying transient failures
#[derive(Clone)]
pub struct ManagerNotifier<S: MessageSender> {
    sender: S,
    manager_chat_id: i64,
    retry_delay: Duration,
}

/// Total delivery attempts per notification
const MAX_ATTEMPTS: u32 = 3;

impl<S: MessageSender> ManagerNotifier<S> {
    pub fn new(sender: S, manager_chat_id: i64) -> Self {
        Self {
            sender,
            manager_chat_id,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Override the base retry delay; tests pass `Duration::ZERO`
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn manager_chat_id(&self) -> i64 {
        self.manager_chat_id
    }

    /// Deliver `text` to the manager chat.
    ///
    /// Returns `true` on the first successful send. On failure, retries up
    /// to three total attempts with the base delay plus up to one second of
    /// random jitter, then gives up and returns `false`. Callers only use
    /// the result to vary user-facing copy; a lost notification never fails
    /// the intake itself.
    pub async fn notify(&self, text: &str) -> bool {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.sender.send_message(self.manager_chat_id, text).await {
                Ok(()) => {
                    info!(
                        manager_chat_id = self.manager_chat_id,
                        attempt, "Manager notification delivered"
                    );
                    return true;
                }
                Err(err) => {
                    warn!(
                        manager_chat_id = self.manager_chat_id,
                        attempt,
                        kind = %err.kind,
                        error = %err,
                        "Manager notification attempt failed"
                    );

                    // A zero base delay disables backoff entirely.
                    if attempt < MAX_ATTEMPTS && !self.retry_delay.is_zero() {
                        let jitter_ms = rand::random::<u64>() % 1000;
                        tokio::time::sleep(self.retry_delay + Duration::from_millis(jitter_ms))
                            .await;
                    } else if attempt == MAX_ATTEMPTS {
                        error_logging::log_network_error(
                            &err,
                            "notify_manager",
                            None,
                            Some(MAX_ATTEMPTS),
                        );
                    }
                }
            }
        }
        false
    }
}
