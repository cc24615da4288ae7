//! One-shot notifications kept in the session until the next rendered page.

use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::app::AppError;

const SESSION_FLASH: &str = "_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: Level,
    pub text: String,
}

impl FlashMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

fn queued(session: &Session) -> Vec<FlashMessage> {
    session
        .get::<Vec<FlashMessage>>(SESSION_FLASH)
        .ok()
        .flatten()
        .unwrap_or_default()
}

pub fn push(session: &Session, message: FlashMessage) -> Result<(), AppError> {
    let mut messages = queued(session);
    messages.push(message);

    session.insert(SESSION_FLASH, messages).map_err(|err| {
        log::error!("Could not queue flash message: {}", err);
        AppError::InternalServerError
    })
}

/// Drains the queue.
pub fn take(session: &Session) -> Vec<FlashMessage> {
    let messages = queued(session);
    if !messages.is_empty() {
        session.remove(SESSION_FLASH);
    }
    messages
}
