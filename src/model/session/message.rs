//! Flash message storage.
//!
//! Messages queue up in the session until a page renders them. Rendering drains the
//! queue, so each message is shown exactly once.

use tower_sessions::Session;

use crate::{
    error::Error,
    model::message::{Level, Message},
};

/// Session key holding the pending flash messages.
pub const SESSION_MESSAGES_KEY: &str = "hearth:messages";

pub struct SessionMessages;

impl SessionMessages {
    /// Queues a message at the given level.
    pub async fn add(session: &Session, level: Level, text: impl Into<String>) -> Result<(), Error> {
        let mut messages = Self::peek(session).await?;
        messages.push(Message::new(level, text));

        session.insert(SESSION_MESSAGES_KEY, messages).await?;

        Ok(())
    }

    pub async fn debug(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::add(session, Level::DEBUG, text).await
    }

    pub async fn info(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::add(session, Level::INFO, text).await
    }

    pub async fn success(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::add(session, Level::SUCCESS, text).await
    }

    pub async fn warning(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::add(session, Level::WARNING, text).await
    }

    pub async fn error(session: &Session, text: impl Into<String>) -> Result<(), Error> {
        Self::add(session, Level::ERROR, text).await
    }

    /// Pending messages, left in the session.
    pub async fn peek(session: &Session) -> Result<Vec<Message>, Error> {
        Ok(session
            .get::<Vec<Message>>(SESSION_MESSAGES_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Pending messages in the order they were added, removed from the session.
    pub async fn drain(session: &Session) -> Result<Vec<Message>, Error> {
        Ok(session
            .remove::<Vec<Message>>(SESSION_MESSAGES_KEY)
            .await?
            .unwrap_or_default())
    }
}
