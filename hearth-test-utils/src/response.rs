//! Responses collected by the test [`Client`](crate::client::Client).

use std::borrow::Cow;

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
};
use hearth::model::{form::BoundForm, message::Message, page::PageContext};
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// A fully buffered response from the hearth router.
#[derive(Clone, Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// The page context when the response is a rendered page
    pub context: Option<PageContext>,
}

impl TestResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        let context = serde_json::from_slice::<PageContext>(&body).ok();

        Self {
            status,
            headers,
            body,
            context,
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.text().contains(text)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Messages rendered into the page, empty when the response is not a page.
    ///
    /// The message assertions in [`ResponseAssertions`](crate::assertions::ResponseAssertions)
    /// fail on such responses instead.
    pub fn messages(&self) -> &[Message] {
        self.context
            .as_ref()
            .map(|context| context.messages.as_slice())
            .unwrap_or_default()
    }

    pub fn form(&self, name: &str) -> Option<&BoundForm> {
        self.context.as_ref()?.forms.get(name)
    }
}

#[cfg(test)]
mod tests {
    use hearth::model::message::Level;

    use super::*;

    #[test]
    fn parses_page_context() {
        let body = Bytes::from_static(
            br#"{"messages":[{"level":25,"message":"saved","tags":"success"}],"forms":{}}"#,
        );

        let response = TestResponse::new(StatusCode::OK, HeaderMap::new(), body);

        assert_eq!(response.messages(), [Message::new(Level::SUCCESS, "saved")]);
        assert!(response.form("form").is_none());
    }

    #[test]
    fn other_json_is_not_a_page() {
        let body = Bytes::from_static(br#"{"error":"User not found"}"#);

        let response = TestResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), body);

        assert!(response.context.is_none());
        assert!(response.messages().is_empty());
        assert!(response.contains("User not found"));
    }
}
