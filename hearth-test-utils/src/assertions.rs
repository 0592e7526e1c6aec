//! Assertions over rendered pages.
//!
//! Every assertion panics with a descriptive message on failure, like `assert!`.

use std::fmt;

use axum::http::StatusCode;
use hearth::model::message::{Level, Message};

use crate::response::TestResponse;

/// A message level to match, either numerically or by its tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpectedLevel {
    Level(Level),
    Tag(String),
}

impl ExpectedLevel {
    fn matches(&self, level: Level) -> bool {
        match self {
            Self::Level(expected) => *expected == level,
            Self::Tag(tag) => level.tag() == Some(tag.as_str()),
        }
    }
}

impl From<Level> for ExpectedLevel {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl From<u8> for ExpectedLevel {
    fn from(level: u8) -> Self {
        Self::Level(Level(level))
    }
}

impl From<&str> for ExpectedLevel {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_string())
    }
}

/// Shows the tag of a numeric level when it has one.
impl fmt::Display for ExpectedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => fmt::Display::fmt(level, f),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

pub trait ResponseAssertions {
    /// Asserts that exactly `expected` messages were rendered.
    fn assert_message_count(&self, expected: usize);

    /// Asserts that exactly one message contains `text`, at any level.
    fn assert_message_contains(&self, text: &str);

    /// Asserts that exactly one message contains `text` and that it has `level`.
    fn assert_message_contains_at_level(&self, text: &str, level: impl Into<ExpectedLevel>);

    /// Asserts that no message contains `text`.
    fn assert_message_not_contains(&self, text: &str);

    /// Asserts that `field` of the form rendered as `form` has no errors.
    fn assert_not_form_error(&self, form: &str, field: &str);

    /// Asserts a 200 response whose body contains `text`.
    fn assert_contains(&self, text: &str);
}

impl ResponseAssertions for TestResponse {
    #[track_caller]
    fn assert_message_count(&self, expected: usize) {
        let actual = page_messages(self).len();

        if actual != expected {
            panic!("Message count was {actual}, expected {expected}");
        }
    }

    #[track_caller]
    fn assert_message_contains(&self, text: &str) {
        assert_single_message(self, text, None);
    }

    #[track_caller]
    fn assert_message_contains_at_level(&self, text: &str, level: impl Into<ExpectedLevel>) {
        assert_single_message(self, text, Some(level.into()));
    }

    #[track_caller]
    fn assert_message_not_contains(&self, text: &str) {
        let matches = matching_messages(page_messages(self), text);

        if !matches.is_empty() {
            panic!(
                "Message(s) should not contain \"{text}\": {}",
                quoted_list(&matches)
            );
        }
    }

    #[track_caller]
    fn assert_not_form_error(&self, form: &str, field: &str) {
        let Some(bound) = self.form(form) else {
            panic!("No form named \"{form}\" in the response context");
        };

        let Some(bound_field) = bound.field(field) else {
            panic!("No field named \"{field}\" in form \"{form}\"");
        };

        let errors = &bound_field.errors;
        if !errors.is_empty() {
            panic!("{errors:?} != []");
        }
    }

    #[track_caller]
    fn assert_contains(&self, text: &str) {
        if self.status != StatusCode::OK {
            panic!(
                "Couldn't retrieve content: Response code was {} (expected 200)",
                self.status.as_u16()
            );
        }

        if !self.contains(text) {
            panic!("Couldn't find \"{text}\" in response");
        }
    }
}

#[track_caller]
fn assert_single_message(response: &TestResponse, text: &str, level: Option<ExpectedLevel>) {
    let messages = page_messages(response);
    let matches = matching_messages(messages, text);

    match matches.as_slice() {
        [message] => {
            if let Some(expected) = level.filter(|expected| !expected.matches(message.level)) {
                panic!(
                    "There was one matching message but with different level: {} != {expected}",
                    message.level.tag().unwrap_or("NO LEVEL")
                );
            }

            response.assert_contains(text);
        }
        [] => panic!(
            "No message contained text \"{text}\", messages were: {}",
            quoted_list(&messages.iter().collect::<Vec<_>>())
        ),
        _ => panic!(
            "Multiple messages contained text \"{text}\": {}",
            quoted_list(&matches)
        ),
    }
}

/// Messages of a rendered page. A response without a page context has no messages to
/// assert on, so this panics rather than reporting an empty list.
#[track_caller]
fn page_messages(response: &TestResponse) -> &[Message] {
    match &response.context {
        Some(context) => &context.messages,
        None => panic!(
            "Response has no page context (status {})",
            response.status.as_u16()
        ),
    }
}

fn matching_messages<'a>(messages: &'a [Message], text: &str) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|message| message.message.contains(text))
        .collect()
}

fn quoted_list(messages: &[&Message]) -> String {
    messages
        .iter()
        .map(|message| format!("\"{message}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use axum::{body::Bytes, http::HeaderMap};
    use hearth::model::{
        form::{BoundField, BoundForm},
        page::PageContext,
    };

    use super::*;

    fn page(messages: Vec<Message>) -> TestResponse {
        let context = PageContext::with_messages(messages);
        let body = serde_json::to_vec(&context).unwrap();

        TestResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from(body))
    }

    fn error_response() -> TestResponse {
        let body = Bytes::from_static(br#"{"error":"Internal server error"}"#);

        TestResponse::new(StatusCode::INTERNAL_SERVER_ERROR, HeaderMap::new(), body)
    }

    fn custom_level_page() -> TestResponse {
        page(vec![Message::new(Level(35), "custom")])
    }

    mod expected_level {
        use super::*;

        #[test]
        fn matches_number_or_tag() {
            assert!(ExpectedLevel::from(25u8).matches(Level::SUCCESS));
            assert!(ExpectedLevel::from("success").matches(Level::SUCCESS));
            assert!(!ExpectedLevel::from("error").matches(Level::SUCCESS));
            assert_eq!(ExpectedLevel::from(Level::ERROR).to_string(), "error");
            assert_eq!(ExpectedLevel::from(35u8).to_string(), "35");
        }
    }

    mod assert_message_count {
        use super::*;

        /// Expect a response that is not a page to fail instead of counting zero
        #[test]
        #[should_panic(expected = "Response has no page context (status 500)")]
        fn requires_page_context() {
            error_response().assert_message_count(0);
        }
    }

    mod assert_message_not_contains {
        use super::*;

        /// Expect a response that is not a page to fail instead of passing vacuously
        #[test]
        #[should_panic(expected = "Response has no page context (status 500)")]
        fn requires_page_context() {
            error_response().assert_message_not_contains("anything");
        }
    }

    mod assert_message_contains_at_level {
        use super::*;

        /// Expect a custom level to match its number
        #[test]
        fn custom_level_by_number() {
            custom_level_page().assert_message_contains_at_level("custom", 35u8);
        }

        /// Expect a level without a tag to be reported as such
        #[test]
        #[should_panic(
            expected = "There was one matching message but with different level: NO LEVEL != warning"
        )]
        fn custom_level_mismatch() {
            custom_level_page().assert_message_contains_at_level("custom", Level::WARNING);
        }
    }

    mod assert_not_form_error {
        use super::*;

        /// Expect a missing form to fail
        #[test]
        #[should_panic(expected = "No form named \"form\" in the response context")]
        fn missing_form() {
            page(Vec::new()).assert_not_form_error("form", "username");
        }

        /// Expect a misspelled field name to fail rather than pass with no errors
        #[test]
        #[should_panic(expected = "No field named \"usrename\" in form \"form\"")]
        fn missing_field() {
            let mut context = PageContext::with_messages(Vec::new());
            let mut form = BoundForm {
                is_bound: true,
                ..BoundForm::default()
            };
            form.fields
                .insert("username".to_string(), BoundField::default());
            context.forms.insert("form".to_string(), form);

            let body = serde_json::to_vec(&context).unwrap();
            let response = TestResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from(body));

            response.assert_not_form_error("form", "usrename");
        }
    }

    mod assert_contains {
        use super::*;

        /// Expect a non-200 response to fail
        #[test]
        #[should_panic(expected = "Response code was 404 (expected 200)")]
        fn requires_ok_status() {
            let response =
                TestResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), Bytes::new());

            response.assert_contains("anything");
        }
    }
}
