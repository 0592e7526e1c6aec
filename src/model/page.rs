//! Page context rendered by the HTML-less views.
//!
//! Views respond with the context they would hand to a template, serialized as JSON. Tests
//! read messages and bound forms back out of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{form::BoundForm, message::Message};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageContext {
    /// Flash messages consumed while rendering this page
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Bound or unbound forms keyed by their context name
    #[serde(default)]
    pub forms: BTreeMap<String, BoundForm>,
}

impl PageContext {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            forms: BTreeMap::new(),
        }
    }

    pub fn with_form(mut self, name: impl Into<String>, form: BoundForm) -> Self {
        self.forms.insert(name.into(), form);
        self
    }
}
