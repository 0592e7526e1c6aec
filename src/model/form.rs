//! Form binding and validation.
//!
//! A [`BoundForm`] is what a view puts into the page context: every field with its
//! submitted value and validation errors. Forms are unbound on GET (no errors) and bound
//! to the submitted data on POST.

use std::collections::BTreeMap;

use sea_orm::{ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};

use crate::data::user::UserRepository;

pub static REQUIRED_FIELD_ERROR: &str = "This field is required.";
pub static PASSWORD_MISMATCH_ERROR: &str = "The two password fields didn't match.";
pub static DUPLICATE_USERNAME_ERROR: &str = "A user with that username already exists.";
pub static INVALID_USERNAME_ERROR: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Longest accepted username.
pub const USERNAME_MAX_LENGTH: usize = 150;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundField {
    pub value: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundForm {
    pub is_bound: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, BoundField>,
    #[serde(default)]
    pub non_field_errors: Vec<String>,
}

impl BoundForm {
    /// A bound form without any field or non-field errors.
    pub fn is_valid(&self) -> bool {
        self.is_bound
            && self.non_field_errors.is_empty()
            && self.fields.values().all(|field| field.errors.is_empty())
    }

    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.get(name)
    }

    fn add_error(&mut self, field: &str, error: &str) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .errors
            .push(error.to_string());
    }
}

/// Submitted data for [`UserCreationForm`]. Missing fields deserialize to `None`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserCreationData {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password1: Option<String>,
    #[serde(default)]
    pub password2: Option<String>,
}

/// Registration form: a unique username and a confirmed password.
pub struct UserCreationForm {
    data: Option<UserCreationData>,
}

impl UserCreationForm {
    pub fn unbound() -> Self {
        Self { data: None }
    }

    pub fn bound(data: UserCreationData) -> Self {
        Self { data: Some(data) }
    }

    /// Validates the submitted data.
    ///
    /// Password values are never echoed back into the bound form.
    ///
    /// # Returns
    /// - `Ok(BoundForm)` - The form with its field errors, empty for an unbound form
    /// - `Err(DbErr)` - The username uniqueness lookup failed
    pub async fn validate<C: ConnectionTrait>(&self, db: &C) -> Result<BoundForm, DbErr> {
        let mut form = BoundForm::default();
        for name in ["username", "password1", "password2"] {
            form.fields.insert(name.to_string(), BoundField::default());
        }

        let Some(data) = &self.data else {
            return Ok(form);
        };
        form.is_bound = true;

        let username = non_blank(&data.username);
        let password1 = non_blank(&data.password1);
        let password2 = non_blank(&data.password2);

        if let Some(field) = form.fields.get_mut("username") {
            field.value = data.username.clone();
        }

        match username {
            None => form.add_error("username", REQUIRED_FIELD_ERROR),
            Some(username) if !is_valid_username(username) => {
                form.add_error("username", INVALID_USERNAME_ERROR)
            }
            Some(username) => {
                if UserRepository::new(db)
                    .get_by_username(username)
                    .await?
                    .is_some()
                {
                    form.add_error("username", DUPLICATE_USERNAME_ERROR);
                }
            }
        }

        if password1.is_none() {
            form.add_error("password1", REQUIRED_FIELD_ERROR);
        }

        match (password1, password2) {
            (_, None) => form.add_error("password2", REQUIRED_FIELD_ERROR),
            (Some(first), Some(second)) if first != second => {
                form.add_error("password2", PASSWORD_MISMATCH_ERROR)
            }
            _ => {}
        }

        Ok(form)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn is_valid_username(username: &str) -> bool {
    username.chars().count() <= USERNAME_MAX_LENGTH
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}
