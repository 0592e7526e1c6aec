use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The currently logged in user
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    /// Granted permissions as `"app_label.codename"`
    pub permissions: Vec<String>,
}
