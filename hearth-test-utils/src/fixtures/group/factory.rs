use crate::model::GroupModel;

/// Create a group model without touching the database.
pub fn mock_group_model(id: i32, name: &str) -> GroupModel {
    GroupModel {
        id,
        name: name.to_string(),
    }
}
