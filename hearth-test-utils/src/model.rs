//! Type aliases for the entity models used by the fixtures.

pub type UserModel = entity::auth_user::Model;

pub type GroupModel = entity::auth_group::Model;

pub type PermissionModel = entity::auth_permission::Model;

pub type UserPermissionModel = entity::auth_user_permission::Model;
