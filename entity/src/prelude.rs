pub use super::auth_group::Entity as AuthGroup;
pub use super::auth_permission::Entity as AuthPermission;
pub use super::auth_user::Entity as AuthUser;
pub use super::auth_user_permission::Entity as AuthUserPermission;
