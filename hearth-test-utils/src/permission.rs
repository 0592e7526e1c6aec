use hearth::data::permission::{parse_permission_name, PermissionRepository};
use sea_orm::ConnectionTrait;

use crate::{error::TestError, model::UserModel};

/// Grants permissions to a user by natural key.
///
/// ```ignore
/// let user = add_user_permissions(&db, user, ["auth.change_user", "auth.add_user"]).await?;
/// ```
///
/// Granting a permission the user already holds is a no-op.
///
/// # Returns
/// - `Ok(UserModel)` - The user, after every permission was granted
/// - `Err(TestError::InvalidPermissionName)` - A name is not `"app_label.codename"`
/// - `Err(TestError::PermissionNotFound)` - No permission has that natural key
/// - `Err(TestError::DbErr)` - A lookup or grant failed
pub async fn add_user_permissions<C, I, S>(
    db: &C,
    user: UserModel,
    permissions: I,
) -> Result<UserModel, TestError>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let repository = PermissionRepository::new(db);

    for name in permissions {
        let name = name.as_ref();
        let (app_label, codename) = parse_permission_name(name)
            .ok_or_else(|| TestError::InvalidPermissionName(name.to_string()))?;

        let permission = repository
            .get_by_natural_key(app_label, codename)
            .await?
            .ok_or_else(|| TestError::PermissionNotFound(name.to_string()))?;

        if repository.grant(user.id, permission.id).await? {
            tracing::debug!(user_id = %user.id, permission = %name, "Granted permission");
        }
    }

    Ok(user)
}
