//! Permission lookup and per-user grants.
//!
//! Permissions are addressed by their natural key `"{app_label}.{codename}"`. Every model
//! gets the default `add_`, `change_`, `delete_` and `view_` permissions.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

/// Actions that receive a default permission for every model.
pub const DEFAULT_PERMISSION_ACTIONS: [&str; 4] = ["add", "change", "delete", "view"];

/// Splits `"app_label.codename"` into its two parts.
///
/// Returns `None` unless the name contains exactly one `.` with text on both sides.
pub fn parse_permission_name(name: &str) -> Option<(&str, &str)> {
    let (app_label, codename) = name.split_once('.')?;

    if app_label.is_empty() || codename.is_empty() || codename.contains('.') {
        return None;
    }

    Some((app_label, codename))
}

pub struct PermissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PermissionRepository<'a, C> {
    /// Creates a new instance of [`PermissionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the default permissions for each model, skipping ones that already exist
    pub async fn create_defaults(
        &self,
        app_label: &str,
        models: &[&str],
    ) -> Result<Vec<entity::auth_permission::Model>, DbErr> {
        let mut permissions = Vec::with_capacity(models.len() * DEFAULT_PERMISSION_ACTIONS.len());

        for model in models {
            for action in DEFAULT_PERMISSION_ACTIONS {
                let codename = format!("{action}_{model}");

                let permission = match self.get_by_natural_key(app_label, &codename).await? {
                    Some(permission) => permission,
                    None => {
                        entity::auth_permission::ActiveModel {
                            app_label: ActiveValue::Set(app_label.to_string()),
                            codename: ActiveValue::Set(codename),
                            name: ActiveValue::Set(format!("Can {action} {model}")),
                            ..Default::default()
                        }
                        .insert(self.db)
                        .await?
                    }
                };

                permissions.push(permission);
            }
        }

        Ok(permissions)
    }

    pub async fn get_by_natural_key(
        &self,
        app_label: &str,
        codename: &str,
    ) -> Result<Option<entity::auth_permission::Model>, DbErr> {
        entity::prelude::AuthPermission::find()
            .filter(entity::auth_permission::Column::AppLabel.eq(app_label))
            .filter(entity::auth_permission::Column::Codename.eq(codename))
            .one(self.db)
            .await
    }

    /// Grants a permission to a user
    ///
    /// Returns `Ok(false)` if the user already had the permission.
    pub async fn grant(&self, user_id: i32, permission_id: i32) -> Result<bool, DbErr> {
        let existing = entity::prelude::AuthUserPermission::find_by_id((user_id, permission_id))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        entity::prelude::AuthUserPermission::insert(entity::auth_user_permission::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            permission_id: ActiveValue::Set(permission_id),
        })
        .exec_without_returning(self.db)
        .await?;

        Ok(true)
    }

    /// Permissions granted directly to the user, as `"app_label.codename"`
    pub async fn get_user_permissions(&self, user_id: i32) -> Result<Vec<String>, DbErr> {
        let grants = entity::prelude::AuthUserPermission::find()
            .filter(entity::auth_user_permission::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::AuthPermission)
            .all(self.db)
            .await?;

        let mut names: Vec<String> = grants
            .into_iter()
            .filter_map(|(_, permission)| permission)
            .map(|p| format!("{}.{}", p.app_label, p.codename))
            .collect();
        names.sort();

        Ok(names)
    }

    /// Whether an active user holds the permission; inactive users hold none
    pub async fn has_perm(
        &self,
        user: &entity::auth_user::Model,
        permission: &str,
    ) -> Result<bool, DbErr> {
        self.has_perms(user, &[permission]).await
    }

    /// Whether an active user holds every listed permission
    pub async fn has_perms(
        &self,
        user: &entity::auth_user::Model,
        permissions: &[&str],
    ) -> Result<bool, DbErr> {
        if !user.is_active {
            return Ok(false);
        }

        let granted = self.get_user_permissions(user.id).await?;

        Ok(permissions
            .iter()
            .all(|wanted| granted.iter().any(|name| name == wanted)))
    }
}
