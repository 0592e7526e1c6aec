pub mod factory;

use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{error::TestError, model::GroupModel, TestContext};

impl TestContext {
    pub fn group(&self) -> GroupFixtures<'_> {
        GroupFixtures { context: self }
    }
}

pub struct GroupFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> GroupFixtures<'a> {
    pub async fn insert_group(&self, name: &str) -> Result<GroupModel, TestError> {
        let group = entity::auth_group::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };

        Ok(group.insert(&self.context.db).await?)
    }
}
