use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, ActiveModelTrait, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "refresh_token")]
pub struct Model {
    /// Row id doubles as the token's `jti` claim.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTimeWithTimeZone,
    pub revoked_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn record(
    db: &DatabaseConnection,
    jti: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<Model, crate::errors::ModelError> {
    let am = ActiveModel {
        id: Set(jti),
        user_id: Set(user_id),
        expires_at: Set(expires_at.into()),
        revoked_at: Set(None),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, jti: Uuid) -> Result<Option<Model>, crate::errors::ModelError> {
    Entity::find_by_id(jti)
        .one(db)
        .await
        .map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}

pub async fn revoke(db: &DatabaseConnection, jti: Uuid) -> Result<Model, crate::errors::ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(jti)
        .one(db)
        .await
        .map_err(|e| crate::errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| crate::errors::ModelError::Validation("refresh token not found".into()))?
        .into();
    am.revoked_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}
