use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A delegated-signing credential record issued for an organization.
///
/// A key is usable for delegated operations only when `activated` is true AND
/// all four of `account_address`, `private_key`, `init_code`, and
/// `deferred_action_digest` are present and non-empty. Provisioning fills the
/// fields in over time, so an activated-but-incomplete row is a real state.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "api_keys")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub org_id: String,
    pub activated: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub account_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub private_key: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub init_code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub deferred_action_digest: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrgId",
        to = "super::organizations::Column::Id"
    )]
    Organizations,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
