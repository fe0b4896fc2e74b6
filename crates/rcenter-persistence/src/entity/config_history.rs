//! `SeaORM` Entity for his_config_info table (config change history)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "his_config_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub data_id: String,
    pub change_type: String,
    #[sea_orm(column_type = "Text")]
    pub old_content: String,
    #[sea_orm(column_type = "Text")]
    pub new_content: String,
    pub old_version: i64,
    pub new_version: i64,
    pub old_md5: String,
    pub new_md5: String,
    #[sea_orm(column_type = "Text")]
    pub change_reason: String,
    pub changed_by: String,
    pub changed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
