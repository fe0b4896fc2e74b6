//! `SeaORM` Entity for config_info table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "config_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub data_id: String,
    pub content_type: String,
    #[sea_orm(column_type = "Text")]
    pub config_content: String,
    pub md5_value: String,
    pub version: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub add_time: i64,
    pub add_who: String,
    pub edit_time: i64,
    pub edit_who: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
