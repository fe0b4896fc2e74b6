//! `SeaORM` Entity for service_info table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
    pub protocol: String,
    pub version: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub load_balance_strategy: String,
    pub protect_threshold: f32,
    #[sea_orm(column_type = "Text")]
    pub metadata: String,
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub service_version: i64,
    pub active_flag: bool,
    pub add_time: i64,
    pub add_who: String,
    pub edit_time: i64,
    pub edit_who: String,
    pub opr_seq_flag: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::instance_info::Entity")]
    InstanceInfo,
}

impl Related<super::instance_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstanceInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
