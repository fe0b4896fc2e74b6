//! `SeaORM` Entity for instance_info table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instance_info")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub node_id: String,
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
    pub host: String,
    pub port: i32,
    pub weight: f64,
    pub instance_status: String,
    pub healthy_status: String,
    pub ephemeral: bool,
    #[sea_orm(column_type = "Text")]
    pub metadata: String,
    pub register_time: i64,
    pub last_beat_time: i64,
    pub last_check_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
