use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Campaign category stored in the `type` column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "UPPERCASE")]
pub enum FundraisingEventType {
    #[default]
    Up = 1,
    Down = 2,
}

/// Lifecycle state stored in the `status` column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "UPPERCASE")]
pub enum FundraisingEventStatus {
    #[default]
    Active = 1,
    Ended = 2,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "fundraising_events")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub event_type: FundraisingEventType,
    #[sea_orm(column_name = "merchantId", column_type = "String(StringLen::N(50))")]
    pub merchant_id: String,
    #[sea_orm(column_name = "eventName", column_type = "String(StringLen::N(100))")]
    pub event_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "startMonth")]
    pub start_month: DateTime<Utc>,
    #[sea_orm(column_name = "endMonth")]
    pub end_month: DateTime<Utc>,
    pub status: FundraisingEventStatus,
    #[sea_orm(column_name = "totalAmount")]
    pub total_amount: i32,
    pub cost: i32,
    // No updated_at: only creation time is tracked
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
