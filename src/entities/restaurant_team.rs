use async_graphql::Enum;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};

/// Declaration order is the listing order of a restaurant's team.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    DeriveActiveEnum,
    EnumIter,
    Enum,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "chef")]
    Chef,
    #[sea_orm(string_value = "waiter")]
    Waiter,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::Manager => write!(f, "manager"),
            JobType::Chef => write!(f, "chef"),
            JobType::Waiter => write!(f, "waiter"),
        }
    }
}

/// Where a team member's `uuid` came from.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    DeriveActiveEnum,
    EnumIter,
    Enum,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Issued by the identity provider.
    #[sea_orm(string_value = "provider")]
    Provider,
    /// Placeholder created while the provider was unavailable.
    #[sea_orm(string_value = "local")]
    Local,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "restaurant_team")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: String,
    pub identity_source: IdentitySource,
    pub name: String,
    pub email: Option<String>,
    pub job_type: JobType,
    pub restaurant_id: i32,
    pub is_active: bool,
    pub email_verified: bool,
    pub email_verification_code: Option<String>,
    pub code_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
