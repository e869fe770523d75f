use crate::entities::{JobType, restaurant_entity as restaurants, team_entity as team};
use crate::error::{AppError, AppResult};
use crate::models::MemberIdentity;
use crate::utils::RestaurantCodeLookup;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub restaurant_code: String,
}

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub identity: MemberIdentity,
    pub name: String,
    pub email: Option<String>,
    pub job_type: JobType,
    pub restaurant_id: i32,
    pub is_active: bool,
    pub email_verified: bool,
    pub verification_code: Option<(String, DateTime<Utc>)>,
}

impl NewTeamMember {
    /// Manager awaiting email verification.
    pub fn pending_manager(
        identity: MemberIdentity,
        name: String,
        email: String,
        restaurant_id: i32,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity,
            name,
            email: Some(email),
            job_type: JobType::Manager,
            restaurant_id,
            is_active: false,
            email_verified: false,
            verification_code: Some((code, expires_at)),
        }
    }

    /// Staff member, active immediately and never issued a code.
    pub fn active_staff(
        identity: MemberIdentity,
        name: String,
        email: String,
        job_type: JobType,
        restaurant_id: i32,
    ) -> Self {
        Self {
            identity,
            name,
            email: Some(email),
            job_type,
            restaurant_id,
            is_active: true,
            email_verified: true,
            verification_code: None,
        }
    }
}

/// Point lookups and single-row writes needed by the signup flows.
#[async_trait]
pub trait SignupStore: RestaurantCodeLookup {
    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> AppResult<restaurants::Model>;

    async fn find_restaurant_by_id(&self, id: i32) -> AppResult<Option<restaurants::Model>>;

    async fn find_restaurant_by_code(&self, code: &str) -> AppResult<Option<restaurants::Model>>;

    async fn insert_team_member(&self, member: NewTeamMember) -> AppResult<team::Model>;

    async fn find_team_member_by_email(
        &self,
        restaurant_id: i32,
        email: &str,
    ) -> AppResult<Option<team::Model>>;

    /// Exact match on (email, code, email_verified = false).
    async fn find_pending_verification(
        &self,
        email: &str,
        code: &str,
    ) -> AppResult<Option<team::Model>>;

    /// Latest unverified member with an outstanding code for `email`.
    async fn find_pending_by_email(&self, email: &str) -> AppResult<Option<team::Model>>;

    /// Flips the member to verified+active and clears the code in one write.
    /// Fails with `InvalidCode` if the member was already verified.
    async fn mark_email_verified(&self, uuid: &str) -> AppResult<team::Model>;

    /// Returns `false` when the member was verified in the meantime.
    async fn replace_verification_code(
        &self,
        uuid: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct SeaOrmSignupStore {
    pool: DatabaseConnection,
}

impl SeaOrmSignupStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantCodeLookup for SeaOrmSignupStore {
    async fn restaurant_code_exists(&self, code: &str) -> AppResult<bool> {
        let count = restaurants::Entity::find()
            .filter(restaurants::Column::RestaurantCode.eq(code))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl SignupStore for SeaOrmSignupStore {
    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> AppResult<restaurants::Model> {
        let model = restaurants::ActiveModel {
            name: Set(restaurant.name),
            address: Set(restaurant.address),
            phone: Set(restaurant.phone),
            restaurant_code: Set(Some(restaurant.restaurant_code)),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    async fn find_restaurant_by_id(&self, id: i32) -> AppResult<Option<restaurants::Model>> {
        Ok(restaurants::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn find_restaurant_by_code(&self, code: &str) -> AppResult<Option<restaurants::Model>> {
        Ok(restaurants::Entity::find()
            .filter(restaurants::Column::RestaurantCode.eq(code))
            .one(&self.pool)
            .await?)
    }

    async fn insert_team_member(&self, member: NewTeamMember) -> AppResult<team::Model> {
        let (code, expires_at) = match member.verification_code {
            Some((code, expires_at)) => (Some(code), Some(expires_at)),
            None => (None, None),
        };
        let model = team::ActiveModel {
            uuid: Set(member.identity.as_str().to_string()),
            identity_source: Set(member.identity.source()),
            name: Set(member.name),
            email: Set(member.email),
            job_type: Set(member.job_type),
            restaurant_id: Set(member.restaurant_id),
            is_active: Set(member.is_active),
            email_verified: Set(member.email_verified),
            email_verification_code: Set(code),
            code_expires_at: Set(expires_at),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    async fn find_team_member_by_email(
        &self,
        restaurant_id: i32,
        email: &str,
    ) -> AppResult<Option<team::Model>> {
        Ok(team::Entity::find()
            .filter(team::Column::RestaurantId.eq(restaurant_id))
            .filter(team::Column::Email.eq(email))
            .one(&self.pool)
            .await?)
    }

    async fn find_pending_verification(
        &self,
        email: &str,
        code: &str,
    ) -> AppResult<Option<team::Model>> {
        Ok(team::Entity::find()
            .filter(team::Column::Email.eq(email))
            .filter(team::Column::EmailVerificationCode.eq(code))
            .filter(team::Column::EmailVerified.eq(false))
            .one(&self.pool)
            .await?)
    }

    async fn find_pending_by_email(&self, email: &str) -> AppResult<Option<team::Model>> {
        Ok(team::Entity::find()
            .filter(team::Column::Email.eq(email))
            .filter(team::Column::EmailVerified.eq(false))
            .filter(team::Column::EmailVerificationCode.is_not_null())
            .order_by_desc(team::Column::CreatedAt)
            .one(&self.pool)
            .await?)
    }

    async fn mark_email_verified(&self, uuid: &str) -> AppResult<team::Model> {
        // 条件更新保证 PendingVerification -> Verified 只发生一次
        let result = team::Entity::update_many()
            .col_expr(team::Column::EmailVerified, Expr::value(true))
            .col_expr(team::Column::IsActive, Expr::value(true))
            .col_expr(
                team::Column::EmailVerificationCode,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                team::Column::CodeExpiresAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(team::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(team::Column::Uuid.eq(uuid))
            .filter(team::Column::EmailVerified.eq(false))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidCode);
        }

        team::Entity::find_by_id(uuid.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Team member {uuid} vanished after verification"))
            })
    }

    async fn replace_verification_code(
        &self,
        uuid: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = team::Entity::update_many()
            .col_expr(team::Column::EmailVerificationCode, Expr::value(code))
            .col_expr(team::Column::CodeExpiresAt, Expr::value(expires_at))
            .col_expr(team::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(team::Column::Uuid.eq(uuid))
            .filter(team::Column::EmailVerified.eq(false))
            .exec(&self.pool)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
