use crate::entities::{IdentitySource, JobType, team_entity as team};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{normalize_email, validate_email, validate_required};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct TeamService {
    pool: DatabaseConnection,
}

impl TeamService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 经理在前，然后是厨师、服务员
    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<team::Model>> {
        let mut members = team::Entity::find()
            .filter(team::Column::RestaurantId.eq(restaurant_id))
            .order_by_asc(team::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        // job_type 以字符串存储，按枚举顺序排序需在内存中进行
        members.sort_by_key(|m| m.job_type);
        Ok(members)
    }

    pub async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<team::Model>> {
        Ok(team::Entity::find_by_id(uuid.to_string())
            .one(&self.pool)
            .await?)
    }

    /// 调用者必须是该餐厅在职的经理
    pub async fn require_manager(
        &self,
        user: &AuthUser,
        restaurant_id: i32,
    ) -> AppResult<team::Model> {
        match self.find_by_uuid(&user.id).await? {
            Some(member)
                if member.restaurant_id == restaurant_id
                    && member.job_type == JobType::Manager
                    && member.is_active =>
            {
                Ok(member)
            }
            _ => {
                log::warn!(
                    "Account {} denied manager access to restaurant {restaurant_id}",
                    user.id
                );
                Err(AppError::Forbidden(format!(
                    "Manager access to restaurant {restaurant_id} required"
                )))
            }
        }
    }

    /// 预先登记受邀成员，没有账号 id 时使用占位身份，直到接受邀请
    pub async fn create(&self, input: CreateTeamMemberInput) -> AppResult<team::Model> {
        validate_required("Name", &input.name)?;
        let email = match input.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                let email = normalize_email(email);
                validate_email(&email)?;
                Some(email)
            }
            _ => None,
        };

        let identity = match input.uuid {
            Some(uuid) if !uuid.trim().is_empty() => MemberIdentity::ProviderIssued(uuid),
            _ => MemberIdentity::synthesize(),
        };

        let model = team::ActiveModel {
            uuid: Set(identity.as_str().to_string()),
            identity_source: Set(identity.source()),
            name: Set(input.name.trim().to_string()),
            email: Set(email),
            job_type: Set(input.job_type),
            restaurant_id: Set(input.restaurant_id),
            is_active: Set(false),
            email_verified: Set(false),
            email_verification_code: Set(None),
            code_expires_at: Set(None),
            ..Default::default()
        };
        let member = model.insert(&self.pool).await?;
        log::info!(
            "Team member {} invited to restaurant {} as {}",
            member.uuid,
            member.restaurant_id,
            member.job_type
        );
        Ok(member)
    }

    pub async fn delete(&self, uuid: &str) -> AppResult<bool> {
        let result = team::Entity::delete_by_id(uuid.to_string())
            .exec(&self.pool)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// 将 `existing_uuid` 对应的成员改绑到调用者的账号
    pub async fn link_user_to_team_member(
        &self,
        existing_uuid: &str,
        user: &AuthUser,
    ) -> AppResult<team::Model> {
        self.rekey(existing_uuid, user, false).await
    }

    /// 同 [`Self::link_user_to_team_member`]，并激活该成员
    pub async fn complete_invitation(
        &self,
        temp_uuid: &str,
        user: &AuthUser,
    ) -> AppResult<team::Model> {
        self.rekey(temp_uuid, user, true).await
    }

    // 只有占位身份可以改绑到调用者的账号
    async fn rekey(
        &self,
        from_uuid: &str,
        user: &AuthUser,
        activate: bool,
    ) -> AppResult<team::Model> {
        let member = self
            .find_by_uuid(from_uuid)
            .await?
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

        if member.identity_source == IdentitySource::Provider && from_uuid != user.id {
            log::warn!("Account {} tried to claim team member {from_uuid}", user.id);
            return Err(AppError::Forbidden(
                "This team member is already linked to another account".to_string(),
            ));
        }
        if let Some(email) = member.email.as_deref() {
            if normalize_email(email) != normalize_email(&user.email) {
                return Err(AppError::Forbidden(
                    "This invitation was issued to a different email address".to_string(),
                ));
            }
        }
        if from_uuid != user.id && self.find_by_uuid(&user.id).await?.is_some() {
            return Err(AppError::ValidationError(
                "This account is already linked to a team member".to_string(),
            ));
        }

        let mut update = team::Entity::update_many()
            .col_expr(team::Column::Uuid, Expr::value(user.id.clone()))
            .col_expr(
                team::Column::IdentitySource,
                Expr::value(IdentitySource::Provider),
            )
            .col_expr(team::Column::UpdatedAt, Expr::value(Utc::now()));
        if activate {
            update = update.col_expr(team::Column::IsActive, Expr::value(true));
        }
        update
            .filter(team::Column::Uuid.eq(from_uuid))
            .exec(&self.pool)
            .await?;

        log::info!("Team member {from_uuid} linked to account {}", user.id);

        self.find_by_uuid(&user.id).await?.ok_or_else(|| {
            AppError::InternalError(format!("Team member {} missing after re-key", user.id))
        })
    }
}
