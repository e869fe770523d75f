use sea_orm_migration::prelude::*;

use crate::m20250901_000001_initial::Restaurants;

#[derive(DeriveIden)]
enum RestaurantTeam {
    Table,
    Uuid,
    IdentitySource,
    Name,
    Email,
    JobType,
    RestaurantId,
    IsActive,
    EmailVerified,
    EmailVerificationCode,
    CodeExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Restaurant staff and managers.
///
/// `uuid` is either the identity provider's user id or a locally synthesized
/// placeholder; `identity_source` records which (`provider` / `local`).
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantTeam::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantTeam::Uuid)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::IdentitySource)
                            .string_len(16)
                            .not_null()
                            .default("provider"),
                    )
                    .col(ColumnDef::new(RestaurantTeam::Name).string().not_null())
                    .col(ColumnDef::new(RestaurantTeam::Email).string().null())
                    .col(ColumnDef::new(RestaurantTeam::JobType).string_len(16).not_null())
                    .col(
                        ColumnDef::new(RestaurantTeam::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::EmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::EmailVerificationCode)
                            .string_len(6)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::CodeExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RestaurantTeam::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_team_restaurant")
                            .from(RestaurantTeam::Table, RestaurantTeam::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // verifyEmail 按 email 查找待验证记录
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_team_email")
                    .table(RestaurantTeam::Table)
                    .col(RestaurantTeam::Email)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_team_restaurant")
                    .table(RestaurantTeam::Table)
                    .col(RestaurantTeam::RestaurantId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantTeam::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
