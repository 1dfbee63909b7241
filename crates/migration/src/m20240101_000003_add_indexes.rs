use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // RefreshToken: index on user_id for per-user revocation scans
        manager
            .create_index(
                Index::create()
                    .name("idx_refresh_token_user")
                    .table(RefreshToken::Table)
                    .col(RefreshToken::UserId)
                    .to_owned(),
            )
            .await?;

        // RefreshToken: index on expires_at for expiry sweeps
        manager
            .create_index(
                Index::create()
                    .name("idx_refresh_token_expires")
                    .table(RefreshToken::Table)
                    .col(RefreshToken::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_refresh_token_user").table(RefreshToken::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_refresh_token_expires").table(RefreshToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RefreshToken { Table, UserId, ExpiresAt }
