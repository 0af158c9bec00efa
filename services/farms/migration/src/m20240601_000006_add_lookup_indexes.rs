use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Farm context resolution filters on these on every request.
        manager
            .create_index(
                Index::create()
                    .table(Farms::Table)
                    .col(Farms::OwnerId)
                    .name("idx_farms_owner_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(FarmMembers::Table)
                    .col(FarmMembers::UserId)
                    .name("idx_farm_members_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Activities::Table)
                    .col(Activities::FarmId)
                    .col(Activities::Status)
                    .name("idx_activities_farm_id_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_activities_farm_id_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_farm_members_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_farms_owner_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Farms {
    Table,
    OwnerId,
}

#[derive(Iden)]
enum FarmMembers {
    Table,
    UserId,
}

#[derive(Iden)]
enum Activities {
    Table,
    FarmId,
    Status,
}
