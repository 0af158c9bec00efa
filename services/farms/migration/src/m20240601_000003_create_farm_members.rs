use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FarmMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FarmMembers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FarmMembers::FarmId).uuid().not_null())
                    .col(ColumnDef::new(FarmMembers::UserId).text().not_null())
                    .col(
                        ColumnDef::new(FarmMembers::Role)
                            .text()
                            .not_null()
                            .default("MEMBER"),
                    )
                    .col(
                        ColumnDef::new(FarmMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FarmMembers::Table, FarmMembers::FarmId)
                            .to(Farms::Table, Farms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FarmMembers::Table, FarmMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(FarmMembers::Table)
                    .col(FarmMembers::FarmId)
                    .col(FarmMembers::UserId)
                    .unique()
                    .name("uq_farm_members_farm_id_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FarmMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FarmMembers {
    Table,
    Id,
    FarmId,
    UserId,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum Farms {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
