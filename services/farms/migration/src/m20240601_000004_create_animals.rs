use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Animals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Animals::FarmId).uuid().not_null())
                    .col(ColumnDef::new(Animals::TagId).text().not_null())
                    .col(ColumnDef::new(Animals::Name).text().not_null())
                    .col(ColumnDef::new(Animals::AnimalType).text().not_null())
                    .col(
                        ColumnDef::new(Animals::Gender)
                            .text()
                            .not_null()
                            .default("UNKNOWN"),
                    )
                    .col(ColumnDef::new(Animals::BirthDate).date().null())
                    .col(ColumnDef::new(Animals::Color).text().null())
                    .col(ColumnDef::new(Animals::WeightKg).double().null())
                    .col(ColumnDef::new(Animals::HeightCm).double().null())
                    .col(ColumnDef::new(Animals::MotherTag).text().null())
                    .col(ColumnDef::new(Animals::FatherTag).text().null())
                    .col(ColumnDef::new(Animals::Notes).text().null())
                    .col(
                        ColumnDef::new(Animals::Status)
                            .text()
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Animals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Animals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Animals::Table, Animals::FarmId)
                            .to(Farms::Table, Farms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Animals::Table)
                    .col(Animals::FarmId)
                    .col(Animals::TagId)
                    .unique()
                    .name("uq_animals_farm_id_tag_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
    FarmId,
    TagId,
    Name,
    AnimalType,
    Gender,
    BirthDate,
    Color,
    WeightKg,
    HeightCm,
    MotherTag,
    FatherTag,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Farms {
    Table,
    Id,
}
