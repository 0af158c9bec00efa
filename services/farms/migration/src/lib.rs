use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users;
mod m20240601_000002_create_farms;
mod m20240601_000003_create_farm_members;
mod m20240601_000004_create_animals;
mod m20240601_000005_create_activities;
mod m20240601_000006_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users::Migration),
            Box::new(m20240601_000002_create_farms::Migration),
            Box::new(m20240601_000003_create_farm_members::Migration),
            Box::new(m20240601_000004_create_animals::Migration),
            Box::new(m20240601_000005_create_activities::Migration),
            Box::new(m20240601_000006_add_lookup_indexes::Migration),
        ]
    }
}
