use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(jaothui_farms_migration::Migrator).await;
}
