use sea_orm::entity::prelude::*;

/// Livestock record. `tag_id` is unique within a farm.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub farm_id: Uuid,
    pub tag_id: String,
    pub name: String,
    pub animal_type: String,
    pub gender: String,
    pub birth_date: Option<chrono::NaiveDate>,
    pub color: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub mother_tag: Option<String>,
    pub father_tag: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::farms::Entity",
        from = "Column::FarmId",
        to = "super::farms::Column::Id"
    )]
    Farm,
    #[sea_orm(has_many = "super::activities::Entity")]
    Activities,
}

impl Related<super::farms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
