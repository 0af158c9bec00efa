use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use uuid::Uuid;

use jaothui_domain::activity::ActivityStatus;
use jaothui_domain::farm::FarmRole;
use jaothui_domain::pagination::PageRequest;
use jaothui_farms_schema::{activities, animals, farm_members, farms, users};

use crate::domain::repository::{
    ActivityRepository, AnimalRepository, FarmAccessRepository, FarmRepository, MemberRepository,
    NotificationRepository, UserRepository,
};
use crate::domain::types::{
    Activity, ActivityFilter, Animal, AnimalFilter, Farm, FarmMember, FarmPatch, User,
};
use crate::error::FarmsServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map a unique violation to `conflict`, anything else to an internal error.
fn conflict_or_internal(
    err: DbErr,
    conflict: FarmsServiceError,
    context: &'static str,
) -> FarmsServiceError {
    if is_unique_violation(&err) {
        conflict
    } else {
        anyhow::Error::new(err).context(context).into()
    }
}

// ── Farm access repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFarmAccessRepository {
    pub db: Arc<DatabaseConnection>,
}

/// Row of the ownership/membership UNION.
#[derive(Debug, FromQueryResult)]
struct AccessibleFarmRow {
    id: Uuid,
    name: String,
    owner_id: String,
    province: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    role: String,
}

const FIRST_ACCESSIBLE_FARM_SQL: &str = r#"
    SELECT id, name, owner_id, province, description, created_at, updated_at, role
    FROM (
        SELECT f.id, f.name, f.owner_id, f.province, f.description,
               f.created_at, f.updated_at, 'OWNER' AS role, 0 AS priority
            FROM farms f
            WHERE f.owner_id = $1
        UNION ALL
        SELECT f.id, f.name, f.owner_id, f.province, f.description,
               f.created_at, f.updated_at, m.role, 1 AS priority
            FROM farm_members m
            JOIN farms f ON f.id = m.farm_id
            WHERE m.user_id = $1
    ) AS accessible
    ORDER BY priority ASC, created_at ASC
    LIMIT 1
"#;

impl FarmAccessRepository for DbFarmAccessRepository {
    async fn find_owned_farm(&self, user_id: &str) -> Result<Option<Farm>, FarmsServiceError> {
        let model = farms::Entity::find()
            .filter(farms::Column::OwnerId.eq(user_id))
            .order_by_asc(farms::Column::CreatedAt)
            .one(&*self.db)
            .await
            .context("find owned farm")?;
        Ok(model.map(farm_from_model))
    }

    async fn find_owned_farm_by_id(
        &self,
        farm_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Farm>, FarmsServiceError> {
        let model = farms::Entity::find_by_id(farm_id)
            .filter(farms::Column::OwnerId.eq(user_id))
            .one(&*self.db)
            .await
            .context("find owned farm by id")?;
        Ok(model.map(farm_from_model))
    }

    async fn find_membership(
        &self,
        user_id: &str,
    ) -> Result<Option<(FarmMember, Farm)>, FarmsServiceError> {
        let row = farm_members::Entity::find()
            .find_also_related(farms::Entity)
            .filter(farm_members::Column::UserId.eq(user_id))
            .filter(farms::Column::Id.is_not_null())
            .order_by_asc(farms::Column::CreatedAt)
            .one(&*self.db)
            .await
            .context("find membership")?;
        joined_membership(row)
    }

    async fn find_membership_in_farm(
        &self,
        farm_id: Uuid,
        user_id: &str,
    ) -> Result<Option<(FarmMember, Farm)>, FarmsServiceError> {
        let row = farm_members::Entity::find()
            .find_also_related(farms::Entity)
            .filter(farm_members::Column::FarmId.eq(farm_id))
            .filter(farm_members::Column::UserId.eq(user_id))
            .filter(farms::Column::Id.is_not_null())
            .one(&*self.db)
            .await
            .context("find membership in farm")?;
        joined_membership(row)
    }

    async fn list_owned_farms(&self, user_id: &str) -> Result<Vec<Farm>, FarmsServiceError> {
        let models = farms::Entity::find()
            .filter(farms::Column::OwnerId.eq(user_id))
            .order_by_asc(farms::Column::CreatedAt)
            .all(&*self.db)
            .await
            .context("list owned farms")?;
        Ok(models.into_iter().map(farm_from_model).collect())
    }

    async fn list_memberships(
        &self,
        user_id: &str,
    ) -> Result<Vec<(FarmMember, Option<Farm>)>, FarmsServiceError> {
        let rows = farm_members::Entity::find()
            .find_also_related(farms::Entity)
            .filter(farm_members::Column::UserId.eq(user_id))
            .order_by_asc(farm_members::Column::CreatedAt)
            .all(&*self.db)
            .await
            .context("list memberships")?;
        rows.into_iter()
            .map(|(member, farm)| -> Result<_, FarmsServiceError> {
                Ok((member_from_model(member)?, farm.map(farm_from_model)))
            })
            .collect()
    }

    async fn find_first_accessible(
        &self,
        user_id: &str,
    ) -> Result<Option<(Farm, FarmRole)>, FarmsServiceError> {
        let row = AccessibleFarmRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            FIRST_ACCESSIBLE_FARM_SQL,
            [user_id.into()],
        ))
        .one(&*self.db)
        .await
        .context("find first accessible farm (UNION ALL)")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let role = row.role.parse::<FarmRole>().context("farm role column")?;
        let farm = Farm {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            province: row.province,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        Ok(Some((farm, role)))
    }
}

fn joined_membership(
    row: Option<(farm_members::Model, Option<farms::Model>)>,
) -> Result<Option<(FarmMember, Farm)>, FarmsServiceError> {
    match row {
        Some((member, Some(farm))) => Ok(Some((member_from_model(member)?, farm_from_model(farm)))),
        _ => Ok(None),
    }
}

fn farm_from_model(model: farms::Model) -> Farm {
    Farm {
        id: model.id,
        name: model.name,
        owner_id: model.owner_id,
        province: model.province,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn member_from_model(model: farm_members::Model) -> Result<FarmMember, FarmsServiceError> {
    Ok(FarmMember {
        id: model.id,
        farm_id: model.farm_id,
        user_id: model.user_id,
        role: model.role.parse().context("farm role column")?,
        created_at: model.created_at,
    })
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, FarmsServiceError> {
        let model = users::Entity::find_by_id(id.to_owned())
            .one(&*self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Farm repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFarmRepository {
    pub db: Arc<DatabaseConnection>,
}

impl FarmRepository for DbFarmRepository {
    async fn create_with_owner(
        &self,
        farm: &Farm,
        owner: &FarmMember,
    ) -> Result<(), FarmsServiceError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let farm = farm.clone();
                let owner = owner.clone();
                Box::pin(async move {
                    insert_farm(txn, &farm).await?;
                    insert_member(txn, &owner).await?;
                    Ok(())
                })
            })
            .await
            .context("create farm with owner membership")?;
        Ok(())
    }

    async fn update(&self, farm_id: Uuid, patch: &FarmPatch) -> Result<Farm, FarmsServiceError> {
        let mut am = farms::ActiveModel {
            id: Set(farm_id),
            ..Default::default()
        };
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(province) = &patch.province {
            am.province = Set(province.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        am.updated_at = Set(Utc::now());
        let model = am.update(&*self.db).await.context("update farm")?;
        Ok(farm_from_model(model))
    }
}

async fn insert_farm(txn: &DatabaseTransaction, farm: &Farm) -> Result<(), DbErr> {
    farms::ActiveModel {
        id: Set(farm.id),
        name: Set(farm.name.clone()),
        owner_id: Set(farm.owner_id.clone()),
        province: Set(farm.province.clone()),
        description: Set(farm.description.clone()),
        created_at: Set(farm.created_at),
        updated_at: Set(farm.updated_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_member<C: ConnectionTrait>(conn: &C, member: &FarmMember) -> Result<(), DbErr> {
    farm_members::ActiveModel {
        id: Set(member.id),
        farm_id: Set(member.farm_id),
        user_id: Set(member.user_id.clone()),
        role: Set(member.role.as_str().to_owned()),
        created_at: Set(member.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

// ── Member repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMemberRepository {
    pub db: Arc<DatabaseConnection>,
}

impl MemberRepository for DbMemberRepository {
    async fn list(&self, farm_id: Uuid) -> Result<Vec<FarmMember>, FarmsServiceError> {
        let models = farm_members::Entity::find()
            .filter(farm_members::Column::FarmId.eq(farm_id))
            .order_by_asc(farm_members::Column::CreatedAt)
            .all(&*self.db)
            .await
            .context("list farm members")?;
        models.into_iter().map(member_from_model).collect()
    }

    async fn find(
        &self,
        farm_id: Uuid,
        user_id: &str,
    ) -> Result<Option<FarmMember>, FarmsServiceError> {
        let model = farm_members::Entity::find()
            .filter(farm_members::Column::FarmId.eq(farm_id))
            .filter(farm_members::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .context("find farm member")?;
        model.map(member_from_model).transpose()
    }

    async fn create(&self, member: &FarmMember) -> Result<(), FarmsServiceError> {
        insert_member(&*self.db, member).await.map_err(|e| {
            conflict_or_internal(e, FarmsServiceError::MemberAlreadyExists, "create farm member")
        })
    }

    async fn delete(&self, farm_id: Uuid, user_id: &str) -> Result<bool, FarmsServiceError> {
        let result = farm_members::Entity::delete_many()
            .filter(farm_members::Column::FarmId.eq(farm_id))
            .filter(farm_members::Column::UserId.eq(user_id))
            .exec(&*self.db)
            .await
            .context("delete farm member")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Animal repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAnimalRepository {
    pub db: Arc<DatabaseConnection>,
}

/// `%term%` with LIKE wildcards in `term` escaped, lower-cased for ILIKE-style matching.
fn contains_pattern(term: &str) -> LikeExpr {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

impl AnimalRepository for DbAnimalRepository {
    async fn list(
        &self,
        farm_id: Uuid,
        filter: &AnimalFilter,
        page: PageRequest,
    ) -> Result<Vec<Animal>, FarmsServiceError> {
        let mut query = animals::Entity::find().filter(animals::Column::FarmId.eq(farm_id));
        if let Some(status) = filter.status {
            query = query.filter(animals::Column::Status.eq(status.as_str()));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(animals::Column::TagId)))
                            .like(contains_pattern(search)),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(animals::Column::Name)))
                            .like(contains_pattern(search)),
                    ),
            );
        }
        let models = query
            .order_by_desc(animals::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .context("list animals")?;
        models.into_iter().map(animal_from_model).collect()
    }

    async fn get(&self, farm_id: Uuid, id: Uuid) -> Result<Option<Animal>, FarmsServiceError> {
        let model = animals::Entity::find_by_id(id)
            .filter(animals::Column::FarmId.eq(farm_id))
            .one(&*self.db)
            .await
            .context("get animal")?;
        model.map(animal_from_model).transpose()
    }

    async fn create(&self, animal: &Animal) -> Result<(), FarmsServiceError> {
        animal_to_active_model(animal)
            .insert(&*self.db)
            .await
            .map_err(|e| conflict_or_internal(e, FarmsServiceError::AnimalTagTaken, "create animal"))?;
        Ok(())
    }

    async fn update(&self, animal: &Animal) -> Result<(), FarmsServiceError> {
        animal_to_active_model(animal)
            .update(&*self.db)
            .await
            .map_err(|e| conflict_or_internal(e, FarmsServiceError::AnimalTagTaken, "update animal"))?;
        Ok(())
    }

    async fn delete(&self, farm_id: Uuid, id: Uuid) -> Result<bool, FarmsServiceError> {
        let result = animals::Entity::delete_many()
            .filter(animals::Column::Id.eq(id))
            .filter(animals::Column::FarmId.eq(farm_id))
            .exec(&*self.db)
            .await
            .context("delete animal")?;
        Ok(result.rows_affected > 0)
    }
}

fn animal_to_active_model(animal: &Animal) -> animals::ActiveModel {
    animals::ActiveModel {
        id: Set(animal.id),
        farm_id: Set(animal.farm_id),
        tag_id: Set(animal.tag_id.clone()),
        name: Set(animal.name.clone()),
        animal_type: Set(animal.animal_type.as_str().to_owned()),
        gender: Set(animal.gender.as_str().to_owned()),
        birth_date: Set(animal.birth_date),
        color: Set(animal.color.clone()),
        weight_kg: Set(animal.weight_kg),
        height_cm: Set(animal.height_cm),
        mother_tag: Set(animal.mother_tag.clone()),
        father_tag: Set(animal.father_tag.clone()),
        notes: Set(animal.notes.clone()),
        status: Set(animal.status.as_str().to_owned()),
        created_at: Set(animal.created_at),
        updated_at: Set(animal.updated_at),
    }
}

fn animal_from_model(model: animals::Model) -> Result<Animal, FarmsServiceError> {
    Ok(Animal {
        id: model.id,
        farm_id: model.farm_id,
        tag_id: model.tag_id,
        name: model.name,
        animal_type: model.animal_type.parse().context("animal type column")?,
        gender: model.gender.parse().context("gender column")?,
        birth_date: model.birth_date,
        color: model.color,
        weight_kg: model.weight_kg,
        height_cm: model.height_cm,
        mother_tag: model.mother_tag,
        father_tag: model.father_tag,
        notes: model.notes,
        status: model.status.parse().context("animal status column")?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Activity repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivityRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ActivityRepository for DbActivityRepository {
    async fn list(
        &self,
        farm_id: Uuid,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> Result<Vec<Activity>, FarmsServiceError> {
        let mut query = activities::Entity::find().filter(activities::Column::FarmId.eq(farm_id));
        if let Some(status) = filter.status {
            query = query.filter(activities::Column::Status.eq(status.as_str()));
        }
        if let Some(animal_id) = filter.animal_id {
            query = query.filter(activities::Column::AnimalId.eq(animal_id));
        }
        let models = query
            .order_by_desc(activities::Column::ActivityDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .context("list activities")?;
        models.into_iter().map(activity_from_model).collect()
    }

    async fn get(&self, farm_id: Uuid, id: Uuid) -> Result<Option<Activity>, FarmsServiceError> {
        let model = activities::Entity::find_by_id(id)
            .filter(activities::Column::FarmId.eq(farm_id))
            .one(&*self.db)
            .await
            .context("get activity")?;
        model.map(activity_from_model).transpose()
    }

    async fn create(&self, activity: &Activity) -> Result<(), FarmsServiceError> {
        activity_to_active_model(activity)
            .insert(&*self.db)
            .await
            .context("create activity")?;
        Ok(())
    }

    async fn update(&self, activity: &Activity) -> Result<(), FarmsServiceError> {
        activity_to_active_model(activity)
            .update(&*self.db)
            .await
            .context("update activity")?;
        Ok(())
    }

    async fn delete(&self, farm_id: Uuid, id: Uuid) -> Result<bool, FarmsServiceError> {
        let result = activities::Entity::delete_many()
            .filter(activities::Column::Id.eq(id))
            .filter(activities::Column::FarmId.eq(farm_id))
            .exec(&*self.db)
            .await
            .context("delete activity")?;
        Ok(result.rows_affected > 0)
    }
}

fn activity_to_active_model(activity: &Activity) -> activities::ActiveModel {
    activities::ActiveModel {
        id: Set(activity.id),
        farm_id: Set(activity.farm_id),
        animal_id: Set(activity.animal_id),
        title: Set(activity.title.clone()),
        description: Set(activity.description.clone()),
        kind: Set(activity.kind.as_str().to_owned()),
        status: Set(activity.status.as_str().to_owned()),
        activity_date: Set(activity.activity_date),
        due_date: Set(activity.due_date),
        completed_at: Set(activity.completed_at),
        created_by: Set(activity.created_by.clone()),
        created_at: Set(activity.created_at),
        updated_at: Set(activity.updated_at),
    }
}

fn activity_from_model(model: activities::Model) -> Result<Activity, FarmsServiceError> {
    Ok(Activity {
        id: model.id,
        farm_id: model.farm_id,
        animal_id: model.animal_id,
        title: model.title,
        description: model.description,
        kind: model.kind.parse().context("activity kind column")?,
        status: model.status.parse().context("activity status column")?,
        activity_date: model.activity_date,
        due_date: model.due_date,
        completed_at: model.completed_at,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: Arc<DatabaseConnection>,
}

impl NotificationRepository for DbNotificationRepository {
    async fn count_overdue(
        &self,
        farm_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, FarmsServiceError> {
        let count = activities::Entity::find()
            .filter(activities::Column::FarmId.eq(farm_id))
            .filter(
                Condition::any()
                    .add(activities::Column::Status.eq(ActivityStatus::Overdue.as_str()))
                    .add(
                        Condition::all()
                            .add(activities::Column::Status.eq(ActivityStatus::Pending.as_str()))
                            .add(activities::Column::DueDate.lt(now)),
                    ),
            )
            .count(&*self.db)
            .await
            .context("count overdue activities")?;
        Ok(count)
    }

    async fn count_pending_due_between(
        &self,
        farm_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, FarmsServiceError> {
        let count = activities::Entity::find()
            .filter(activities::Column::FarmId.eq(farm_id))
            .filter(activities::Column::Status.eq(ActivityStatus::Pending.as_str()))
            .filter(activities::Column::DueDate.gte(from))
            .filter(activities::Column::DueDate.lt(to))
            .count(&*self.db)
            .await
            .context("count activities due today")?;
        Ok(count)
    }
}
