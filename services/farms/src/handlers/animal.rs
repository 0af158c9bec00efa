use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use jaothui_auth_types::identity::IdentityHeaders;
use jaothui_domain::livestock::{AnimalStatus, AnimalType, Gender};
use jaothui_domain::pagination::PageRequest;

use crate::domain::types::{Animal, AnimalFilter, AnimalPatch, FarmContextParams};
use crate::error::FarmsServiceError;
use crate::handlers::{json_body, parse_id, parse_query, resolve_context};
use crate::state::AppState;
use crate::usecase::animal::{
    CreateAnimalInput, CreateAnimalUseCase, DeleteAnimalUseCase, GetAnimalUseCase,
    ListAnimalsUseCase, UpdateAnimalUseCase,
};

const ANIMAL_ID_REASON: &str = "animal_id must be a UUID";

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AnimalResponse {
    pub id: String,
    pub farm_id: String,
    pub tag_id: String,
    pub name: String,
    pub animal_type: AnimalType,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub color: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub mother_tag: Option<String>,
    pub father_tag: Option<String>,
    pub notes: Option<String>,
    pub status: AnimalStatus,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Animal> for AnimalResponse {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id.to_string(),
            farm_id: animal.farm_id.to_string(),
            tag_id: animal.tag_id,
            name: animal.name,
            animal_type: animal.animal_type,
            gender: animal.gender,
            birth_date: animal.birth_date,
            color: animal.color,
            weight_kg: animal.weight_kg,
            height_cm: animal.height_cm,
            mother_tag: animal.mother_tag,
            father_tag: animal.father_tag,
            notes: animal.notes,
            status: animal.status,
            created_at: animal.created_at,
            updated_at: animal.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AnimalListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<AnimalStatus>,
    pub search: Option<String>,
}

// ── GET /animals ─────────────────────────────────────────────────────────────

pub async fn list_animals(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<AnimalResponse>>, FarmsServiceError> {
    let query: AnimalListQuery = parse_query(raw_query)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = ListAnimalsUseCase {
        repo: state.animal_repo(),
    };
    let animals = usecase
        .execute(
            &context,
            AnimalFilter {
                status: query.status,
                search: query.search,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(animals.into_iter().map(Into::into).collect()))
}

// ── GET /animals/{animal_id} ─────────────────────────────────────────────────

pub async fn get_animal(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> Result<Json<AnimalResponse>, FarmsServiceError> {
    let animal_id = parse_id(&animal_id, ANIMAL_ID_REASON)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = GetAnimalUseCase {
        repo: state.animal_repo(),
    };
    let animal = usecase.execute(&context, animal_id).await?;
    Ok(Json(animal.into()))
}

// ── POST /animals ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAnimalRequest {
    pub tag_id: String,
    pub name: String,
    pub animal_type: AnimalType,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub color: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub mother_tag: Option<String>,
    pub father_tag: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AnimalStatus>,
}

pub async fn create_animal(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<CreateAnimalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AnimalResponse>), FarmsServiceError> {
    let body = json_body(body)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = CreateAnimalUseCase {
        repo: state.animal_repo(),
    };
    let animal = usecase
        .execute(
            &context,
            CreateAnimalInput {
                tag_id: body.tag_id,
                name: body.name,
                animal_type: body.animal_type,
                gender: body.gender,
                birth_date: body.birth_date,
                color: body.color,
                weight_kg: body.weight_kg,
                height_cm: body.height_cm,
                mother_tag: body.mother_tag,
                father_tag: body.father_tag,
                notes: body.notes,
                status: body.status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(animal.into())))
}

// ── PATCH /animals/{animal_id} ───────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateAnimalRequest {
    pub tag_id: Option<String>,
    pub name: Option<String>,
    pub animal_type: Option<AnimalType>,
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub weight_kg: Option<Option<f64>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub height_cm: Option<Option<f64>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub mother_tag: Option<Option<String>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub father_tag: Option<Option<String>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub notes: Option<Option<String>>,
    pub status: Option<AnimalStatus>,
}

pub async fn update_animal(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    body: Result<Json<UpdateAnimalRequest>, JsonRejection>,
) -> Result<Json<AnimalResponse>, FarmsServiceError> {
    let body = json_body(body)?;
    let animal_id = parse_id(&animal_id, ANIMAL_ID_REASON)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = UpdateAnimalUseCase {
        repo: state.animal_repo(),
    };
    let animal = usecase
        .execute(
            &context,
            animal_id,
            AnimalPatch {
                tag_id: body.tag_id,
                name: body.name,
                animal_type: body.animal_type,
                gender: body.gender,
                birth_date: body.birth_date,
                color: body.color,
                weight_kg: body.weight_kg,
                height_cm: body.height_cm,
                mother_tag: body.mother_tag,
                father_tag: body.father_tag,
                notes: body.notes,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(animal.into()))
}

// ── DELETE /animals/{animal_id} ──────────────────────────────────────────────

pub async fn delete_animal(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> Result<StatusCode, FarmsServiceError> {
    let animal_id = parse_id(&animal_id, ANIMAL_ID_REASON)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = DeleteAnimalUseCase {
        repo: state.animal_repo(),
    };
    usecase.execute(&context, animal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
