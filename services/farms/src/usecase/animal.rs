use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use jaothui_domain::livestock::{AnimalStatus, AnimalType, Gender};
use jaothui_domain::pagination::PageRequest;

use crate::domain::repository::AnimalRepository;
use crate::domain::types::{Animal, AnimalFilter, AnimalPatch, FarmContext};
use crate::error::FarmsServiceError;

fn validate(animal: &Animal) -> Result<(), FarmsServiceError> {
    if animal.tag_id.trim().is_empty() {
        return Err(FarmsServiceError::InvalidInput("tag_id must not be blank"));
    }
    if animal.name.trim().is_empty() {
        return Err(FarmsServiceError::InvalidInput("name must not be blank"));
    }
    if animal.weight_kg.is_some_and(|w| w < 0.0) {
        return Err(FarmsServiceError::InvalidInput("weight_kg must not be negative"));
    }
    if animal.height_cm.is_some_and(|h| h < 0.0) {
        return Err(FarmsServiceError::InvalidInput("height_cm must not be negative"));
    }
    Ok(())
}

// ── ListAnimals ──────────────────────────────────────────────────────────────

pub struct ListAnimalsUseCase<R: AnimalRepository> {
    pub repo: R,
}

impl<R: AnimalRepository> ListAnimalsUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        filter: AnimalFilter,
        page: PageRequest,
    ) -> Result<Vec<Animal>, FarmsServiceError> {
        let filter = AnimalFilter {
            status: filter.status,
            search: filter
                .search
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty()),
        };
        self.repo
            .list(context.farm_id(), &filter, page.clamped())
            .await
    }
}

// ── GetAnimal ────────────────────────────────────────────────────────────────

pub struct GetAnimalUseCase<R: AnimalRepository> {
    pub repo: R,
}

impl<R: AnimalRepository> GetAnimalUseCase<R> {
    pub async fn execute(&self, context: &FarmContext, id: Uuid) -> Result<Animal, FarmsServiceError> {
        self.repo
            .get(context.farm_id(), id)
            .await?
            .ok_or(FarmsServiceError::AnimalNotFound)
    }
}

// ── CreateAnimal ─────────────────────────────────────────────────────────────

pub struct CreateAnimalInput {
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

pub struct CreateAnimalUseCase<R: AnimalRepository> {
    pub repo: R,
}

impl<R: AnimalRepository> CreateAnimalUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        input: CreateAnimalInput,
    ) -> Result<Animal, FarmsServiceError> {
        let now = Utc::now();
        let animal = Animal {
            id: Uuid::now_v7(),
            farm_id: context.farm_id(),
            tag_id: input.tag_id.trim().to_owned(),
            name: input.name.trim().to_owned(),
            animal_type: input.animal_type,
            gender: input.gender.unwrap_or_default(),
            birth_date: input.birth_date,
            color: input.color,
            weight_kg: input.weight_kg,
            height_cm: input.height_cm,
            mother_tag: input.mother_tag,
            father_tag: input.father_tag,
            notes: input.notes,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        validate(&animal)?;
        self.repo.create(&animal).await?;
        Ok(animal)
    }
}

// ── UpdateAnimal ─────────────────────────────────────────────────────────────

pub struct UpdateAnimalUseCase<R: AnimalRepository> {
    pub repo: R,
}

impl<R: AnimalRepository> UpdateAnimalUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        id: Uuid,
        patch: AnimalPatch,
    ) -> Result<Animal, FarmsServiceError> {
        if patch.is_empty() {
            return Err(FarmsServiceError::MissingData);
        }
        let mut animal = self
            .repo
            .get(context.farm_id(), id)
            .await?
            .ok_or(FarmsServiceError::AnimalNotFound)?;

        if let Some(tag_id) = patch.tag_id {
            animal.tag_id = tag_id.trim().to_owned();
        }
        if let Some(name) = patch.name {
            animal.name = name.trim().to_owned();
        }
        if let Some(animal_type) = patch.animal_type {
            animal.animal_type = animal_type;
        }
        if let Some(gender) = patch.gender {
            animal.gender = gender;
        }
        if let Some(status) = patch.status {
            animal.status = status;
        }
        if let Some(birth_date) = patch.birth_date {
            animal.birth_date = birth_date;
        }
        if let Some(color) = patch.color {
            animal.color = color;
        }
        if let Some(weight_kg) = patch.weight_kg {
            animal.weight_kg = weight_kg;
        }
        if let Some(height_cm) = patch.height_cm {
            animal.height_cm = height_cm;
        }
        if let Some(mother_tag) = patch.mother_tag {
            animal.mother_tag = mother_tag;
        }
        if let Some(father_tag) = patch.father_tag {
            animal.father_tag = father_tag;
        }
        if let Some(notes) = patch.notes {
            animal.notes = notes;
        }
        validate(&animal)?;

        animal.updated_at = Utc::now();
        self.repo.update(&animal).await?;
        Ok(animal)
    }
}

// ── DeleteAnimal ─────────────────────────────────────────────────────────────

pub struct DeleteAnimalUseCase<R: AnimalRepository> {
    pub repo: R,
}

impl<R: AnimalRepository> DeleteAnimalUseCase<R> {
    pub async fn execute(&self, context: &FarmContext, id: Uuid) -> Result<(), FarmsServiceError> {
        context.require_full()?;
        if !self.repo.delete(context.farm_id(), id).await? {
            return Err(FarmsServiceError::AnimalNotFound);
        }
        Ok(())
    }
}
