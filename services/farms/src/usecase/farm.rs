use chrono::Utc;
use uuid::Uuid;

use jaothui_domain::farm::FarmRole;

use crate::domain::repository::{FarmAccessRepository, FarmRepository, UserRepository};
use crate::domain::types::{
    DEFAULT_FARM_DESCRIPTION, DEFAULT_PROVINCE, Farm, FarmContext, FarmContextParams, FarmMember,
    FarmPatch,
};
use crate::error::{FarmContextError, FarmsServiceError};
use crate::usecase::farm_context::{FarmContextResolver, validate_user_id};

fn owner_membership(farm: &Farm) -> FarmMember {
    FarmMember {
        id: Uuid::now_v7(),
        farm_id: farm.id,
        user_id: farm.owner_id.clone(),
        role: FarmRole::Owner,
        created_at: farm.created_at,
    }
}

fn non_blank(value: &str, reason: &'static str) -> Result<String, FarmsServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FarmsServiceError::InvalidInput(reason));
    }
    Ok(trimmed.to_owned())
}

// ── EnsureFarm ───────────────────────────────────────────────────────────────

pub struct EnsureFarmOutput {
    pub context: FarmContext,
    /// `true` when the farm was provisioned by this call.
    pub created: bool,
}

/// Returns the user's farm context, provisioning a default farm on first login.
pub struct EnsureFarmUseCase<A: FarmAccessRepository, U: UserRepository, F: FarmRepository> {
    pub resolver: FarmContextResolver<A>,
    pub users: U,
    pub farms: F,
}

impl<A, U, F> EnsureFarmUseCase<A, U, F>
where
    A: FarmAccessRepository,
    U: UserRepository,
    F: FarmRepository,
{
    pub async fn execute(&self, user_id: &str) -> Result<EnsureFarmOutput, FarmsServiceError> {
        match self
            .resolver
            .resolve(user_id, FarmContextParams::default())
            .await
        {
            Ok(context) => {
                return Ok(EnsureFarmOutput {
                    context,
                    created: false,
                });
            }
            Err(FarmContextError::NoAccess { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FarmsServiceError::UserNotFound)?;

        let now = Utc::now();
        let farm = Farm {
            id: Uuid::now_v7(),
            name: user.default_farm_name(),
            owner_id: user.id.clone(),
            province: DEFAULT_PROVINCE.to_owned(),
            description: Some(DEFAULT_FARM_DESCRIPTION.to_owned()),
            created_at: now,
            updated_at: now,
        };
        self.farms
            .create_with_owner(&farm, &owner_membership(&farm))
            .await?;
        tracing::info!(user_id, farm_id = %farm.id, "provisioned default farm");

        Ok(EnsureFarmOutput {
            context: FarmContext::new(farm, FarmRole::Owner),
            created: true,
        })
    }
}

// ── CreateFarm ───────────────────────────────────────────────────────────────

pub struct CreateFarmInput {
    pub name: String,
    pub province: Option<String>,
    pub description: Option<String>,
}

pub struct CreateFarmUseCase<A: FarmAccessRepository, U: UserRepository, F: FarmRepository> {
    pub access: A,
    pub users: U,
    pub farms: F,
}

impl<A, U, F> CreateFarmUseCase<A, U, F>
where
    A: FarmAccessRepository,
    U: UserRepository,
    F: FarmRepository,
{
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreateFarmInput,
    ) -> Result<FarmContext, FarmsServiceError> {
        let user_id = validate_user_id(Some(user_id))?;
        let name = non_blank(&input.name, "name must not be blank")?;
        let province = input
            .province
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROVINCE)
            .to_owned();

        // One owned farm per user keeps default resolution unambiguous.
        if self.access.find_owned_farm(user_id).await?.is_some() {
            return Err(FarmContextError::MultipleFarms.into());
        }
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(FarmsServiceError::UserNotFound);
        }

        let now = Utc::now();
        let farm = Farm {
            id: Uuid::now_v7(),
            name,
            owner_id: user_id.to_owned(),
            province,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        self.farms
            .create_with_owner(&farm, &owner_membership(&farm))
            .await?;
        Ok(FarmContext::new(farm, FarmRole::Owner))
    }
}

// ── UpdateFarm ───────────────────────────────────────────────────────────────

pub struct UpdateFarmUseCase<F: FarmRepository> {
    pub farms: F,
}

impl<F: FarmRepository> UpdateFarmUseCase<F> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        patch: FarmPatch,
    ) -> Result<Farm, FarmsServiceError> {
        context.require_full()?;
        if patch.is_empty() {
            return Err(FarmsServiceError::MissingData);
        }
        let patch = FarmPatch {
            name: patch
                .name
                .map(|n| non_blank(&n, "name must not be blank"))
                .transpose()?,
            province: patch
                .province
                .map(|p| non_blank(&p, "province must not be blank"))
                .transpose()?,
            description: patch.description,
        };
        self.farms.update(context.farm_id(), &patch).await
    }
}
