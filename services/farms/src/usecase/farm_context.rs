use std::collections::HashSet;

use uuid::Uuid;

use jaothui_domain::farm::FarmRole;

use crate::domain::repository::FarmAccessRepository;
use crate::domain::types::{FarmContext, FarmContextParams, LookupStrategy};
use crate::error::{FarmContextError, FarmsServiceError};

/// Reject absent, empty and whitespace-only user ids.
pub fn validate_user_id(user_id: Option<&str>) -> Result<&str, FarmContextError> {
    match user_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(FarmContextError::InvalidUser),
    }
}

/// Determines which farm a user acts on behalf of.
///
/// Ownership always wins over membership. Every request re-runs the
/// resolution; farm ids supplied by clients are only ever checked, never trusted.
pub struct FarmContextResolver<R: FarmAccessRepository> {
    pub repo: R,
    pub strategy: LookupStrategy,
}

impl<R: FarmAccessRepository> FarmContextResolver<R> {
    pub fn new(repo: R, strategy: LookupStrategy) -> Self {
        Self { repo, strategy }
    }

    /// Resolve the user's default farm, or check access to `params.farm_id`.
    pub async fn resolve<'a>(
        &self,
        user_id: impl Into<Option<&'a str>>,
        params: FarmContextParams,
    ) -> Result<FarmContext, FarmContextError> {
        let user_id = validate_user_id(user_id.into())?;
        let result = match params.farm_id {
            Some(farm_id) => self.resolve_in_farm(user_id, farm_id).await,
            None => match self.strategy {
                LookupStrategy::Sequential => self.resolve_sequential(user_id).await,
                LookupStrategy::Union => self.resolve_union(user_id).await,
            },
        };
        let context = result.map_err(|e| to_context_error(e, user_id))?;
        tracing::debug!(
            user_id,
            farm_id = %context.farm.id,
            role = %context.role,
            "resolved farm context"
        );
        Ok(context)
    }

    /// Every farm the user can access: owned farms first, then memberships.
    pub async fn resolve_all<'a>(
        &self,
        user_id: impl Into<Option<&'a str>>,
    ) -> Result<Vec<FarmContext>, FarmContextError> {
        let user_id = validate_user_id(user_id.into())?;
        let contexts = self
            .collect_accessible(user_id)
            .await
            .map_err(|e| to_context_error(e, user_id))?;
        if contexts.is_empty() {
            return Err(FarmContextError::no_access());
        }
        Ok(contexts)
    }

    /// `Ok(false)` instead of `NoAccess`; other failures are re-raised.
    pub async fn check_access<'a>(
        &self,
        user_id: impl Into<Option<&'a str>>,
        params: FarmContextParams,
    ) -> Result<bool, FarmContextError> {
        match self.resolve(user_id, params).await {
            Ok(_) => Ok(true),
            Err(FarmContextError::NoAccess { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn resolve_sequential(&self, user_id: &str) -> Result<FarmContext, FarmsServiceError> {
        if let Some(farm) = self.repo.find_owned_farm(user_id).await? {
            return Ok(FarmContext::new(farm, FarmRole::Owner));
        }
        if let Some((member, farm)) = self.repo.find_membership(user_id).await? {
            return Ok(FarmContext::new(farm, member.role));
        }
        Err(FarmContextError::no_access().into())
    }

    async fn resolve_union(&self, user_id: &str) -> Result<FarmContext, FarmsServiceError> {
        match self.repo.find_first_accessible(user_id).await? {
            Some((farm, role)) => Ok(FarmContext::new(farm, role)),
            None => Err(FarmContextError::no_access().into()),
        }
    }

    async fn resolve_in_farm(
        &self,
        user_id: &str,
        farm_id: Uuid,
    ) -> Result<FarmContext, FarmsServiceError> {
        if let Some(farm) = self.repo.find_owned_farm_by_id(farm_id, user_id).await? {
            return Ok(FarmContext::new(farm, FarmRole::Owner));
        }
        if let Some((member, farm)) = self.repo.find_membership_in_farm(farm_id, user_id).await? {
            return Ok(FarmContext::new(farm, member.role));
        }
        Err(FarmContextError::no_access_to(farm_id).into())
    }

    async fn collect_accessible(&self, user_id: &str) -> Result<Vec<FarmContext>, FarmsServiceError> {
        let owned = self.repo.list_owned_farms(user_id).await?;
        let memberships = self.repo.list_memberships(user_id).await?;

        let mut seen = HashSet::new();
        let contexts = owned
            .into_iter()
            .map(|farm| FarmContext::new(farm, FarmRole::Owner))
            .chain(
                memberships
                    .into_iter()
                    .filter_map(|(member, farm)| farm.map(|f| FarmContext::new(f, member.role))),
            )
            .filter(|context| seen.insert(context.farm.id))
            .collect();
        Ok(contexts)
    }
}

/// Resolver errors pass through; anything else becomes `Database`.
fn to_context_error(err: FarmsServiceError, user_id: &str) -> FarmContextError {
    let cause = match err {
        FarmsServiceError::FarmContext(e) => return e,
        FarmsServiceError::Internal(e) => e,
        other => anyhow::Error::new(other),
    };
    tracing::error!(user_id, error = format!("{cause:#}"), "farm context lookup failed");
    FarmContextError::Database(cause)
}
