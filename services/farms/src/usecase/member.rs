use chrono::Utc;
use uuid::Uuid;

use jaothui_domain::farm::FarmRole;

use crate::domain::repository::{MemberRepository, UserRepository};
use crate::domain::types::{FarmContext, FarmMember};
use crate::error::FarmsServiceError;

// ── ListMembers ──────────────────────────────────────────────────────────────

pub struct ListMembersUseCase<M: MemberRepository> {
    pub members: M,
}

impl<M: MemberRepository> ListMembersUseCase<M> {
    pub async fn execute(&self, context: &FarmContext) -> Result<Vec<FarmMember>, FarmsServiceError> {
        self.members.list(context.farm_id()).await
    }
}

// ── AddMember ────────────────────────────────────────────────────────────────

pub struct AddMemberUseCase<U: UserRepository, M: MemberRepository> {
    pub users: U,
    pub members: M,
}

impl<U: UserRepository, M: MemberRepository> AddMemberUseCase<U, M> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        user_id: &str,
    ) -> Result<FarmMember, FarmsServiceError> {
        context.require_full()?;
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(FarmsServiceError::InvalidInput("user_id must not be blank"));
        }
        if user_id == context.farm.owner_id {
            return Err(FarmsServiceError::InvalidInput(
                "farm owner cannot be added as a member",
            ));
        }
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(FarmsServiceError::UserNotFound);
        }
        if self
            .members
            .find(context.farm_id(), user_id)
            .await?
            .is_some()
        {
            return Err(FarmsServiceError::MemberAlreadyExists);
        }

        let member = FarmMember {
            id: Uuid::now_v7(),
            farm_id: context.farm_id(),
            user_id: user_id.to_owned(),
            role: FarmRole::Member,
            created_at: Utc::now(),
        };
        self.members.create(&member).await?;
        tracing::info!(farm_id = %member.farm_id, user_id, "added farm member");
        Ok(member)
    }
}

// ── RemoveMember ─────────────────────────────────────────────────────────────

pub struct RemoveMemberUseCase<M: MemberRepository> {
    pub members: M,
}

impl<M: MemberRepository> RemoveMemberUseCase<M> {
    pub async fn execute(&self, context: &FarmContext, user_id: &str) -> Result<(), FarmsServiceError> {
        context.require_full()?;
        if user_id == context.farm.owner_id {
            return Err(FarmsServiceError::InvalidInput("farm owner cannot be removed"));
        }
        if !self.members.delete(context.farm_id(), user_id).await? {
            return Err(FarmsServiceError::MemberNotFound);
        }
        tracing::info!(farm_id = %context.farm_id(), user_id, "removed farm member");
        Ok(())
    }
}
