use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::types::LookupStrategy;
use crate::infra::db::{
    DbActivityRepository, DbAnimalRepository, DbFarmAccessRepository, DbFarmRepository,
    DbMemberRepository, DbNotificationRepository, DbUserRepository,
};
use crate::usecase::farm_context::FarmContextResolver;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub lookup_strategy: LookupStrategy,
}

impl AppState {
    pub fn resolver(&self) -> FarmContextResolver<DbFarmAccessRepository> {
        FarmContextResolver::new(self.farm_access_repo(), self.lookup_strategy)
    }

    pub fn farm_access_repo(&self) -> DbFarmAccessRepository {
        DbFarmAccessRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn farm_repo(&self) -> DbFarmRepository {
        DbFarmRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn member_repo(&self) -> DbMemberRepository {
        DbMemberRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn animal_repo(&self) -> DbAnimalRepository {
        DbAnimalRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn activity_repo(&self) -> DbActivityRepository {
        DbActivityRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: Arc::clone(&self.db),
        }
    }
}
