use config::Config;
use domain::{DomainError, UserRepository, UserService};
use infrastructure::{Database, InMemoryUserRepository, PostgresUserRepository};
use std::sync::Arc;
use tracing::info;

/// User Application - wires persistence adapters into the domain service
pub struct UserApp {
    pub user_service: UserService,
}

impl UserApp {
    /// Connect to PostgreSQL using the resolved configuration.
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(&config.postgres_dsn, config.database_pool_size)?;
        let pool = database.get_pool().clone();

        let user_repository: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));

        info!("user repository backed by PostgreSQL");
        Ok(Self::with_repository(user_repository))
    }

    /// Keep everything in process memory; nothing survives a restart.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryUserRepository::new()))
    }

    pub fn with_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_service: UserService::new(user_repository),
        }
    }
}
