use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the connection pool. r2d2 opens its initial connections here,
    /// so an unreachable database fails now rather than on the first request.
    pub fn new(database_url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = r2d2::Pool::builder()
            .max_size(max_connections)
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        info!(max_connections, "PostgreSQL connection pool ready");
        Ok(Database { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}
