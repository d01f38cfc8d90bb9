use crate::database::{users, PgPool};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use domain::{DomainError, User, UserRepository};
use tracing::debug;

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct UserModel {
    id: i64,
    uuid: String,
    username: String,
    email: String,
    full_name: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    username: String,
    email: String,
    full_name: String,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::with_id(
            model.id,
            model.uuid,
            model.username,
            model.email,
            model.full_name,
        )
    }
}

impl From<&User> for NewUserModel {
    fn from(user: &User) -> Self {
        NewUserModel {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check out a connection and run a blocking diesel query off the async runtime.
    async fn run<T, F>(&self, query: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

            query(&mut *conn).map_err(|e| DomainError::RepositoryError(e.to_string()))
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let result = self
            .run(|conn| {
                users::table
                    .order(users::id.asc())
                    .select(UserModel::as_select())
                    .load::<UserModel>(conn)
            })
            .await?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let username = username.to_string();
        let result = self
            .run(move |conn| {
                users::table
                    .filter(users::username.eq(username))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()
            })
            .await?;

        Ok(result.map(|model| model.into()))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let result = self
            .run(move |conn| {
                users::table
                    .filter(users::id.eq(id))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()
            })
            .await?;

        Ok(result.map(|model| model.into()))
    }

    async fn get_by_uuid(&self, uuid: &str) -> Result<Option<User>, DomainError> {
        let uuid = uuid.to_string();
        let result = self
            .run(move |conn| {
                users::table
                    .filter(users::uuid.eq(uuid))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()
            })
            .await?;

        Ok(result.map(|model| model.into()))
    }

    async fn create(&self, user: &mut User) -> Result<(), DomainError> {
        let new_user = NewUserModel::from(&*user);

        let (id, uuid) = self
            .run(move |conn| {
                diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning((users::id, users::uuid))
                    .get_result::<(i64, String)>(conn)
            })
            .await?;

        debug!(id, uuid = %uuid, "inserted user row");
        user.id = id;
        user.uuid = uuid;
        Ok(())
    }

    async fn update(&self, uuid: &str, user: &User) -> Result<(), DomainError> {
        let uuid = uuid.to_string();
        let changes = NewUserModel::from(user);

        let affected = self
            .run(move |conn| {
                diesel::update(users::table.filter(users::uuid.eq(uuid)))
                    .set((
                        users::username.eq(changes.username),
                        users::email.eq(changes.email),
                        users::full_name.eq(changes.full_name),
                    ))
                    .execute(conn)
            })
            .await?;

        debug!(affected, "updated user rows");
        Ok(())
    }

    async fn delete(&self, uuid: &str) -> Result<(), DomainError> {
        let uuid = uuid.to_string();

        let affected = self
            .run(move |conn| {
                diesel::delete(users::table.filter(users::uuid.eq(uuid))).execute(conn)
            })
            .await?;

        debug!(affected, "deleted user rows");
        Ok(())
    }
}
