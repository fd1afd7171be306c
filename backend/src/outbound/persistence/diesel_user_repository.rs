//! SQLite-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

use crate::domain::ports::{
    UserListFilter, UserRepository, UserRepositoryError, UserSortKey,
};
use crate::domain::{User, UserDraft, UserPatch};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
///
/// SQLite connections are synchronous, so every operation checks out a
/// pooled connection on a blocking thread via `spawn_blocking`.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, UserRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, UserRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            op(&mut conn)
        })
        .await
        .map_err(|err| {
            UserRepositoryError::connection(format!("blocking task join failed: {err}"))
        })?
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        | DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _)
        | DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => {
            UserRepositoryError::query("constraint violation")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

fn find_user(conn: &mut SqliteConnection, id: i32) -> Result<User, UserRepositoryError> {
    users::table
        .find(id)
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(map_diesel_error)?
        .map(User::from)
        .ok_or(UserRepositoryError::NotFound { id })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: UserDraft) -> Result<User, UserRepositoryError> {
        self.run(move |conn| {
            let row: UserRow = diesel::insert_into(users::table)
                .values(NewUserRow::from(&draft))
                .returning(UserRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;
            Ok(row.into())
        })
        .await
    }

    async fn get(&self, id: i32) -> Result<User, UserRepositoryError> {
        self.run(move |conn| find_user(conn, id)).await
    }

    async fn update(&self, id: i32, patch: UserPatch) -> Result<User, UserRepositoryError> {
        self.run(move |conn| {
            let patch = patch.normalised();
            if patch.is_empty() {
                // Diesel rejects an empty changeset; an all-absent patch
                // is a no-op that still reports current state.
                return find_user(conn, id);
            }
            let row: Option<UserRow> = diesel::update(users::table.find(id))
                .set(UserChangeset::from(patch))
                .returning(UserRow::as_returning())
                .get_result(conn)
                .optional()
                .map_err(map_diesel_error)?;
            row.map(User::from)
                .ok_or(UserRepositoryError::NotFound { id })
        })
        .await
    }

    async fn delete(&self, id: i32) -> Result<(), UserRepositoryError> {
        self.run(move |conn| {
            // Zero affected rows is still a success: delete is idempotent.
            diesel::delete(users::table.find(id))
                .execute(conn)
                .map_err(map_diesel_error)?;
            Ok(())
        })
        .await
    }

    async fn list(
        &self,
        filter: UserListFilter,
        sort: Option<UserSortKey>,
    ) -> Result<Vec<User>, UserRepositoryError> {
        self.run(move |conn| {
            let mut query = users::table.select(UserRow::as_select()).into_boxed();
            if let Some(username) = filter.username {
                query = query.filter(users::username.eq(username));
            }
            if let Some(first_name) = filter.first_name {
                query = query.filter(users::first_name.eq(first_name));
            }
            if let Some(last_name) = filter.last_name {
                query = query.filter(users::last_name.eq(last_name));
            }
            if let Some(key) = sort {
                query = match key {
                    UserSortKey::Id => query.order(users::id.asc()),
                    UserSortKey::Username => query.order(users::username.asc()),
                    UserSortKey::FirstName => query.order(users::first_name.asc()),
                    UserSortKey::LastName => query.order(users::last_name.asc()),
                    UserSortKey::Email => query.order(users::email.asc()),
                    UserSortKey::DateOfBirth => query.order(users::date_of_birth.asc()),
                    UserSortKey::Country => query.order(users::country.asc()),
                    UserSortKey::City => query.order(users::city.asc()),
                };
            }
            let rows: Vec<UserRow> = query.load(conn).map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::outbound::persistence::{run_migrations, PoolConfig};

    struct Fixture {
        repo: DieselUserRepository,
        // Held so the database file outlives the test.
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("users.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(2))
            .expect("build pool");
        run_migrations(&pool).expect("apply migrations");
        Fixture {
            repo: DieselUserRepository::new(pool),
            _dir: dir,
        }
    }

    fn draft(username: &str) -> UserDraft {
        UserDraft {
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            first_name: "Alice".to_owned(),
            last_name: "Smith".to_owned(),
            city: "London".to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 1),
            ..UserDraft::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_monotonic_identifiers() {
        let f = fixture();
        let first = f.repo.create(draft("alice")).await.expect("create alice");
        let second = f.repo.create(draft("bob")).await.expect("create bob");
        assert!(second.id > first.id);
        assert_eq!(first.username, "alice");
        assert_eq!(first.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 1));
    }

    #[tokio::test]
    async fn get_round_trips_created_record() {
        let f = fixture();
        let created = f.repo.create(draft("alice")).await.expect("create");
        let fetched = f.repo.get(created.id).await.expect("get");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let f = fixture();
        let err = f.repo.get(999_999).await.expect_err("must be missing");
        assert_eq!(err, UserRepositoryError::NotFound { id: 999_999 });
    }

    #[tokio::test]
    async fn update_merges_only_present_fields() {
        let f = fixture();
        let created = f.repo.create(draft("alice")).await.expect("create");
        let patch = UserPatch {
            city: Some("Paris".to_owned()),
            ..UserPatch::default()
        };
        let updated = f.repo.update(created.id, patch).await.expect("update");
        assert_eq!(updated.city, "Paris");
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.date_of_birth, created.date_of_birth);

        // The returned record must match a fresh read.
        let fetched = f.repo.get(created.id).await.expect("get");
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_with_empty_patch_is_a_no_op() {
        let f = fixture();
        let created = f.repo.create(draft("alice")).await.expect("create");
        let updated = f
            .repo
            .update(created.id, UserPatch::default())
            .await
            .expect("empty update");
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_ignores_empty_string_fields() {
        let f = fixture();
        let created = f.repo.create(draft("alice")).await.expect("create");
        let patch = UserPatch {
            city: Some(String::new()),
            last_name: Some("Jones".to_owned()),
            ..UserPatch::default()
        };
        let updated = f.repo.update(created.id, patch).await.expect("update");
        assert_eq!(updated.city, "London");
        assert_eq!(updated.last_name, "Jones");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let f = fixture();
        let patch = UserPatch {
            city: Some("Paris".to_owned()),
            ..UserPatch::default()
        };
        let err = f.repo.update(424_242, patch).await.expect_err("missing");
        assert_eq!(err, UserRepositoryError::NotFound { id: 424_242 });
    }

    #[tokio::test]
    async fn delete_removes_record_and_is_idempotent() {
        let f = fixture();
        let created = f.repo.create(draft("alice")).await.expect("create");
        f.repo.delete(created.id).await.expect("delete");
        let err = f.repo.get(created.id).await.expect_err("gone");
        assert_eq!(err, UserRepositoryError::NotFound { id: created.id });

        // Second delete of the same id still succeeds.
        f.repo.delete(created.id).await.expect("repeat delete");
    }

    #[tokio::test]
    async fn list_applies_anded_equality_filters() {
        let f = fixture();
        f.repo.create(draft("alice")).await.expect("create alice");
        let mut other = draft("bob");
        other.first_name = "Bob".to_owned();
        f.repo.create(other).await.expect("create bob");

        let filter = UserListFilter {
            username: Some("bob".to_owned()),
            first_name: Some("Bob".to_owned()),
            ..UserListFilter::default()
        };
        let users = f.repo.list(filter, None).await.expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "bob");

        let mismatched = UserListFilter {
            username: Some("bob".to_owned()),
            first_name: Some("Alice".to_owned()),
            ..UserListFilter::default()
        };
        let users = f.repo.list(mismatched, None).await.expect("list");
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn list_sorts_ascending_by_requested_key() {
        let f = fixture();
        let mut zed = draft("zed");
        zed.last_name = "Zimmer".to_owned();
        f.repo.create(zed).await.expect("create zed");
        f.repo.create(draft("alice")).await.expect("create alice");

        let users = f
            .repo
            .list(UserListFilter::default(), Some(UserSortKey::LastName))
            .await
            .expect("list sorted");
        assert_eq!(users[0].last_name, "Smith");
        assert_eq!(users[1].last_name, "Zimmer");
    }
}
