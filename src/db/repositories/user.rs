use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Schema, Select, Set, SqlErr,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::entities::{prelude::*, users};
use crate::models::{NewUser, User};

/// Classified outcome of a failed `users` statement.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no user with id {0}")]
    NotFound(i32),

    /// The engine rejected a write because of the unique `email` index.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
            _ => Self::Database(err),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Repository for the `users` table.
///
/// Borrows any sea-orm connection, so the same queries run either on the
/// shared handle or inside a transaction opened by the caller.
pub struct UserRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// `CREATE TABLE IF NOT EXISTS users (...)`, derived from the entity.
    pub async fn create_table(&self) -> StoreResult<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema
            .create_table_from_entity(Users)
            .if_not_exists()
            .to_owned();

        self.conn.execute(backend.build(&stmt)).await?;
        info!("users table ensured");
        Ok(())
    }

    /// All users, newest first. Rows sharing a timestamp fall back to id order.
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let rows = Users::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .all(self.conn)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<User>> {
        let row = Users::find_by_id(id).one(self.conn).await?;
        Ok(row.map(User::from))
    }

    /// Like [`get`](Self::get), but holds an exclusive lock on the row until
    /// the surrounding transaction ends. Only meaningful inside a transaction.
    pub async fn get_for_update(&self, id: i32) -> StoreResult<Option<User>> {
        let row = locked_by_id(id).one(self.conn).await?;
        Ok(row.map(User::from))
    }

    /// Inserts a row and returns the id assigned by the database.
    pub async fn insert(&self, user: &NewUser) -> StoreResult<i32> {
        let active = users::ActiveModel {
            firstname: Set(user.firstname.clone()),
            lastname: Set(user.lastname.clone()),
            email: Set(user.email.clone()),
            phone: Set(Some(user.phone.clone())),
            age: Set(user.age),
            dept: Set(user.dept.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let res = Users::insert(active).exec(self.conn).await?;
        debug!(id = res.last_insert_id, "inserted user");
        Ok(res.last_insert_id)
    }

    /// Overwrites the six mutable columns. `id` and `created_at` are left alone.
    ///
    /// Returns the number of rows the engine reports as affected.
    pub async fn replace(&self, id: i32, user: &NewUser) -> StoreResult<u64> {
        let res = Users::update_many()
            .col_expr(users::Column::Firstname, Expr::value(user.firstname.clone()))
            .col_expr(users::Column::Lastname, Expr::value(user.lastname.clone()))
            .col_expr(users::Column::Email, Expr::value(user.email.clone()))
            .col_expr(users::Column::Phone, Expr::value(user.phone.clone()))
            .col_expr(users::Column::Age, Expr::value(user.age))
            .col_expr(users::Column::Dept, Expr::value(user.dept.clone()))
            .filter(users::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        Ok(res.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = Users::delete_by_id(id).exec(self.conn).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

/// `SELECT ... FOR UPDATE` on MySQL. SQLite has no row locks, so the
/// clause is dropped there and the write lock taken by the transaction's
/// first write does the job.
fn locked_by_id(id: i32) -> Select<Users> {
    Users::find_by_id(id).lock_exclusive()
}
