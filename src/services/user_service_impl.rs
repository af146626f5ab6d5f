//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, DbErr};
use tracing::{debug, info, warn};

use crate::api::types::{CreatedUserDto, DeletedUserDto, UpdatedUserDto};
use crate::db::{Store, UserRepository};
use crate::models::{NewUser, User};
use crate::services::user_service::{
    CHECK_FAILED, CREATE_FAILED, DELETE_FAILED, GET_FAILED, LIST_FAILED, PROVISION_FAILED,
    UPDATE_FAILED, UserError, UserService,
};

/// SeaORM-based implementation of [`UserService`].
///
/// Update and delete run their existence check and their write inside one
/// transaction. The check locks the row, so a concurrent delete waits for
/// the write to commit instead of slipping in between.
pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, UserError> {
        self.store.begin().await.map_err(|e| db_error(e, CHECK_FAILED))
    }

    /// Loads and locks the row inside `txn`, rolling back when it is missing.
    async fn find_existing(
        txn: DatabaseTransaction,
        id: i32,
    ) -> Result<(DatabaseTransaction, User), UserError> {
        let found = UserRepository::new(&txn)
            .get_for_update(id)
            .await
            .map_err(|e| UserError::from_store(e, CHECK_FAILED))?;

        match found {
            Some(user) => Ok((txn, user)),
            None => {
                if let Err(e) = txn.rollback().await {
                    warn!("Rollback after missing user {} failed: {}", id, e);
                }
                Err(UserError::NotFound(id))
            }
        }
    }
}

fn db_error(err: DbErr, summary: &'static str) -> UserError {
    UserError::from_store(err.into(), summary)
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.store
            .list_users()
            .await
            .map_err(|e| UserError::from_store(e, LIST_FAILED))
    }

    async fn get_user(&self, id: i32) -> Result<User, UserError> {
        self.store
            .get_user(id)
            .await
            .map_err(|e| UserError::from_store(e, GET_FAILED))?
            .ok_or(UserError::NotFound(id))
    }

    async fn create_user(&self, user: NewUser) -> Result<CreatedUserDto, UserError> {
        let id = self
            .store
            .insert_user(&user)
            .await
            .map_err(|e| UserError::from_store(e, CREATE_FAILED))?;

        info!("Added user {} <{}>", id, user.email);

        Ok(CreatedUserDto {
            id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            phone: user.phone,
            age: user.age,
            dept: user.dept,
        })
    }

    async fn update_user(&self, id: i32, user: NewUser) -> Result<UpdatedUserDto, UserError> {
        let txn = self.begin().await?;
        let (txn, _) = Self::find_existing(txn, id).await?;

        let affected = UserRepository::new(&txn)
            .replace(id, &user)
            .await
            .map_err(|e| UserError::from_store(e, UPDATE_FAILED))?;
        debug!(id, affected, "user row replaced");

        txn.commit().await.map_err(|e| db_error(e, UPDATE_FAILED))?;

        info!("Updated user {}", id);

        Ok(UpdatedUserDto {
            id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            phone: user.phone,
            age: user.age,
        })
    }

    async fn delete_user(&self, id: i32) -> Result<DeletedUserDto, UserError> {
        let txn = self.begin().await?;
        let (txn, snapshot) = Self::find_existing(txn, id).await?;

        UserRepository::new(&txn)
            .delete(id)
            .await
            .map_err(|e| UserError::from_store(e, DELETE_FAILED))?;

        txn.commit().await.map_err(|e| db_error(e, DELETE_FAILED))?;

        info!("Deleted user {} <{}>", id, snapshot.email);

        Ok(DeletedUserDto {
            id: snapshot.id,
            firstname: snapshot.firstname,
            lastname: snapshot.lastname,
            email: snapshot.email,
        })
    }

    async fn provision_schema(&self) -> Result<(), UserError> {
        self.store
            .provision_users_table()
            .await
            .map_err(|e| UserError::from_store(e, PROVISION_FAILED))
    }
}
