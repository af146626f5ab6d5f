use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::users;

/// A stored row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: i32,
    pub dept: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            firstname: model.firstname,
            lastname: model.lastname,
            email: model.email,
            phone: model.phone,
            age: model.age,
            dept: model.dept,
            created_at: model.created_at,
        }
    }
}

/// The six mutable fields of a user, after the presence check has passed.
///
/// Only `api::validation::validate_user_payload` builds these from request
/// bodies, so holding one means every required field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub dept: String,
}
