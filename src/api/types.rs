use serde::{Deserialize, Serialize};

/// Envelope wrapped around every JSON response.
///
/// `success` is only ever set by the constructors below, which keeps it in
/// step with the status code chosen by the handler or by `ApiError`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "deletedUser", skip_serializing_if = "Option::is_none")]
    pub deleted_user: Option<DeletedUserDto>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            count: None,
            error: None,
            deleted_user: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            count: None,
            error: None,
            deleted_user: None,
        }
    }

    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            count: None,
            error: detail,
            deleted_user: None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    pub fn deleted(message: impl Into<String>, user: DeletedUserDto) -> Self {
        Self {
            deleted_user: Some(user),
            ..Self::message(message)
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Every field is optional here; presence is enforced by
/// [`super::validation::validate_user_payload`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub dept: Option<String>,
}

/// Echo of a successful create: the assigned id plus the submitted fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatedUserDto {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub dept: String,
}

/// Echo of a successful full update. `dept` is stored but not echoed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdatedUserDto {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
}

/// Snapshot of a removed row, taken before the delete statement ran.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeletedUserDto {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}
