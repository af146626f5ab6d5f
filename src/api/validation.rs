use axum::extract::rejection::JsonRejection;
use tracing::debug;

use super::{ApiError, UserPayload};
use crate::models::NewUser;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "First name, last name, email, phone, age and dept are required";

/// Presence check shared by create and full update.
///
/// A field passes when it is present and truthy: strings must be non-empty
/// and `age` must be non-zero. Which field failed is logged but never
/// reported; the message is the same for every combination.
pub fn validate_user_payload(payload: UserPayload) -> Result<NewUser, ApiError> {
    let missing: Vec<&str> = [
        ("firstname", is_blank(payload.firstname.as_deref())),
        ("lastname", is_blank(payload.lastname.as_deref())),
        ("email", is_blank(payload.email.as_deref())),
        ("phone", is_blank(payload.phone.as_deref())),
        ("age", payload.age.is_none_or(|age| age == 0)),
        ("dept", is_blank(payload.dept.as_deref())),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .collect();

    if !missing.is_empty() {
        debug!(?missing, "user payload failed presence check");
        return Err(ApiError::validation(REQUIRED_FIELDS_MESSAGE));
    }

    match payload {
        UserPayload {
            firstname: Some(firstname),
            lastname: Some(lastname),
            email: Some(email),
            phone: Some(phone),
            age: Some(age),
            dept: Some(dept),
        } => Ok(NewUser {
            firstname,
            lastname,
            email,
            phone,
            age,
            dept,
        }),
        _ => Err(ApiError::validation(REQUIRED_FIELDS_MESSAGE)),
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// A body that is not valid JSON for [`UserPayload`] fails the same way as
/// one with missing fields, with the parser's complaint attached.
pub fn reject_body(rejection: &JsonRejection) -> ApiError {
    ApiError::ValidationError {
        message: REQUIRED_FIELDS_MESSAGE.to_string(),
        detail: Some(rejection.body_text()),
    }
}

/// Path identifiers that are not integers cannot match any row.
pub fn parse_user_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::user_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> UserPayload {
        UserPayload {
            firstname: Some("A".to_string()),
            lastname: Some("B".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some("1".to_string()),
            age: Some(30),
            dept: Some("eng".to_string()),
        }
    }

    #[test]
    fn test_complete_payload_passes() {
        let user = validate_user_payload(full_payload()).unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.age, 30);
        assert_eq!(user.dept, "eng");
    }

    fn assert_rejected(mutate: impl FnOnce(&mut UserPayload)) {
        let mut payload = full_payload();
        mutate(&mut payload);
        let err = validate_user_payload(payload).unwrap_err();
        assert!(matches!(
            err,
            ApiError::ValidationError { ref message, .. } if message == REQUIRED_FIELDS_MESSAGE
        ));
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert_rejected(|p| p.firstname = None);
        assert_rejected(|p| p.lastname = Some(String::new()));
        assert_rejected(|p| p.email = None);
        assert_rejected(|p| p.phone = Some(String::new()));
        assert_rejected(|p| p.age = None);
        assert_rejected(|p| p.age = Some(0));
        assert_rejected(|p| p.dept = None);
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(validate_user_payload(UserPayload::default()).is_err());
    }

    #[test]
    fn test_negative_age_passes_presence_check() {
        let mut payload = full_payload();
        payload.age = Some(-4);
        assert!(validate_user_payload(payload).is_ok());
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(matches!(parse_user_id("abc"), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_user_id(""), Err(ApiError::NotFound(_))));
    }
}
