//! Error-to-response mapping for the HTTP layer.
//!
//! Handlers return `Result<_, ApiError>` and convert repository and token
//! errors with `?`. Server-side failures are logged here and rendered with a
//! generic message so internals never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use tally_core::auth::PasswordError;
use tally_db::repositories::{
    BudgetError, CategoryError, ExpenseError, IncomeError, PersonError, SummaryError,
};
use tally_shared::{AppError, JwtError};

/// HTTP-facing error wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<JwtError> for ApiError {
    fn from(e: JwtError) -> Self {
        let inner = match e {
            JwtError::EncodingError(msg) => AppError::Internal(msg),
            JwtError::Expired => AppError::Unauthorized("Token has expired".to_string()),
            JwtError::Invalid | JwtError::WrongTokenType | JwtError::InvalidSubject => {
                AppError::Unauthorized("Invalid or malformed token".to_string())
            }
        };
        Self(inner)
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self(AppError::Internal(e.to_string()))
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl From<PersonError> for ApiError {
    fn from(e: PersonError) -> Self {
        let inner = match e {
            PersonError::NotFound(id) => AppError::NotFound(format!("person {id}")),
            // Duplicate usernames are a 400, not a 409.
            PersonError::UsernameTaken(name) => {
                AppError::Validation(format!("username '{name}' is already taken"))
            }
            PersonError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(inner)
    }
}

impl From<CategoryError> for ApiError {
    fn from(e: CategoryError) -> Self {
        let inner = match e {
            CategoryError::NotFound(id) => AppError::NotFound(format!("category {id}")),
            CategoryError::DuplicateName(name) => {
                AppError::Conflict(format!("category '{name}' already exists"))
            }
            CategoryError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(inner)
    }
}

impl From<ExpenseError> for ApiError {
    fn from(e: ExpenseError) -> Self {
        let inner = match e {
            ExpenseError::NotFound(id) => AppError::NotFound(format!("expense {id}")),
            ExpenseError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(inner)
    }
}

impl From<IncomeError> for ApiError {
    fn from(e: IncomeError) -> Self {
        let inner = match e {
            IncomeError::NotFound(id) => AppError::NotFound(format!("income {id}")),
            IncomeError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(inner)
    }
}

impl From<BudgetError> for ApiError {
    fn from(e: BudgetError) -> Self {
        let inner = match e {
            BudgetError::NotFound(id) => AppError::NotFound(format!("budget {id}")),
            BudgetError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(inner)
    }
}

impl From<SummaryError> for ApiError {
    fn from(e: SummaryError) -> Self {
        let inner = match e {
            SummaryError::InvalidMonth(month) => {
                AppError::Validation(format!("month must be 1-12, got {month}"))
            }
            SummaryError::InvalidDays(days) => {
                AppError::Validation(format!("days must be at least 1, got {days}"))
            }
            SummaryError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn status_of(e: ApiError) -> StatusCode {
        e.into_response().status()
    }

    #[rstest]
    #[case(ApiError::from(JwtError::Expired), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::from(JwtError::Invalid), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::from(JwtError::WrongTokenType), StatusCode::UNAUTHORIZED)]
    #[case(
        ApiError::from(ExpenseError::NotFound(Uuid::nil())),
        StatusCode::NOT_FOUND
    )]
    #[case(
        ApiError::from(CategoryError::DuplicateName("Food".to_string())),
        StatusCode::CONFLICT
    )]
    #[case(
        ApiError::from(PersonError::UsernameTaken("alice".to_string())),
        StatusCode::BAD_REQUEST
    )]
    #[case(ApiError::from(SummaryError::InvalidMonth(13)), StatusCode::BAD_REQUEST)]
    #[case(ApiError::from(SummaryError::InvalidDays(0)), StatusCode::BAD_REQUEST)]
    #[case(
        ApiError::from(SummaryError::InvalidDays(u32::MAX)),
        StatusCode::BAD_REQUEST
    )]
    fn test_error_status_mapping(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(status_of(error), expected);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let error = ApiError(AppError::Database("connection reset by peer".to_string()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
