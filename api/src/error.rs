use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blogly_service::{ServiceError, sea_orm::DbErr};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("flash encoding error: {0}")]
    Flash(#[from] serde_json::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::Service(ServiceError::NotFound { entity, id })
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Service(ServiceError::Db(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Service(ServiceError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Not Found".to_owned())
            }
            AppError::MissingField(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing required field: {field}"),
            ),
            AppError::TooLong { field, max } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{field} must be at most {max} characters"),
            ),
            AppError::Service(ServiceError::UnknownTag(name)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Unknown tag: {name}"),
            ),
            AppError::Service(ServiceError::DuplicateTag(name)) => {
                (StatusCode::CONFLICT, format!("Tag already exists: {name}"))
            }
            AppError::Service(ServiceError::Db(_)) | AppError::Template(_) | AppError::Flash(_) => {
                error!("{self:?}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
            }
        };

        warn!(status = status.as_u16(), "{self}");
        (status, message).into_response()
    }
}
