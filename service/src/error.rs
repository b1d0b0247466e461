use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by [`crate::Query`] and [`crate::Mutation`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("no tag named {0:?}")]
    UnknownTag(String),

    #[error("a tag named {0:?} already exists")]
    DuplicateTag(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub(crate) fn user_not_found(id: i32) -> Self {
        Self::NotFound { entity: "user", id }
    }

    pub(crate) fn post_not_found(id: i32) -> Self {
        Self::NotFound { entity: "post", id }
    }

    pub(crate) fn tag_not_found(id: i32) -> Self {
        Self::NotFound { entity: "tag", id }
    }
}
