//! Query errors and their HTTP mapping.
//!
//! Messages are part of the public API and stay in Spanish, like the route
//! names and response keys.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Película no encontrada: {0}")]
    MovieNotFound(String),

    #[error("Actor no encontrado: {0}")]
    ActorNotFound(String),

    #[error("Director no encontrado: {0}")]
    DirectorNotFound(String),

    #[error("Mes no válido: {0}")]
    InvalidMonth(String),

    #[error("Día no válido: {0}")]
    InvalidWeekday(String),

    #[error("Valor de top_n no válido: {0}")]
    InvalidTopN(String),

    #[error("La película no tiene suficientes valoraciones: {title} ({votes} < {required})")]
    NotEnoughVotes {
        title: String,
        votes: u32,
        required: u32,
    },
}

impl QueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::MovieNotFound(_)
            | QueryError::ActorNotFound(_)
            | QueryError::DirectorNotFound(_) => StatusCode::NOT_FOUND,
            QueryError::InvalidMonth(_)
            | QueryError::InvalidWeekday(_)
            | QueryError::InvalidTopN(_) => StatusCode::BAD_REQUEST,
            QueryError::NotEnoughVotes { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
