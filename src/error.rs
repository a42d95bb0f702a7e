use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;

use crate::models::Collection;

/// Pipeline stage in which a recommendation error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CatalogLoad,
    Validation,
    FeatureAssembly,
    Vectorization,
    Selection,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::CatalogLoad => "catalog load",
            Stage::Validation => "validation",
            Stage::FeatureAssembly => "feature assembly",
            Stage::Vectorization => "vectorization",
            Stage::Selection => "selection",
        };
        write!(f, "{}", name)
    }
}

/// Errors surfaced by the recommendation core
#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    #[error("Schema error in {collection} during {stage}: {message}")]
    Schema {
        stage: Stage,
        collection: Collection,
        message: String,
    },

    #[error("Degenerate input in {collection} during {stage}: {message}")]
    DegenerateInput {
        stage: Stage,
        collection: Collection,
        message: String,
    },

    #[error("Unknown sort method: {0} (expected \"heap\" or \"merge\")")]
    UnknownSortMethod(String),

    #[error("Catalog read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecommendError {
    pub fn schema(stage: Stage, collection: Collection, message: impl Into<String>) -> Self {
        RecommendError::Schema {
            stage,
            collection,
            message: message.into(),
        }
    }

    pub fn degenerate(stage: Stage, collection: Collection, message: impl Into<String>) -> Self {
        RecommendError::DegenerateInput {
            stage,
            collection,
            message: message.into(),
        }
    }
}

pub type RecommendResult<T> = Result<T, RecommendError>;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Recommend(RecommendError::Schema { .. })
            | AppError::Recommend(RecommendError::DegenerateInput { .. })
            | AppError::Recommend(RecommendError::UnknownSortMethod(_))
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Recommend(RecommendError::Csv(_))
            | AppError::Recommend(RecommendError::Io(_))
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::NotFound(msg) | AppError::InvalidInput(msg) => msg.clone(),
            _ => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
