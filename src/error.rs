use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::render::RenderError;
use crate::time::TimeError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("day count out of range: {0}")]
    DayCountOutOfRange(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Time(_) | AppError::DayCountOutOfRange(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) | AppError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(err = %self, "request.failed");
        } else if status != StatusCode::NOT_FOUND {
            warn!(err = %self, "request.rejected");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_status() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(TimeError::UnknownTimezone("X/Y".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DayCountOutOfRange("9".repeat(30)).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(RenderError::Font).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_names_the_input() {
        let err = AppError::from(TimeError::InvalidDate("2022-02-30".into()));
        assert_eq!(err.to_string(), "invalid date: 2022-02-30");
    }
}
