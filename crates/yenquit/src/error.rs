use crate::config::ConfigError;
use crate::progress::LogImportError;
use crate::telemetry::TelemetryError;
use crate::wizard::WizardError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// A daily log carried a date that does not resolve to a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse '{value}' as a calendar date")]
pub struct InvalidDateError {
    pub value: String,
}

/// Caller input outside the domain a lookup or calendar accepts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("score {0} is outside the Fagerström range 0-10")]
    ScoreOutOfRange(i64),
    #[error("unrecognized tobacco modality '{0}'")]
    UnknownModality(String),
    #[error("month {0} is outside 1-12")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
    #[error("question {0} has no answer")]
    MissingAnswer(usize),
    #[error("option {option} does not exist for question {question}")]
    UnknownOption { question: usize, option: usize },
    #[error("{answers} answers supplied for {questions} questions")]
    AnswerCountMismatch { answers: usize, questions: usize },
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    InvalidDate(InvalidDateError),
    InvalidInput(InvalidInputError),
    InvalidBody(JsonRejection),
    LogImport(LogImportError),
    Wizard(WizardError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::InvalidDate(err) => write!(f, "invalid daily log: {}", err),
            AppError::InvalidInput(err) => write!(f, "invalid input: {}", err),
            AppError::InvalidBody(err) => write!(f, "invalid request body: {}", err.body_text()),
            AppError::LogImport(err) => write!(f, "log import failed: {}", err),
            AppError::Wizard(err) => write!(f, "wizard error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::InvalidDate(err) => Some(err),
            AppError::InvalidInput(err) => Some(err),
            AppError::InvalidBody(err) => Some(err),
            AppError::LogImport(err) => Some(err),
            AppError::Wizard(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidDate(_) | AppError::InvalidInput(_) | AppError::LogImport(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::InvalidBody(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Wizard(err) => err.status(),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request input");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<InvalidDateError> for AppError {
    fn from(value: InvalidDateError) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<InvalidInputError> for AppError {
    fn from(value: InvalidInputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidBody(value)
    }
}

impl From<LogImportError> for AppError {
    fn from(value: LogImportError) -> Self {
        Self::LogImport(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}
