use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::request_ctx;
use crate::vision::VisionError;

#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub request_id: String,
}

/// Startup and HTTP-surface errors. Game rounds never produce these.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::NotFound { code, .. } => *code,
        }
    }

    fn detail(&self) -> &str {
        match self {
            AppError::Config { detail } | AppError::NotFound { detail, .. } => detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

impl From<VisionError> for AppError {
    fn from(err: VisionError) -> Self {
        AppError::config(format!("gesture classifier: {err}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let request_id = request_ctx::request_id();

        let problem = ProblemDetails {
            type_: format!("/errors/{}", code.to_lowercase()),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail().to_string(),
            code: code.to_string(),
            request_id,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem)
    }
}
