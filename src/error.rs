//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::Date;

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a request that breaks one of the domain rules, e.g.
    /// a description that is too long or an identifier that is not a UUID.
    ///
    /// The string describes the rule that was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request body could not be decoded as JSON.
    #[error("invalid request payload: {0}")]
    InvalidRequestPayload(String),

    /// No transaction exists with the given ID.
    #[error("not found: transaction with ID {0}")]
    NotFound(String),

    /// The exchange rate feed has no quotation for the currency within the
    /// six months up to and including the transaction date.
    ///
    /// This is a business outcome rather than a fault, the client should not
    /// retry the same request.
    #[error(
        "the purchase cannot be converted to the target currency: no {country}-{currency} \
        exchange rate within 6 months of {date}"
    )]
    RateUnavailable {
        /// The country the client asked for, e.g. "Brazil".
        country: String,
        /// The currency the client asked for, e.g. "Real".
        currency: String,
        /// The date of the transaction being converted.
        date: Date,
    },

    /// The exchange rate feed returned a rate that is not a decimal number.
    #[error("could not parse exchange rate \"{0}\"")]
    RateFormat(String),

    /// The ledger could not read or write a transaction.
    ///
    /// The string is logged and also returned to the client as part of the
    /// error message.
    #[error("storage error: {0}")]
    Storage(String),

    /// The exchange rate feed could not be reached or answered with an error.
    #[error("exchange rate provider error: {0}")]
    Upstream(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::Storage(value.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Upstream(value.to_string())
    }
}

impl Error {
    /// The HTTP status code the error is reported with.
    ///
    /// Client-caused rejections map to 4xx, infrastructure faults to 5xx.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidRequestPayload(_) => StatusCode::BAD_REQUEST,
            Error::RateUnavailable { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::RateFormat(_) | Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Log the error along with the `operation` that failed and the status
    /// code it will be reported with.
    ///
    /// Server faults are logged as errors, rejected requests as warnings.
    pub fn log(&self, operation: &str) {
        let status_code = self.status_code().as_u16();

        if self.status_code().is_server_error() {
            tracing::error!(operation, status_code, "could not {operation}: {self}");
        } else {
            tracing::warn!(operation, status_code, "could not {operation}: {self}");
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Mirrors the HTTP status code of the response.
    pub status_code: u16,
    /// A human readable description of what went wrong.
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = ErrorResponse {
            status_code: status_code.as_u16(),
            message: self.to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}
