//! Defines the endpoint for retrieving a transaction converted into another currency.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{RetrieveTransactionQuery, TransactionService},
};

/// A route handler for getting a transaction with its amount converted into
/// the currency named by the `country_currency` and `currency` query parameters.
pub async fn retrieve_transaction_endpoint(
    State(service): State<TransactionService>,
    Path(transaction_id): Path<String>,
    query: Result<Query<RetrieveTransactionQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let error = Error::InvalidRequestPayload(rejection.body_text());
            error.log("decode query parameters");
            return error.into_response();
        }
    };

    match service.retrieve(&transaction_id, &query).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            error.log("retrieve transaction");
            error.into_response()
        }
    }
}
