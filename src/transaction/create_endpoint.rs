//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{CreateTransactionRequest, CreateTransactionResponse, TransactionService},
};

/// A route handler for creating a new transaction, responds with the new ID on success.
///
/// The JSON rejection is handled here so that a malformed body is reported
/// with the same error body and status code as a failed validation.
pub async fn create_transaction_endpoint(
    State(service): State<TransactionService>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = Error::InvalidRequestPayload(rejection.body_text());
            error.log("decode request body");
            return error.into_response();
        }
    };

    match service.create(&request) {
        Ok(id) => (StatusCode::CREATED, Json(CreateTransactionResponse { id })).into_response(),
        Err(error) => {
            error.log("create transaction");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{StubLedger, StubRateProvider, assert_error_response, fixed_id},
        transaction::{
            CreateTransactionResponse, Transaction, TransactionService,
            create_transaction_endpoint,
        },
    };

    const ID: &str = "b62a64c9-0008-4148-99f6-9c8086a1dd42";

    fn get_test_server(ledger: Arc<StubLedger>) -> TestServer {
        let service = TransactionService::new(
            ledger,
            Arc::new(StubRateProvider::with_rate("3.456", date!(2023 - 09 - 01))),
            fixed_id(ID),
        );
        let app = Router::new()
            .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
            .with_state(service);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let ledger = Arc::new(StubLedger::default());
        let server = get_test_server(ledger.clone());

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "food",
                "transaction_date": "2023-09-21",
                "amount": 20.47
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(
            response.json::<CreateTransactionResponse>(),
            CreateTransactionResponse { id: ID.to_owned() }
        );
        assert_eq!(
            ledger.created(),
            vec![Transaction {
                id: ID.to_owned(),
                description: "food".to_owned(),
                date: date!(2023 - 09 - 21),
                amount: dec!(20.47),
            }]
        );
    }

    #[tokio::test]
    async fn invalid_amount_is_bad_request() {
        let ledger = Arc::new(StubLedger::default());
        let server = get_test_server(ledger.clone());

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "food",
                "transaction_date": "2023-09-21",
                "amount": 9.555
            }))
            .await;

        assert_error_response(&response, StatusCode::BAD_REQUEST, "two decimal places");
        assert!(ledger.created().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = get_test_server(Arc::new(StubLedger::default()));

        let response = server
            .post(endpoints::TRANSACTIONS)
            .text("{\"description\": ")
            .content_type("application/json")
            .await;

        assert_error_response(&response, StatusCode::BAD_REQUEST, "invalid request payload");
    }

    #[tokio::test]
    async fn storage_failure_is_internal_server_error() {
        let ledger = Arc::new(StubLedger::failing(crate::Error::Storage(
            "disk full".to_owned(),
        )));
        let server = get_test_server(ledger);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "food",
                "transaction_date": "2023-09-21",
                "amount": 20.47
            }))
            .await;

        assert_error_response(&response, StatusCode::INTERNAL_SERVER_ERROR, "storage error");
    }
}
