//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    error::ErrorResponse,
    endpoints,
    logging::logging_middleware,
    transaction::{create_transaction_endpoint, retrieve_transaction_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
        .route(endpoints::TRANSACTION, get(retrieve_transaction_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The server is up if it can answer at all.
async fn get_health() -> StatusCode {
    StatusCode::OK
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(ErrorResponse {
            status_code: StatusCode::NOT_FOUND.as_u16(),
            message: "the requested resource could not be found".to_owned(),
        }),
    )
        .into_response()
}
