//! The API endpoints URIs.

/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";
/// The route for creating transactions.
pub const TRANSACTIONS: &str = "/v1/transactions";
/// The route for retrieving a transaction converted into another currency.
pub const TRANSACTION: &str = "/v1/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// # Examples
/// ```
/// use fxledger::endpoints::{TRANSACTION, format_endpoint};
///
/// assert_eq!(
///     format_endpoint(TRANSACTION, "b62a64c9-0008-4148-99f6-9c8086a1dd42"),
///     "/v1/transactions/b62a64c9-0008-4148-99f6-9c8086a1dd42"
/// );
/// ```
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end + 1..])
        }
        _ => endpoint_path.to_owned(),
    }
}
