use std::{fs::OpenOptions, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use fxledger::{
    AppState, build_router,
    exchange_rate::{DEFAULT_TIMEOUT, TREASURY_BASE_URL, TreasuryRateProvider},
    graceful_shutdown,
    transaction::uuid_generator,
};

/// The REST API server for fxledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "fxledger.db")]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 8082)]
    port: u16,

    /// The base URL of the Treasury fiscal data API.
    #[arg(long, default_value = TREASURY_BASE_URL)]
    rates_base_url: String,

    /// How many seconds to wait for the exchange rate API before giving up.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    rates_timeout_secs: u64,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let rate_provider = TreasuryRateProvider::new(
        &args.rates_base_url,
        Duration::from_secs(args.rates_timeout_secs),
    )
    .expect("Could not create the exchange rate client.");
    let state = AppState::new(conn, Arc::new(rate_provider), uuid_generator())
        .expect("Could not initialize the database.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("server error: {error}");
    }
}

fn setup_logging(log_path: &str) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(filter::LevelFilter::DEBUG.into())
                        .from_env_lossy(),
                ),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but errors are
        // already logged with their cause by the route handlers.
        .on_failure(());

    router.layer(tracing_layer)
}
