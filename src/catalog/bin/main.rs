use std::net::SocketAddr;
use lambda_http::{run, Error};
use tracing::info;
use bookstore::catalog::controller::build_router;
use bookstore::core::controller::AppState;
use bookstore::core::domain::{Configuration, RuntimeMode};
use bookstore::utils::logging::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env();
    setup_tracing(config.log_level);

    // the catalog lives for the whole process and is shared by every request
    let state = AppState::new(&config);

    match config.runtime {
        RuntimeMode::Lambda => {
            info!(branch = config.branch_id.as_str(), "starting catalog lambda");
            run(build_router::<lambda_http::Body>(state)).await
        }
        RuntimeMode::Http => {
            let addr: SocketAddr = config.socket_addr().parse()?;
            info!(branch = config.branch_id.as_str(), "catalog listening on {}", addr);
            axum::Server::bind(&addr)
                .serve(build_router::<axum::body::Body>(state).into_make_service())
                .await?;
            Ok(())
        }
    }
}
