use std::env;

use tokio::net::TcpListener;

mod config;
mod error;
mod extract;
mod handlers;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env()?;
    let port = config.port;
    let store = state::connect(&config).await;
    let app = routes::router(AppState::new(store, config));

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        let app = tower::ServiceBuilder::new()
            .layer(axum_aws_lambda::LambdaLayer::default())
            .service(app);

        lambda_http::run(app).await?;
        return Ok(());
    }

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Pharmacy API listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
