mod config;
mod display;
mod routes;
mod services;
mod shell;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let port = config.port;
    let seed = config.seed_demo_data;
    let state = state::AppState::new(config);

    if seed {
        services::document::seed_demo_documents(&state).await;
    }

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chatbot admin listening");
    axum::serve(listener, app).await.expect("server failed");
}
