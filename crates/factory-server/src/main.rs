use clap::Parser;
use factory_contract::AgentStore;
use factory_server::http;
use factory_server::service::AppState;
use factory_store_adapters::MemoryStore;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "factory-server")]
struct Args {
    #[arg(long, env = "FACTORY_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    http_addr: String,

    /// Postgres connection string for the privileged store role.
    /// Without it the server falls back to an in-memory store.
    #[arg(long, env = "FACTORY_DATABASE_URL")]
    database_url: Option<String>,
}

#[cfg(feature = "postgres")]
async fn connect_store(url: &str) -> Arc<dyn AgentStore> {
    use factory_store_adapters::PostgresStore;

    let pool = match sqlx::PgPool::connect(url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to connect to database: {e}");
            std::process::exit(2);
        }
    };
    let store = PostgresStore::new(pool);
    if let Err(e) = store.ensure_table().await {
        eprintln!("failed to prepare agents table: {e}");
        std::process::exit(2);
    }
    Arc::new(store)
}

#[cfg(not(feature = "postgres"))]
async fn connect_store(_url: &str) -> Arc<dyn AgentStore> {
    eprintln!("built without postgres support; rebuild with `--features postgres`");
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let store: Arc<dyn AgentStore> = match args.database_url.as_deref() {
        Some(url) => connect_store(url).await,
        None => {
            tracing::warn!("no database url configured; serving from in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let app = http::router(AppState { store });

    let listener = tokio::net::TcpListener::bind(&args.http_addr)
        .await
        .expect("failed to bind http listener");
    tracing::info!(addr = %args.http_addr, "agent factory listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("http server crashed");
}
