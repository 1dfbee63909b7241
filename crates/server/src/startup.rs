use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth::ServerState};
use service::auth::repo::seaorm::{SeaOrmRefreshTokenStore, SeaOrmUserStore};
use service::auth::tokens::{JwtTokenIssuer, TokenConfig};
use service::auth::AuthService;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from the parsed config or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Token settings from the parsed config or env, with a development fallback secret
fn load_token_config(cfg: Option<&AppConfig>) -> TokenConfig {
    let mut auth = cfg.map(|c| c.auth.clone()).unwrap_or_default();
    auth.normalize_from_env();
    if auth.jwt_secret.trim().is_empty() {
        warn!("JWT_SECRET not set; using the development signing key");
        auth.jwt_secret = "dev-secret-change-me".to_string();
    }
    TokenConfig {
        secret: auth.jwt_secret,
        access_ttl_secs: auth.access_ttl_secs,
        refresh_ttl_secs: auth.refresh_ttl_secs,
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // config.toml is optional; env vars fill the gaps when it is absent
    let cfg = AppConfig::load_and_validate().ok();

    // DB connection, pooled per config when one is present
    let db = match cfg.as_ref() {
        Some(cfg) => models::db::connect_with_config(&cfg.database).await?,
        None => models::db::connect().await?,
    };

    // Token issuance wired to the refresh-token blacklist table
    let issuer = Arc::new(JwtTokenIssuer::new(
        load_token_config(cfg.as_ref()),
        Arc::new(SeaOrmRefreshTokenStore { db: db.clone() }),
    ));
    let store = Arc::new(SeaOrmUserStore { db });
    let state = ServerState {
        auth: Arc::new(AuthService::new(store, issuer)),
    };

    // Build router
    let app: Router = routes::build_router(build_cors(), state);

    // Bind and serve
    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting auth server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
