use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use anyhow::{Context, Result};
use coursebook::{CourseStore, MemoryCourseStore, Settings};
use coursebook_postgres::PgCourseStore;
use sqlx::PgPool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coursebook_server::{http, Application};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    match settings.database_url.clone() {
        Some(url) => {
            let pool = PgPool::connect(&url)
                .await
                .context("failed to connect to the database")?;
            let store = PgCourseStore::try_new(pool).await?;
            serve(store, settings).await
        }
        None => {
            warn!("DATABASE_URL is not set, courses are kept in memory");
            serve(MemoryCourseStore::new(), settings).await
        }
    }
}

async fn serve<S: CourseStore + 'static>(store: S, settings: Settings) -> Result<()> {
    let bind = settings.bind.clone();
    let app = Data::new(Application::new(store, settings));

    info!(%bind, "coursebook listening");
    HttpServer::new(move || {
        App::new()
            .app_data(app.clone())
            .wrap(Logger::default())
            .configure(http::routes::<S>)
    })
    .bind(&bind)
    .with_context(|| format!("failed to bind {bind}"))?
    .run()
    .await?;
    Ok(())
}
