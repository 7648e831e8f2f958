pub mod app;
pub mod handlers;
pub mod middleware;

use clap::Subcommand;

#[derive(Subcommand, Clone, Debug)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use crate::database::{connection::*, migrations::Migrator, seed_data};
use anyhow::Result;
use sea_orm_migration::prelude::*;
use tracing::info;

pub async fn start_server(port: u16, database_path: &str, cors_origin: Option<&str>) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    // Run migrations
    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    let app = app::create_app(db, cors_origin)?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                       - Health check");
    info!("  /docs                         - Swagger UI documentation");
    info!("  /api/auth/signup              - Register (POST)");
    info!("  /api/auth/login               - Login (POST)");
    info!("  /api/auth/me                  - Current user (GET)");
    info!("  /api/auth/update-profile      - Update profile picture (PUT)");
    info!("  /api/persons                  - Persons (GET, POST, DELETE /:id)");
    info!("  /api/relationships            - Relationships (GET, POST, DELETE /:id)");
    info!("  /api/tree/:root_id            - Rendered family tree (GET)");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

/// Migrate and seed the demo family. Used by `genlink db init`.
pub async fn init_database(database_path: &str) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    Migrator::up(&db, None).await?;
    seed_data::create_example_family(&db).await?;

    info!("Database initialized");
    Ok(())
}
