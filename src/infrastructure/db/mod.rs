use std::time::Duration;

use sqlx::{Pool, Postgres};

pub mod repositories;

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
