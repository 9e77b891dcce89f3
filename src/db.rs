use anyhow::{Context, Result};
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};
use tracing::info;

use crate::config::Config;

pub async fn init_db(config: &Config) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Creates the schema if it is missing. Safe to run on every start.
pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    info!("Running database migrations...");

    create_employees_table(pool).await?;
    create_attendance_table(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

async fn create_employees_table(pool: &MySqlPool) -> Result<()> {
    // The case-insensitive collation makes the UNIQUE key reject `E1` vs `e1`.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id CHAR(36) NOT NULL PRIMARY KEY,
            employee_id VARCHAR(64) NOT NULL,
            full_name VARCHAR(255) NOT NULL,
            email VARCHAR(254) NOT NULL,
            department VARCHAR(255) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            UNIQUE KEY uq_employees_employee_id (employee_id),
            KEY ix_employees_full_name (full_name)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create employees table")?;

    Ok(())
}

async fn create_attendance_table(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id CHAR(36) NOT NULL PRIMARY KEY,
            employee_ref CHAR(36) NOT NULL,
            date DATE NOT NULL,
            status VARCHAR(16) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            UNIQUE KEY uq_attendance_employee_date (employee_ref, date),
            CONSTRAINT fk_attendance_employee FOREIGN KEY (employee_ref)
                REFERENCES employees (id) ON DELETE CASCADE,
            CONSTRAINT ck_attendance_status CHECK (status IN ('Present', 'Absent'))
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create attendance table")?;

    Ok(())
}
