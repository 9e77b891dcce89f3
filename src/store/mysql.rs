use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row, mysql::MySqlRow};
use tracing::debug;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::model::{
    attendance::{Attendance, AttendanceStatus},
    employee::Employee,
};

/// MySQL-backed [`Store`]. Schema lives in [`crate::db::run_migrations`].
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, employee_id, full_name, email, department, created_at";

const ATTENDANCE_SELECT: &str = r#"
    SELECT a.id, a.employee_ref, e.employee_id, a.date, a.status, a.created_at
    FROM attendance a
    JOIN employees e ON e.id = a.employee_ref
"#;

fn decode_error(column: &str, source: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

fn uuid_column(row: &MySqlRow, column: &str) -> Result<Uuid, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| decode_error(column, e))
}

fn employee_from_row(row: &MySqlRow) -> Result<Employee, sqlx::Error> {
    Ok(Employee {
        id: uuid_column(row, "id")?,
        employee_id: row.try_get("employee_id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        department: row.try_get("department")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn attendance_from_row(row: &MySqlRow) -> Result<Attendance, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Attendance {
        id: uuid_column(row, "id")?,
        employee_ref: uuid_column(row, "employee_ref")?,
        employee_id: row.try_get("employee_id")?,
        date: row.try_get::<NaiveDate, _>("date")?,
        status: status
            .parse::<AttendanceStatus>()
            .map_err(|e| decode_error("status", e))?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl Store for MySqlStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!(
            "SELECT {} FROM employees ORDER BY full_name ASC, created_at ASC, id ASC",
            EMPLOYEE_COLUMNS
        );
        debug!(sql = %sql, "Fetching employees");

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(employee_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_employee(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?", EMPLOYEE_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(employee_from_row).transpose()?)
    }

    async fn find_employee_by_code(
        &self,
        employee_id: &str,
    ) -> Result<Option<Employee>, StoreError> {
        // The column collation is case-insensitive; compare bytes for an exact match.
        let sql = format!(
            "SELECT {} FROM employees WHERE employee_id COLLATE utf8mb4_bin = ?",
            EMPLOYEE_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(employee_from_row).transpose()?)
    }

    async fn employee_id_taken(
        &self,
        employee_id: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let exclude = exclude.map(|id| id.to_string());

        let taken = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM employees
            WHERE LOWER(employee_id) = LOWER(?)
            AND (? IS NULL OR id <> ?)
            "#,
        )
        .bind(employee_id)
        .bind(exclude.as_deref())
        .bind(exclude.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(taken > 0)
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO employees
            (id, employee_id, full_name, email, department, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_employee(&self, id: Uuid) -> Result<bool, StoreError> {
        let id = id.to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM attendance WHERE employee_ref = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn list_attendance(&self, employee: &Employee) -> Result<Vec<Attendance>, StoreError> {
        let sql = format!("{} WHERE a.employee_ref = ? ORDER BY a.date DESC", ATTENDANCE_SELECT);
        debug!(sql = %sql, employee_id = %employee.employee_id, "Fetching attendance");

        let rows = sqlx::query(&sql)
            .bind(employee.id.to_string())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(attendance_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn upsert_attendance(&self, candidate: &Attendance) -> Result<Attendance, StoreError> {
        let employee_ref = candidate.employee_ref.to_string();
        let mut tx = self.pool.begin().await?;

        // UNIQUE (employee_ref, date) turns a second write into an update.
        sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_ref, date, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status)
            "#,
        )
        .bind(candidate.id.to_string())
        .bind(&employee_ref)
        .bind(candidate.date)
        .bind(candidate.status.to_string())
        .bind(candidate.created_at)
        .execute(&mut *tx)
        .await?;

        let sql = format!("{} WHERE a.employee_ref = ? AND a.date = ?", ATTENDANCE_SELECT);
        let row = sqlx::query(&sql)
            .bind(&employee_ref)
            .bind(candidate.date)
            .fetch_one(&mut *tx)
            .await?;
        let stored = attendance_from_row(&row)?;

        tx.commit().await?;
        Ok(stored)
    }
}
