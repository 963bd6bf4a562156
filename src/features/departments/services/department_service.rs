use serde_json::json;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::audit_logs::models::{AuditAction, CreateAuditLog};
use crate::features::audit_logs::AuditLogService;
use crate::features::departments::models::{CreateDepartment, Department};

const DEPARTMENT_COLUMNS: &str = "id, name, description, contact_email, created_at";

/// Service for department operations
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All departments, alphabetical
    pub async fn list(&self) -> Result<Vec<Department>> {
        let sql = format!("SELECT {} FROM departments ORDER BY name", DEPARTMENT_COLUMNS);

        sqlx::query_as::<_, Department>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list departments: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn create(&self, data: &CreateDepartment, actor_id: &str) -> Result<Department> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let sql = format!(
            "INSERT INTO departments (name, description, contact_email) \
             VALUES ($1, $2, $3) RETURNING {}",
            DEPARTMENT_COLUMNS
        );
        let department = sqlx::query_as::<_, Department>(&sql)
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.contact_email)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match AppError::from_write(e) {
                AppError::Conflict(_) => {
                    AppError::Conflict(format!("Department '{}' already exists", data.name))
                }
                other => {
                    tracing::error!("Failed to create department: {:?}", other);
                    other
                }
            })?;

        let entry = CreateAuditLog {
            actor_id: actor_id.to_string(),
            issue_id: None,
            action: AuditAction::DepartmentCreated,
            details: json!({ "department_id": department.id, "name": department.name }),
        };
        AuditLogService::record(&mut *tx, &entry).await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Created department {} ({})", department.name, department.id);

        Ok(department)
    }
}
