use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::audit_logs::models::{AuditAction, CreateAuditLog};
use crate::features::audit_logs::AuditLogService;
use crate::features::departments::dtos::StaffListQuery;
use crate::features::departments::models::{CreateStaff, Staff};

const STAFF_COLUMNS: &str =
    "id, department_id, name, email, phone, role, is_active, created_at";

/// Service for staff operations
pub struct StaffService {
    pool: PgPool,
}

impl StaffService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &StaffListQuery) -> Result<Vec<Staff>> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM staff WHERE TRUE", STAFF_COLUMNS));
        if let Some(department_id) = query.department_id {
            qb.push(" AND department_id = ").push_bind(department_id);
        }
        if !query.include_inactive {
            qb.push(" AND is_active");
        }
        qb.push(" ORDER BY name");

        qb.build_query_as::<Staff>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list staff: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn create(&self, data: &CreateStaff, actor_id: &str) -> Result<Staff> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let sql = format!(
            "INSERT INTO staff (department_id, name, email, phone, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            STAFF_COLUMNS
        );
        let staff = sqlx::query_as::<_, Staff>(&sql)
            .bind(data.department_id)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.role)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match AppError::from_write(e) {
                AppError::BadRequest(_) => AppError::BadRequest(format!(
                    "Department {} does not exist",
                    data.department_id
                )),
                other => {
                    tracing::error!("Failed to create staff: {:?}", other);
                    other
                }
            })?;

        let entry = CreateAuditLog {
            actor_id: actor_id.to_string(),
            issue_id: None,
            action: AuditAction::StaffCreated,
            details: json!({
                "staff_id": staff.id,
                "department_id": staff.department_id,
                "name": staff.name,
            }),
        };
        AuditLogService::record(&mut *tx, &entry).await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Added staff {} to department {}",
            staff.id,
            staff.department_id
        );

        Ok(staff)
    }
}
