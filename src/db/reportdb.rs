use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::reportmodel::{
    DashboardStats, DockUtilization, StatusCount, TerminalCount, UserStats,
};

#[async_trait]
pub trait ReportExt {
    async fn get_dashboard_stats(&self) -> Result<DashboardStats, sqlx::Error>;

    async fn get_user_stats(&self, user_id: Uuid) -> Result<UserStats, sqlx::Error>;

    async fn get_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error>;

    async fn get_terminal_counts(&self) -> Result<Vec<TerminalCount>, sqlx::Error>;

    async fn get_total_scheduled_minutes(&self) -> Result<i64, sqlx::Error>;

    async fn count_appointments_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error>;

    async fn get_dock_utilization(&self) -> Result<Vec<DockUtilization>, sqlx::Error>;
}

#[async_trait]
impl ReportExt for DBClient {
    async fn get_dashboard_stats(&self) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM agendamentos) AS total_appointments,
                (SELECT COUNT(*) FROM agendamentos
                  WHERE scheduled_at::date = CURRENT_DATE) AS appointments_today,
                (SELECT COUNT(*) FROM agendamentos
                  WHERE status = 'pendente') AS pending_appointments,
                (SELECT COUNT(*) FROM users WHERE role = 'usuario') AS total_users
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_stats(&self, user_id: Uuid) -> Result<UserStats, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM agendamentos
                  WHERE user_id = $1) AS total_appointments,
                (SELECT COUNT(*) FROM agendamentos
                  WHERE user_id = $1
                    AND scheduled_at::date = CURRENT_DATE) AS appointments_today,
                (SELECT COUNT(*) FROM agendamentos
                  WHERE user_id = $1 AND status = 'confirmado') AS confirmed_appointments,
                (SELECT COUNT(*) FROM agendamentos
                  WHERE user_id = $1 AND status = 'pendente') AS pending_appointments
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM agendamentos GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_terminal_counts(&self) -> Result<Vec<TerminalCount>, sqlx::Error> {
        sqlx::query_as::<_, TerminalCount>(
            r#"
            SELECT t.name AS terminal_name, COUNT(a.id) AS count
            FROM terminais t
            JOIN docas d ON d.terminal_id = t.id
            JOIN agendamentos a ON a.doca_id = d.id
            GROUP BY t.id, t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_total_scheduled_minutes(&self) -> Result<i64, sqlx::Error> {
        let (minutes,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(duration_minutes), 0) FROM agendamentos")
                .fetch_one(&self.pool)
                .await?;

        Ok(minutes)
    }

    async fn count_appointments_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM agendamentos WHERE created_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn get_dock_utilization(&self) -> Result<Vec<DockUtilization>, sqlx::Error> {
        sqlx::query_as::<_, DockUtilization>(
            r#"
            SELECT d.number AS dock_number, t.name AS terminal_name,
                   COUNT(a.id) AS total_appointments,
                   COALESCE(SUM(a.duration_minutes), 0) AS total_minutes
            FROM docas d
            JOIN terminais t ON t.id = d.terminal_id
            LEFT JOIN agendamentos a ON a.doca_id = d.id
            GROUP BY d.id, d.number, t.name
            ORDER BY t.name, d.number
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
