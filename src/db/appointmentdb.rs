use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::appointmentmodel::{AppointmentDetails, AppointmentStatus};

const DETAILS_SELECT: &str = r#"
    SELECT a.id, a.user_id, a.doca_id, a.scheduled_at, a.duration_minutes,
           a.operation_type, a.cargo_type, a.vehicle_plate, a.driver_name,
           a.driver_phone, a.notes, a.status, a.completed, a.cancelled_at,
           a.cancellation_reason, a.created_at,
           u.name AS user_name, u.email AS user_email, u.company AS user_company,
           d.number AS dock_number, t.name AS terminal_name
    FROM agendamentos a
    JOIN users u ON u.id = a.user_id
    JOIN docas d ON d.id = a.doca_id
    JOIN terminais t ON t.id = d.terminal_id
"#;

#[async_trait]
pub trait AppointmentExt {
    async fn get_appointment_details(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<AppointmentDetails>, sqlx::Error>;

    async fn get_user_appointments(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error>;

    async fn get_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error>;

    /// Half-open range over the scheduled instant, newest first.
    async fn get_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error>;
}

#[async_trait]
impl AppointmentExt for DBClient {
    async fn get_appointment_details(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<AppointmentDetails>, sqlx::Error> {
        let query = format!("{DETAILS_SELECT} WHERE a.id = $1");

        sqlx::query_as::<_, AppointmentDetails>(&query)
            .bind(appointment_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_appointments(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
        let query = format!("{DETAILS_SELECT} WHERE a.user_id = $1 ORDER BY a.scheduled_at DESC");

        sqlx::query_as::<_, AppointmentDetails>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
        let query = format!(
            "{DETAILS_SELECT} WHERE ($1::appointment_status IS NULL OR a.status = $1) \
             ORDER BY a.scheduled_at ASC"
        );

        sqlx::query_as::<_, AppointmentDetails>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
        let query = format!(
            "{DETAILS_SELECT} WHERE a.scheduled_at >= $1 AND a.scheduled_at < $2 \
             ORDER BY a.scheduled_at DESC"
        );

        sqlx::query_as::<_, AppointmentDetails>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
    }
}
