use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::appointmentdtos::CreateAppointmentDto,
    models::{
        appointmentmodel::{Appointment, AppointmentStatus},
        facilitymodel::{Dock, DockStatus},
        usermodel::User,
    },
    service::{error::ServiceError, trust_service},
};

/// Conflict rule carried over unchanged from the original system: a new
/// request collides when an active appointment on the same dock starts inside
/// `[new_start - new_duration, new_start + new_duration]`. This symmetric
/// window around the start instant is wider than a true interval-intersection
/// test; it is kept deliberately because downstream behavior (and the
/// operators' expectations) were built around it.
///
/// The bounds returned here are the ones bound into the conflict query, so
/// the tested rule is the shipped rule.
pub fn conflict_window_bounds(
    new_start: DateTime<Utc>,
    new_duration_minutes: i32,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let window = Duration::minutes(new_duration_minutes as i64);
    (new_start - window, new_start + window)
}

pub fn in_conflict_window(
    new_start: DateTime<Utc>,
    new_duration_minutes: i32,
    existing_start: DateTime<Utc>,
) -> bool {
    let (window_start, window_end) = conflict_window_bounds(new_start, new_duration_minutes);
    existing_start >= window_start && existing_start <= window_end
}

#[derive(Debug, Clone)]
pub struct AppointmentService {
    db_client: Arc<DBClient>,
}

impl AppointmentService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Creates a `pendente` appointment for the requester. The dock row is
    /// locked for the duration of the check-then-insert so two concurrent
    /// requests for the same dock cannot both pass the conflict check.
    pub async fn create(
        &self,
        requester: &User,
        body: &CreateAppointmentDto,
    ) -> Result<Appointment, ServiceError> {
        if !requester.can_schedule() {
            return Err(ServiceError::AccessDenied);
        }

        let mut tx = self.db_client.pool.begin().await?;

        let dock = sqlx::query_as::<_, Dock>("SELECT * FROM docas WHERE id = $1 FOR UPDATE")
            .bind(body.doca_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if dock.status != DockStatus::Ativa {
            return Err(ServiceError::DockUnavailable);
        }

        let (window_start, window_end) =
            conflict_window_bounds(body.scheduled_at, body.duration_minutes);
        let (conflict,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM agendamentos
                WHERE doca_id = $1
                  AND status IN ('pendente', 'confirmado')
                  AND scheduled_at BETWEEN $2 AND $3
            )
            "#,
        )
        .bind(body.doca_id)
        .bind(window_start)
        .bind(window_end)
        .fetch_one(&mut *tx)
        .await?;

        if conflict {
            return Err(ServiceError::SchedulingConflict);
        }

        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO agendamentos
                (user_id, doca_id, scheduled_at, duration_minutes, operation_type,
                 cargo_type, vehicle_plate, driver_name, driver_phone, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(requester.id)
        .bind(body.doca_id)
        .bind(body.scheduled_at)
        .bind(body.duration_minutes)
        .bind(body.operation_type)
        .bind(&body.cargo_type)
        .bind(body.vehicle_plate.to_uppercase())
        .bind(&body.driver_name)
        .bind(&body.driver_phone)
        .bind(&body.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "appointment {} created for dock {} at {}",
            appointment.id,
            appointment.doca_id,
            appointment.scheduled_at
        );

        Ok(appointment)
    }

    pub async fn approve(&self, appointment_id: Uuid) -> Result<Appointment, ServiceError> {
        self.resolve(appointment_id, AppointmentStatus::Confirmado)
            .await
    }

    pub async fn reject(&self, appointment_id: Uuid) -> Result<Appointment, ServiceError> {
        self.resolve(appointment_id, AppointmentStatus::Rejeitado)
            .await
    }

    /// pendente -> confirmado|rejeitado. Anything else is an explicit
    /// InvalidTransition rather than a silent re-resolution.
    async fn resolve(
        &self,
        appointment_id: Uuid,
        to: AppointmentStatus,
    ) -> Result<Appointment, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM agendamentos WHERE id = $1 FOR UPDATE",
        )
        .bind(appointment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::AppointmentNotFound(appointment_id))?;

        if appointment.status != AppointmentStatus::Pendente {
            return Err(ServiceError::InvalidTransition(appointment_id));
        }

        let updated = sqlx::query_as::<_, Appointment>(
            "UPDATE agendamentos SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(appointment_id)
        .bind(to)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("appointment {} -> {}", appointment_id, to.to_str());

        Ok(updated)
    }

    /// Owner-only cancellation, allowed while the slot is in the future and
    /// the appointment is still pendente/confirmado. The -5 trust penalty and
    /// the cancellation counter commit atomically with the status change.
    pub async fn cancel(
        &self,
        appointment_id: Uuid,
        requester: &User,
        reason: &str,
    ) -> Result<Appointment, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM agendamentos WHERE id = $1 FOR UPDATE",
        )
        .bind(appointment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::AppointmentNotFound(appointment_id))?;

        if appointment.user_id != requester.id {
            return Err(ServiceError::Forbidden);
        }

        if !appointment.can_be_cancelled(Utc::now()) {
            return Err(ServiceError::NotCancellable);
        }

        let updated = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE agendamentos
            SET status = 'cancelado', cancellation_reason = $2, cancelled_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(appointment_id)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        trust_service::penalize_cancellation(&mut tx, requester.id).await?;

        tx.commit().await?;

        tracing::info!(
            "appointment {} cancelled by {}: {}",
            appointment_id,
            requester.email,
            reason
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 4, hour, minute, 0).unwrap()
    }

    #[test]
    fn overlapping_start_conflicts() {
        // Existing confirmado at 09:00 (60 min); new request 09:30 for 30 min.
        assert!(in_conflict_window(at(9, 30), 30, at(9, 0)));
    }

    #[test]
    fn distant_start_is_free() {
        // Same dock, 12:00 for 30 min against the 09:00 appointment.
        assert!(!in_conflict_window(at(12, 0), 30, at(9, 0)));
    }

    #[test]
    fn window_is_symmetric_around_new_start() {
        assert!(in_conflict_window(at(10, 0), 60, at(9, 0)));
        assert!(in_conflict_window(at(10, 0), 60, at(11, 0)));
        assert!(!in_conflict_window(at(10, 0), 60, at(8, 59)));
        assert!(!in_conflict_window(at(10, 0), 60, at(11, 1)));
    }

    #[test]
    fn boundary_instants_conflict() {
        // BETWEEN is inclusive on both ends.
        assert!(in_conflict_window(at(10, 0), 30, at(9, 30)));
        assert!(in_conflict_window(at(10, 0), 30, at(10, 30)));
    }

    #[test]
    fn window_scales_with_requested_duration() {
        assert!(!in_conflict_window(at(10, 0), 15, at(9, 30)));
        assert!(in_conflict_window(at(10, 0), 45, at(9, 30)));
    }

    #[test]
    fn query_bounds_match_the_predicate() {
        let (window_start, window_end) = conflict_window_bounds(at(10, 0), 45);

        assert_eq!(window_start, at(9, 15));
        assert_eq!(window_end, at(10, 45));
        assert!(in_conflict_window(at(10, 0), 45, window_start));
        assert!(in_conflict_window(at(10, 0), 45, window_end));
        assert!(!in_conflict_window(
            at(10, 0),
            45,
            window_start - Duration::minutes(1)
        ));
    }
}
