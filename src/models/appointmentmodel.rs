use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "operation_type", rename_all = "lowercase")]
pub enum OperationType {
    Carga,
    Descarga,
    Ambos,
}

impl OperationType {
    pub fn to_str(&self) -> &str {
        match self {
            OperationType::Carga => "carga",
            OperationType::Descarga => "descarga",
            OperationType::Ambos => "ambos",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pendente,
    Confirmado,
    Rejeitado,
    Cancelado,
}

impl AppointmentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            AppointmentStatus::Pendente => "pendente",
            AppointmentStatus::Confirmado => "confirmado",
            AppointmentStatus::Rejeitado => "rejeitado",
            AppointmentStatus::Cancelado => "cancelado",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Appointment {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub doca_id: uuid::Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub operation_type: OperationType,
    pub cargo_type: Option<String>,
    pub vehicle_plate: String,
    pub driver_name: String,
    pub driver_phone: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub completed: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Cancellation is allowed only while the slot is still in the future and
    /// the appointment has not been resolved.
    pub fn can_be_cancelled(&self, now: DateTime<Utc>) -> bool {
        if self.scheduled_at <= now {
            return false;
        }
        matches!(
            self.status,
            AppointmentStatus::Pendente | AppointmentStatus::Confirmado
        )
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + chrono::Duration::minutes(self.duration_minutes as i64)
    }
}

/// Appointment joined with requester and dock context, as listings and email
/// composers need it.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct AppointmentDetails {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub doca_id: uuid::Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub operation_type: OperationType,
    pub cargo_type: Option<String>,
    pub vehicle_plate: String,
    pub driver_name: String,
    pub driver_phone: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub completed: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_company: String,
    pub dock_number: String,
    pub terminal_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn appointment(status: AppointmentStatus, starts_in: Duration) -> Appointment {
        Appointment {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            doca_id: uuid::Uuid::new_v4(),
            scheduled_at: Utc::now() + starts_in,
            duration_minutes: 60,
            operation_type: OperationType::Carga,
            cargo_type: Some("geral".to_string()),
            vehicle_plate: "ABC1D23".to_string(),
            driver_name: "Pedro Oliveira".to_string(),
            driver_phone: None,
            notes: None,
            status,
            completed: false,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pending_future_appointment_is_cancellable() {
        let appt = appointment(AppointmentStatus::Pendente, Duration::hours(2));
        assert!(appt.can_be_cancelled(Utc::now()));
    }

    #[test]
    fn confirmed_future_appointment_is_cancellable() {
        let appt = appointment(AppointmentStatus::Confirmado, Duration::hours(2));
        assert!(appt.can_be_cancelled(Utc::now()));
    }

    #[test]
    fn past_appointment_is_not_cancellable() {
        let appt = appointment(AppointmentStatus::Confirmado, Duration::hours(-1));
        assert!(!appt.can_be_cancelled(Utc::now()));
    }

    #[test]
    fn resolved_appointments_are_not_cancellable() {
        for status in [AppointmentStatus::Rejeitado, AppointmentStatus::Cancelado] {
            let appt = appointment(status, Duration::hours(2));
            assert!(!appt.can_be_cancelled(Utc::now()));
        }
    }

    #[test]
    fn ends_at_adds_duration() {
        let appt = appointment(AppointmentStatus::Pendente, Duration::hours(1));
        assert_eq!(appt.ends_at() - appt.scheduled_at, Duration::minutes(60));
    }
}
