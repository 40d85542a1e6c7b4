use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::appointmentmodel::{
    Appointment, AppointmentDetails, AppointmentStatus, OperationType,
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentDto {
    pub doca_id: Uuid,

    pub scheduled_at: DateTime<Utc>,

    #[validate(range(min = 15, max = 480, message = "Duração deve ser entre 15 e 480 minutos"))]
    pub duration_minutes: i32,

    pub operation_type: OperationType,

    #[validate(length(min = 1, max = 50))]
    pub cargo_type: Option<String>,

    #[validate(length(min = 7, max = 8, message = "Placa do veículo inválida"))]
    pub vehicle_plate: String,

    #[validate(length(min = 1, max = 100, message = "Nome do motorista é obrigatório"))]
    pub driver_name: String,

    #[validate(length(min = 9, max = 20, message = "Telefone inválido"))]
    pub driver_phone: Option<String>,

    pub notes: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentDto {
    #[validate(length(min = 1, message = "Motivo do cancelamento é obrigatório"))]
    pub reason: String,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct AppointmentQueryDto {
    pub status: Option<AppointmentStatus>,
}

/// Listing row: joined appointment plus whether the requester may still
/// cancel it, mirroring what the scheduling screens need.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterAppointmentDto {
    #[serde(flatten)]
    pub appointment: AppointmentDetails,
    pub can_cancel: bool,
}

impl FilterAppointmentDto {
    pub fn filter(details: AppointmentDetails, now: DateTime<Utc>) -> Self {
        let can_cancel = details.scheduled_at > now
            && matches!(
                details.status,
                AppointmentStatus::Pendente | AppointmentStatus::Confirmado
            );

        FilterAppointmentDto {
            appointment: details,
            can_cancel,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentResponseDto {
    pub status: String,
    pub appointment: Appointment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentListResponseDto {
    pub status: String,
    pub appointments: Vec<FilterAppointmentDto>,
    pub results: i64,
}
