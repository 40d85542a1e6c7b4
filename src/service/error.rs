use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Complete o seu perfil para fazer agendamentos")]
    AccessDenied,

    #[error("Esta doca não está ativa")]
    DockUnavailable,

    #[error("Já existe um agendamento para esta doca neste horário")]
    SchedulingConflict,

    #[error("Você não tem permissão para acessar este agendamento")]
    Forbidden,

    #[error("Este agendamento não pode ser cancelado")]
    NotCancellable,

    #[error("Agendamento {0} não encontrado")]
    AppointmentNotFound(Uuid),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Agendamento {0} não está pendente")]
    InvalidTransition(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::SchedulingConflict => StatusCode::CONFLICT,

            ServiceError::AccessDenied | ServiceError::Forbidden => StatusCode::FORBIDDEN,

            ServiceError::DockUnavailable
            | ServiceError::NotCancellable
            | ServiceError::InvalidTransition(_) => StatusCode::BAD_REQUEST,

            ServiceError::AppointmentNotFound(_) | ServiceError::NotFound => {
                StatusCode::NOT_FOUND
            }

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        let message = match &error {
            // Never leak SQL details to the client.
            ServiceError::Database(_) => "Erro interno do servidor".to_string(),
            other => other.to_string(),
        };

        if let ServiceError::Database(ref e) = error {
            tracing::error!("database error: {}", e);
        }

        HttpError::new(message, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            ServiceError::AccessDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::SchedulingConflict.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::DockUnavailable.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ServiceError::NotCancellable.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::InvalidTransition(Uuid::nil()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = ServiceError::Database(sqlx::Error::RowNotFound);
        let http: HttpError = err.into();
        assert_eq!(http.message, "Erro interno do servidor");
    }
}
