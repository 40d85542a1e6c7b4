use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{AppointmentExt, UserExt},
    dtos::appointmentdtos::{
        AppointmentListResponseDto, AppointmentQueryDto, AppointmentResponseDto,
        CancelAppointmentDto, CreateAppointmentDto, FilterAppointmentDto,
    },
    error::HttpError,
    mail::mails,
    middleware::AuthenticatedUser,
    models::appointmentmodel::AppointmentDetails,
    AppState,
};

/// Post-commit read used only to compose notifications. The triggering
/// operation has already committed, so a failure here is logged and the
/// notification skipped instead of surfacing an error to the caller.
async fn load_details(
    app_state: &Arc<AppState>,
    appointment_id: Uuid,
) -> Option<AppointmentDetails> {
    match app_state
        .db_client
        .get_appointment_details(appointment_id)
        .await
    {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!(
                "skipping notification for appointment {}: could not load details: {}",
                appointment_id,
                e
            );
            None
        }
    }
}

pub async fn create_appointment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Json(body): Json<CreateAppointmentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.scheduled_at <= Utc::now() {
        return Err(HttpError::bad_request(
            "O agendamento deve ser para uma data futura".to_string(),
        ));
    }

    let appointment = app_state
        .appointment_service
        .create(&authenticated.user, &body)
        .await?;

    // Admins review every new request; the notification goes out only after
    // the insert has committed.
    if let Some(details) = load_details(&app_state, appointment.id).await {
        match app_state.db_client.get_admin_emails().await {
            Ok(admin_emails) => {
                let content = mails::new_appointment_admin_email(&details);
                mails::dispatch(app_state.mailer.clone(), admin_emails, content);
            }
            Err(e) => {
                tracing::warn!("skipping admin notification: {}", e);
            }
        }
    }

    let response = AppointmentResponseDto {
        status: "success".to_string(),
        appointment,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_my_appointments(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let appointments = app_state
        .db_client
        .get_user_appointments(authenticated.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let now = Utc::now();
    let appointments: Vec<FilterAppointmentDto> = appointments
        .into_iter()
        .map(|details| FilterAppointmentDto::filter(details, now))
        .collect();

    let response = AppointmentListResponseDto {
        status: "success".to_string(),
        results: appointments.len() as i64,
        appointments,
    };

    Ok(Json(response))
}

pub async fn get_appointments(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<AppointmentQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let appointments = app_state
        .db_client
        .get_appointments(query.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let now = Utc::now();
    let appointments: Vec<FilterAppointmentDto> = appointments
        .into_iter()
        .map(|details| FilterAppointmentDto::filter(details, now))
        .collect();

    let response = AppointmentListResponseDto {
        status: "success".to_string(),
        results: appointments.len() as i64,
        appointments,
    };

    Ok(Json(response))
}

pub async fn approve_appointment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let appointment = app_state.appointment_service.approve(appointment_id).await?;

    if let Some(details) = load_details(&app_state, appointment.id).await {
        let content = mails::appointment_confirmed_email(&details);
        mails::dispatch(
            app_state.mailer.clone(),
            vec![details.user_email.clone()],
            content,
        );
    }

    let response = AppointmentResponseDto {
        status: "success".to_string(),
        appointment,
    };

    Ok(Json(response))
}

pub async fn reject_appointment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let appointment = app_state.appointment_service.reject(appointment_id).await?;

    if let Some(details) = load_details(&app_state, appointment.id).await {
        let content = mails::appointment_rejected_email(&details);
        mails::dispatch(
            app_state.mailer.clone(),
            vec![details.user_email.clone()],
            content,
        );
    }

    let response = AppointmentResponseDto {
        status: "success".to_string(),
        appointment,
    };

    Ok(Json(response))
}

pub async fn cancel_appointment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(appointment_id): Path<Uuid>,
    Json(body): Json<CancelAppointmentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let appointment = app_state
        .appointment_service
        .cancel(appointment_id, &authenticated.user, &body.reason)
        .await?;

    if let Some(details) = load_details(&app_state, appointment.id).await {
        let content = mails::appointment_cancelled_email(&details);
        mails::dispatch(
            app_state.mailer.clone(),
            vec![details.user_email.clone()],
            content,
        );
    }

    let response = AppointmentResponseDto {
        status: "success".to_string(),
        appointment,
    };

    Ok(Json(response))
}
