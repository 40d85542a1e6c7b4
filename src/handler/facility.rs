use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::FacilityExt,
    dtos::facilitydtos::{
        DockListResponseDto, DockQueryDto, DockResponseDto, SaveDockDto, SaveTerminalDto,
        TerminalListResponseDto, TerminalResponseDto,
    },
    dtos::userdtos::Response,
    error::HttpError,
    models::facilitymodel::DockStatus,
    AppState,
};

pub async fn get_terminals(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let terminals = app_state
        .db_client
        .get_terminals()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = TerminalListResponseDto {
        status: "success".to_string(),
        results: terminals.len() as i64,
        terminals,
    };

    Ok(Json(response))
}

pub async fn create_terminal(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveTerminalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.closing_time <= body.opening_time {
        return Err(HttpError::bad_request(
            "Horário de fechamento deve ser após o horário de abertura".to_string(),
        ));
    }

    let terminal = app_state
        .db_client
        .save_terminal(
            &body.name,
            &body.address,
            body.phone.as_deref(),
            body.opening_time,
            body.closing_time,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = TerminalResponseDto {
        status: "success".to_string(),
        terminal,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_terminal(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(terminal_id): Path<Uuid>,
    Json(body): Json<SaveTerminalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.closing_time <= body.opening_time {
        return Err(HttpError::bad_request(
            "Horário de fechamento deve ser após o horário de abertura".to_string(),
        ));
    }

    let terminal = app_state
        .db_client
        .update_terminal(
            terminal_id,
            &body.name,
            &body.address,
            body.phone.as_deref(),
            body.opening_time,
            body.closing_time,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Terminal não encontrado".to_string()))?;

    let response = TerminalResponseDto {
        status: "success".to_string(),
        terminal,
    };

    Ok(Json(response))
}

/// Removing a terminal cascades to its docks and their appointments.
pub async fn delete_terminal(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(terminal_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_terminal(terminal_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::not_found("Terminal não encontrado".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Terminal removido com sucesso".to_string(),
    }))
}

pub async fn get_docks(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<DockQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let docks = app_state
        .db_client
        .get_docks(query.terminal, query.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = DockListResponseDto {
        status: "success".to_string(),
        results: docks.len() as i64,
        docks,
    };

    Ok(Json(response))
}

pub async fn create_dock(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveDockDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_terminal(body.terminal_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Terminal não encontrado".to_string()))?;

    let dock = app_state
        .db_client
        .save_dock(
            body.terminal_id,
            &body.number,
            &body.cargo_type,
            body.status.unwrap_or(DockStatus::Ativa),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = DockResponseDto {
        status: "success".to_string(),
        dock,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_dock(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(doca_id): Path<Uuid>,
    Json(body): Json<SaveDockDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_terminal(body.terminal_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Terminal não encontrado".to_string()))?;

    let dock = app_state
        .db_client
        .update_dock(
            doca_id,
            body.terminal_id,
            &body.number,
            &body.cargo_type,
            body.status.unwrap_or(DockStatus::Ativa),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Doca não encontrada".to_string()))?;

    let response = DockResponseDto {
        status: "success".to_string(),
        dock,
    };

    Ok(Json(response))
}

pub async fn delete_dock(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(doca_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_dock(doca_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::not_found("Doca não encontrada".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Doca removida com sucesso".to_string(),
    }))
}
