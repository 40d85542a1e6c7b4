use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{ReportExt, UserExt},
    dtos::reportdtos::UserStatsResponseDto,
    dtos::userdtos::{
        CompleteProfileDto, FilterUserDto, RequestQueryDto, Response, UserActiveUpdateDto,
        UserData, UserListResponseDto, UserPasswordUpdateDto, UserResponseDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::AuthenticatedUser,
    utils::password,
    AppState,
};

pub async fn get_me(
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&authenticated.user),
        },
    };

    Ok(Json(response))
}

pub async fn get_my_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .get_user_stats(authenticated.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserStatsResponseDto {
        status: "success".to_string(),
        stats,
    }))
}

/// Accepts any subset of the profile fields. Once every required field is
/// present the account is promoted to the `completo` tier in the same request.
pub async fn complete_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Json(body): Json<CompleteProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut user = app_state
        .db_client
        .update_profile(authenticated.user.id, &body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !user.profile_complete && user.profile_fields_filled() {
        user = app_state
            .db_client
            .promote_access_level(user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        tracing::info!("user {} promoted to full access", user.email);
    }

    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    };

    Ok(Json(response))
}

pub async fn update_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Json(body): Json<UserPasswordUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let password_matches = password::compare(&body.old_password, &authenticated.user.password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !password_matches {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let hash_password =
        password::hash(&body.new_password).map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(authenticated.user.id, hash_password)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Senha atualizada com sucesso".to_string(),
    }))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let users = app_state
        .db_client
        .get_users(page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let count = app_state
        .db_client
        .get_user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = UserListResponseDto {
        status: "success".to_string(),
        users: FilterUserDto::filter_users(&users),
        results: count,
    };

    Ok(Json(response))
}

pub async fn set_user_active(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UserActiveUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Usuário não encontrado".to_string()))?;

    let user = app_state
        .db_client
        .set_active(user.id, body.active)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "user {} {}",
        user.email,
        if user.active { "reactivated" } else { "deactivated" }
    );

    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    };

    Ok(Json(response))
}
