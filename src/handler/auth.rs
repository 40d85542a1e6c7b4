use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    db::UserExt,
    dtos::userdtos::{
        ForgotPasswordRequestDto, LoginUserDto, RegisterUserDto, ResetPasswordRequestDto,
        Response, UserLoginResponseDto, VerifyEmailQueryDto,
    },
    error::{ErrorMessage, HttpError},
    mail::mails,
    utils::{password, token},
    AppState,
};

const VERIFICATION_TOKEN_HOURS: i64 = 24;
const RESET_TOKEN_HOURS: i64 = 1;

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let hash_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let verification_token = token::generate_account_token();
    let expires_at = Utc::now() + Duration::hours(VERIFICATION_TOKEN_HOURS);

    let result = app_state
        .db_client
        .save_user(
            body.name.clone(),
            body.company.clone(),
            body.email.clone(),
            hash_password,
            verification_token.clone(),
            expires_at,
        )
        .await;

    match result {
        Ok(user) => {
            let content = mails::account_confirmation_email(
                &user.name,
                &app_state.env.app_url,
                &verification_token,
            );
            mails::dispatch(app_state.mailer.clone(), vec![user.email.clone()], content);

            Ok((
                StatusCode::CREATED,
                Json(Response {
                    status: "success",
                    message:
                        "Cadastro realizado! Verifique seu email para confirmar a conta."
                            .to_string(),
                }),
            ))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(HttpError::conflict(ErrorMessage::EmailExist.to_string()))
        }
        Err(e) => Err(HttpError::server_error(e.to_string())),
    }
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matches = password::compare(&body.password, &user.password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !password_matches {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    // Unconfirmed accounts get the same answer as a wrong password so the
    // login endpoint does not reveal which emails are registered.
    if !user.email_verified {
        tracing::debug!("login attempt on unconfirmed account {}", user.email);
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    if !user.active {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_last_access(user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(time::Duration::minutes(app_state.env.jwt_maxage))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Erro ao montar o cookie de sessão"))?,
    );

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
    });

    Ok((headers, response))
}

pub async fn verify_email(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<VerifyEmailQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, None, Some(&query.token), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let expired = user
        .verification_expires_at
        .map(|expires_at| expires_at < Utc::now())
        .unwrap_or(true);

    if expired {
        return Err(HttpError::unauthorized(
            ErrorMessage::InvalidToken.to_string(),
        ));
    }

    app_state
        .db_client
        .mark_email_verified(&query.token)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Email confirmado com sucesso! Você já pode fazer login.".to_string(),
    }))
}

pub async fn forgot_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ForgotPasswordRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(user) = user.filter(|u| u.active) {
        let reset_token = token::generate_account_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_HOURS);

        app_state
            .db_client
            .set_reset_token(user.id, &reset_token, expires_at)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let content =
            mails::password_reset_email(&user.name, &app_state.env.app_url, &reset_token);
        mails::dispatch(app_state.mailer.clone(), vec![user.email.clone()], content);
    }

    // Same response either way; unknown emails are not distinguishable here.
    Ok(Json(Response {
        status: "success",
        message: "Se o email estiver cadastrado, você receberá as instruções de recuperação."
            .to_string(),
    }))
}

pub async fn reset_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ResetPasswordRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, None, None, Some(&body.token))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let expired = user
        .reset_expires_at
        .map(|expires_at| expires_at < Utc::now())
        .unwrap_or(true);

    if expired {
        return Err(HttpError::unauthorized(
            ErrorMessage::InvalidToken.to_string(),
        ));
    }

    let hash_password =
        password::hash(&body.new_password).map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(user.id, hash_password)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .clear_reset_token(user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Senha redefinida com sucesso. Faça login com sua nova senha.".to_string(),
    }))
}
