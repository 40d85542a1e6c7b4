use std::sync::Arc;

use axum::{
    middleware::{self},
    response::IntoResponse,
    routing::{get, patch, post, put},
    Extension, Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{appointments, auth as auth_handler, facility, reports, users},
    middleware::{auth, tier_check, AccessTier},
    AppState,
};

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "success",
        "message": "Sistema JIT de agendamento de docas"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .route("/verify", get(auth_handler::verify_email))
        .route("/forgot-password", post(auth_handler::forgot_password))
        .route("/reset-password", post(auth_handler::reset_password));

    let users_admin_routes = Router::new()
        .route("/", get(users::get_users))
        .route("/:user_id/active", patch(users::set_user_active))
        .route_layer(middleware::from_fn(|req, next| {
            tier_check(req, next, AccessTier::Admin)
        }));

    let users_routes = Router::new()
        .route("/me", get(users::get_me))
        .route("/me/stats", get(users::get_my_stats))
        .route("/complete-profile", put(users::complete_profile))
        .route("/password", put(users::update_password))
        .merge(users_admin_routes)
        .layer(middleware::from_fn(auth));

    let facility_admin_routes = Router::new()
        .route("/terminals", post(facility::create_terminal))
        .route(
            "/terminals/:terminal_id",
            put(facility::update_terminal).delete(facility::delete_terminal),
        )
        .route("/docks", post(facility::create_dock))
        .route(
            "/docks/:doca_id",
            put(facility::update_dock).delete(facility::delete_dock),
        )
        .route_layer(middleware::from_fn(|req, next| {
            tier_check(req, next, AccessTier::Admin)
        }));

    let facility_routes = Router::new()
        .route("/terminals", get(facility::get_terminals))
        .route("/docks", get(facility::get_docks))
        .merge(facility_admin_routes)
        .layer(middleware::from_fn(auth));

    let appointments_admin_routes = Router::new()
        .route("/all", get(appointments::get_appointments))
        .route(
            "/:appointment_id/approve",
            patch(appointments::approve_appointment),
        )
        .route(
            "/:appointment_id/reject",
            patch(appointments::reject_appointment),
        )
        .route_layer(middleware::from_fn(|req, next| {
            tier_check(req, next, AccessTier::Admin)
        }));

    // Creation is open to every authenticated user at the routing level; the
    // service itself rejects accounts below the completo tier.
    let appointments_routes = Router::new()
        .route("/", post(appointments::create_appointment))
        .route("/me", get(appointments::get_my_appointments))
        .route(
            "/:appointment_id/cancel",
            patch(appointments::cancel_appointment),
        )
        .merge(appointments_admin_routes)
        .layer(middleware::from_fn(auth));

    let reports_routes = Router::new()
        .route("/dashboard", get(reports::dashboard))
        .route("/summary", get(reports::summary))
        .route("/appointments", get(reports::appointments_report))
        .route("/utilization", get(reports::dock_utilization))
        .route_layer(middleware::from_fn(|req, next| {
            tier_check(req, next, AccessTier::Admin)
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/api/healthcheck", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", users_routes)
        .nest("/api/facility", facility_routes)
        .nest("/api/appointments", appointments_routes)
        .nest("/api/reports", reports_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
