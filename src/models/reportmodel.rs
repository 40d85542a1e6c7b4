use serde::{Deserialize, Serialize};

use crate::models::appointmentmodel::AppointmentStatus;

/// Counters shown on the admin landing screen.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct DashboardStats {
    pub total_appointments: i64,
    pub appointments_today: i64,
    pub pending_appointments: i64,
    pub total_users: i64,
}

/// Counters shown on a user's own landing screen.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct UserStats {
    pub total_appointments: i64,
    pub appointments_today: i64,
    pub confirmed_appointments: i64,
    pub pending_appointments: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TerminalCount {
    pub terminal_name: String,
    pub count: i64,
}

/// Per-dock load: how many appointments and scheduled minutes each dock
/// carries. Docks without appointments appear with zeros.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct DockUtilization {
    pub dock_number: String,
    pub terminal_name: String,
    pub total_appointments: i64,
    pub total_minutes: i64,
}
