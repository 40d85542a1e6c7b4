use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dtos::appointmentdtos::FilterAppointmentDto;
use crate::models::reportmodel::{
    DashboardStats, DockUtilization, StatusCount, TerminalCount, UserStats,
};

#[derive(Serialize, Deserialize, Validate)]
pub struct ReportRangeQueryDto {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponseDto {
    pub status: String,
    pub stats: DashboardStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatsResponseDto {
    pub status: String,
    pub stats: UserStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryReportResponseDto {
    pub status: String,
    pub total_appointments: i64,
    pub appointments_this_month: i64,
    pub occupancy_rate: f64,
    pub by_status: Vec<StatusCount>,
    pub by_terminal: Vec<TerminalCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RangeReportResponseDto {
    pub status: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub appointments: Vec<FilterAppointmentDto>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UtilizationReportResponseDto {
    pub status: String,
    pub docks: Vec<DockUtilization>,
}
