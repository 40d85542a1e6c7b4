use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::facilitymodel::{Dock, DockStatus, DockWithTerminal, Terminal};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SaveTerminalDto {
    #[validate(length(min = 2, max = 100, message = "Nome é obrigatório"))]
    pub name: String,

    #[validate(length(min = 1, message = "Endereço é obrigatório"))]
    pub address: String,

    pub phone: Option<String>,

    /// "HH:MM:SS"
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SaveDockDto {
    pub terminal_id: Uuid,

    #[validate(length(min = 1, max = 10, message = "Número da doca é obrigatório"))]
    pub number: String,

    #[validate(length(min = 1, max = 50, message = "Tipo de carga é obrigatório"))]
    pub cargo_type: String,

    pub status: Option<DockStatus>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct DockQueryDto {
    pub terminal: Option<Uuid>,
    pub status: Option<DockStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TerminalResponseDto {
    pub status: String,
    pub terminal: Terminal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TerminalListResponseDto {
    pub status: String,
    pub terminals: Vec<Terminal>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DockResponseDto {
    pub status: String,
    pub dock: Dock,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DockListResponseDto {
    pub status: String,
    pub docks: Vec<DockWithTerminal>,
    pub results: i64,
}
