use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "dock_status", rename_all = "lowercase")]
pub enum DockStatus {
    Ativa,
    Inativa,
}

impl DockStatus {
    pub fn to_str(&self) -> &str {
        match self {
            DockStatus::Ativa => "ativa",
            DockStatus::Inativa => "inativa",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Terminal {
    pub id: uuid::Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Dock {
    pub id: uuid::Uuid,
    pub terminal_id: uuid::Uuid,
    pub number: String,
    pub cargo_type: String,
    pub status: DockStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Dock joined with its terminal name, for scheduling forms and listings.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct DockWithTerminal {
    pub id: uuid::Uuid,
    pub terminal_id: uuid::Uuid,
    pub number: String,
    pub cargo_type: String,
    pub status: DockStatus,
    pub terminal_name: String,
}
