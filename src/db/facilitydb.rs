use async_trait::async_trait;
use chrono::NaiveTime;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::facilitymodel::{Dock, DockStatus, DockWithTerminal, Terminal};

#[async_trait]
pub trait FacilityExt {
    async fn save_terminal(
        &self,
        name: &str,
        address: &str,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
    ) -> Result<Terminal, sqlx::Error>;

    async fn get_terminal(&self, terminal_id: Uuid) -> Result<Option<Terminal>, sqlx::Error>;

    async fn get_terminals(&self) -> Result<Vec<Terminal>, sqlx::Error>;

    async fn update_terminal(
        &self,
        terminal_id: Uuid,
        name: &str,
        address: &str,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
    ) -> Result<Option<Terminal>, sqlx::Error>;

    /// Cascades to the terminal's docks and their appointments.
    async fn delete_terminal(&self, terminal_id: Uuid) -> Result<bool, sqlx::Error>;

    async fn save_dock(
        &self,
        terminal_id: Uuid,
        number: &str,
        cargo_type: &str,
        status: DockStatus,
    ) -> Result<Dock, sqlx::Error>;

    async fn get_dock(&self, doca_id: Uuid) -> Result<Option<Dock>, sqlx::Error>;

    async fn get_docks(
        &self,
        terminal_id: Option<Uuid>,
        status: Option<DockStatus>,
    ) -> Result<Vec<DockWithTerminal>, sqlx::Error>;

    async fn update_dock(
        &self,
        doca_id: Uuid,
        terminal_id: Uuid,
        number: &str,
        cargo_type: &str,
        status: DockStatus,
    ) -> Result<Option<Dock>, sqlx::Error>;

    async fn delete_dock(&self, doca_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl FacilityExt for DBClient {
    async fn save_terminal(
        &self,
        name: &str,
        address: &str,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
    ) -> Result<Terminal, sqlx::Error> {
        sqlx::query_as::<_, Terminal>(
            r#"
            INSERT INTO terminais (name, address, phone, opening_time, closing_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(opening_time)
        .bind(closing_time)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_terminal(&self, terminal_id: Uuid) -> Result<Option<Terminal>, sqlx::Error> {
        sqlx::query_as::<_, Terminal>("SELECT * FROM terminais WHERE id = $1")
            .bind(terminal_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_terminals(&self) -> Result<Vec<Terminal>, sqlx::Error> {
        sqlx::query_as::<_, Terminal>("SELECT * FROM terminais ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_terminal(
        &self,
        terminal_id: Uuid,
        name: &str,
        address: &str,
        phone: Option<&str>,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
    ) -> Result<Option<Terminal>, sqlx::Error> {
        sqlx::query_as::<_, Terminal>(
            r#"
            UPDATE terminais
            SET name = $2, address = $3, phone = $4, opening_time = $5, closing_time = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(terminal_id)
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(opening_time)
        .bind(closing_time)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_terminal(&self, terminal_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM terminais WHERE id = $1")
            .bind(terminal_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_dock(
        &self,
        terminal_id: Uuid,
        number: &str,
        cargo_type: &str,
        status: DockStatus,
    ) -> Result<Dock, sqlx::Error> {
        sqlx::query_as::<_, Dock>(
            r#"
            INSERT INTO docas (terminal_id, number, cargo_type, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(terminal_id)
        .bind(number)
        .bind(cargo_type)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_dock(&self, doca_id: Uuid) -> Result<Option<Dock>, sqlx::Error> {
        sqlx::query_as::<_, Dock>("SELECT * FROM docas WHERE id = $1")
            .bind(doca_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_docks(
        &self,
        terminal_id: Option<Uuid>,
        status: Option<DockStatus>,
    ) -> Result<Vec<DockWithTerminal>, sqlx::Error> {
        sqlx::query_as::<_, DockWithTerminal>(
            r#"
            SELECT d.id, d.terminal_id, d.number, d.cargo_type, d.status,
                   t.name AS terminal_name
            FROM docas d
            JOIN terminais t ON t.id = d.terminal_id
            WHERE ($1::uuid IS NULL OR d.terminal_id = $1)
              AND ($2::dock_status IS NULL OR d.status = $2)
            ORDER BY t.name, d.number
            "#,
        )
        .bind(terminal_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_dock(
        &self,
        doca_id: Uuid,
        terminal_id: Uuid,
        number: &str,
        cargo_type: &str,
        status: DockStatus,
    ) -> Result<Option<Dock>, sqlx::Error> {
        sqlx::query_as::<_, Dock>(
            r#"
            UPDATE docas
            SET terminal_id = $2, number = $3, cargo_type = $4, status = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(doca_id)
        .bind(terminal_id)
        .bind(number)
        .bind(cargo_type)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_dock(&self, doca_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM docas WHERE id = $1")
            .bind(doca_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
