use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

use crate::{db::db::DBClient, utils::password};

/// Development bootstrap: two known accounts and a small facility layout so a
/// fresh database is usable immediately. Every step is idempotent.
pub async fn run(db_client: &DBClient) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    seed_users(db_client).await?;
    seed_facility(db_client).await?;

    tracing::info!("database seed finished");

    Ok(())
}

async fn seed_users(db_client: &DBClient) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let admin_password = password::hash("admin123").map_err(|e| e.to_string())?;

    sqlx::query(
        r#"
        INSERT INTO users
            (name, company, email, password, role, email_verified,
             profile_complete, access_level)
        VALUES ($1, $2, $3, $4, 'admin', TRUE, TRUE, 'completo')
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind("Administrador")
    .bind("Sistema JIT")
    .bind("admin@jit.com")
    .bind(admin_password)
    .execute(&db_client.pool)
    .await?;

    let user_password = password::hash("user123").map_err(|e| e.to_string())?;

    sqlx::query(
        r#"
        INSERT INTO users
            (name, company, email, password, role, email_verified,
             profile_complete, access_level,
             phone, nuit, gender, birth_date, job_title, department,
             company_type, company_nuit, province, city, neighborhood,
             full_address)
        VALUES ($1, $2, $3, $4, 'usuario', TRUE, TRUE, 'completo',
                $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind("Joao Silva")
    .bind("Transportes Silva Ltda")
    .bind("usuario@jit.com")
    .bind(user_password)
    .bind("+258841234567")
    .bind("123456789")
    .bind("masculino")
    .bind(NaiveDate::from_ymd_opt(1990, 5, 12).unwrap())
    .bind("Gestor de Logística")
    .bind("Operações")
    .bind("Transportadora")
    .bind("987654321")
    .bind("Maputo")
    .bind("Maputo")
    .bind("Central")
    .bind("Av. 25 de Setembro, 1234")
    .execute(&db_client.pool)
    .await?;

    Ok(())
}

async fn seed_facility(
    db_client: &DBClient,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM terminais")
        .fetch_one(&db_client.pool)
        .await?;
    let count: i64 = row.get("count");

    if count > 0 {
        return Ok(());
    }

    let terminals = [
        ("Terminal Centro", "Av. da Marginal, 100, Maputo"),
        ("Terminal Norte", "Estrada Nacional 1, km 12, Marracuene"),
    ];

    for (name, address) in terminals {
        let row = sqlx::query(
            r#"
            INSERT INTO terminais (name, address, opening_time, closing_time)
            VALUES ($1, $2, '06:00:00', '18:00:00')
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(address)
        .fetch_one(&db_client.pool)
        .await?;
        let terminal_id: Uuid = row.get("id");

        for (number, cargo_type) in [
            ("D01", "carga geral"),
            ("D02", "contentores"),
            ("D03", "granel"),
        ] {
            sqlx::query(
                r#"
                INSERT INTO docas (terminal_id, number, cargo_type)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(terminal_id)
            .bind(number)
            .bind(cargo_type)
            .execute(&db_client.pool)
            .await?;
        }
    }

    tracing::info!("seeded {} terminal(s) with demo docks", terminals.len());

    Ok(())
}
