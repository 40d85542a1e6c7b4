use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::dtos::userdtos::CompleteProfileDto;
use crate::models::usermodel::User;

#[async_trait]
pub trait UserExt {
    /// Single lookup entry point keyed by id, email, confirmation token or
    /// reset token. Exactly one key should be provided.
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        verification_token: Option<&str>,
        reset_token: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error>;

    async fn get_user_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        company: T,
        email: T,
        password: T,
        verification_token: T,
        verification_expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error>;

    async fn mark_email_verified(&self, token: &str) -> Result<(), sqlx::Error>;

    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error>;

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error>;

    async fn clear_reset_token(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: &CompleteProfileDto,
    ) -> Result<User, sqlx::Error>;

    /// Promote to the `completo` tier. Idempotent.
    async fn promote_access_level(&self, user_id: Uuid) -> Result<User, sqlx::Error>;

    async fn update_last_access(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    async fn set_active(&self, user_id: Uuid, active: bool) -> Result<User, sqlx::Error>;

    async fn get_admin_emails(&self) -> Result<Vec<String>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        verification_token: Option<&str>,
        reset_token: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        } else if let Some(token) = verification_token {
            user = sqlx::query_as::<_, User>(
                "SELECT * FROM users WHERE verification_token = $1",
            )
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(token) = reset_token {
            user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE reset_token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        }

        Ok(user)
    }

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        company: T,
        email: T,
        password: T,
        verification_token: T,
        verification_expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, company, email, password, verification_token, verification_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name.into())
        .bind(company.into())
        .bind(email.into())
        .bind(password.into())
        .bind(verification_token.into())
        .bind(verification_expires_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_email_verified(&self, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET email_verified = TRUE,
                verification_token = NULL,
                verification_expires_at = NULL,
                updated_at = NOW()
            WHERE verification_token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET verification_token = $2, verification_expires_at = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token = $2, reset_expires_at = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }

    async fn clear_reset_token(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token = NULL, reset_expires_at = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: &CompleteProfileDto,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                phone = COALESCE($2, phone),
                nuit = COALESCE($3, nuit),
                gender = COALESCE($4, gender),
                birth_date = COALESCE($5, birth_date),
                job_title = COALESCE($6, job_title),
                department = COALESCE($7, department),
                company_type = COALESCE($8, company_type),
                company_nuit = COALESCE($9, company_nuit),
                province = COALESCE($10, province),
                city = COALESCE($11, city),
                neighborhood = COALESCE($12, neighborhood),
                full_address = COALESCE($13, full_address),
                alt_phone = COALESCE($14, alt_phone),
                whatsapp = COALESCE($15, whatsapp),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&fields.phone)
        .bind(&fields.nuit)
        .bind(&fields.gender)
        .bind(fields.birth_date)
        .bind(&fields.job_title)
        .bind(&fields.department)
        .bind(&fields.company_type)
        .bind(&fields.company_nuit)
        .bind(&fields.province)
        .bind(&fields.city)
        .bind(&fields.neighborhood)
        .bind(&fields.full_address)
        .bind(&fields.alt_phone)
        .bind(&fields.whatsapp)
        .fetch_one(&self.pool)
        .await
    }

    async fn promote_access_level(&self, user_id: Uuid) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET profile_complete = TRUE, access_level = 'completo', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_last_access(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_access_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_active(&self, user_id: Uuid, active: bool) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(active)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_admin_emails(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT email FROM users WHERE role = 'admin' AND active = TRUE")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(email,)| email).collect())
    }
}
