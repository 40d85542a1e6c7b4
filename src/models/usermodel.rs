use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Usuario,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Usuario => "usuario",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "access_level", rename_all = "lowercase")]
pub enum AccessLevel {
    Limitado,
    Completo,
}

impl AccessLevel {
    pub fn to_str(&self) -> &str {
        match self {
            AccessLevel::Limitado => "limitado",
            AccessLevel::Completo => "completo",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    pub password: String,
    pub name: String,
    pub company: String,
    pub role: UserRole,

    pub email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    pub reset_expires_at: Option<DateTime<Utc>>,

    pub phone_verified: bool,
    pub nuit_verified: bool,
    pub company_verified: bool,
    pub trust_score: i32,
    pub completed_count: i32,
    pub cancelled_count: i32,

    pub profile_complete: bool,
    pub access_level: AccessLevel,
    pub active: bool,

    pub phone: Option<String>,
    pub nuit: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_type: Option<String>,
    pub company_nuit: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub full_address: Option<String>,
    pub alt_phone: Option<String>,
    pub whatsapp: Option<String>,

    pub last_access_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Full access means the profile was completed and the tier was promoted.
    pub fn has_full_access(&self) -> bool {
        self.access_level == AccessLevel::Completo && self.profile_complete
    }

    pub fn can_schedule(&self) -> bool {
        self.has_full_access() && self.active
    }

    /// The twelve profile fields that gate the `completo` tier.
    pub fn required_profile_fields(&self) -> [Option<&str>; 12] {
        [
            self.phone.as_deref(),
            self.nuit.as_deref(),
            self.gender.as_deref(),
            self.birth_date.as_ref().map(|_| "set"),
            self.job_title.as_deref(),
            self.department.as_deref(),
            self.company_type.as_deref(),
            self.company_nuit.as_deref(),
            self.province.as_deref(),
            self.city.as_deref(),
            self.neighborhood.as_deref(),
            self.full_address.as_deref(),
        ]
    }

    pub fn profile_fields_filled(&self) -> bool {
        self.required_profile_fields()
            .iter()
            .all(|field| matches!(field, Some(value) if !value.trim().is_empty()))
    }

    /// Verification ladder: email, phone, NUIT, company (0-4).
    pub fn verification_level(&self) -> u8 {
        [
            self.email_verified,
            self.phone_verified,
            self.nuit_verified,
            self.company_verified,
        ]
        .iter()
        .filter(|v| **v)
        .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn base_user() -> User {
        User {
            id: uuid::Uuid::new_v4(),
            email: "maria@empresa.com".to_string(),
            password: "hash".to_string(),
            name: "Maria Santos".to_string(),
            company: "Logistica Santos ME".to_string(),
            role: UserRole::Usuario,
            email_verified: true,
            verification_token: None,
            verification_expires_at: None,
            reset_token: None,
            reset_expires_at: None,
            phone_verified: false,
            nuit_verified: false,
            company_verified: false,
            trust_score: 100,
            completed_count: 0,
            cancelled_count: 0,
            profile_complete: false,
            access_level: AccessLevel::Limitado,
            active: true,
            phone: None,
            nuit: None,
            gender: None,
            birth_date: None,
            job_title: None,
            department: None,
            company_type: None,
            company_nuit: None,
            province: None,
            city: None,
            neighborhood: None,
            full_address: None,
            alt_phone: None,
            whatsapp: None,
            last_access_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fill_profile(user: &mut User) {
        user.phone = Some("+258841234567".to_string());
        user.nuit = Some("123456789".to_string());
        user.gender = Some("feminino".to_string());
        user.birth_date = Some(NaiveDate::from_ymd_opt(1990, 5, 12).unwrap());
        user.job_title = Some("Gestora".to_string());
        user.department = Some("Operações".to_string());
        user.company_type = Some("Transportadora".to_string());
        user.company_nuit = Some("987654321".to_string());
        user.province = Some("Maputo".to_string());
        user.city = Some("Maputo".to_string());
        user.neighborhood = Some("Polana".to_string());
        user.full_address = Some("Av. Julius Nyerere, 123".to_string());
    }

    #[test]
    fn incomplete_profile_is_not_filled() {
        let mut user = base_user();
        assert!(!user.profile_fields_filled());

        fill_profile(&mut user);
        user.city = Some("   ".to_string());
        assert!(!user.profile_fields_filled());
    }

    #[test]
    fn all_twelve_fields_make_profile_filled() {
        let mut user = base_user();
        fill_profile(&mut user);
        assert!(user.profile_fields_filled());
    }

    #[test]
    fn full_access_requires_both_flags() {
        let mut user = base_user();
        user.access_level = AccessLevel::Completo;
        assert!(!user.has_full_access());

        user.profile_complete = true;
        assert!(user.has_full_access());
        assert!(user.can_schedule());

        user.active = false;
        assert!(!user.can_schedule());
    }

    #[test]
    fn verification_level_counts_flags() {
        let mut user = base_user();
        assert_eq!(user.verification_level(), 1);
        user.phone_verified = true;
        user.nuit_verified = true;
        assert_eq!(user.verification_level(), 3);
    }
}
