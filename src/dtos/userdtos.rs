use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 2, max = 100, message = "Nome é obrigatório"))]
    pub name: String,

    #[validate(length(min = 2, max = 100, message = "Empresa é obrigatória"))]
    pub company: String,

    #[validate(
        length(min = 1, message = "Email é obrigatório"),
        email(message = "Email inválido")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirmação de senha é obrigatória"),
        must_match(other = "password", message = "As senhas não coincidem")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email é obrigatório"),
        email(message = "Email inválido")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VerifyEmailQueryDto {
    #[validate(length(min = 1, message = "Token é obrigatório"))]
    pub token: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequestDto {
    #[validate(
        length(min = 1, message = "Email é obrigatório"),
        email(message = "Email inválido")
    )]
    pub email: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequestDto {
    #[validate(length(min = 1, message = "Token é obrigatório"))]
    pub token: String,

    #[validate(length(min = 6, message = "A nova senha deve ter pelo menos 6 caracteres"))]
    pub new_password: String,

    #[validate(
        length(min = 1, message = "Confirmação de senha é obrigatória"),
        must_match(other = "new_password", message = "As senhas não coincidem")
    )]
    pub new_password_confirm: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserPasswordUpdateDto {
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub old_password: String,

    #[validate(length(min = 6, message = "A nova senha deve ter pelo menos 6 caracteres"))]
    pub new_password: String,
}

/// Profile fields accepted by the complete-profile endpoint. All optional so
/// the profile can be filled across several requests; promotion happens only
/// once every required field is present.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CompleteProfileDto {
    #[validate(length(min = 9, max = 20, message = "Telefone inválido"))]
    pub phone: Option<String>,

    #[validate(length(equal = 9, message = "NUIT deve ter 9 dígitos"))]
    pub nuit: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub gender: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 50))]
    pub job_title: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub department: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub company_type: Option<String>,

    #[validate(length(equal = 9, message = "NUIT da empresa deve ter 9 dígitos"))]
    pub company_nuit: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub province: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub neighborhood: Option<String>,

    #[validate(length(min = 1))]
    pub full_address: Option<String>,

    #[validate(length(min = 9, max = 20, message = "Telefone inválido"))]
    pub alt_phone: Option<String>,

    #[validate(length(min = 9, max = 20, message = "WhatsApp inválido"))]
    pub whatsapp: Option<String>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub access_level: String,
    pub profile_complete: bool,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub nuit_verified: bool,
    pub company_verified: bool,
    pub verification_level: u8,
    pub trust_score: i32,
    pub completed_count: i32,
    pub cancelled_count: i32,
    pub active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            company: user.company.to_owned(),
            role: user.role.to_str().to_string(),
            access_level: user.access_level.to_str().to_string(),
            profile_complete: user.profile_complete,
            email_verified: user.email_verified,
            phone_verified: user.phone_verified,
            nuit_verified: user.nuit_verified,
            company_verified: user.company_verified,
            verification_level: user.verification_level(),
            trust_score: user.trust_score,
            completed_count: user.completed_count,
            cancelled_count: user.cancelled_count,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UserActiveUpdateDto {
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_dto_rejects_invalid_email() {
        let dto = RegisterUserDto {
            name: "Joao Silva".to_string(),
            company: "Transportes Silva Ltda".to_string(),
            email: "not-an-email".to_string(),
            password: "user123".to_string(),
            password_confirm: "user123".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_dto_rejects_password_mismatch() {
        let dto = RegisterUserDto {
            name: "Joao Silva".to_string(),
            company: "Transportes Silva Ltda".to_string(),
            email: "joao@empresa.com".to_string(),
            password: "user123".to_string(),
            password_confirm: "user124".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn complete_profile_dto_checks_nuit_length() {
        let dto = CompleteProfileDto {
            nuit: Some("123".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = CompleteProfileDto {
            nuit: Some("123456789".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }
}
