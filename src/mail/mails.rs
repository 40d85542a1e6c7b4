use crate::models::appointmentmodel::AppointmentDetails;

use super::sendmail::Mailer;

const SUBJECT_PREFIX: &str = "[Sistema JIT] ";
const SIGNATURE: &str = "Atenciosamente,\nEquipe Sistema JIT";

/// Composed message, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

fn wrap_html(text_body: &str) -> String {
    let paragraphs: String = text_body
        .split("\n\n")
        .map(|block| format!("<p>{}</p>\n", block.trim().replace('\n', "<br>")))
        .collect();

    format!(
        "<html><body style=\"font-family: sans-serif;\">\n{}</body></html>",
        paragraphs
    )
}

fn compose(subject: &str, text_body: String) -> EmailContent {
    EmailContent {
        subject: format!("{}{}", SUBJECT_PREFIX, subject),
        html_body: wrap_html(&text_body),
        text_body,
    }
}

fn format_slot(appointment: &AppointmentDetails) -> String {
    appointment.scheduled_at.format("%d/%m/%Y às %H:%M").to_string()
}

pub fn account_confirmation_email(name: &str, app_url: &str, token: &str) -> EmailContent {
    let link = format!("{}/api/auth/verify?token={}", app_url, token);

    compose(
        "Confirme sua Conta",
        format!(
            "Prezado(a) {name},\n\n\
             Bem-vindo ao Sistema JIT!\n\n\
             Para confirmar sua conta, clique no link abaixo:\n\n\
             {link}\n\n\
             Se você não criou esta conta, por favor ignore este email.\n\n\
             {SIGNATURE}"
        ),
    )
}

pub fn password_reset_email(name: &str, app_url: &str, token: &str) -> EmailContent {
    let link = format!("{}/reset-password?token={}", app_url, token);

    compose(
        "Recuperação de Senha",
        format!(
            "Prezado(a) {name},\n\n\
             Recebemos uma solicitação para redefinir a senha da sua conta no Sistema JIT.\n\n\
             Para redefinir sua senha, clique no link abaixo:\n\n\
             {link}\n\n\
             Este link expirará em 1 hora.\n\n\
             Se você não solicitou a redefinição de senha, por favor ignore este email.\n\n\
             {SIGNATURE}"
        ),
    )
}

pub fn new_appointment_admin_email(appointment: &AppointmentDetails) -> EmailContent {
    compose(
        "Novo Agendamento Pendente",
        format!(
            "Novo agendamento pendente de aprovação:\n\n\
             Detalhes:\n\
             - Usuário: {} ({})\n\
             - Empresa: {}\n\
             - Doca: {} - {}\n\
             - Data e Hora: {}\n\
             - Duração: {} minutos\n\
             - Veículo: {}\n\
             - Motorista: {}\n\n\
             Acesse o sistema para aprovar ou rejeitar este agendamento.",
            appointment.user_name,
            appointment.user_email,
            appointment.user_company,
            appointment.dock_number,
            appointment.terminal_name,
            format_slot(appointment),
            appointment.duration_minutes,
            appointment.vehicle_plate,
            appointment.driver_name,
        ),
    )
}

pub fn appointment_confirmed_email(appointment: &AppointmentDetails) -> EmailContent {
    compose(
        "Confirmação de Agendamento",
        format!(
            "Prezado(a) {},\n\n\
             Seu agendamento foi confirmado com sucesso!\n\n\
             Detalhes do Agendamento:\n\
             - Doca: {} - {}\n\
             - Data e Hora: {}\n\
             - Duração: {} minutos\n\
             - Tipo de Operação: {}\n\
             - Veículo: {}\n\
             - Motorista: {}\n\n\
             Por favor, apresente-se no terminal com 15 minutos de antecedência.\n\n\
             {SIGNATURE}",
            appointment.user_name,
            appointment.dock_number,
            appointment.terminal_name,
            format_slot(appointment),
            appointment.duration_minutes,
            appointment.operation_type.to_str(),
            appointment.vehicle_plate,
            appointment.driver_name,
        ),
    )
}

pub fn appointment_cancelled_email(appointment: &AppointmentDetails) -> EmailContent {
    compose(
        "Cancelamento de Agendamento",
        format!(
            "Prezado(a) {},\n\n\
             Seu agendamento foi cancelado.\n\n\
             Detalhes do Agendamento Cancelado:\n\
             - Doca: {} - {}\n\
             - Data e Hora: {}\n\
             - Motivo do Cancelamento: {}\n\n\
             Se precisar fazer um novo agendamento, acesse nosso sistema.\n\n\
             {SIGNATURE}",
            appointment.user_name,
            appointment.dock_number,
            appointment.terminal_name,
            format_slot(appointment),
            appointment
                .cancellation_reason
                .as_deref()
                .unwrap_or("Não informado"),
        ),
    )
}

pub fn appointment_rejected_email(appointment: &AppointmentDetails) -> EmailContent {
    compose(
        "Agendamento Rejeitado",
        format!(
            "Prezado(a) {},\n\n\
             Seu agendamento foi rejeitado.\n\n\
             Detalhes do Agendamento Rejeitado:\n\
             - Doca: {} - {}\n\
             - Data e Hora: {}\n\
             - Veículo: {}\n\n\
             Entre em contato conosco para mais informações ou faça um novo agendamento.\n\n\
             {SIGNATURE}",
            appointment.user_name,
            appointment.dock_number,
            appointment.terminal_name,
            format_slot(appointment),
            appointment.vehicle_plate,
        ),
    )
}

/// Fire-and-forget dispatch. The caller must only invoke this after its own
/// transaction has committed; a failed send is logged and never propagated.
pub fn dispatch(
    mailer: Mailer,
    recipients: Vec<String>,
    content: EmailContent,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = mailer
            .send(
                &recipients,
                &content.subject,
                &content.text_body,
                &content.html_body,
            )
            .await
        {
            tracing::warn!("failed to send email '{}': {}", content.subject, e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::appointmentmodel::{AppointmentStatus, OperationType};
    use chrono::{TimeZone, Utc};

    fn details() -> AppointmentDetails {
        AppointmentDetails {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            doca_id: uuid::Uuid::new_v4(),
            scheduled_at: Utc.with_ymd_and_hms(2025, 10, 4, 9, 0, 0).unwrap(),
            duration_minutes: 90,
            operation_type: OperationType::Carga,
            cargo_type: Some("geral".to_string()),
            vehicle_plate: "ABC1D23".to_string(),
            driver_name: "Pedro Oliveira".to_string(),
            driver_phone: None,
            notes: None,
            status: AppointmentStatus::Pendente,
            completed: false,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: Utc::now(),
            user_name: "Joao Silva".to_string(),
            user_email: "usuario@jit.com".to_string(),
            user_company: "Transportes Silva Ltda".to_string(),
            dock_number: "D01".to_string(),
            terminal_name: "Terminal Centro".to_string(),
        }
    }

    #[test]
    fn subjects_carry_the_system_prefix() {
        let content = appointment_confirmed_email(&details());
        assert!(content.subject.starts_with("[Sistema JIT] "));
    }

    #[test]
    fn confirmation_email_includes_slot_details() {
        let content = appointment_confirmed_email(&details());
        assert!(content.text_body.contains("Joao Silva"));
        assert!(content.text_body.contains("D01 - Terminal Centro"));
        assert!(content.text_body.contains("04/10/2025 às 09:00"));
        assert!(content.text_body.contains("90 minutos"));
        assert!(content.html_body.contains("<p>"));
    }

    #[test]
    fn cancellation_email_defaults_missing_reason() {
        let content = appointment_cancelled_email(&details());
        assert!(content.text_body.contains("Não informado"));

        let mut with_reason = details();
        with_reason.cancellation_reason = Some("Veículo avariado".to_string());
        let content = appointment_cancelled_email(&with_reason);
        assert!(content.text_body.contains("Veículo avariado"));
    }

    #[test]
    fn account_emails_embed_token_links() {
        let confirm = account_confirmation_email("Maria", "https://jit.example.com", "tok123");
        assert!(confirm
            .text_body
            .contains("https://jit.example.com/api/auth/verify?token=tok123"));

        let reset = password_reset_email("Maria", "https://jit.example.com", "tok456");
        assert!(reset
            .text_body
            .contains("https://jit.example.com/reset-password?token=tok456"));
        assert!(reset.text_body.contains("expirará em 1 hora"));
    }

    #[tokio::test]
    async fn dispatch_absorbs_transport_failures() {
        // Points at a closed port: the send fails, but the spawned task must
        // finish cleanly so a committed operation never sees the failure.
        let config = Config {
            database_url: String::new(),
            app_url: "http://localhost".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_maxage: 60,
            port: 8000,
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: 9,
            smtp_username: String::new(),
            smtp_password: String::new(),
            mail_from: "Sistema JIT <noreply@jit.com>".to_string(),
            seed_on_startup: false,
        };
        let mailer = Mailer::new(&config).unwrap();

        let handle = dispatch(
            mailer,
            vec!["usuario@jit.com".to_string()],
            appointment_confirmed_email(&details()),
        );

        assert!(handle.await.is_ok());
    }
}
