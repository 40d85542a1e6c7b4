use lettre::{
    message::{header::ContentType, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::Config;

/// Thin wrapper over the SMTP transport. Every message goes out as
/// multipart/alternative with a plain-text and an HTML body.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let transport = if config.smtp_username.is_empty() {
            // Local development relay without auth.
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ))
                .build()
        };

        Ok(Mailer {
            transport,
            from: config.mail_from.clone(),
        })
    }

    pub async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if recipients.is_empty() {
            return Ok(());
        }

        let mut builder = Message::builder().from(self.from.parse()?);

        for recipient in recipients {
            if !recipient.contains('@') {
                return Err(format!("Invalid email address: {}", recipient).into());
            }
            builder = builder.to(recipient.parse()?);
        }

        let message = builder.subject(subject).multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text_body.to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body.to_string()),
                ),
        )?;

        self.transport.send(message).await?;

        tracing::info!("email '{}' sent to {} recipient(s)", subject, recipients.len());

        Ok(())
    }
}
