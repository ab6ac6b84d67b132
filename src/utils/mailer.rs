//! 邮件发送
//!
//! 通过配置的 SMTP 服务向用户邮箱发送通知。未启用邮件时发送调用降级为日志告警。

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::Lazy;
use tracing::warn;

use crate::config::{AppConfig, MailConfig};
use crate::errors::{OogiriBankError, Result};
use crate::models::users::entities::User;

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

// 全局 mailer 实例（未启用或配置错误时为 None）
static MAILER: Lazy<Option<Mailer>> = Lazy::new(|| {
    match Mailer::from_config(&AppConfig::get().mail) {
        Ok(mailer) => mailer,
        Err(e) => {
            warn!("Mailer initialization failed, mail delivery disabled: {}", e);
            None
        }
    }
});

impl Mailer {
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| OogiriBankError::configuration(format!("mail.from 解析失败: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| OogiriBankError::configuration(format!("SMTP 服务器配置错误: {e}")))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Some(Self { transport, from }))
    }

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| OogiriBankError::mail_delivery(format!("收件地址无效: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| OogiriBankError::mail_delivery(format!("邮件构建失败: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| OogiriBankError::mail_delivery(format!("邮件发送失败: {e}")))?;

        Ok(())
    }
}

/// 向用户邮箱发送一封邮件
///
/// 用户未设置邮箱时返回校验错误；邮件功能未启用时为 no-op。
pub async fn email_user(user: &User, subject: &str, body: &str) -> Result<()> {
    if user.email.is_empty() {
        return Err(OogiriBankError::validation(
            "email: user has no email address",
        ));
    }

    match MAILER.as_ref() {
        Some(mailer) => mailer.send(&user.email, subject, body).await,
        None => {
            warn!(
                "Mail delivery disabled, dropping message to {} (subject: {})",
                user.username, subject
            );
            Ok(())
        }
    }
}
