use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::application::{AppError, AppResult, Notifier};
use crate::domain::DiscountReport;
use crate::interfaces::config::Config;

const SUBJECT: &str = "[重要] 发现打折信息！";
const SENDER_DISPLAY_NAME: &str = "Promowatch 监控机器人";

/// SMTP email notifier: one authenticated STARTTLS session per alert,
/// opened and closed inside `notify`.
#[derive(Debug)]
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let from_addr = cfg
            .sender
            .parse()
            .map_err(|e: lettre::address::AddressError| AppError::Config(e.to_string()))?;
        let from = Mailbox::new(Some(SENDER_DISPLAY_NAME.to_string()), from_addr);

        let to: Mailbox = cfg
            .receiver
            .parse()
            .map_err(|e: lettre::address::AddressError| AppError::Config(e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_server)
            .map_err(|e| AppError::Config(e.to_string()))?
            .port(cfg.smtp_port)
            .credentials(Credentials::new(
                cfg.email_user.clone(),
                cfg.email_pwd.clone(),
            ))
            .build();

        Ok(Self { transport, from, to })
    }

    fn render_body(report: &DiscountReport) -> String {
        format!(
            "<h2>折扣提醒！</h2>\n\
             <p>检测到 {url} 有促销活动（关键词：{keywords}）</p>\n\
             <p>立即查看：<a href=\"{url}\">{url}</a></p>\n\
             <p>检测时间：{time}</p>",
            url = report.url,
            keywords = report.keywords_joined(),
            time = report.detected_at,
        )
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, report: &DiscountReport) -> AppResult<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(Self::render_body(report))
            .map_err(|e| AppError::Notifier(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::Notifier(e.to_string()))?;

        tracing::info!(
            recipient = %self.to.email,
            keywords = %report.keywords_joined(),
            "alert email delivered"
        );
        Ok(())
    }
}
