use crate::core::{MessagePublisher, NotificationMessage, Outcome, PublishReceipt};
use crate::utils::error::Result;

pub const SUCCESS_SUBJECT: &str = "Hooray! Successful File Upload";
pub const FAILURE_SUBJECT: &str = "Issue with File Upload";

/// Names interpolated into every notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub dataset_name: String,
    pub source_database: String,
    pub bucket: String,
    pub support_email: String,
}

impl MessageTemplate {
    pub fn render(&self, outcome: Outcome) -> NotificationMessage {
        match outcome {
            Outcome::Succeeded => NotificationMessage {
                subject: SUCCESS_SUBJECT.to_string(),
                body: format!(
                    "Dear Customer,\n\n\
                     Your {} has been successfully extracted from the {} database \
                     and uploaded to the {} bucket.\n\n\
                     Best,\n\
                     {}\n",
                    self.dataset_name, self.source_database, self.bucket, self.support_email
                ),
            },
            Outcome::Failed => NotificationMessage {
                subject: FAILURE_SUBJECT.to_string(),
                body: format!(
                    "Dear Customer,\n\n\
                     We have encountered an issue while trying to extract {} from the {} database \
                     and put the file in the {} bucket. We are currently working on this and \
                     will provide an update by end of day.\n\n\
                     Best,\n\
                     {}\n",
                    self.dataset_name, self.source_database, self.bucket, self.support_email
                ),
            },
        }
    }
}

pub struct Notifier<P: MessagePublisher> {
    publisher: P,
    template: MessageTemplate,
}

impl<P: MessagePublisher> Notifier<P> {
    pub fn new(publisher: P, template: MessageTemplate) -> Self {
        Self {
            publisher,
            template,
        }
    }

    /// Publishes the message for `outcome`. Delivery failures are logged and returned, never retried.
    pub async fn notify(&self, topic: &str, outcome: Outcome) -> Result<PublishReceipt> {
        let message = self.template.render(outcome);

        match self.publisher.publish(topic, &message).await {
            Ok(receipt) => {
                tracing::info!("SNS publish status code:{}", receipt.status_code);
                if let Some(id) = &receipt.message_id {
                    tracing::debug!("SNS message id: {}", id);
                }
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!("Failed to send SNS message due to {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> MessageTemplate {
        MessageTemplate {
            dataset_name: "customer_personal_info".to_string(),
            source_database: "shop".to_string(),
            bucket: "export-bucket".to_string(),
            support_email: "tech-support@companyx.com".to_string(),
        }
    }

    #[test]
    fn test_success_message() {
        let message = template().render(Outcome::Succeeded);
        assert_eq!(message.subject, "Hooray! Successful File Upload");
        assert!(message.body.starts_with("Dear Customer,"));
        assert!(message.body.contains("customer_personal_info"));
        assert!(message.body.contains("shop database"));
        assert!(message.body.contains("export-bucket bucket"));
        assert!(message.body.contains("tech-support@companyx.com"));
    }

    #[test]
    fn test_failure_message() {
        let message = template().render(Outcome::Failed);
        assert_eq!(message.subject, "Issue with File Upload");
        assert!(message.body.contains("encountered an issue"));
        assert!(message.body.contains("customer_personal_info"));
        assert!(message.body.contains("end of day"));
    }
}
