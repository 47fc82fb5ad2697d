use crate::core::{MessagePublisher, NotificationMessage, PublishReceipt};
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client as SnsClient;

/// The SDK turns every non-2xx reply into an error, and SNS answers a successful Publish with 200.
const PUBLISH_OK_STATUS: u16 = 200;

#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: SnsClient,
}

impl SnsPublisher {
    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessagePublisher for SnsPublisher {
    async fn publish(&self, topic: &str, message: &NotificationMessage) -> Result<PublishReceipt> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .subject(&message.subject)
            .message(&message.body)
            .send()
            .await
            .map_err(|e| PipelineError::NotifyError {
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
            status_code: PUBLISH_OK_STATUS,
        })
    }
}
