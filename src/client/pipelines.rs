use log::{debug, info};

use super::core::PipelineClient;
use super::StopPipeline;
use crate::error::{PipectlError, Result};

impl StopPipeline for PipelineClient {
    /// Stop a pipeline with a single `DELETE` request. Failures are never retried.
    async fn stop_pipeline(&self, owner: &str, name: &str, number: u64, step: u64) -> Result<()> {
        let (number_segment, step_segment) = (number.to_string(), step.to_string());
        let url = self.api_url([
            "repos",
            owner,
            name,
            "pipelines",
            number_segment.as_str(),
            step_segment.as_str(),
        ])?;
        debug!("DELETE {url}");

        let response = self
            .auth_request(self.client().delete(url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(PipectlError::Api {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        info!("Stop accepted for {owner}/{name}#{number}.{step} (status {status})");
        Ok(())
    }
}
