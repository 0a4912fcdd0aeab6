mod core;
mod pipelines;

pub use self::core::{ClientSettings, PipelineClient};

use crate::error::Result;

/// Remote operation that stops a pipeline, optionally scoped to one step.
#[allow(async_fn_in_trait)]
pub trait StopPipeline {
    async fn stop_pipeline(&self, owner: &str, name: &str, number: u64, step: u64) -> Result<()>;
}

/// Source of configured API clients.
pub trait ClientProvider {
    type Client: StopPipeline;

    fn new_client(&self) -> Result<Self::Client>;
}
