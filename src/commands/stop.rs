use clap::Args;
use log::{debug, info, warn};
use std::fmt;
use std::io::Write;

use crate::client::{ClientProvider, StopPipeline};
use crate::error::{PipectlError, Result};
use crate::repo::RepositoryReference;

const DEFAULT_STEP: u64 = 1;

#[derive(Args, Debug)]
pub struct StopArgs {
    /// Repository in owner/name form
    #[arg(value_name = "REPO/NAME")]
    pub repo: String,

    /// Pipeline number
    pub pipeline: Option<String>,

    /// Step number, defaults to 1
    pub step: Option<String>,
}

/// Fully resolved target of a stop request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRequest {
    pub repo: RepositoryReference,
    pub number: u64,
    pub step: u64,
}

impl StopRequest {
    /// Resolve positional arguments into a request.
    ///
    /// The repository and pipeline number are mandatory; the step falls back
    /// to 1 when absent, zero, or not a number.
    pub fn from_args(args: &StopArgs) -> Result<Self> {
        let repo = args.repo.parse::<RepositoryReference>()?;
        let number = parse_pipeline_number(args.pipeline.as_deref())?;
        let step = parse_step_number(args.step.as_deref());

        Ok(Self { repo, number, step })
    }
}

impl fmt::Display for StopRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}.{}", self.repo, self.number, self.step)
    }
}

fn parse_pipeline_number(arg: Option<&str>) -> Result<u64> {
    let value = arg
        .filter(|v| !v.is_empty())
        .ok_or(PipectlError::MissingPipelineNumber)?;

    match value.parse::<u64>() {
        Ok(0) => Err(PipectlError::ZeroPipelineNumber),
        Ok(number) => Ok(number),
        Err(source) => Err(PipectlError::InvalidPipelineNumber {
            value: value.to_string(),
            source,
        }),
    }
}

fn parse_step_number(arg: Option<&str>) -> u64 {
    let Some(value) = arg.filter(|v| !v.is_empty()) else {
        return DEFAULT_STEP;
    };

    match value.parse::<u64>() {
        Ok(0) => DEFAULT_STEP,
        Ok(step) => step,
        Err(e) => {
            warn!("Ignoring step '{value}' ({e}), using step {DEFAULT_STEP}");
            DEFAULT_STEP
        }
    }
}

/// Stop a pipeline and print a confirmation line to `out`.
///
/// Arguments are resolved before a client is requested, so malformed input
/// never reaches the network. The remote call is made exactly once.
///
/// # Errors
///
/// Returns the argument, configuration, or remote error unchanged. Nothing
/// is written to `out` on failure. Once the remote call has succeeded, a
/// failed write to `out` is only logged.
pub async fn execute<P, W>(args: &StopArgs, provider: &P, out: &mut W) -> Result<()>
where
    P: ClientProvider,
    W: Write,
{
    let request = StopRequest::from_args(args)?;
    debug!("Resolved stop request: {request:?}");

    let client = provider.new_client()?;

    info!("Sending stop request for {request}");
    client
        .stop_pipeline(
            &request.repo.owner,
            &request.repo.name,
            request.number,
            request.step,
        )
        .await?;

    if let Err(e) = writeln!(out, "Stopping pipeline {request}") {
        warn!("Stop request for {request} was accepted, but the confirmation could not be written: {e}");
    }
    Ok(())
}
