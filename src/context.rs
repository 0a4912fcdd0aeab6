use log::debug;

use crate::cli::GlobalFlags;
use crate::client::{ClientProvider, ClientSettings, PipelineClient};
use crate::config::Config;
use crate::error::Result;

/// Invocation context handed to every command.
///
/// Carries the parsed global flags and knows how to build a configured API
/// client from them. The configuration file is only read when a client is
/// requested, so commands validate their arguments first.
pub struct Context {
    flags: GlobalFlags,
    config: Option<Config>,
}

impl Context {
    pub fn new(flags: GlobalFlags) -> Self {
        Self {
            flags,
            config: None,
        }
    }

    #[cfg(test)]
    pub fn with_config(flags: GlobalFlags, config: Config) -> Self {
        Self {
            flags,
            config: Some(config),
        }
    }
}

impl ClientProvider for Context {
    type Client = PipelineClient;

    fn new_client(&self) -> Result<PipelineClient> {
        let settings = match &self.config {
            Some(config) => ClientSettings::resolve(&self.flags, config)?,
            None => {
                let config = Config::load(self.flags.config.as_deref())?;
                ClientSettings::resolve(&self.flags, &config)?
            }
        };
        debug!("Connecting to {}", settings.server);
        PipelineClient::new(settings)
    }
}
