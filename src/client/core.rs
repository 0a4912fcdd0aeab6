use reqwest::{Client, Proxy};
use url::Url;

use crate::auth::Token;
use crate::cli::GlobalFlags;
use crate::config::Config;
use crate::error::{PipectlError, Result};

const USER_AGENT: &str = concat!("pipectl/", env!("CARGO_PKG_VERSION"));

/// Connection settings resolved from global flags and the configuration file.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub server: Url,
    pub token: Token,
    pub skip_verify: bool,
    pub socks_proxy: Option<String>,
    pub socks_proxy_off: bool,
}

impl ClientSettings {
    /// Merge flags over configuration file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the server address or token is missing, or if the
    /// server address is not a usable http(s) URL.
    pub fn resolve(flags: &GlobalFlags, config: &Config) -> Result<Self> {
        let server = pick(&flags.server, &config.server).ok_or(PipectlError::MissingServer)?;
        let token = pick(&flags.token, &config.token).ok_or(PipectlError::MissingToken)?;

        let server = Url::parse(server)
            .map_err(|e| PipectlError::Config(format!("Invalid server URL '{server}': {e}")))?;
        if server.cannot_be_a_base() || !matches!(server.scheme(), "http" | "https") {
            return Err(PipectlError::Config(format!(
                "Server URL must use http or https: {server}"
            )));
        }

        Ok(Self {
            server,
            token: Token::from(token),
            skip_verify: flags.skip_verify || config.skip_verify,
            socks_proxy: pick(&flags.socks_proxy, &config.socks_proxy).map(str::to_owned),
            socks_proxy_off: flags.socks_proxy_off || config.socks_proxy_off,
        })
    }
}

fn pick<'a>(flag: &'a Option<String>, file: &'a Option<String>) -> Option<&'a str> {
    flag.as_deref()
        .filter(|v| !v.is_empty())
        .or_else(|| file.as_deref().filter(|v| !v.is_empty()))
}

/// HTTP client for the control plane API.
pub struct PipelineClient {
    client: Client,
    server: Url,
    token: Token,
}

impl PipelineClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(settings.skip_verify);

        if settings.socks_proxy_off {
            builder = builder.no_proxy();
        } else if let Some(proxy) = &settings.socks_proxy {
            let proxy = Proxy::all(proxy)
                .map_err(|e| PipectlError::Config(format!("Invalid socks proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| PipectlError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            server: settings.server,
            token: settings.token,
        })
    }

    /// Helper to build authenticated requests
    pub(super) fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.token.as_str())
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    /// Build an API URL from path segments, encoding each one.
    pub(super) fn api_url<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.server.clone();
        url.path_segments_mut()
            .map_err(|()| PipectlError::Config(format!("Invalid server URL: {}", self.server)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }
}
