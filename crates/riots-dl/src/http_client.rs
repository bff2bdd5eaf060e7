use std::time::Duration;

use ureq::{
    http::{self, Uri},
    typestate::WithoutBody,
    Agent, RequestBuilder,
};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(concat!("riots/", env!("CARGO_PKG_VERSION")).into()),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds an HTTP `Agent` configured from this `ClientConfig`.
    ///
    /// Non-2xx statuses are returned as ordinary responses so callers can report
    /// the status together with the URL.
    pub fn build(&self) -> Agent {
        let mut config = ureq::Agent::config_builder()
            .timeout_global(self.timeout)
            .http_status_as_error(false);

        if let Some(user_agent) = &self.user_agent {
            config = config.user_agent(user_agent);
        }

        config.build().into()
    }
}

/// Blocking HTTP client shared by the catalog fetcher and the downloader.
#[derive(Clone)]
pub struct HttpClient {
    agent: Agent,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            agent: config.build(),
        }
    }

    pub fn get<T>(&self, uri: T) -> RequestBuilder<WithoutBody>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        self.agent.get(uri)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
