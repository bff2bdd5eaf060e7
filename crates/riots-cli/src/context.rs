use riots_config::config::Config;
use riots_core::{catalog::GithubSource, SiteResult};
use riots_dl::{
    github::Github,
    http_client::{ClientConfig, HttpClient},
};
use riots_store::aws::{AwsCredentials, AwsSession, CloudFrontInvalidator, S3Store};

use crate::cli::Destination;

/// Everything a command needs to talk to GitHub and AWS.
pub struct Context {
    pub config: Config,
    pub client: HttpClient,
    session: AwsSession,
    bucket: String,
    github_token: Option<String>,
}

impl Context {
    pub fn new(config: Config, destination: &Destination) -> SiteResult<Self> {
        let client = HttpClient::new(&ClientConfig {
            user_agent: Some(config.user_agent.clone()),
            timeout: config.http_timeout(),
        });

        let credentials = AwsCredentials {
            access_key_id: destination.aws_access_key_id.clone(),
            secret_access_key: destination.aws_secret_access_key.clone(),
        };
        let session = AwsSession::new(&credentials, &config.region)?;

        Ok(Self {
            config,
            client,
            session,
            bucket: destination.aws_bucket.clone(),
            github_token: destination.github_token.clone(),
        })
    }

    pub fn source(&self) -> GithubSource {
        let mut github = Github::new(self.client.clone()).api_base(&self.config.api_base);
        if let Some(token) = &self.github_token {
            github = github.token(token);
        }
        GithubSource::new(github, &self.config.owner, &self.config.repo)
    }

    pub fn store(&self) -> S3Store {
        self.session.s3(&self.bucket)
    }

    pub fn cdn(&self, distribution_id: &str) -> CloudFrontInvalidator {
        self.session.cloudfront(distribution_id)
    }
}
