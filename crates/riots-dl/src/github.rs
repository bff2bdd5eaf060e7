use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::http::header::{ACCEPT, AUTHORIZATION, LINK};

use crate::{
    error::{DownloadError, Result},
    http_client::HttpClient,
    utils::next_link,
};

pub const API_UPSTREAM: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GithubAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub browser_download_url: String,
}

fn strip_marker(s: &str) -> &str {
    s.strip_prefix(['v', 'V']).unwrap_or(s)
}

impl GithubRelease {
    /// The version identifier: the tag without its leading `v`.
    ///
    /// # Examples
    ///
    /// ```
    /// use riots_dl::github::GithubRelease;
    ///
    /// let release = GithubRelease {
    ///     tag_name: "v1.2.0".into(),
    ///     name: Some("v1.2.0".into()),
    ///     body: None,
    ///     created_at: "2019-05-02T10:00:00Z".into(),
    ///     assets: vec![],
    /// };
    /// assert_eq!(release.version(), "1.2.0");
    /// ```
    pub fn version(&self) -> &str {
        strip_marker(&self.tag_name)
    }

    /// Name shown on the index page. Falls back to the version when the
    /// release has no name.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(strip_marker) {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.version(),
        }
    }

    /// The `YYYY-MM-DD` part of the creation timestamp.
    pub fn date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Client for the GitHub release API of a single repository.
pub struct Github {
    client: HttpClient,
    api_base: String,
    token: Option<String>,
}

impl Github {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            api_base: API_UPSTREAM.to_string(),
            token: None,
        }
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    /// Fetches every release of `owner/repo`, following `Link: rel="next"`
    /// pagination. Pages are concatenated in the order the API returns them.
    pub fn fetch_releases(&self, owner: &str, repo: &str) -> Result<Vec<GithubRelease>> {
        let mut url = Some(format!(
            "{}/repos/{owner}/{repo}/releases?per_page=100",
            self.api_base
        ));
        let mut releases = Vec::new();

        while let Some(current) = url.take() {
            let (page, next) = self.fetch_page(&current)?;
            debug!("{}: {} releases", current, page.len());
            releases.extend(page);
            url = next;
        }

        Ok(releases)
    }

    fn fetch_page(&self, url: &str) -> Result<(Vec<GithubRelease>, Option<String>)> {
        let mut req = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, &format!("Bearer {token}"));
        }

        let mut resp = req.call()?;
        let status = resp.status();

        if !status.is_success() {
            return Err(DownloadError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let next = resp
            .headers()
            .get(LINK)
            .and_then(|h| h.to_str().ok())
            .and_then(next_link);

        let json: serde_json::Value =
            resp.body_mut()
                .read_json()
                .map_err(|err| DownloadError::InvalidResponse {
                    url: url.to_string(),
                    reason: err.to_string(),
                })?;

        let page = match json {
            serde_json::Value::Array(_) => {
                serde_json::from_value(json).map_err(|err| DownloadError::InvalidResponse {
                    url: url.to_string(),
                    reason: err.to_string(),
                })?
            }
            _ => {
                return Err(DownloadError::InvalidResponse {
                    url: url.to_string(),
                    reason: "expected a JSON array of releases".to_string(),
                })
            }
        };

        Ok((page, next))
    }
}
