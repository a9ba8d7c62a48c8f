//! Where the PEP feed comes from: a local `peps.json` or the live API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pepgraph_rdf::Feed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

pub fn load_feed(source: &FeedSource) -> Result<Feed> {
    let feed = match source {
        FeedSource::File(path) => Feed::from_path(path)
            .with_context(|| format!("failed to load PEP feed {}", path.display()))?,
        FeedSource::Url(url) => fetch_feed(url)?,
    };
    tracing::debug!(source = %source, peps = feed.len(), "loaded PEP feed");
    Ok(feed)
}

#[cfg(feature = "fetch")]
fn fetch_feed(url: &str) -> Result<Feed> {
    use anyhow::anyhow;
    use std::time::Duration;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pepgraph/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| anyhow!("failed to build http client: {e}"))?;

    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("failed to fetch {url}"))?;
    if !resp.status().is_success() {
        return Err(anyhow!("http status {} from {url}", resp.status()));
    }
    let body = resp
        .text()
        .with_context(|| format!("failed to read body of {url}"))?;
    Feed::from_json_str(&body).with_context(|| format!("invalid PEP feed from {url}"))
}

#[cfg(not(feature = "fetch"))]
fn fetch_feed(url: &str) -> Result<Feed> {
    anyhow::bail!("cannot fetch {url}: pepgraph was built without the `fetch` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_local_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peps.json");
        std::fs::write(
            &path,
            r#"{"8": {"number": 8, "title": "Style Guide for Python Code",
                      "url": "https://peps.python.org/pep-0008/",
                      "status": "Active", "type": "Process"}}"#,
        )
        .unwrap();
        let feed = load_feed(&FeedSource::File(path)).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.get(8).map(|r| r.title.as_str()), Some("Style Guide for Python Code"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_feed(&FeedSource::File(PathBuf::from("/nonexistent/peps.json")))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/peps.json"));
    }

    #[cfg(not(feature = "fetch"))]
    #[test]
    fn url_needs_fetch_feature() {
        let err = load_feed(&FeedSource::Url("https://example.org/peps.json".into())).unwrap_err();
        assert!(err.to_string().contains("fetch"));
    }
}
