use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::csv::{self, CsvError};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::record::CheatRecord;
use crate::store::CheatStore;

pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRgM_UqHxgZYULQN4-96UIZHLZMECO-49QRBn0qpfD7BlE-ZE8m3e7BxeP-_fayKg8hee_5uG-led71/pub?output=csv";

pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug)]
pub enum SheetSource {
    Url(String),
    Inline(String),
}

#[derive(Clone, Debug)]
pub struct Options {
    pub source: SheetSource,
    pub page_size: usize,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: SheetSource::Url(DEFAULT_SHEET_URL.to_string()),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 0,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid sheet URL: {url}")]
    InvalidUrl { url: String },

    #[error("invalid page_size {value}, expected 1..={max}")]
    InvalidPageSize { value: usize, max: usize },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("sheet returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to parse sheet: {source}")]
    Parse {
        #[from]
        source: CsvError,
    },
}

#[derive(Clone, Debug)]
pub struct LoadResult {
    pub elapsed: Duration,
    pub bytes: usize,
    pub records: Vec<CheatRecord>,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.page_size == 0 || options.page_size > MAX_PAGE_SIZE {
            return Err(RunnerError::InvalidPageSize {
                value: options.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if let SheetSource::Url(url) = &options.source {
            if reqwest::Url::parse(url).is_err() {
                return Err(RunnerError::InvalidUrl { url: url.clone() });
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetches and parses the sheet once. There is no retry.
    pub async fn fetch(&self) -> Result<LoadResult, RunnerError> {
        let started_at = Instant::now();
        let text = match &self.options.source {
            SheetSource::Url(url) => {
                let client = build_client(
                    self.options.proxy.as_deref(),
                    self.options.timeout_seconds,
                )?;
                fetch_csv(&client, url).await?
            }
            SheetSource::Inline(text) => text.clone(),
        };
        let records = csv::parse_csv(&text)?;
        Ok(LoadResult {
            elapsed: started_at.elapsed(),
            bytes: text.len(),
            records,
        })
    }

    pub async fn load(&self) -> Result<CheatStore, RunnerError> {
        let result = self.fetch().await?;
        let mut store = CheatStore::new(self.options.page_size);
        store.load(result.records);
        Ok(store)
    }
}

pub fn build_client(
    proxy: Option<&str>,
    timeout_seconds: usize,
) -> Result<reqwest::Client, RunnerError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "cheatdeck/",
            env!("CARGO_PKG_VERSION")
        )),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10));

    if timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(
            timeout_seconds.try_into().unwrap_or(u64::MAX),
        ));
    }

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| RunnerError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| RunnerError::HttpClientBuild { source: e })
}

pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<String, RunnerError> {
    info!("fetching sheet {url}");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RunnerError::Request {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    debug!("sheet responded {}", status.as_u16());
    if !status.is_success() {
        return Err(RunnerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let text = response.text().await.map_err(|e| RunnerError::Request {
        url: url.to_string(),
        source: e,
    })?;
    info!("fetched {} bytes", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_page_size() {
        let err = Runner::new(Options {
            page_size: 0,
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, RunnerError::InvalidPageSize { value: 0, .. }));
        assert!(Runner::new(Options {
            page_size: MAX_PAGE_SIZE + 1,
            ..Options::default()
        })
        .is_err());
    }

    #[test]
    fn rejects_bad_url() {
        let err = Runner::new(Options {
            source: SheetSource::Url("not a url".to_string()),
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, RunnerError::InvalidUrl { .. }));
    }

    #[test]
    fn default_options_are_valid() {
        let runner = Runner::new(Options::default()).unwrap();
        assert_eq!(runner.options().page_size, 10);
    }

    #[test]
    fn proxy_setup_error_is_reported() {
        let err = build_client(Some("::not a proxy::"), 0).unwrap_err();
        assert!(matches!(err, RunnerError::ProxySetup { .. }));
    }

    #[tokio::test]
    async fn inline_source_seeds_store() {
        let runner = Runner::new(Options {
            source: SheetSource::Inline(
                "Reward,Description,Code\nGem,Free gems,ABC123\nCoin,Free coins,XYZ789".to_string(),
            ),
            ..Options::default()
        })
        .unwrap();
        let store = runner.load().await.unwrap();
        assert_eq!(store.all().len(), 2);
        assert_eq!(store.filtered_len(), 2);
        assert_eq!(store.current_page(), 1);
    }

    #[tokio::test]
    async fn empty_inline_source_is_parse_error() {
        let runner = Runner::new(Options {
            source: SheetSource::Inline(String::new()),
            ..Options::default()
        })
        .unwrap();
        assert!(matches!(
            runner.load().await,
            Err(RunnerError::Parse { .. })
        ));
    }
}
