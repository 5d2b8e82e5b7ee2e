//! Reservation site HTTP client.
//!
//! The site has no public API: stations and holidays come from the JSON
//! endpoints its own search form uses, and route searches are a form post
//! that returns an HTML results page.

use std::sync::Arc;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use scraper::Html;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{JapanHoliday, Journey, SearchQuery, Station, StationKeyword};
use crate::extract::{Assembly, DateContext, JourneyAssembler};

use super::error::KyushuError;
use super::form::search_form;
use super::page::{error_message, is_maintenance_page, transaction_token};
use super::types::{HolidayEntry, SuggestedStation, convert_holidays, convert_stations};

/// Default base URL of the reservation site.
pub const DEFAULT_BASE_URL: &str = "https://train.yoyaku.jrkyushu.co.jp";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const TOP_PATH: &str = "/jr/pc/Top";
const SUGGEST_PATH: &str = "/jr/sugg/FindSuggestStationJson";
const HOLIDAY_PATH: &str = "/jr/cal/FindJpHolidayJson";
const SEARCH_PATH: &str = "/jr/pc/route/Top/searchStation";
const REFERER_PATH: &str = "/jr/pc/route/Top/";

/// Number of suggestions requested; the site's own form always asks for 10.
const SUGGEST_LIMIT: &str = "10";

/// Configuration for the reservation site client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the site, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Browser user agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Create a config pointing at the production site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Client for the JR Kyushu reservation site.
///
/// Holds the session's transaction token, fetched from the homepage on
/// first use and refreshed by [`is_maintenance`](Self::is_maintenance).
#[derive(Debug, Clone)]
pub struct KyushuClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl KyushuClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, KyushuError> {
        let header = |value: &str| {
            HeaderValue::from_str(value).map_err(|_| KyushuError::Api {
                status: 0,
                message: format!("invalid header value: {value}"),
            })
        };

        // The site rejects requests that do not look like its own pages
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ja,en-US;q=0.9,en;q=0.8"),
        );
        headers.insert(ORIGIN, header(&config.base_url)?);
        headers.insert(REFERER, header(&format!("{}{REFERER_PATH}", config.base_url))?);
        headers.insert(USER_AGENT, header(&config.user_agent)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Check whether the site is down for maintenance.
    ///
    /// When it is not, the session token is refreshed from the same page.
    pub async fn is_maintenance(&self) -> Result<bool, KyushuError> {
        let body = self.get_text(TOP_PATH, &[]).await?;
        let (maintenance, token) = {
            let document = Html::parse_document(&body);
            (is_maintenance_page(&document), transaction_token(&document))
        };

        if !maintenance {
            let token = token.ok_or(KyushuError::MissingToken)?;
            *self.token.write().await = Some(token);
        }

        debug!(maintenance, "Checked site status");
        Ok(maintenance)
    }

    /// Find stations whose names match a kanji keyword.
    pub async fn find_stations(&self, keyword: &str) -> Result<Vec<Station>, KyushuError> {
        let keyword = StationKeyword::parse(keyword)?;
        let entries: Vec<SuggestedStation> = self
            .get_json(
                SUGGEST_PATH,
                &[("q", keyword.as_str()), ("limit", SUGGEST_LIMIT), ("qt", "1")],
            )
            .await?;

        let stations = convert_stations(entries);
        debug!(keyword = keyword.as_str(), count = stations.len(), "Found stations");
        Ok(stations)
    }

    /// Fetch the site's Japanese holiday calendar.
    pub async fn holidays(&self) -> Result<Vec<JapanHoliday>, KyushuError> {
        let entries: Vec<HolidayEntry> = self.get_json(HOLIDAY_PATH, &[]).await?;
        Ok(convert_holidays(entries))
    }

    /// Run a route search and assemble the journeys on the results page.
    ///
    /// An empty result on a page that carries an error message becomes
    /// [`KyushuError::Site`].
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Journey>, KyushuError> {
        let token = self.token().await?;

        let form = search_form(query, &token)
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });

        let url = format!("{}{SEARCH_PATH}", self.base_url);
        let response = self.http.post(&url).multipart(form).send().await?;
        let body = read_body(response).await?;

        let (assembly, site_error) = {
            let document = Html::parse_document(&body);
            let assembler = JourneyAssembler::new(DateContext::for_query(query));
            (assembler.assemble(&document), error_message(&document))
        };

        results_or_site_error(assembly, site_error)
    }

    /// Returns the cached session token, fetching it on first use.
    async fn token(&self) -> Result<String, KyushuError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }

        let body = self.get_text(TOP_PATH, &[]).await?;
        let token = transaction_token(&Html::parse_document(&body)).ok_or(KyushuError::MissingToken)?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String, KyushuError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "Sending request");
        let response = self.http.get(&url).query(query).send().await?;
        read_body(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, KyushuError> {
        let body = self.get_text(path, query).await?;
        serde_json::from_str(&body).map_err(|e| KyushuError::Json {
            message: e.to_string(),
        })
    }
}

/// Decide between the assembled journeys and the page's own error message.
///
/// The site's error title only counts when nothing could be assembled; an
/// empty page without one is a valid "no journeys" answer.
fn results_or_site_error(
    assembly: Assembly,
    page_error: Option<String>,
) -> Result<Vec<Journey>, KyushuError> {
    if assembly.journeys().is_empty() {
        if let Some(message) = page_error {
            return Err(KyushuError::Site(message));
        }
    }

    debug!(
        journeys = assembly.journeys().len(),
        dropped = assembly.dropped().len(),
        "Search complete"
    );
    Ok(assembly.into_journeys())
}

async fn read_body(response: reqwest::Response) -> Result<String, KyushuError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(KyushuError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response.text().await?)
}
