//! Synchronous client for the **World Bank Indicators API (v2)**, XML flavor.
//!
//! This module covers the `country/all/indicator/{code}` endpoint plus the
//! countries listing. Responses are requested with `format=xml`; each page is
//! parsed into an [`IndicatorPage`] and pagination is driven by the `pages`
//! attribute the API declares on the root element.
//!
//! Typical usage:
//! ```no_run
//! # use forest_cover::{Client, DateSpec};
//! let client = Client::default();
//! let pages = client.fetch_indicator_pages("AG.LND.FRST.ZS", DateSpec::Year(2005))?;
//! # Ok::<(), forest_cover::api::FetchError>(())
//! ```

use crate::models::{DataRecord, DateSpec, IndicatorPage};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

/// Records per page requested from the API.
const PER_PAGE: u32 = 100;

/// Safety cap to avoid pathological jobs.
const MAX_PAGES: u32 = 1000;

/// Faults raised while fetching or decoding a page.
///
/// None of these are recovered from: a single failing request voids the
/// whole batch (see [`Client::fetch_all`]).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for {url} failed with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("malformed XML in response body")]
    Xml(#[from] roxmltree::Error),
    #[error("response is missing the `{0}` attribute")]
    MissingAttribute(&'static str),
    #[error("record is missing the `{0}` element")]
    MissingElement(&'static str),
    #[error("invalid `{field}` field: {text:?}")]
    InvalidField { field: &'static str, text: String },
    #[error("page limit exceeded ({0})")]
    PageLimit(u32),
}

/// HTTP client with the endpoint configuration externalized: base URL and
/// the (optional) static API key both live on the struct rather than in the
/// request path.
#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub api_key: Option<String>,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new("https://api.worldbank.org/v2", None)
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(code: &str) -> String {
    percent_encoding::utf8_percent_encode(code.trim(), SAFE).to_string()
}

/// Walk pages 1..=total by repeatedly invoking `get_page` until the declared
/// total page count is reached. Pages come back in ascending page order,
/// fully materialized, and `get_page` is called exactly `total` times.
pub fn collect_pages<E>(
    mut get_page: impl FnMut(u32) -> Result<IndicatorPage, E>,
) -> Result<Vec<IndicatorPage>, E>
where
    E: From<FetchError>,
{
    let mut out = Vec::new();
    let mut page = 1u32;
    loop {
        if page > MAX_PAGES {
            return Err(FetchError::PageLimit(MAX_PAGES).into());
        }
        let p = get_page(page)?;
        let total = p.pages;
        out.push(p);
        if page >= total {
            break;
        }
        page += 1;
    }
    Ok(out)
}

fn parse_pages_attr(root: &roxmltree::Node<'_, '_>) -> Result<u32, FetchError> {
    let text = root
        .attribute("pages")
        .ok_or(FetchError::MissingAttribute("pages"))?;
    text.parse().map_err(|_| FetchError::InvalidField {
        field: "pages",
        text: text.to_string(),
    })
}

/// Parse one XML page of indicator data.
///
/// The API namespace-qualifies elements (`wb:data`, `wb:value`, …) but not
/// attributes, so elements are matched by local name. Record fields are kept
/// as strings; an absent or empty `value` element stays an empty string here
/// and is filtered out later by the extractor.
pub fn parse_page(body: &str) -> Result<IndicatorPage, FetchError> {
    let doc = roxmltree::Document::parse(body)?;
    let root = doc.root_element();
    let pages = parse_pages_attr(&root)?;

    let mut records = Vec::new();
    for node in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "data")
    {
        let text_of = |name: &'static str| -> Result<String, FetchError> {
            node.children()
                .find(|c| c.is_element() && c.tag_name().name() == name)
                .map(|c| c.text().unwrap_or("").trim().to_string())
                .ok_or(FetchError::MissingElement(name))
        };
        let country = text_of("country")?;
        let date = text_of("date")?;
        let value = text_of("value")?;
        let year: i32 = date.parse().map_err(|_| FetchError::InvalidField {
            field: "date",
            text: date.clone(),
        })?;
        records.push(DataRecord {
            country,
            year,
            value,
        });
    }
    Ok(IndicatorPage { pages, records })
}

/// Parse one XML page of the countries listing into ordered country names.
/// Order is the API's natural return order; it drives plot ordering later.
pub fn parse_country_names(body: &str) -> Result<(u32, Vec<String>), FetchError> {
    let doc = roxmltree::Document::parse(body)?;
    let root = doc.root_element();
    let pages = parse_pages_attr(&root)?;

    let mut names = Vec::new();
    for node in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "country")
    {
        let name = node
            .children()
            .find(|c| c.is_element() && c.tag_name().name() == "name")
            .and_then(|c| c.text())
            .ok_or(FetchError::MissingElement("name"))?;
        names.push(name.trim().to_string());
    }
    Ok((pages, names))
}

impl Client {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("forest_cover/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into(),
            api_key,
            http,
        }
    }

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        resp.text().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    fn key_param(&self) -> String {
        match &self.api_key {
            Some(k) => format!("&api_key={}", enc(k)),
            None => String::new(),
        }
    }

    /// Fetch every page of one indicator over one date spec.
    ///
    /// Pages are fetched sequentially: page N+1 is not requested until page
    /// N's declared total is known. The result holds all pages in ascending
    /// order. Any transport or decode fault aborts the walk.
    pub fn fetch_indicator_pages(
        &self,
        indicator: &str,
        date: DateSpec,
    ) -> Result<Vec<IndicatorPage>, FetchError> {
        let url = format!(
            "{}/country/all/indicator/{}?format=xml&per_page={}{}&date={}",
            self.base_url,
            enc(indicator),
            PER_PAGE,
            self.key_param(),
            date.to_query_param(),
        );
        let pages = collect_pages(|page| {
            let body = self.get_text(&format!("{}&page={}", url, page))?;
            parse_page(&body)
        })?;
        log::info!(
            "fetched {} page(s) for {} ({})",
            pages.len(),
            indicator,
            date.to_query_param()
        );
        Ok(pages)
    }

    /// Fetch the ordered catalog of country/region names.
    pub fn fetch_regions(&self) -> Result<Vec<String>, FetchError> {
        let url = format!(
            "{}/country?format=xml&per_page={}{}",
            self.base_url,
            PER_PAGE,
            self.key_param(),
        );
        let mut names = Vec::new();
        let mut page = 1u32;
        loop {
            if page > MAX_PAGES {
                return Err(FetchError::PageLimit(MAX_PAGES));
            }
            let body = self.get_text(&format!("{}&page={}", url, page))?;
            let (total, mut batch) = parse_country_names(&body)?;
            names.append(&mut batch);
            if page >= total {
                break;
            }
            page += 1;
        }
        Ok(names)
    }

    /// Fan out one paginated fetch per (indicator, date) request and block
    /// until all complete. Results come back in submission order, not
    /// completion order. The first failing task voids the whole batch; a
    /// panicking worker is resumed on the caller thread.
    pub fn fetch_all(
        &self,
        requests: &[(String, DateSpec)],
    ) -> Result<Vec<Vec<IndicatorPage>>, FetchError> {
        std::thread::scope(|s| {
            let handles: Vec<_> = requests
                .iter()
                .map(|(indicator, date)| {
                    s.spawn(move || self.fetch_indicator_pages(indicator, *date))
                })
                .collect();
            let mut out = Vec::with_capacity(handles.len());
            for handle in handles {
                match handle.join() {
                    Ok(res) => out.push(res?),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            Ok(out)
        })
    }
}
