use std::time::Duration;

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{
    date::{parse_loose_date, to_iso, today},
    record::Webpage,
    render::generate_webpage_citation,
};

/// Network settings for fetching a page.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub connect_timeout: Duration,
    pub global_timeout: Duration,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            connect_timeout: Duration::from_secs(5),
            global_timeout: Duration::from_secs(15),
            user_agent: concat!("Mozilla/5.0 (compatible; mla-cite/", env!("CARGO_PKG_VERSION"), ")")
                .to_string(),
        }
    }
}

/// One attribute test against an element, e.g. `property="og:title"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrQuery {
    pub attr: &'static str,
    pub value: &'static str,
}

const fn q(attr: &'static str, value: &'static str) -> AttrQuery {
    AttrQuery { attr, value }
}

impl AttrQuery {
    fn is_word_list(&self) -> bool {
        ["class", "rel"]
            .iter()
            .any(|a| self.attr.eq_ignore_ascii_case(a))
    }

    fn selector(&self) -> anyhow::Result<Selector> {
        // `class` and `rel` hold space-separated lists; any single entry may match.
        let op = if self.is_word_list() { "~=" } else { "=" };
        let css = format!("[{}{}\"{}\"]", self.attr, op, self.value.replace('"', "\\\""));
        Selector::parse(&css).map_err(|e| anyhow!("invalid selector {css}: {e:?}"))
    }
}

// NOTE: Order is priority; the first query with a non-empty match wins.
pub static AUTHOR_QUERIES: &[AttrQuery] = &[
    q("name", "author"),
    q("property", "article:author"),
    q("property", "author"),
    q("rel", "author"),
];

pub static TITLE_QUERIES: &[AttrQuery] = &[q("property", "og:title")];

pub static SITE_NAME_QUERIES: &[AttrQuery] = &[q("property", "og:site_name")];

pub static PUBLICATION_DATE_QUERIES: &[AttrQuery] = &[
    q("name", "data"),
    q("property", "published_time"),
    q("property", "article:published_time"),
    q("name", "timestamp"),
    q("class", "submitted-date"),
    q("class", "posted-on"),
    q("class", "timestamp"),
    q("class", "date"),
];

/// Run `queries` in order and return the first match's `content` attribute, or its text when it
/// has none.
pub fn find_first_matching(document: &Html, queries: &[AttrQuery]) -> anyhow::Result<Option<String>> {
    for query in queries {
        let selector = query.selector()?;
        if let Some(el) = document.select(&selector).next() {
            let value = element_value(el);
            if !value.is_empty() {
                debug!("matched [{}={}] -> {value:?}", query.attr, query.value);
                return Ok(Some(value));
            }
        }
    }
    Ok(None)
}

fn element_value(el: ElementRef<'_>) -> String {
    match el.value().attr("content") {
        Some(content) => normalize_ws(content),
        None => normalize_ws(&el.text().collect::<String>()),
    }
}

fn title_element(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| normalize_ws(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// Pull citation fields out of an already-fetched page.
///
/// The title falls back to the `<title>` element and the site name to the URL's host, since the
/// renderer needs both.
pub fn extract_webpage(html: &str, url: &Url, accessed: NaiveDate) -> anyhow::Result<Webpage> {
    let document = Html::parse_document(html);

    let author = find_first_matching(&document, AUTHOR_QUERIES)?;
    let title = find_first_matching(&document, TITLE_QUERIES)?
        .or_else(|| title_element(&document))
        .unwrap_or_default();
    let website = find_first_matching(&document, SITE_NAME_QUERIES)?
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_default();
    let publication_date = find_first_matching(&document, PUBLICATION_DATE_QUERIES)?.and_then(|raw| {
        let parsed = parse_loose_date(&raw).map(to_iso);
        if parsed.is_none() {
            warn!("ignoring unparseable publication date {raw:?} on {url}");
        }
        parsed
    });

    Ok(Webpage {
        author,
        title,
        website,
        url: url.as_str().to_string(),
        publication_date,
        accessed_date: Some(to_iso(accessed)),
    })
}

fn parse_url(url: &str) -> anyhow::Result<Url> {
    let parsed = Url::parse(url.trim()).with_context(|| format!("invalid URL {url}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(anyhow!("unsupported URL scheme {other:?} in {url}")),
    }
}

/// GET `url` and return the response body.
pub fn fetch(url: &Url, config: &ScrapeConfig) -> anyhow::Result<String> {
    let cfg = ureq::Agent::config_builder()
        .timeout_connect(Some(config.connect_timeout))
        .timeout_global(Some(config.global_timeout))
        .build();
    let agent = ureq::Agent::new_with_config(cfg);
    info!("fetching {url}");
    let res = agent
        .get(url.as_str())
        .header("User-Agent", config.user_agent.as_str())
        .call()
        .with_context(|| format!("failed request for URL {url}"))?;
    res.into_body().read_to_string().context("read body")
}

/// Fetch a page and build a webpage record from its metadata, accessed today.
pub fn get_data_from_webpage(url: &str) -> anyhow::Result<Webpage> {
    get_data_from_webpage_with(url, &ScrapeConfig::default())
}

pub fn get_data_from_webpage_with(url: &str, config: &ScrapeConfig) -> anyhow::Result<Webpage> {
    let url = parse_url(url)?;
    let html = fetch(&url, config)?;
    extract_webpage(&html, &url, today())
}

/// Scrape a page and render its citation.
pub fn auto_cite_webpage(url: &str) -> anyhow::Result<String> {
    auto_cite_webpage_with(url, &ScrapeConfig::default())
}

pub fn auto_cite_webpage_with(url: &str, config: &ScrapeConfig) -> anyhow::Result<String> {
    let page = get_data_from_webpage_with(url, config)?;
    Ok(generate_webpage_citation(&page)?)
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
