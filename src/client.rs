//! HTTP client for the PrimeNG documentation site.

use crate::config::ScrapingConfig;
use crate::consts::{basic_usage_fallback, capitalize_component_name, COMPONENT_INDEX_PAGE, FALLBACK_COMPONENTS, PRIMENG_BASE_URL};
use crate::error::{Error, Result};
use crate::extract::{
    extract_basic_usage, extract_component_links, extract_description, extract_events, extract_guide_sections,
    extract_guide_title, extract_methods, extract_properties,
};
use crate::retry::{retry_with_backoff, RetryOptions};
use crate::types::{ComponentDoc, GuideDoc};
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use scraper::Html;
use std::time::Duration;
use tracing::{error, info, warn};

const DEFAULT_TIMEOUT_MS: u64 = crate::config::DEFAULT_TIMEOUT_MS;

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    retry: RetryOptions,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a builder targeting the public documentation site.
    pub fn new() -> Self {
        Self {
            base_url: PRIMENG_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry: RetryOptions::default(),
            user_agent_suffix: None,
        }
    }

    /// Create a builder from the `scraping` configuration section.
    pub fn from_config(config: &ScrapingConfig) -> Self {
        Self::new()
            .base_url(config.base_url.as_str())
            .timeout(config.timeout())
            .max_retries(config.retries)
    }

    /// Set the documentation site root.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the attempts per fetch, keeping the default backoff schedule.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.retry.max_retries = retries;
        self
    }

    /// Replace the whole backoff schedule.
    pub fn retry_options(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    /// Append a suffix to the User-Agent.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base URL is required".into()));
        }

        if !self.base_url.starts_with("https://") {
            warn!(base_url = %self.base_url, "Documentation base URL is not using HTTPS");
        }

        let user_agent = build_user_agent(self.user_agent_suffix.as_deref());
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|e| Error::Config(format!("invalid User-Agent: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        Ok(Client {
            base_url: self.base_url,
            http_client,
            retry: self.retry,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches documentation pages and turns them into structured records.
///
/// # Example
///
/// ```rust,no_run
/// use primeng_docs::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), primeng_docs::Error> {
///     let client = Client::builder().build()?;
///
///     let doc = client.scrape_component_doc("button").await?;
///     println!("{} properties", doc.properties.len());
///     Ok(())
/// }
/// ```
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
    retry: RetryOptions,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Documentation site root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the page for `key`.
    pub fn page_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// GET a page and return its body. Non-success statuses are errors.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.http_client.get(url).send().await.map_err(Error::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(Error::from_request)
    }

    /// Component keys linked from the installation page's navigation.
    ///
    /// Never fails: once every attempt has failed the built-in list is returned.
    pub async fn scrape_component_list(&self) -> Vec<String> {
        let url = self.page_url(COMPONENT_INDEX_PAGE);
        info!(url = %url, "Scraping component list");

        let url_ref = url.as_str();
        let result = retry_with_backoff(
            || async move {
                let html = self.fetch_html(url_ref).await?;
                Ok::<_, Error>(component_list_from_html(&html))
            },
            &self.retry,
            "Scrape component list",
        )
        .await;

        match result {
            Ok(components) => {
                info!(count = components.len(), "Found components");
                components
            }
            Err(e) => {
                error!(error = %e, "Failed to scrape component list, using fallback");
                FALLBACK_COMPONENTS.iter().map(|c| c.to_string()).collect()
            }
        }
    }

    /// Scrape the reference page for component `name`.
    pub async fn scrape_component_doc(&self, name: &str) -> Result<ComponentDoc> {
        let url = self.page_url(name);
        info!(url = %url, "Scraping documentation for {}", name);

        let fallback = basic_usage_fallback(name);
        let (url_ref, fallback_ref) = (url.as_str(), fallback.as_str());
        let result = retry_with_backoff(
            || async move {
                let html = self.fetch_html(url_ref).await?;
                Ok::<_, Error>(component_doc_from_html(name, &html, fallback_ref))
            },
            &self.retry,
            &format!("Scrape {} documentation", name),
        )
        .await;

        match result {
            Ok(doc) => {
                info!(
                    properties = doc.properties.len(),
                    events = doc.events.len(),
                    methods = doc.methods.len(),
                    "Successfully scraped documentation for {}",
                    name
                );
                Ok(doc)
            }
            Err(e) => {
                error!(error = %e, url = %url, "Failed to scrape documentation for {}", name);
                Err(Error::scraping(format!("Failed to scrape documentation for {}", name), url, e))
            }
        }
    }

    /// Scrape the guide page `name`.
    pub async fn scrape_guide(&self, name: &str) -> Result<GuideDoc> {
        let url = self.page_url(name);
        info!(url = %url, "Scraping guide: {}", name);

        let url_ref = url.as_str();
        let result = retry_with_backoff(
            || async move {
                let html = self.fetch_html(url_ref).await?;
                Ok::<_, Error>(guide_from_html(name, url_ref, &html))
            },
            &self.retry,
            &format!("Scrape {} guide", name),
        )
        .await;

        match result {
            Ok(guide) => {
                info!(sections = guide.sections.len(), title = %guide.title, "Successfully scraped guide: {}", name);
                Ok(guide)
            }
            Err(e) => {
                error!(error = %e, url = %url, "Failed to scrape guide: {}", name);
                Err(Error::scraping(format!("Failed to scrape guide: {}", name), url, e))
            }
        }
    }
}

fn component_list_from_html(html: &str) -> Vec<String> {
    extract_component_links(&Html::parse_document(html))
}

/// Assemble a [`ComponentDoc`] from a component reference page.
pub fn component_doc_from_html(name: &str, html: &str, usage_fallback: &str) -> ComponentDoc {
    let document = Html::parse_document(html);
    let class_name = capitalize_component_name(name);

    ComponentDoc {
        name: name.to_string(),
        description: extract_description(&document, name),
        import_statement: format!("import {{ {} }} from 'primeng/{}';", class_name, name),
        module_import: format!("import {{ {}Module }} from 'primeng/{}';", class_name, name),
        basic_usage: extract_basic_usage(&document, name, usage_fallback),
        properties: extract_properties(&document),
        events: extract_events(&document),
        methods: extract_methods(&document),
    }
}

/// Assemble a [`GuideDoc`] from a guide page.
pub fn guide_from_html(name: &str, url: &str, html: &str) -> GuideDoc {
    let document = Html::parse_document(html);
    let title = extract_guide_title(&document);

    GuideDoc {
        name: name.to_string(),
        title: if title.is_empty() { name.to_string() } else { title },
        description: extract_description(&document, name),
        sections: extract_guide_sections(&document),
        url: url.to_string(),
    }
}
