//! Tool implementations over the client, cache and generator.

use crate::cache::DocCache;
use crate::client::{Client, ClientBuilder};
use crate::codegen::CodeGenerator;
use crate::config::ServerConfig;
use crate::consts::COMPONENT_CATEGORIES;
use crate::error::{Error, Result};
use crate::format::{format_component_doc, format_component_list, format_guide_doc, format_search_results};
use crate::types::Guide;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info};

const GET_COMPONENT_DOC: &str = "get_component_doc";
const SEARCH_COMPONENTS: &str = "search_components";
const LIST_ALL_COMPONENTS: &str = "list_all_components";
const GENERATE_COMPONENT_CODE: &str = "generate_component_code";
const GET_COMPONENT_EXAMPLES: &str = "get_component_examples";

/// Number of known components suggested when a lookup fails.
const SUGGESTION_COUNT: usize = 10;

/// Arguments naming a single component.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ComponentArgs {
    /// PrimeNG component name (e.g. 'button', 'table', 'dialog')
    #[serde(default)]
    pub component: String,
}

/// Arguments for `search_components`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryArgs {
    /// Search term (e.g. 'input', 'table', 'menu')
    #[serde(default)]
    pub query: String,
}

/// Arguments for `generate_component_code`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GenerateArgs {
    /// Component name
    #[serde(default)]
    pub component: String,
    /// Component properties (e.g. {label: 'Click me', icon: 'pi pi-check'})
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// A tool invocation with decoded arguments.
#[derive(Debug, Clone)]
pub enum ToolCall {
    ComponentDoc(ComponentArgs),
    SearchComponents(QueryArgs),
    ListAllComponents,
    GenerateComponentCode(GenerateArgs),
    ComponentExamples(ComponentArgs),
    Guide(Guide),
}

impl ToolCall {
    /// Decode a call from a tool name and its JSON arguments.
    ///
    /// `null` arguments count as an empty object. Unknown tools and arguments
    /// of the wrong shape are [`Error::Validation`].
    pub fn parse(name: &str, arguments: &Value) -> Result<Self> {
        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            Value::Object(_) => arguments.clone(),
            _ => return Err(Error::Validation("Tool arguments must be an object".into())),
        };

        let call = match name {
            GET_COMPONENT_DOC => ToolCall::ComponentDoc(decode(arguments)?),
            SEARCH_COMPONENTS => ToolCall::SearchComponents(decode(arguments)?),
            LIST_ALL_COMPONENTS => ToolCall::ListAllComponents,
            GENERATE_COMPONENT_CODE => ToolCall::GenerateComponentCode(decode(arguments)?),
            GET_COMPONENT_EXAMPLES => ToolCall::ComponentExamples(decode(arguments)?),
            other => match Guide::from_tool_name(other) {
                Some(guide) => ToolCall::Guide(guide),
                None => return Err(Error::Validation(format!("Unknown tool: {}", other))),
            },
        };
        Ok(call)
    }

    /// Name of the tool this call targets.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolCall::ComponentDoc(_) => GET_COMPONENT_DOC,
            ToolCall::SearchComponents(_) => SEARCH_COMPONENTS,
            ToolCall::ListAllComponents => LIST_ALL_COMPONENTS,
            ToolCall::GenerateComponentCode(_) => GENERATE_COMPONENT_CODE,
            ToolCall::ComponentExamples(_) => GET_COMPONENT_EXAMPLES,
            ToolCall::Guide(guide) => guide.tool_name(),
        }
    }
}

fn decode<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| Error::Validation(format!("Invalid arguments: {}", e)))
}

/// Text result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    /// Markdown or plain text body.
    pub text: String,
    /// True when the call failed.
    pub is_error: bool,
}

impl ToolResponse {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(message: impl std::fmt::Display) -> Self {
        Self {
            text: format!("Error: {}", message),
            is_error: true,
        }
    }
}

/// Documentation server: owns the fetch client, the cache, the snippet
/// generator and the list of known component keys.
pub struct DocsServer {
    client: Client,
    cache: DocCache,
    generator: CodeGenerator,
    components: Vec<String>,
}

impl DocsServer {
    /// Build the server from configuration. Performs no I/O.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = ClientBuilder::from_config(&config.scraping).build()?;
        let generator = CodeGenerator::new(client.base_url());
        Ok(Self {
            client,
            cache: DocCache::new(&config.cache),
            generator,
            components: Vec::new(),
        })
    }

    /// Load the cache and discover the component list.
    pub async fn initialize(&mut self) -> Result<()> {
        info!("Initializing documentation server");

        self.cache.initialize().await?;
        self.components = self.client.scrape_component_list().await;

        let stats = self.cache.stats();
        info!(
            components = self.components.len(),
            cached_components = stats.components,
            cached_guides = stats.guides,
            cache_enabled = stats.enabled,
            cache_dir = %self.cache.dir().display(),
            "Server initialized successfully"
        );
        Ok(())
    }

    /// Known component keys.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The documentation cache.
    pub fn cache(&self) -> &DocCache {
        &self.cache
    }

    /// Persist pending cache state before exit.
    pub async fn shutdown(&self) {
        if let Err(e) = self.cache.flush().await {
            error!(error = %e, "Failed to flush cache on shutdown");
        }
    }

    /// Run tool `name` with JSON `arguments`.
    ///
    /// Tool failures come back as an `is_error` response. `Err` is reserved for
    /// unknown tools and arguments of the wrong shape.
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> Result<ToolResponse> {
        let call = ToolCall::parse(name, arguments)?;
        Ok(self.execute(call).await)
    }

    /// Run a decoded tool call.
    pub async fn execute(&self, call: ToolCall) -> ToolResponse {
        let tool = call.tool_name();
        info!(tool, "Executing tool");

        let response = match call {
            ToolCall::ComponentDoc(args) => match required(&args.component) {
                Some(component) => self.component_doc(component).await,
                None => ToolResponse::error("Component name is required"),
            },
            ToolCall::SearchComponents(args) => match required(&args.query) {
                Some(query) => self.search_components(query),
                None => ToolResponse::error("Search query is required"),
            },
            ToolCall::ListAllComponents => ToolResponse::success(format_component_list(COMPONENT_CATEGORIES)),
            ToolCall::GenerateComponentCode(args) => match required(&args.component) {
                Some(component) => {
                    let properties = args.properties.unwrap_or_default();
                    match self.generator.generate_component_code(component, &properties) {
                        Ok(code) => ToolResponse::success(code),
                        Err(e) => ToolResponse::error(e),
                    }
                }
                None => ToolResponse::error("Component name is required"),
            },
            ToolCall::ComponentExamples(args) => match required(&args.component) {
                Some(component) => ToolResponse::success(self.generator.get_component_examples(component)),
                None => ToolResponse::error("Component name is required"),
            },
            ToolCall::Guide(guide) => self.guide(guide).await,
        };

        if response.is_error {
            error!(tool, error = %response.text, "Tool failed");
        } else {
            info!(tool, "Tool executed successfully");
        }
        response
    }

    async fn component_doc(&self, component: &str) -> ToolResponse {
        if let Some(doc) = self.cache.components().get(component).await {
            info!("Returning cached documentation for {}", component);
            return ToolResponse::success(format_component_doc(&doc, self.client.base_url()));
        }

        match self.client.scrape_component_doc(component).await {
            Ok(doc) => {
                let text = format_component_doc(&doc, self.client.base_url());
                self.cache.components().set(component, doc);
                ToolResponse::success(text)
            }
            Err(e) => {
                let suggestion = self
                    .components
                    .iter()
                    .take(SUGGESTION_COUNT)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                ToolResponse::error(format!(
                    "Failed to get documentation for {}: {}\n\nTry one of these: {}...",
                    component, e, suggestion
                ))
            }
        }
    }

    fn search_components(&self, query: &str) -> ToolResponse {
        let needle = query.to_lowercase();
        let results: Vec<&str> = self
            .components
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect();
        ToolResponse::success(format_search_results(&results, query))
    }

    async fn guide(&self, guide: Guide) -> ToolResponse {
        let key = guide.key();
        if let Some(doc) = self.cache.guides().get(key).await {
            info!("Returning cached guide: {}", key);
            return ToolResponse::success(format_guide_doc(&doc));
        }

        match self.client.scrape_guide(key).await {
            Ok(doc) => {
                let text = format_guide_doc(&doc);
                self.cache.guides().set(key, doc);
                ToolResponse::success(text)
            }
            Err(e) => ToolResponse::error(format!("Failed to get {} guide: {}", key, e)),
        }
    }
}


/// The argument when it is non-empty.
fn required(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Server with the cache off, an unreachable site and a fixed component list.
#[cfg(test)]
pub(crate) fn offline_server(components: &[&str]) -> DocsServer {
    use crate::config::{CacheConfig, ScrapingConfig};

    let config = ServerConfig {
        cache: CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        },
        scraping: ScrapingConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout: 200,
            retries: 1,
            ..ScrapingConfig::default()
        },
        ..ServerConfig::default()
    };
    let mut server = DocsServer::new(&config).unwrap();
    server.components = components.iter().map(|c| c.to_string()).collect();
    server
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tool_calls() {
        let call = ToolCall::parse("get_component_doc", &json!({"component": "button"})).unwrap();
        assert!(matches!(call, ToolCall::ComponentDoc(ref args) if args.component == "button"));
        assert_eq!(call.tool_name(), "get_component_doc");

        let call = ToolCall::parse("get_tailwind_guide", &Value::Null).unwrap();
        assert!(matches!(call, ToolCall::Guide(Guide::Tailwind)));
        assert_eq!(call.tool_name(), "get_tailwind_guide");

        let call = ToolCall::parse("generate_component_code", &json!({"component": "card", "properties": null})).unwrap();
        assert!(matches!(call, ToolCall::GenerateComponentCode(ref args) if args.properties.is_none()));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let server = offline_server(&["inputtext", "inputnumber", "button"]);
        let response = server.call_tool("search_components", &json!({"query": "INPUT"})).await.unwrap();
        assert!(!response.is_error);
        assert_eq!(response.text, "Components found:\n\n- inputtext\n- inputnumber");

        let response = server.call_tool("search_components", &json!({"query": "zzz"})).await.unwrap();
        assert_eq!(response.text, "No components found matching \"zzz\"");
    }

    #[tokio::test]
    async fn test_missing_arguments_are_tool_errors() {
        let server = offline_server(&[]);
        let response = server.call_tool("get_component_doc", &json!({})).await.unwrap();
        assert!(response.is_error);
        assert_eq!(response.text, "Error: Component name is required");

        let response = server.call_tool("search_components", &Value::Null).await.unwrap();
        assert_eq!(response.text, "Error: Search query is required");

        let response = server.call_tool("get_component_examples", &json!({"component": ""})).await.unwrap();
        assert_eq!(response.text, "Error: Component name is required");
    }

    #[tokio::test]
    async fn test_invalid_arguments_and_unknown_tool() {
        let server = offline_server(&[]);
        assert!(matches!(
            server.call_tool("search_components", &json!(["input"])).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            server.call_tool("search_components", &json!({"query": 3})).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            server.call_tool("generate_component_code", &json!({"component": "card", "properties": "x"})).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            server.call_tool("get_weather", &json!({})).await,
            Err(Error::Validation(ref m)) if m == "Unknown tool: get_weather"
        ));
    }

    #[tokio::test]
    async fn test_list_generate_and_examples() {
        let server = offline_server(&[]);

        let list = server.execute(ToolCall::ListAllComponents).await;
        assert!(list.text.starts_with("# PrimeNG Components\n\n"));

        let code = server
            .call_tool("generate_component_code", &json!({"component": "card", "properties": {"header": "Title"}}))
            .await
            .unwrap();
        assert!(!code.is_error);
        assert!(code.text.contains("<p-card header=\"Title\">\n  Content here\n</p-card>"));

        let bad = server
            .call_tool("generate_component_code", &json!({"component": "card", "properties": {"a b": 1}}))
            .await
            .unwrap();
        assert!(bad.is_error);
        assert!(bad.text.starts_with("Error: Code generation error:"));

        let examples = server
            .execute(ToolCall::ComponentExamples(ComponentArgs {
                component: "knob".into(),
            }))
            .await;
        assert_eq!(
            examples.text,
            "# Examples for knob\n\nSee the official documentation: http://127.0.0.1:9/knob"
        );
    }
}
