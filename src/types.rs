//! Documentation records produced by extraction and held in the cache.

use serde::{Deserialize, Serialize};

/// Property information for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentProperty {
    /// Property name.
    pub name: String,
    /// Declared type, `"any"` when the table does not say.
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value column, absent when the table has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Description text.
    pub description: String,
}

/// Event information for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEvent {
    /// Event name.
    pub name: String,
    /// Parameter signature.
    pub parameters: String,
    /// Description text.
    pub description: String,
}

/// Method information for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMethod {
    /// Method name.
    pub name: String,
    /// Parameter signature.
    pub parameters: String,
    /// Description text.
    pub description: String,
}

/// Complete documentation for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    /// Component key, e.g. `button`.
    pub name: String,
    /// Page description.
    pub description: String,
    /// Standalone component import.
    pub import_statement: String,
    /// NgModule import.
    pub module_import: String,
    /// Short markup snippet.
    pub basic_usage: String,
    /// Input properties.
    #[serde(default)]
    pub properties: Vec<ComponentProperty>,
    /// Output events.
    #[serde(default)]
    pub events: Vec<ComponentEvent>,
    /// Public methods.
    #[serde(default)]
    pub methods: Vec<ComponentMethod>,
}

/// Section within a guide document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSection {
    /// Section heading.
    pub heading: String,
    /// Paragraphs joined by blank lines.
    pub content: String,
    /// Code blocks assigned to this section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_blocks: Option<Vec<String>>,
}

/// Guide documentation for setup and styling pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideDoc {
    /// Guide key, e.g. `installation`.
    pub name: String,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Ordered sections.
    pub sections: Vec<GuideSection>,
    /// Source URL.
    pub url: String,
}

/// A cached value with its freshness stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached record.
    pub data: T,
    /// Unix timestamp (milliseconds) when the entry was stored.
    pub timestamp: u64,
    /// Time-to-live in milliseconds.
    pub ttl: u64,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is still fresh at `now` (milliseconds).
    pub fn is_fresh(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) <= self.ttl
    }
}

/// Summary written next to the component cache file. Never read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetadata {
    /// Cache format version.
    pub version: String,
    /// Unix timestamp (milliseconds) of the last write.
    pub last_update: u64,
    /// Number of component entries written.
    pub component_count: usize,
}

/// Entry counts reported by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Cached component docs.
    pub components: usize,
    /// Cached guides.
    pub guides: usize,
    /// Whether caching is enabled.
    pub enabled: bool,
}

/// The documentation guides served by fixed-key tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guide {
    /// Installation and initial setup.
    Installation,
    /// Themes, customization and dark mode.
    Theming,
    /// PrimeIcons usage.
    Icons,
    /// Tailwind CSS integration.
    Tailwind,
}

impl Guide {
    /// Every guide, in tool listing order.
    pub const ALL: [Guide; 4] = [Guide::Installation, Guide::Theming, Guide::Icons, Guide::Tailwind];

    /// Page key on the documentation site.
    pub fn key(self) -> &'static str {
        match self {
            Guide::Installation => "installation",
            Guide::Theming => "theming",
            Guide::Icons => "icons",
            Guide::Tailwind => "tailwind",
        }
    }

    /// Name of the tool that serves this guide.
    pub fn tool_name(self) -> &'static str {
        match self {
            Guide::Installation => "get_installation_guide",
            Guide::Theming => "get_theming_guide",
            Guide::Icons => "get_icons_guide",
            Guide::Tailwind => "get_tailwind_guide",
        }
    }

    /// Look up a guide by its tool name.
    pub fn from_tool_name(name: &str) -> Option<Guide> {
        Guide::ALL.into_iter().find(|g| g.tool_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_doc_serializes_camel_case() {
        let doc = ComponentDoc {
            name: "button".into(),
            description: "Button component".into(),
            import_statement: "import { Button } from 'primeng/button';".into(),
            module_import: "import { ButtonModule } from 'primeng/button';".into(),
            basic_usage: "<p-button label=\"Click\" />".into(),
            properties: vec![ComponentProperty {
                name: "label".into(),
                kind: "string".into(),
                default: None,
                description: "Label text".into(),
            }],
            events: vec![],
            methods: vec![],
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["importStatement"], json!("import { Button } from 'primeng/button';"));
        assert_eq!(value["basicUsage"], json!("<p-button label=\"Click\" />"));
        assert_eq!(value["properties"][0]["type"], json!("string"));
        assert!(value["properties"][0].get("default").is_none());
    }

    #[test]
    fn test_cache_entry_freshness() {
        let entry = CacheEntry {
            data: (),
            timestamp: 1_000,
            ttl: 500,
        };
        assert!(entry.is_fresh(1_000));
        assert!(entry.is_fresh(1_500));
        assert!(!entry.is_fresh(1_501));
        // Clock skew backwards counts as fresh.
        assert!(entry.is_fresh(900));
    }

    #[test]
    fn test_guide_lookup() {
        assert_eq!(Guide::from_tool_name("get_icons_guide"), Some(Guide::Icons));
        assert_eq!(Guide::from_tool_name("get_component_doc"), None);
        assert_eq!(Guide::Tailwind.key(), "tailwind");
    }
}
