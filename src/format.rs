//! Markdown rendering of scraped records and listings.

use crate::types::{ComponentDoc, GuideDoc};

/// Escape a value for use inside a markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// One markdown table row, newline included.
fn table_row(values: &[&str]) -> String {
    let cells: Vec<String> = values.iter().map(|v| cell(v)).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Render component documentation. Empty property, event and method
/// collections produce no section at all.
pub fn format_component_doc(doc: &ComponentDoc, base_url: &str) -> String {
    let mut text = format!("# {}\n\n{}\n\n", doc.name.to_uppercase(), doc.description);
    text.push_str(&format!(
        "## Import\n```typescript\n{}\n{}\n```\n\n",
        doc.import_statement, doc.module_import
    ));
    text.push_str(&format!("## Basic Usage\n```html\n{}\n```\n\n", doc.basic_usage));

    if !doc.properties.is_empty() {
        text.push_str("## Properties\n\n| Name | Type | Default | Description |\n|------|------|---------|-------------|\n");
        for prop in &doc.properties {
            let default = prop.default.as_deref().filter(|d| !d.is_empty()).unwrap_or("-");
            text.push_str(&table_row(&[prop.name.as_str(), prop.kind.as_str(), default, prop.description.as_str()]));
        }
        text.push('\n');
    }

    if !doc.events.is_empty() {
        text.push_str("## Events\n\n| Name | Parameters | Description |\n|------|------------|-------------|\n");
        for event in &doc.events {
            text.push_str(&table_row(&[event.name.as_str(), event.parameters.as_str(), event.description.as_str()]));
        }
        text.push('\n');
    }

    if !doc.methods.is_empty() {
        text.push_str("## Methods\n\n| Name | Parameters | Description |\n|------|------------|-------------|\n");
        for method in &doc.methods {
            text.push_str(&table_row(&[method.name.as_str(), method.parameters.as_str(), method.description.as_str()]));
        }
        text.push('\n');
    }

    text.push_str(&format!(
        "## Full Documentation\n{}/{}\n",
        base_url.trim_end_matches('/'),
        doc.name
    ));
    text
}

/// Render a guide with one fenced block per code sample.
pub fn format_guide_doc(guide: &GuideDoc) -> String {
    let mut text = format!("# {}\n\n{}\n\n", guide.title.to_uppercase(), guide.description);

    for section in &guide.sections {
        text.push_str(&format!("## {}\n\n", section.heading));
        if !section.content.is_empty() {
            text.push_str(&format!("{}\n\n", section.content));
        }
        for code in section.code_blocks.iter().flatten() {
            text.push_str(&format!("```{}\n{}\n```\n\n", detect_code_language(code), code));
        }
    }

    text.push_str(&format!("\n---\nFull documentation: {}\n", guide.url));
    text
}

/// Render the components matching `query`.
pub fn format_search_results(results: &[&str], query: &str) -> String {
    if results.is_empty() {
        return format!("No components found matching \"{}\"", query);
    }

    let list: Vec<String> = results.iter().map(|c| format!("- {}", c)).collect();
    format!("Components found:\n\n{}", list.join("\n"))
}

/// Render the categorized component catalogue.
pub fn format_component_list(categories: &[(&str, &[&str])]) -> String {
    let mut text = String::from("# PrimeNG Components\n\n");
    for (category, components) in categories {
        text.push_str(&format!("## {}\n", category));
        for component in components.iter() {
            text.push_str(&format!("- {}\n", component));
        }
        text.push('\n');
    }
    text
}

/// Best-effort fence language for a code sample; empty when unknown.
pub fn detect_code_language(code: &str) -> &'static str {
    if ["npm install", "yarn add", "pnpm add"].iter().any(|cmd| code.contains(cmd)) {
        "bash"
    } else if code.contains("import ") || code.contains("export ") || code.contains("@Component") {
        "typescript"
    } else if code.contains('<') && code.contains('>') && code.contains("p-") {
        "html"
    } else if code.contains('{') && code.contains('}') && code.contains(':') {
        "json"
    } else if code.contains("class=") || code.contains("className=") {
        "html"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentEvent, ComponentProperty, GuideSection};

    fn button_doc() -> ComponentDoc {
        ComponentDoc {
            name: "button".into(),
            description: "Button is an extension to standard button element.".into(),
            import_statement: "import { Button } from 'primeng/button';".into(),
            module_import: "import { ButtonModule } from 'primeng/button';".into(),
            basic_usage: r#"<p-button label="Click me" />"#.into(),
            properties: Vec::new(),
            events: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn test_component_doc_omits_empty_sections() {
        let text = format_component_doc(&button_doc(), "https://primeng.org");

        assert!(text.starts_with("# BUTTON\n\nButton is an extension"));
        assert!(text.contains("## Import\n```typescript\nimport { Button } from 'primeng/button';\n"));
        assert!(text.contains("## Basic Usage\n```html\n<p-button label=\"Click me\" />\n```"));
        assert!(!text.contains("## Properties"));
        assert!(!text.contains("## Events"));
        assert!(!text.contains("## Methods"));
        assert!(!text.contains("| Name |"));
        assert!(text.ends_with("## Full Documentation\nhttps://primeng.org/button\n"));
    }

    #[test]
    fn test_table_row_escapes_cells() {
        assert_eq!(table_row(&["visible", "boolean", "false"]), "| visible | boolean | false |\n");
        assert_eq!(
            table_row(&["options", "any[] | null", "Items to\ndisplay."]),
            "| options | any[] \\| null | Items to display. |\n"
        );
    }

    #[test]
    fn test_component_doc_tables() {
        let mut doc = button_doc();
        doc.properties.push(ComponentProperty {
            name: "label".into(),
            kind: "string | undefined".into(),
            default: None,
            description: "Text of the button.".into(),
        });
        doc.events.push(ComponentEvent {
            name: "onClick".into(),
            parameters: "event: MouseEvent".into(),
            description: "Callback to execute when button is clicked.".into(),
        });

        let text = format_component_doc(&doc, "https://primeng.org/");
        assert!(text.contains("## Properties\n\n| Name | Type | Default | Description |\n"));
        assert!(text.contains("| label | string \\| undefined | - | Text of the button. |\n"));
        assert!(text.contains("| onClick | event: MouseEvent | Callback to execute when button is clicked. |\n"));
        assert!(!text.contains("## Methods"));
        assert!(text.ends_with("https://primeng.org/button\n"));
    }

    #[test]
    fn test_guide_doc() {
        let guide = GuideDoc {
            name: "installation".into(),
            title: "Installation".into(),
            description: "Setting up PrimeNG in an Angular CLI project.".into(),
            sections: vec![
                GuideSection {
                    heading: "Download".into(),
                    content: "PrimeNG is available for download on npm registry.".into(),
                    code_blocks: Some(vec!["npm install primeng".into()]),
                },
                GuideSection {
                    heading: "Styles".into(),
                    content: String::new(),
                    code_blocks: None,
                },
            ],
            url: "https://primeng.org/installation".into(),
        };

        let text = format_guide_doc(&guide);
        assert!(text.starts_with("# INSTALLATION\n\nSetting up PrimeNG"));
        assert!(text.contains("## Download\n\nPrimeNG is available for download on npm registry.\n\n```bash\nnpm install primeng\n```\n\n"));
        assert!(text.contains("## Styles\n\n\n---\n"));
        assert!(text.ends_with("Full documentation: https://primeng.org/installation\n"));
    }

    #[test]
    fn test_search_results() {
        assert_eq!(
            format_search_results(&["inputtext", "inputnumber"], "input"),
            "Components found:\n\n- inputtext\n- inputnumber"
        );
        assert_eq!(format_search_results(&[], "zzz"), "No components found matching \"zzz\"");
    }

    #[test]
    fn test_component_list() {
        let categories: &[(&str, &[&str])] = &[("Button", &["button", "speeddial"]), ("Panel", &["card"])];
        assert_eq!(
            format_component_list(categories),
            "# PrimeNG Components\n\n## Button\n- button\n- speeddial\n\n## Panel\n- card\n\n"
        );
    }

    #[test]
    fn test_detect_code_language() {
        assert_eq!(detect_code_language("npm install primeng"), "bash");
        assert_eq!(detect_code_language("import { ButtonModule } from 'primeng/button';"), "typescript");
        assert_eq!(detect_code_language("<p-button label=\"x\" />"), "html");
        assert_eq!(detect_code_language("{ \"theme\": \"aura\" }"), "json");
        assert_eq!(detect_code_language("<div class=\"flex\"></div>"), "html");
        assert_eq!(detect_code_language("plain text"), "");
    }
}
