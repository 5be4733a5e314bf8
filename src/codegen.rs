//! Template-based snippet generation.

use crate::consts::{capitalize_component_name, PRIMENG_BASE_URL};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use tracing::{debug, error};

/// Components whose generated markup gets placeholder inner content.
const CONTENT_COMPONENTS: &[&str] = &["dialog", "card", "panel", "fieldset"];

const BUTTON_EXAMPLES: &str = r#"# Button Examples

## Basic
```html
<p-button label="Submit" />
```

## With icon
```html
<p-button label="Search" icon="pi pi-search" />
```

## Severities
```html
<p-button label="Primary" />
<p-button label="Secondary" severity="secondary" />
<p-button label="Success" severity="success" />
<p-button label="Info" severity="info" />
<p-button label="Warning" severity="warning" />
<p-button label="Help" severity="help" />
<p-button label="Danger" severity="danger" />
```

## Loading state
```html
<p-button label="Save" [loading]="loading" (onClick)="save()" />
```
"#;

const TABLE_EXAMPLES: &str = r#"# Table Examples

## Basic
```typescript
@Component({
  selector: 'app-table-demo',
  template: `
    <p-table [value]="products">
      <ng-template pTemplate="header">
        <tr>
          <th>Code</th>
          <th>Name</th>
          <th>Category</th>
          <th>Quantity</th>
        </tr>
      </ng-template>
      <ng-template pTemplate="body" let-product>
        <tr>
          <td>{{ product.code }}</td>
          <td>{{ product.name }}</td>
          <td>{{ product.category }}</td>
          <td>{{ product.quantity }}</td>
        </tr>
      </ng-template>
    </p-table>
  `
})
export class TableDemoComponent {
  products: Product[] = [];
}
```

## Pagination
```html
<p-table [value]="products" [paginator]="true" [rows]="10">
  <!-- headers and body -->
</p-table>
```

## Global filter
```html
<p-table [value]="products" [globalFilterFields]="['name','category']">
  <ng-template pTemplate="caption">
    <input pInputText type="text" (input)="dt.filterGlobal($event.target.value, 'contains')" placeholder="Search" />
  </ng-template>
</p-table>
```
"#;

const DIALOG_EXAMPLES: &str = r#"# Dialog Examples

## Basic
```typescript
@Component({
  template: `
    <p-button (click)="showDialog()" label="Show" />
    <p-dialog header="Header" [(visible)]="visible">
      <p>Dialog content</p>
    </p-dialog>
  `
})
export class DialogDemoComponent {
  visible: boolean = false;

  showDialog() {
    this.visible = true;
  }
}
```

## Footer
```html
<p-dialog header="Header" [(visible)]="visible">
  <p>Content</p>
  <ng-template pTemplate="footer">
    <p-button label="No" (onClick)="visible=false" severity="secondary" />
    <p-button label="Yes" (onClick)="confirm()" />
  </ng-template>
</p-dialog>
```

## Modal and responsive
```html
<p-dialog
  header="Title"
  [(visible)]="visible"
  [modal]="true"
  [breakpoints]="{'960px': '75vw', '640px': '90vw'}"
  [style]="{width: '50vw'}">
  Content
</p-dialog>
```
"#;

/// Builds Angular snippets for PrimeNG components.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    base_url: String,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(PRIMENG_BASE_URL)
    }
}

impl CodeGenerator {
    /// Create a generator whose fallback links point at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Standalone-component scaffold using `component` with `properties` as attributes.
    ///
    /// Attributes are emitted in key order. Strings become plain attributes,
    /// `true` a bare attribute, `false` a `[key]="false"` binding and anything
    /// else a property binding holding the JSON value.
    pub fn generate_component_code(&self, component: &str, properties: &Map<String, Value>) -> Result<String> {
        debug!(component = component, properties = properties.len(), "Generating code");

        if !is_valid_component(component) {
            error!(component = component, "Failed to generate code");
            return Err(Error::CodeGeneration {
                message: format!("Failed to generate code for {}: invalid component name", component),
                property: None,
            });
        }

        let attributes = format_attributes(properties).map_err(|property| {
            error!(component = component, property = %property, "Failed to generate code");
            Error::CodeGeneration {
                message: format!("Failed to generate code for {}: invalid attribute name '{}'", component, property),
                property: Some(property),
            }
        })?;

        let class_name = capitalize_component_name(component);
        let open_tag = if attributes.is_empty() {
            format!("<p-{}>", component)
        } else {
            format!("<p-{} {}>", component, attributes)
        };
        let content = if CONTENT_COMPONENTS.contains(&component) { "Content here" } else { "" };

        Ok(format!(
            "<!-- Component Import -->\n\
             import {{ {class_name}Module }} from 'primeng/{component}';\n\
             \n\
             <!-- Component.ts -->\n\
             @Component({{\n  \
               selector: 'app-example',\n  \
               standalone: true,\n  \
               imports: [{class_name}Module],\n  \
               templateUrl: './example.component.html'\n\
             }})\n\
             export class ExampleComponent {{\n  \
               // Your logic here\n\
             }}\n\
             \n\
             <!-- Component.html -->\n\
             {open_tag}\n  \
               {content}\n\
             </p-{component}>"
        ))
    }

    /// Curated usage examples for `component`, or a pointer to its page.
    pub fn get_component_examples(&self, component: &str) -> String {
        match component {
            "button" => BUTTON_EXAMPLES.to_string(),
            "table" => TABLE_EXAMPLES.to_string(),
            "dialog" => DIALOG_EXAMPLES.to_string(),
            other => format!(
                "# Examples for {}\n\nSee the official documentation: {}/{}",
                other, self.base_url, other
            ),
        }
    }
}

fn is_valid_component(component: &str) -> bool {
    !component.is_empty()
        && component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_valid_attribute(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '='))
}

/// Attribute string for `properties`, or the first offending key.
fn format_attributes(properties: &Map<String, Value>) -> std::result::Result<String, String> {
    let mut entries: Vec<(&String, &Value)> = properties.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut parts = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if !is_valid_attribute(key) {
            return Err(key.clone());
        }
        let part = match value {
            Value::String(s) => format!("{}=\"{}\"", key, s.replace('"', "&quot;")),
            Value::Bool(true) => key.clone(),
            Value::Bool(false) => format!("[{}]=\"false\"", key),
            other => format!("[{}]=\"{}\"", key, other),
        };
        parts.push(part);
    }

    Ok(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_attribute_formatting() {
        let properties = props(json!({
            "label": "Save",
            "raised": true,
            "disabled": false,
            "badge": 3,
        }));
        assert_eq!(
            format_attributes(&properties).unwrap(),
            r#"[badge]="3" [disabled]="false" label="Save" raised"#
        );
    }

    #[test]
    fn test_generate_button() {
        let generator = CodeGenerator::default();
        let code = generator
            .generate_component_code("button", &props(json!({"label": "Click me", "icon": "pi pi-check"})))
            .unwrap();

        assert!(code.starts_with("<!-- Component Import -->\nimport { ButtonModule } from 'primeng/button';"));
        assert!(code.contains("  imports: [ButtonModule],\n"));
        assert!(code.contains(r#"<p-button icon="pi pi-check" label="Click me">"#));
        assert!(code.ends_with("</p-button>"));
        assert!(!code.contains("Content here"));
    }

    #[test]
    fn test_generate_content_component_without_properties() {
        let code = CodeGenerator::default()
            .generate_component_code("dialog", &Map::new())
            .unwrap();
        assert!(code.contains("<p-dialog>\n  Content here\n</p-dialog>"));
    }

    #[test]
    fn test_generate_rejects_invalid_attribute() {
        let err = CodeGenerator::default()
            .generate_component_code("button", &props(json!({"bad name": "x"})))
            .unwrap_err();
        assert_eq!(err.code(), "CODE_GENERATION_ERROR");
        assert!(matches!(err, Error::CodeGeneration { property: Some(ref p), .. } if p == "bad name"));
    }

    #[test]
    fn test_generate_rejects_invalid_component() {
        let err = CodeGenerator::default()
            .generate_component_code("<script>", &Map::new())
            .unwrap_err();
        assert_eq!(err.code(), "CODE_GENERATION_ERROR");
    }

    #[test]
    fn test_string_values_are_escaped() {
        let properties = props(json!({"label": "Say \"hi\""}));
        assert_eq!(format_attributes(&properties).unwrap(), r#"label="Say &quot;hi&quot;""#);
    }

    #[test]
    fn test_examples() {
        let generator = CodeGenerator::new("http://localhost:9000/");
        assert!(generator.get_component_examples("button").starts_with("# Button Examples"));
        assert!(generator.get_component_examples("table").contains("[paginator]=\"true\""));
        assert!(generator.get_component_examples("dialog").contains("[(visible)]=\"visible\""));
        assert_eq!(
            generator.get_component_examples("knob"),
            "# Examples for knob\n\nSee the official documentation: http://localhost:9000/knob"
        );
    }
}
