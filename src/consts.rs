//! Fixed facts about the documentation site.

/// Documentation site root.
pub const PRIMENG_BASE_URL: &str = "https://primeng.org";

/// Page whose navigation lists every component.
pub const COMPONENT_INDEX_PAGE: &str = "installation";

/// Top-level pages that are not components.
pub const NON_COMPONENT_PAGES: &[&str] = &[
    "installation",
    "theming",
    "icons",
    "tailwind",
    "configuration",
    "support",
    "pro",
    "playground",
    "customicons",
    "templates",
    "designer",
    "filterservice",
    "lts",
    "team",
    "roadmap",
    "contribution",
    "chart",
    "classnames",
    "uikit",
    "guides",
];

/// Path fragments that mark a page as non-component.
pub const NON_COMPONENT_FRAGMENTS: &[&str] = &["guide", "migration", "ci"];

/// Component list used when the site cannot be reached.
pub const FALLBACK_COMPONENTS: &[&str] = &[
    "accordion",
    "autocomplete",
    "avatar",
    "badge",
    "breadcrumb",
    "button",
    "cascadeselect",
    "checkbox",
    "colorpicker",
    "confirmdialog",
    "contextmenu",
    "dataview",
    "datepicker",
    "dialog",
    "divider",
    "drawer",
    "dropdown",
    "editor",
    "fieldset",
    "fileupload",
    "floatlabel",
    "galleria",
    "iconfield",
    "iftalabel",
    "image",
    "inplace",
    "inputgroup",
    "inputmask",
    "inputnumber",
    "inputotp",
    "inputtext",
    "keyfilter",
    "knob",
    "listbox",
    "megamenu",
    "menu",
    "menubar",
    "message",
    "metergroup",
    "multiselect",
    "orderlist",
    "organizationchart",
    "paginator",
    "panel",
    "panelmenu",
    "password",
    "picklist",
    "popover",
    "progressbar",
    "progressspinner",
    "radiobutton",
    "rating",
    "ripple",
    "scrollpanel",
    "scrolltop",
    "select",
    "selectbutton",
    "skeleton",
    "slider",
    "speeddial",
    "splitbutton",
    "splitter",
    "stepper",
    "table",
    "tabs",
    "tag",
    "terminal",
    "textarea",
    "timeline",
    "toast",
    "togglebutton",
    "toggleswitch",
    "toolbar",
    "tooltip",
    "tree",
    "treetable",
    "treeselect",
    "virtualscroller",
];

/// Component categories for the static listing.
pub const COMPONENT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Inputs",
        &[
            "autocomplete",
            "calendar",
            "checkbox",
            "colorpicker",
            "dropdown",
            "inputmask",
            "inputnumber",
            "inputswitch",
            "inputtext",
            "inputtextarea",
            "multiselect",
            "password",
            "radiobutton",
            "rating",
            "selectbutton",
            "slider",
            "togglebutton",
            "tristatecheckbox",
        ],
    ),
    (
        "Data",
        &[
            "datatable",
            "table",
            "dataview",
            "orderlist",
            "organizationchart",
            "paginator",
            "picklist",
            "timeline",
            "tree",
            "treetable",
            "virtualscroller",
        ],
    ),
    ("Buttons", &["button", "splitbutton", "speeddial"]),
    (
        "Panels",
        &[
            "accordion",
            "card",
            "divider",
            "fieldset",
            "panel",
            "scrollpanel",
            "splitter",
            "stepper",
            "tabview",
            "toolbar",
        ],
    ),
    ("Overlays", &["dialog", "confirmdialog", "sidebar", "tooltip"]),
    (
        "Menus",
        &[
            "breadcrumb",
            "contextmenu",
            "menu",
            "menubar",
            "megamenu",
            "panelmenu",
            "tabmenu",
            "tieredmenu",
        ],
    ),
    ("Messages", &["message", "toast"]),
    ("Media", &["carousel", "galleria", "image"]),
    (
        "Misc",
        &[
            "avatar",
            "badge",
            "chip",
            "progressbar",
            "progressspinner",
            "skeleton",
            "tag",
            "terminal",
        ],
    ),
];

/// Usage snippet for components whose page has no suitable first code block.
pub fn basic_usage_fallback(component: &str) -> String {
    match component {
        "button" => r#"<p-button label="Click me" />"#.to_string(),
        "dialog" => r#"<p-dialog header="Title" [(visible)]="visible">Content</p-dialog>"#.to_string(),
        "table" => {
            r#"<p-table [value]="items"><ng-template pTemplate="header">...</ng-template></p-table>"#
                .to_string()
        }
        "dropdown" => {
            r#"<p-dropdown [options]="cities" [(ngModel)]="selectedCity" optionLabel="name" />"#.to_string()
        }
        "calendar" => r#"<p-calendar [(ngModel)]="date" />"#.to_string(),
        "inputtext" => r#"<input type="text" pInputText [(ngModel)]="value" />"#.to_string(),
        other => format!("<p-{other}></p-{other}>"),
    }
}

/// Class name derived from a component key (`button` becomes `Button`).
pub fn capitalize_component_name(component: &str) -> String {
    let mut chars = component.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
