//! Server-rendered HTML for the library, discover and settings pages.

use std::fmt::Write;

use crate::model::{Yarn, YarnFilter, YarnWeight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Library,
    Discover,
    Settings,
}

const NAV: [(NavItem, &str, &str); 3] = [
    (NavItem::Library, "/", "Library"),
    (NavItem::Discover, "/discover/", "Discover"),
    (NavItem::Settings, "/settings/", "Settings"),
];

const STYLE: &str = r#"
        body { font-family: system-ui, sans-serif; margin: 0; background: #faf7f2; color: #2d2a26; }
        nav { display: flex; gap: 1.5rem; padding: 1rem 2rem; background: #6b4f3a; }
        nav a { color: #f3e9dc; text-decoration: none; }
        nav a.active { font-weight: bold; text-decoration: underline; }
        main { padding: 1.5rem 2rem; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e2d8cc; }
        td img { width: 48px; height: 48px; object-fit: cover; border-radius: 4px; }
        .chips a { margin-right: 0.75rem; }
        .chips a.active { font-weight: bold; }
        .empty { color: #8a7f73; font-style: italic; }
"#;

/// Escape text for use in element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode each `/`-separated segment of a static file path
fn encode_static_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn layout(title: &str, active: Option<NavItem>, body: &str) -> String {
    let mut nav = String::new();
    for (item, href, label) in NAV {
        let class = if Some(item) == active { r#" class="active""# } else { "" };
        let _ = write!(nav, r#"<a href="{}"{}>{}</a>"#, href, class, label);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Yarn Library</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>{nav}</nav>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn weight_chips(filter: &YarnFilter) -> String {
    let color_param = filter
        .color
        .as_deref()
        .map(|c| format!("color={}", urlencoding::encode(c)));

    let mut chips = String::from(r#"<p class="chips">"#);
    let all_href = match &color_param {
        Some(param) => format!("/?{}", param),
        None => "/".to_string(),
    };
    let all_class = if filter.weight.is_none() { r#" class="active""# } else { "" };
    let _ = write!(chips, r#"<a href="{}"{}>All</a>"#, escape_html(&all_href), all_class);

    for weight in YarnWeight::ALL {
        let mut href = format!("/?weight={}", weight.as_str());
        if let Some(param) = &color_param {
            href.push('&');
            href.push_str(param);
        }
        let class = if filter.weight == Some(weight) { r#" class="active""# } else { "" };
        let _ = write!(
            chips,
            r#"<a href="{}"{}>{}</a>"#,
            escape_html(&href),
            class,
            weight.label()
        );
    }
    chips.push_str("</p>\n");
    chips
}

fn yarn_row(yarn: &Yarn) -> String {
    let optional = |value: &Option<String>| value.as_deref().map(escape_html).unwrap_or_default();
    let thumbnail = yarn
        .thumbnail
        .as_deref()
        .map(|file| {
            format!(
                r#"<img src="/static/{}" alt="{}">"#,
                escape_html(&encode_static_path(file)),
                escape_html(&yarn.color)
            )
        })
        .unwrap_or_default();

    format!(
        r#"            <tr id="yarn-{id}">
                <td>{thumbnail}</td>
                <td>{color}</td>
                <td>{weight}</td>
                <td>{brand}</td>
                <td>{material}</td>
                <td>{special}</td>
                <td>{quantity}</td>
            </tr>
"#,
        id = yarn.id,
        color = escape_html(&yarn.color),
        weight = yarn.weight.label(),
        brand = optional(&yarn.brand),
        material = optional(&yarn.material),
        special = optional(&yarn.special_attr),
        quantity = yarn.quantity().unwrap_or_default(),
    )
}

/// The main listing of the stash
pub fn library_page(yarns: &[Yarn], filter: &YarnFilter) -> String {
    let mut body = String::from("        <h1>Library</h1>\n");
    body.push_str(&weight_chips(filter));

    let noun = if yarns.len() == 1 { "yarn" } else { "yarns" };
    let _ = writeln!(body, r#"<p class="count">{} {}</p>"#, yarns.len(), noun);

    if yarns.is_empty() {
        let message = if filter.is_empty() {
            "Your library is empty."
        } else {
            "No yarn matches this filter."
        };
        let _ = writeln!(body, r#"<p class="empty">{}</p>"#, message);
    } else {
        body.push_str(
            "        <table>\n            <tr><th></th><th>Color</th><th>Weight</th><th>Brand</th><th>Material</th><th>Special</th><th>Amount</th></tr>\n",
        );
        for yarn in yarns {
            body.push_str(&yarn_row(yarn));
        }
        body.push_str("        </table>\n");
    }

    layout("Library", Some(NavItem::Library), &body)
}

pub fn discover_page() -> String {
    layout(
        "Discover",
        Some(NavItem::Discover),
        "        <h1>Discover</h1>\n        <p>Pattern ideas and yarn suggestions will show up here.</p>\n",
    )
}

pub fn settings_page() -> String {
    layout(
        "Settings",
        Some(NavItem::Settings),
        "        <h1>Settings</h1>\n        <p>Nothing to configure yet.</p>\n",
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "        <h1>{}</h1>\n        <p>{}</p>\n",
        escape_html(title),
        escape_html(message)
    );
    layout(title, None, &body)
}
