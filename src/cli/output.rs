use serde::Serialize;

use crate::model::{BoardEntry, Item, LinkTarget, Page};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct PageJson<'a> {
    pub url: &'a str,
    pub screen: &'static str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub items: Vec<ItemJson<'a>>,
}

#[derive(Serialize)]
pub struct ItemJson<'a> {
    pub heading: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkJson<'a>>,
}

#[derive(Serialize)]
pub struct LinkJson<'a> {
    pub text: &'a str,
    #[serde(flatten)]
    pub target: Option<&'a LinkTarget>,
}

pub fn page_to_json(page: &Page) -> PageJson<'_> {
    PageJson {
        url: &page.url,
        screen: page.screen.as_str(),
        title: &page.title,
        error: page.error.as_deref(),
        items: page.items.iter().map(item_to_json).collect(),
    }
}

fn item_to_json(item: &Item) -> ItemJson<'_> {
    ItemJson {
        heading: &item.heading,
        body: &item.body,
        post_id: item.post_id.as_deref(),
        target: item.target.as_deref(),
        thumbnail: item.thumbnail.as_deref(),
        flag: item.flag.as_deref(),
        links: item
            .links
            .iter()
            .map(|link| LinkJson {
                text: item.link_text(link),
                target: link.target.as_ref(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One quick-jump result: `/code/ - title`
pub fn format_board_line(entry: &BoardEntry) -> String {
    format!("/{}/ - {}", entry.code, entry.title)
}

fn format_link_target(target: Option<&LinkTarget>) -> String {
    match target {
        Some(LinkTarget::Quote(id)) => format!("post {}", id),
        Some(LinkTarget::External(url)) => url.clone(),
        None => "(no target)".to_string(),
    }
}

/// A page as plain text: header line, then each item with its body indented
/// and its links listed below
pub fn format_page(page: &Page) -> Vec<String> {
    let mut lines = vec![format!("{} [{}] {}", page.url, page.screen.as_str(), page.title)];
    if let Some(error) = &page.error {
        lines.push(format!("  {}", error));
        return lines;
    }
    for item in &page.items {
        lines.push(String::new());
        let mut heading = item.heading.clone();
        if let Some(target) = &item.target {
            heading.push_str(&format!("  -> {}", target));
        }
        lines.push(heading);
        for body_line in item.body.lines() {
            lines.push(format!("    {}", body_line));
        }
        for link in &item.links {
            lines.push(format!(
                "    [{}] {}",
                item.link_text(link),
                format_link_target(link.target.as_ref())
            ));
        }
    }
    lines
}
