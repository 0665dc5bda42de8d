use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Which screen a page represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Board list (the only list screen with quick-jump)
    Home,
    /// Threads of one board
    Catalog,
    /// Posts of one thread
    Thread,
    /// A single post
    Post,
    /// The file attached to a post
    Image,
}

impl Screen {
    pub fn is_home(self) -> bool {
        self == Screen::Home
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Catalog => "catalog",
            Screen::Thread => "thread",
            Screen::Post => "post",
            Screen::Image => "image",
        }
    }
}

/// Where an inline link points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LinkTarget {
    /// Another item on the same page, by post identifier
    Quote(String),
    /// A URL opened outside the browser
    External(String),
}

/// An inline reference inside an item's body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Byte range of the link text within the item body
    pub span: Range<usize>,
    pub target: Option<LinkTarget>,
}

impl Link {
    pub fn quote(span: Range<usize>, post_id: impl Into<String>) -> Self {
        Link {
            span,
            target: Some(LinkTarget::Quote(post_id.into())),
        }
    }

    pub fn external(span: Range<usize>, url: impl Into<String>) -> Self {
        Link {
            span,
            target: Some(LinkTarget::External(url.into())),
        }
    }
}

/// Board code and title carried by home screen items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfo {
    pub code: String,
    pub title: String,
}

/// One selectable unit of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Short heading line (board name, poster and date, thread subject)
    pub heading: String,
    /// Body text; link spans index into this
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Stable post number, for quote resolution
    #[serde(default)]
    pub post_id: Option<String>,
    /// Where Enter takes the user
    #[serde(default)]
    pub target: Option<String>,
    /// Description shown in the side panel (home only)
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub board: Option<BoardInfo>,
    /// Thumbnail of the attached file
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Poster's country flag image
    #[serde(default)]
    pub flag: Option<String>,
    /// Marked selected by the page source
    #[serde(default)]
    pub preselected: bool,
}

impl Item {
    /// The text a link covers in this item's body
    pub fn link_text(&self, link: &Link) -> &str {
        self.body.get(link.span.clone()).unwrap_or("")
    }
}

/// A fully built screen: the list of items plus page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub screen: Screen,
    pub title: String,
    pub items: Vec<Item>,
    /// Set when the page could not be built; items are empty then
    #[serde(default)]
    pub error: Option<String>,
}

impl Page {
    pub fn new(url: impl Into<String>, screen: Screen, title: impl Into<String>) -> Self {
        Page {
            url: url.into(),
            screen,
            title: title.into(),
            items: Vec::new(),
            error: None,
        }
    }

    /// A page that only carries an error message
    pub fn error(url: impl Into<String>, screen: Screen, message: impl Into<String>) -> Self {
        Page {
            error: Some(message.into()),
            ..Page::new(url, screen, "Error")
        }
    }
}
