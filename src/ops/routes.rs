use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::model::Screen;

static BOARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{1,6}$").expect("valid board regex"));
/// Relative page addresses resolve against this; anything that lands on
/// another origin is not a page.
static BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://chanview.invalid/").expect("valid base url"));

/// A page address inside the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog { board: String },
    Thread { board: String, thread: u64 },
    Post { board: String, thread: u64, post: u64 },
    /// The file attached to a post
    Image { board: String, thread: u64, post: u64 },
}

/// A route plus the optional `?selected=` item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub selected: Option<String>,
}

fn parse_id(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().filter(|&n| n >= 1)
}

fn parse_board(s: &str) -> Option<String> {
    BOARD_RE.is_match(s).then(|| s.to_string())
}

impl Route {
    /// Parse a path like `/board/g/thread/123`. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').collect();
        Route::from_segments(&segments)
    }

    /// Match already-decoded path segments. Empty segments are skipped.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Option<Route> {
        let segments: Vec<&str> = segments
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["board", board, "catalog"] => Some(Route::Catalog {
                board: parse_board(board)?,
            }),
            ["board", board, "thread", thread] => Some(Route::Thread {
                board: parse_board(board)?,
                thread: parse_id(thread)?,
            }),
            ["board", board, "thread", thread, "post", post] => Some(Route::Post {
                board: parse_board(board)?,
                thread: parse_id(thread)?,
                post: parse_id(post)?,
            }),
            ["board", board, "thread", thread, "post", post, "image"] => Some(Route::Image {
                board: parse_board(board)?,
                thread: parse_id(thread)?,
                post: parse_id(post)?,
            }),
            _ => None,
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            Route::Home => Screen::Home,
            Route::Catalog { .. } => Screen::Catalog,
            Route::Thread { .. } => Screen::Thread,
            Route::Post { .. } => Screen::Post,
            Route::Image { .. } => Screen::Image,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Catalog { board } => write!(f, "/board/{}/catalog", board),
            Route::Thread { board, thread } => write!(f, "/board/{}/thread/{}", board, thread),
            Route::Post {
                board,
                thread,
                post,
            } => write!(f, "/board/{}/thread/{}/post/{}", board, thread, post),
            Route::Image {
                board,
                thread,
                post,
            } => write!(f, "/board/{}/thread/{}/post/{}/image", board, thread, post),
        }
    }
}

impl Location {
    /// Parse a page address with an optional query string. Path segments and
    /// the query are percent-decoded; only `selected` is read.
    pub fn parse(url: &str) -> Option<Location> {
        let parsed = BASE.join(url).ok()?;
        if parsed.origin() != BASE.origin() {
            return None;
        }
        let segments = parsed
            .path_segments()?
            .map(|s| percent_decode_str(s).decode_utf8().ok())
            .collect::<Option<Vec<Cow<'_, str>>>>()?;
        let route = Route::from_segments(&segments)?;
        let selected = parsed
            .query_pairs()
            .find(|(k, _)| k == "selected")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty());
        Some(Location { route, selected })
    }
}
