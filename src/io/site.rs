use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::model::chan::{BoardList, CatalogPage, Thread};
use crate::model::{Page, Screen};
use crate::ops::pages::{catalog_page, home_page, image_page, post_page, thread_page};
use crate::ops::routes::{Location, Route};

/// How long fetched documents stay fresh
pub const BOARDS_TTL: Duration = Duration::from_secs(3600);
pub const CATALOG_TTL: Duration = Duration::from_secs(30);
pub const THREAD_TTL: Duration = Duration::from_secs(10);

/// Error type for page loading
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("not a page address: {0}")]
    BadUrl(String),
    #[error("{path} not found")]
    NotFound { path: PathBuf },
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },
}

impl SiteError {
    fn is_not_found(&self) -> bool {
        matches!(
            self,
            SiteError::NotFound { .. } | SiteError::Status { status: 404, .. }
        )
    }
}

/// Source of pages
pub trait Site {
    fn load(&self, url: &str) -> Result<Page, SiteError>;
}

/// Raw API documents by relative path: `boards.json`, `{board}/catalog.json`
/// and `{board}/thread/{id}.json`. `ttl` is how long a caching source may
/// reuse the document.
pub trait ApiSource {
    fn fetch(&self, path: &str, ttl: Duration) -> Result<String, SiteError>;
}

impl<S: ApiSource> Site for S {
    fn load(&self, url: &str) -> Result<Page, SiteError> {
        let location = Location::parse(url).ok_or_else(|| SiteError::BadUrl(url.to_string()))?;
        let selected = location.selected.as_deref();

        let page = match &location.route {
            Route::Home => {
                let list: BoardList = fetch_json(self, "boards.json", BOARDS_TTL)?;
                home_page(&list.boards, selected)
            }
            Route::Catalog { board } => {
                let catalog: Vec<CatalogPage> =
                    fetch_json(self, &format!("{}/catalog.json", board), CATALOG_TTL)?;
                catalog_page(board, &catalog, selected)
            }
            Route::Thread { board, thread } => {
                let posts = thread_posts(self, board, *thread)?;
                thread_page(board, *thread, &posts.posts, selected)
            }
            Route::Post {
                board,
                thread,
                post,
            } => {
                let posts = thread_posts(self, board, *thread)?;
                post_page(board, *thread, &posts.posts, *post)
            }
            Route::Image {
                board,
                thread,
                post,
            } => {
                let posts = thread_posts(self, board, *thread)?;
                image_page(board, *thread, &posts.posts, *post)
            }
        };
        tracing::info!(url, items = page.items.len(), "page loaded");
        Ok(page)
    }
}

fn fetch_json<T: DeserializeOwned>(
    source: &impl ApiSource,
    path: &str,
    ttl: Duration,
) -> Result<T, SiteError> {
    let text = source.fetch(path, ttl)?;
    serde_json::from_str(&text).map_err(|e| SiteError::ParseError {
        path: path.to_string(),
        source: e,
    })
}

fn thread_posts(source: &impl ApiSource, board: &str, thread: u64) -> Result<Thread, SiteError> {
    fetch_json(source, &format!("{}/thread/{}.json", board, thread), THREAD_TTL)
}

/// Pages built from a directory of saved API responses laid out like the
/// API itself.
#[derive(Debug, Clone)]
pub struct SnapshotSite {
    root: PathBuf,
}

impl SnapshotSite {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SnapshotSite { root: root.into() }
    }
}

impl ApiSource for SnapshotSite {
    fn fetch(&self, path: &str, _ttl: Duration) -> Result<String, SiteError> {
        let path = self.root.join(path);
        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SiteError::NotFound { path }
            } else {
                SiteError::ReadError { path, source: e }
            }
        })
    }
}

/// The page shown in place of one that failed to load
pub fn error_page(url: &str, err: &SiteError) -> Page {
    let route = Location::parse(url).map(|l| l.route);
    let screen = route.as_ref().map_or(Screen::Home, Route::screen);
    let message = match (&route, err) {
        (None, _) | (_, SiteError::BadUrl(_)) => "Page not found.".to_string(),
        (Some(Route::Home), _) => {
            "Unable to load boards right now. Please try again later.".to_string()
        }
        (Some(route), err) => load_failure(route, err),
    };
    tracing::warn!(url, error = %err, "page load failed");
    Page::error(url, screen, message)
}

fn load_failure(route: &Route, err: &SiteError) -> String {
    let (what, missing) = match route {
        Route::Catalog { board } => ("catalog", format!("Board /{}/ not found.", board)),
        Route::Thread { thread, .. } | Route::Post { thread, .. } | Route::Image { thread, .. } => {
            ("thread", format!("Thread {} not found.", thread))
        }
        Route::Home => ("boards", "No boards available.".to_string()),
    };
    match err {
        e if e.is_not_found() => missing,
        SiteError::Status { status, .. } => format!("API error ({}) while loading {}.", status, what),
        SiteError::Timeout { .. } => format!("Request timed out while loading {}.", what),
        _ => format!("An unexpected error occurred while loading the {}.", what),
    }
}
