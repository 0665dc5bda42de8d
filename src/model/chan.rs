//! Imageboard API payloads (`boards.json`, catalog pages, threads) and the
//! media URL helpers derived from them.

use serde::{Deserialize, Serialize};

const IMAGE_HOST: &str = "https://i.4cdn.org";
const STATIC_HOST: &str = "https://s.4cdn.org";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub board: String,
    pub title: String,
    #[serde(default)]
    pub ws_board: i64,
    #[serde(default)]
    pub pages: i64,
    #[serde(default)]
    pub per_page: i64,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Top-level shape of `boards.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardList {
    #[serde(default)]
    pub boards: Vec<Board>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogThread {
    pub no: u64,
    #[serde(default)]
    pub now: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub com: Option<String>,
    #[serde(default)]
    pub replies: Option<u64>,
    #[serde(default)]
    pub images: Option<u64>,
    #[serde(default)]
    pub tim: Option<u64>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// One page of `{board}/catalog.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub threads: Vec<CatalogThread>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadPost {
    pub no: u64,
    #[serde(default)]
    pub resto: u64,
    #[serde(default)]
    pub now: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub com: Option<String>,
    #[serde(default)]
    pub tim: Option<u64>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub fsize: Option<u64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thread {
    #[serde(default)]
    pub posts: Vec<ThreadPost>,
}

/// Kind of attached file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    File,
}

const IMAGE_EXTS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".avif", ".svg", ".bmp", ".tif", ".tiff",
];
const VIDEO_EXTS: &[&str] = &[".webm", ".mp4", ".m4v", ".ogv"];

pub fn media_kind(ext: Option<&str>) -> MediaKind {
    let Some(ext) = ext.filter(|e| !e.is_empty()) else {
        return MediaKind::File;
    };
    let lower = ext.to_lowercase();
    if IMAGE_EXTS.contains(&lower.as_str()) {
        MediaKind::Image
    } else if VIDEO_EXTS.contains(&lower.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::File
    }
}

pub fn image_url(board: &str, tim: Option<u64>, ext: Option<&str>) -> Option<String> {
    let tim = tim.filter(|&t| t != 0)?;
    let ext = ext.filter(|e| !e.is_empty())?;
    Some(format!("{}/{}/{}{}", IMAGE_HOST, board, tim, ext))
}

/// Small JPEG preview the image host keeps for every upload
pub fn thumbnail_url(board: &str, tim: Option<u64>) -> Option<String> {
    let tim = tim.filter(|&t| t != 0)?;
    Some(format!("{}/{}/{}s.jpg", IMAGE_HOST, board, tim))
}

pub fn country_flag_url(country: Option<&str>) -> Option<String> {
    let code = country.filter(|c| !c.is_empty())?;
    Some(format!("{}/image/country/{}.gif", STATIC_HOST, code.to_lowercase()))
}

/// Human-readable byte size: `512 B`, `1.5 KB`, `2.0 MB`
pub fn format_bytes(value: Option<u64>) -> Option<String> {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = value? as f64;
    for (i, unit) in UNITS.iter().enumerate() {
        if size < 1024.0 || i == UNITS.len() - 1 {
            return Some(if i == 0 {
                format!("{} {}", size as u64, unit)
            } else {
                format!("{:.1} {}", size, unit)
            });
        }
        size /= 1024.0;
    }
    None
}
