use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{IF_MODIFIED_SINCE, LAST_MODIFIED, USER_AGENT};

use crate::model::SiteConfig;

use super::cache::TtlCache;
use super::site::{ApiSource, SiteError};

/// Spaces requests at least `interval` apart
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        RateLimiter {
            interval,
            last: None,
        }
    }

    /// How long a request made at `now` must wait. The slot is taken.
    pub fn reserve(&mut self, now: Instant) -> Duration {
        let delay = self
            .last
            .map_or(Duration::ZERO, |last| (last + self.interval).saturating_duration_since(now));
        self.last = Some(now + delay);
        delay
    }
}

/// Pages fetched from the live read-only JSON API.
///
/// Responses are cached per URL; an expired entry with a `Last-Modified`
/// date is revalidated with `If-Modified-Since`.
pub struct HttpSite {
    http: HttpClient,
    base_url: String,
    user_agent: String,
    cache: Mutex<TtlCache<String>>,
    limiter: Mutex<RateLimiter>,
}

impl HttpSite {
    pub fn new(config: &SiteConfig) -> Result<Self, SiteError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SiteError::Http {
                url: base_url.clone(),
                source: e,
            })?;
        Ok(HttpSite {
            http,
            base_url,
            user_agent: concat!("chanview/", env!("CARGO_PKG_VERSION")).to_string(),
            cache: Mutex::new(TtlCache::new(config.cache_size)),
            limiter: Mutex::new(RateLimiter::new(Duration::from_millis(config.min_interval_ms))),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[cfg(test)]
    fn seed(&self, path: &str, body: &str, ttl: Duration) {
        let url = self.url_for(path);
        lock(&self.cache).insert(url, body.to_string(), ttl, None, Instant::now());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn request_error(url: &str, err: reqwest::Error) -> SiteError {
    if err.is_timeout() {
        SiteError::Timeout {
            url: url.to_string(),
        }
    } else {
        SiteError::Http {
            url: url.to_string(),
            source: err,
        }
    }
}

impl ApiSource for HttpSite {
    fn fetch(&self, path: &str, ttl: Duration) -> Result<String, SiteError> {
        let url = self.url_for(path);
        let last_modified = {
            let mut cache = lock(&self.cache);
            if let Some(body) = cache.get(&url, Instant::now()) {
                tracing::debug!(%url, "cache hit");
                return Ok(body.clone());
            }
            cache.stale(&url).and_then(|entry| entry.last_modified.clone())
        };

        let delay = lock(&self.limiter).reserve(Instant::now());
        if !delay.is_zero() {
            tracing::debug!(?delay, "rate limited");
            std::thread::sleep(delay);
        }

        let mut request = self.http.get(&url).header(USER_AGENT, &self.user_agent);
        if let Some(since) = &last_modified {
            request = request.header(IF_MODIFIED_SINCE, since);
        }
        let response = request.send().map_err(|e| request_error(&url, e))?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            if let Some(body) = lock(&self.cache).refresh(&url, ttl, Instant::now()) {
                tracing::debug!(%url, "not modified");
                return Ok(body.clone());
            }
        }
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "api error");
            return Err(SiteError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(|e| request_error(&url, e))?;
        tracing::debug!(%url, bytes = body.len(), "fetched");
        lock(&self.cache).insert(url, body.clone(), ttl, modified, Instant::now());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::site::{BOARDS_TTL, Site, fixtures};
    use crate::model::Screen;

    /// Nothing listens on the discard port, so any real request fails fast
    fn offline_site() -> HttpSite {
        let config = SiteConfig {
            api_url: "http://127.0.0.1:9/".into(),
            timeout_secs: 1,
            ..Default::default()
        };
        HttpSite::new(&config).unwrap()
    }

    #[test]
    fn limiter_spaces_requests() {
        let t0 = Instant::now();
        let mut limiter = RateLimiter::new(Duration::from_secs(1));
        assert_eq!(limiter.reserve(t0), Duration::ZERO);
        assert_eq!(
            limiter.reserve(t0 + Duration::from_millis(400)),
            Duration::from_millis(600)
        );
        // the previous slot ends at t0 + 1s, so the next one starts at t0 + 2s
        assert_eq!(
            limiter.reserve(t0 + Duration::from_millis(1500)),
            Duration::from_millis(500)
        );
        assert_eq!(limiter.reserve(t0 + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn urls_join_base_and_path() {
        let site = offline_site();
        assert_eq!(site.url_for("g/catalog.json"), "http://127.0.0.1:9/g/catalog.json");
        assert_eq!(site.url_for("/boards.json"), "http://127.0.0.1:9/boards.json");
    }

    #[test]
    fn fresh_cache_entries_skip_the_network() {
        let site = offline_site();
        site.seed("boards.json", fixtures::BOARDS, BOARDS_TTL);
        let page = site.load("/?selected=x").unwrap();
        assert_eq!(page.screen, Screen::Home);
        assert_eq!(page.items.len(), 3);
        assert!(page.items[2].preselected);
    }

    #[test]
    fn unreachable_api_is_an_error() {
        let site = offline_site();
        let err = site.fetch("boards.json", BOARDS_TTL).unwrap_err();
        assert!(matches!(
            err,
            SiteError::Http { .. } | SiteError::Timeout { .. }
        ));
    }
}
