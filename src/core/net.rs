// src/core/net.rs
//
// Blocking HTTP GET with a fixed inter-request delay, bounded retries and
// request counters. Everything above this layer talks to `Fetch`.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use reqwest::blocking::{Client, Response};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, RETRY_AFTER, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Proxy, StatusCode};

use crate::config::consts::{
    RETRY_AFTER_CAP_SECS, RETRY_BACKOFF_MS, RETRY_STATUSES, USER_AGENTS,
};
use crate::config::options::ScrapeOptions;
use crate::error::ScrapeError;

/// Source of raw HTML. The run loop only ever sees this trait.
pub trait Fetch {
    fn get(&mut self, url: &str) -> Result<String, ScrapeError>;

    /// Request counters, if the implementation keeps any.
    fn stats(&self) -> Option<&RequestStats> {
        None
    }
}

#[derive(Clone, Debug)]
pub struct RequestStats {
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
    pub started: Instant,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self { total: 0, successful: 0, failed: 0, started: Instant::now() }
    }
}

impl RequestStats {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl fmt::Display for RequestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests={} ok={} failed={} time={}",
            self.total,
            self.successful,
            self.failed,
            crate::logging::fmt_elapsed(self.elapsed().as_millis())
        )
    }
}

/// Enforces a minimum gap between consecutive requests.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Block until at least `delay` has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let since = last.elapsed();
            if since < self.delay {
                thread::sleep(self.delay - since);
            }
        }
        self.last = Some(Instant::now());
    }
}

pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())]
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BACKOFF_MS.saturating_mul(1u64 << attempt.min(16)))
}

fn retry_after(resp: &Response) -> Option<Duration> {
    let secs: u64 = resp
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    Some(Duration::from_secs(secs.min(RETRY_AFTER_CAP_SECS)))
}

fn is_retryable(status: StatusCode) -> bool {
    RETRY_STATUSES.contains(&status.as_u16())
}

pub struct HttpFetcher {
    client: Client,
    pacer: Pacer,
    max_retries: u32,
    stats: RequestStats,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let ua = random_user_agent();
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .default_headers(headers)
            .user_agent(ua)
            .cookie_store(true);

        if let Some(proxy) = opts.proxy() {
            let p = Proxy::all(proxy)
                .map_err(|e| ScrapeError::Config(format!("invalid proxy {proxy:?}: {e}")))?;
            builder = builder.proxy(p);
            logf!("Net: Using proxy {}", proxy);
        } else {
            // Only the proxy field decides; *_PROXY env vars are ignored.
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| ScrapeError::Config(format!("HTTP client: {e}")))?;

        logd!("Net: Client ready ua={:?} delay={:?} retries={}", ua, opts.delay(), opts.max_retries);

        Ok(Self {
            client,
            pacer: Pacer::new(opts.delay()),
            max_retries: opts.max_retries,
            stats: RequestStats::default(),
        })
    }

    fn fail(&mut self, err: ScrapeError) -> Result<String, ScrapeError> {
        self.stats.failed += 1;
        loge!("Net: {}", err);
        Err(err)
    }
}

impl Fetch for HttpFetcher {
    fn get(&mut self, url: &str) -> Result<String, ScrapeError> {
        let mut attempt = 0u32;
        loop {
            self.pacer.wait();
            self.stats.total += 1;
            logd!("Net: GET {} (attempt {})", url, attempt + 1);

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return match resp.text() {
                            Ok(body) => {
                                self.stats.successful += 1;
                                Ok(body)
                            }
                            Err(e) => self.fail(ScrapeError::network(url, e)),
                        };
                    }

                    if attempt < self.max_retries && is_retryable(status) {
                        let wait = if status == StatusCode::TOO_MANY_REQUESTS {
                            retry_after(&resp).unwrap_or_else(|| backoff(attempt))
                        } else {
                            backoff(attempt)
                        };
                        logw!("Net: HTTP {} from {}; retrying in {:?}", status.as_u16(), url, wait);
                        thread::sleep(wait);
                        attempt += 1;
                        continue;
                    }

                    return self.fail(ScrapeError::Status { url: s!(url), status: status.as_u16() });
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        let wait = backoff(attempt);
                        logw!(
                            "Net: Request failed (attempt {}/{}): {}; retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            e,
                            wait
                        );
                        thread::sleep(wait);
                        attempt += 1;
                        continue;
                    }
                    return self.fail(ScrapeError::network(url, e));
                }
            }
        }
    }

    fn stats(&self) -> Option<&RequestStats> {
        Some(&self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned response per connection, in order, then stop.
    fn serve(responses: Vec<&'static str>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/list", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            for raw in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut req = Vec::new();
                let mut buf = [0u8; 1024];
                while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    req.extend_from_slice(&buf[..n]);
                }
                stream.write_all(raw.as_bytes()).unwrap();
            }
        });
        (url, handle)
    }

    fn fetcher(max_retries: u32) -> HttpFetcher {
        let opts = ScrapeOptions { delay_secs: 0.0, max_retries, timeout_secs: 5, ..Default::default() };
        HttpFetcher::new(&opts).unwrap()
    }

    const OK: &str = "HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nbody";
    const TOO_MANY: &str =
        "HTTP/1.1 429 Too Many Requests\r\nRetry-After: 0\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const UNAVAILABLE: &str =
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

    #[test]
    fn retry_after_then_success() {
        let (url, server) = serve(vec![TOO_MANY, OK]);
        let mut f = fetcher(3);

        assert_eq!(f.get(&url).unwrap(), "body");
        server.join().unwrap();

        let stats = f.stats().unwrap();
        assert_eq!((stats.total, stats.successful, stats.failed), (2, 1, 0));
    }

    #[test]
    fn server_error_backs_off_then_succeeds() {
        let (url, server) = serve(vec![UNAVAILABLE, OK]);
        let mut f = fetcher(1);
        let t0 = Instant::now();

        assert_eq!(f.get(&url).unwrap(), "body");
        server.join().unwrap();

        assert!(t0.elapsed() >= backoff(0));
        assert_eq!(f.stats().unwrap().total, 2);
    }

    #[test]
    fn not_found_fails_without_retry() {
        let (url, server) = serve(vec![NOT_FOUND]);
        let mut f = fetcher(3);

        let err = f.get(&url).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ScrapeError::Status { status: 404, .. }), "{err:?}");
        let stats = f.stats().unwrap();
        assert_eq!((stats.total, stats.successful, stats.failed), (1, 0, 1));
    }

    #[test]
    fn retries_exhausted_reports_last_status() {
        let (url, server) = serve(vec![UNAVAILABLE]);
        let mut f = fetcher(0);

        let err = f.get(&url).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ScrapeError::Status { status: 503, .. }), "{err:?}");
        assert_eq!(f.stats().unwrap().total, 1);
    }

    #[test]
    fn pacer_waits_between_calls() {
        let mut p = Pacer::new(Duration::from_millis(40));
        let t0 = Instant::now();
        p.wait(); // first call never blocks
        assert!(t0.elapsed() < Duration::from_millis(40));
        p.wait();
        assert!(t0.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn zero_delay_pacer_does_not_block() {
        let mut p = Pacer::new(Duration::ZERO);
        let t0 = Instant::now();
        for _ in 0..5 {
            p.wait();
        }
        assert!(t0.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff(0), Duration::from_millis(500));
        assert_eq!(backoff(1), Duration::from_millis(1000));
        assert_eq!(backoff(2), Duration::from_millis(2000));
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::FORBIDDEN));
    }
}
