//! Blocking transport for the Backtrace coronerd query API.
//!
//! One POST per query window. Transient conditions (rate limits, server
//! errors, connect failures, timeouts) are retried on a fixed backoff
//! schedule; authentication failures fail immediately. The caller gets
//! either decoded JSON or a classified [`Error`].

use crashtop_types::Error;
use serde_json::Value;
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_ENDPOINT: &str = "https://brave.sp.backtrace.io";
pub const DEFAULT_UNIVERSE: &str = "brave";

const MAX_RETRIES: u32 = 2;
const RETRY_BACKOFF_SECS: [u64; 2] = [1, 3];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const PREVIEW_BYTES: usize = 500;

/// Connection parameters for one Backtrace instance/project.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub universe: String,
    pub project: String,
    pub token: String,
}

pub struct BacktraceClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl BacktraceClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network {
                attempts: 0,
                reason: format!("could not construct HTTP client: {}", e),
            })?;
        Ok(Self { config, http })
    }

    /// The query URL, with the token replaced by a placeholder when
    /// `redact_token` is set (for dry-run display).
    pub fn query_url(&self, redact_token: bool) -> String {
        let token = if redact_token {
            "<BACKTRACE_API_KEY>"
        } else {
            &self.config.token
        };
        format!(
            "{}/api/query?universe={}&project={}&token={}",
            self.config.endpoint,
            urlencoding::encode(&self.config.universe),
            urlencoding::encode(&self.config.project),
            urlencoding::encode(token),
        )
    }

    /// POST a query body and return the parsed JSON response.
    ///
    /// Retries 429/5xx and network-level failures up to the fixed budget,
    /// sleeping through the backoff schedule between attempts. 401/403 is
    /// never retried.
    pub fn query(&self, body: &Value, verbose: bool) -> Result<Value, Error> {
        let url = self.query_url(false);
        let mut last_reason = String::new();

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let wait = RETRY_BACKOFF_SECS[(attempt as usize - 1).min(RETRY_BACKOFF_SECS.len() - 1)];
                eprintln!("  Retrying in {}s (attempt {})...", wait, attempt + 1);
                thread::sleep(Duration::from_secs(wait));
            }

            let started = Instant::now();
            let response = match self.http.post(&url).json(body).send() {
                Ok(response) => response,
                Err(e) => {
                    last_reason = e.to_string();
                    eprintln!(
                        "  Network error after {:.1}s: {}",
                        started.elapsed().as_secs_f64(),
                        last_reason
                    );
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(Error::Auth {
                    status: status.as_u16(),
                    preview: body_preview(response),
                });
            }

            if status.as_u16() == 429 || status.is_server_error() {
                last_reason = format!("HTTP {}", status.as_u16());
                eprintln!(
                    "  HTTP {} after {:.1}s",
                    status.as_u16(),
                    started.elapsed().as_secs_f64()
                );
                continue;
            }

            if !status.is_success() {
                return Err(Error::Api {
                    status: status.as_u16(),
                    preview: body_preview(response),
                });
            }

            let raw = response.text().map_err(|e| Error::Network {
                attempts: attempt + 1,
                reason: format!("could not read response body: {}", e),
            })?;

            if verbose {
                eprintln!(
                    "  API response: {} bytes in {:.1}s",
                    raw.len(),
                    started.elapsed().as_secs_f64()
                );
            }

            return serde_json::from_str(&raw).map_err(|_| Error::MalformedResponse {
                preview: truncate_preview(&raw),
            });
        }

        Err(Error::Network {
            attempts: MAX_RETRIES + 1,
            reason: last_reason,
        })
    }
}

fn body_preview(response: reqwest::blocking::Response) -> String {
    match response.text() {
        Ok(text) => truncate_preview(&text),
        Err(_) => String::new(),
    }
}

fn truncate_preview(text: &str) -> String {
    text.chars().take(PREVIEW_BYTES).collect()
}
