use std::io::IsTerminal;
use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use chrono::Local;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level one step
/// from `warn`.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ANSI color codes
struct Colors {
    reset: &'static str,
    dim: &'static str,
    green: &'static str,
    yellow: &'static str,
    red: &'static str,
    cyan: &'static str,
    blue: &'static str,
    magenta: &'static str,
    gray: &'static str,
}

impl Colors {
    fn new() -> Self {
        if std::io::stderr().is_terminal() {
            Self {
                reset: "\x1b[0m",
                dim: "\x1b[2m",
                green: "\x1b[92m",   // 2xx
                yellow: "\x1b[93m",  // 3xx
                red: "\x1b[91m",     // 4xx, 5xx
                cyan: "\x1b[96m",    // method
                blue: "\x1b[94m",    // path
                magenta: "\x1b[95m", // duration
                gray: "\x1b[90m",    // bodies
            }
        } else {
            Self {
                reset: "",
                dim: "",
                green: "",
                yellow: "",
                red: "",
                cyan: "",
                blue: "",
                magenta: "",
                gray: "",
            }
        }
    }

    fn status_color(&self, status: StatusCode) -> &'static str {
        if status.is_success() {
            self.green
        } else if status.is_redirection() {
            self.yellow
        } else {
            self.red
        }
    }

    fn log_body(&self, label: &str, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        let (suffix, text) = match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(json) => ("", serde_json::to_string_pretty(&json).unwrap_or_default()),
            Err(_) => (" (raw)", String::from_utf8_lossy(bytes).into_owned()),
        };
        eprintln!(
            "{timestamp} - DEBUG - {}{label}{suffix}:{}\n{}{text}{}",
            self.dim, self.reset, self.gray, self.reset
        );
    }
}

/// Request-summary logging for the HTTP server.
///
/// `verbose == 0`: silent. `1`: one line per request with method, path,
/// status and latency. `2+`: request and response bodies too.
#[derive(Clone)]
pub struct LoggingMiddleware {
    pub verbose: u8,
}

impl LoggingMiddleware {
    #[must_use]
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    pub async fn handle(&self, request: Request, next: Next) -> Response {
        if self.verbose == 0 {
            return next.run(request).await;
        }

        let colors = Colors::new();
        let method = request.method().clone();
        let path = request.uri().path().to_owned();
        let start = Instant::now();

        let response = if self.verbose >= 2 {
            let (parts, body) = request.into_parts();
            let body = match axum::body::to_bytes(body, usize::MAX).await {
                Ok(bytes) => {
                    colors.log_body("Request body", &bytes);
                    Body::from(bytes)
                }
                Err(_) => Body::empty(),
            };
            next.run(Request::from_parts(parts, body)).await
        } else {
            next.run(request).await
        };

        let status = response.status();
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        // eprintln! keeps the ANSI codes that tracing would escape.
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        eprintln!(
            "{timestamp} - INFO - {}{method}{} {}{path}{} -> {}{}{} in {}{duration_ms:.1}ms{}",
            colors.cyan,
            colors.reset,
            colors.blue,
            colors.reset,
            colors.status_color(status),
            status.as_u16(),
            colors.reset,
            colors.magenta,
            colors.reset
        );

        if self.verbose < 2 {
            return response;
        }

        let (parts, body) = response.into_parts();
        match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                colors.log_body("Response body", &bytes);
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(_) => Response::from_parts(parts, Body::empty()),
        }
    }
}
