//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with optional
//! proxy support. No timeout is configured; requests run until the network
//! stack gives up.

use crate::types::{LlmError, LlmResult};

/// Build a `reqwest::Client` with the resolved proxy configuration.
///
/// - `Some(url)` -> route every request through the proxy
/// - `None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
pub fn build_http_client(proxy_url: Option<&str>) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        "promptory/",
        env!("CARGO_PKG_VERSION")
    ));
    match proxy_url {
        Some(url) => {
            let proxy = reqwest::Proxy::all(url).map_err(|e| LlmError::InvalidRequest {
                message: format!("Invalid proxy URL {}: {}", url, e),
            })?;
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder.build().map_err(|e| LlmError::NetworkError {
        message: format!("Failed to build HTTP client: {}", e),
    })
}
