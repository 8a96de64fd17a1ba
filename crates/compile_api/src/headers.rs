use std::collections::BTreeMap;

use crate::config::CompileApiConfig;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "user-agent";

const JSON_MIME: &str = "application/json";

/// Build a deterministic header map for compile requests.
///
/// Extra headers are merged last and may override the defaults, except
/// `content-type`, which is always JSON.
pub fn build_headers(config: &CompileApiConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), JSON_MIME.to_owned());
    headers.insert(HEADER_CONTENT_TYPE.to_owned(), JSON_MIME.to_owned());

    let ua = config
        .user_agent
        .as_deref()
        .and_then(sanitize_nonempty)
        .unwrap_or_else(default_user_agent);
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        let Some(key) = sanitize_nonempty(key) else {
            continue;
        };
        let key = key.to_ascii_lowercase();
        if key == HEADER_CONTENT_TYPE {
            tracing::warn!("ignoring configured content-type header");
            continue;
        }
        headers.insert(key, value.trim().to_owned());
    }

    headers
}

pub fn default_user_agent() -> String {
    format!("codepad/{}", env!("CARGO_PKG_VERSION"))
}

fn sanitize_nonempty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
