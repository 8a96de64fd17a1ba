/// Default base URL for compile requests.
pub const DEFAULT_COMPILE_BASE_URL: &str = "http://127.0.0.1:5000";

/// Path of the compile endpoint relative to the base URL.
pub const COMPILE_PATH: &str = "/compile";

/// Normalize a base URL to the compile endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_COMPILE_BASE_URL`]
/// 2) keep `/compile` unchanged
/// 3) append `/compile` otherwise
pub fn normalize_compile_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_COMPILE_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(COMPILE_PATH) {
        return trimmed.to_string();
    }
    format!("{trimmed}{COMPILE_PATH}")
}
