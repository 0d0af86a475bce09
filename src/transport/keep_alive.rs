use reqwest::header::HeaderMap;
use std::time::Duration;

pub const KEEP_ALIVE_HEADER: &str = "keep-alive";
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(5);

/// Reads `Keep-Alive: timeout=<seconds>` from a response, falling back to
/// [`DEFAULT_KEEP_ALIVE`] when the header or the parameter is absent or unreadable.
///
/// The value is informational only. The client pool keeps its fixed idle
/// timeout whatever the partner announces.
pub fn negotiate(headers: &HeaderMap) -> Duration {
    headers
        .get_all(KEEP_ALIVE_HEADER)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(timeout_param)
        .unwrap_or(DEFAULT_KEEP_ALIVE)
}

fn timeout_param(element: &str) -> Option<Duration> {
    let (name, value) = element.split_once('=')?;
    if !name.trim().eq_ignore_ascii_case("timeout") {
        return None;
    }
    value
        .trim()
        .trim_matches('"')
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
