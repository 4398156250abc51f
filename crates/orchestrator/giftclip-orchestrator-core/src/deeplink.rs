use url::Url;

/// Extract the video identifier from an invocation URL.
///
/// Only URLs whose host is in `hosts` are recognised; the identifier is the
/// last non-empty path component. Anything else (foreign host, no path,
/// unparsable input) yields `None` and should be ignored by the caller.
pub fn parse_deep_link(raw: &str, hosts: &[String]) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?;
    if !hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
        return None;
    }
    url.path_segments()?
        .filter(|seg| !seg.is_empty())
        .last()
        .map(str::to_string)
}
