//! `Authorization: OAuth ...` header encoding

use super::encode::percent_encode;

const SCHEME: &str = "OAuth";

/// Render protocol parameters as an `Authorization` header value
///
/// Values are percent-encoded and quoted. An empty realm is always emitted
/// first, which is what LTI consumers expect.
pub fn authorization_header(params: &[(String, String)]) -> String {
    let mut parts = vec![r#"realm="""#.to_string()];
    parts.extend(
        params
            .iter()
            .filter(|(name, _)| name != "realm")
            .map(|(name, value)| format!(r#"{}="{}""#, percent_encode(name), percent_encode(value))),
    );
    format!("{} {}", SCHEME, parts.join(", "))
}

/// Parse an `Authorization` header into protocol parameters
///
/// Returns `None` when the header does not use the OAuth scheme. The `realm`
/// parameter is kept; callers building a base string skip it.
pub fn parse_authorization_header(value: &str) -> Option<Vec<(String, String)>> {
    let value = value.trim();
    let (scheme, rest) = value.split_once(char::is_whitespace).unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }

    let params = rest
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (name, raw) = part.split_once('=')?;
            let raw = raw.trim().trim_matches('"');
            let name = urlencoding::decode(name.trim()).ok()?.into_owned();
            let value = urlencoding::decode(raw).ok()?.into_owned();
            Some((name, value))
        })
        .collect();

    Some(params)
}
