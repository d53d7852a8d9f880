use authos_gate_core::constants::BEARER_PREFIX;

/// ## Summary
/// Extracts the token from an `Authorization` header value.
///
/// The value must start with the literal `"Bearer "`: the scheme is
/// case-sensitive and followed by exactly one space. The token runs up to
/// the next space. An empty token counts as missing.
#[must_use]
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix(BEARER_PREFIX)?
        .split(' ')
        .next()
        .filter(|token| !token.is_empty())
}
