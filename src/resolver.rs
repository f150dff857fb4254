//! Client/load-balancer IP resolution from forwarding headers.
//!
//! `X-Forwarded-For` carries the hop chain appended by each forwarding
//! proxy; its first entry is conventionally the original client.
//! `X-Real-IP` is set by the immediate reverse proxy and identifies the
//! forwarder itself, so it is preferred over the XFF second hop.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Sentinel returned when no address information is resolvable.
pub const UNKNOWN: &str = "unknown";

/// The two logical identities resolved for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIps {
    /// The originating caller.
    pub client_ip: String,
    /// The intermediary that forwarded the request.
    pub load_balancer_ip: String,
}

impl ResolvedIps {
    /// Whether the client fell through every source to the sentinel.
    pub fn client_is_unknown(&self) -> bool {
        self.client_ip == UNKNOWN
    }
}

/// Parse an `X-Forwarded-For` value into its first two hops.
///
/// Tokens are split on commas, trimmed, and empty entries are skipped.
/// No address-syntax validation is performed; any non-empty trimmed
/// token is accepted as-is.
pub fn parse_xff(header_value: Option<&str>) -> (Option<&str>, Option<&str>) {
    let Some(value) = header_value else {
        return (None, None);
    };

    let mut hops = value.split(',').map(str::trim).filter(|t| !t.is_empty());
    (hops.next(), hops.next())
}

/// Host portion of the directly-observed connection endpoint.
///
/// Absence of peer information is data, not an error: the caller falls
/// through to the next source in the resolution chain.
pub fn peer_host(peer: Option<SocketAddr>) -> Option<String> {
    peer.map(|addr| addr.ip().to_string())
}

/// Resolve both identities from the forwarding headers and the peer.
///
/// Strict left-to-right first-match policy:
///
/// ```text
/// client_ip        = xff_first OR peer OR "unknown"
/// load_balancer_ip = x_real_ip OR xff_second OR peer OR "unknown"
/// ```
///
/// Total over all input combinations; both output fields are always
/// non-empty.
pub fn resolve(
    xff: Option<&str>,
    x_real_ip: Option<&str>,
    peer: Option<SocketAddr>,
) -> ResolvedIps {
    let (xff_first, xff_second) = parse_xff(xff);
    let peer = peer_host(peer);

    let client_ip = xff_first
        .map(str::to_owned)
        .or_else(|| peer.clone())
        .unwrap_or_else(|| UNKNOWN.to_owned());

    let load_balancer_ip = x_real_ip
        .filter(|v| !v.is_empty())
        .or(xff_second)
        .map(str::to_owned)
        .or(peer)
        .unwrap_or_else(|| UNKNOWN.to_owned());

    ResolvedIps {
        client_ip,
        load_balancer_ip,
    }
}

/// Resolve directly from request headers and the optional peer address.
///
/// Header lookup is case-insensitive; a value that is not valid UTF-8
/// degrades to absent rather than erroring.
pub fn resolve_from_headers(headers: &HeaderMap, peer: Option<SocketAddr>) -> ResolvedIps {
    let xff = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok());
    let x_real_ip = headers.get("x-real-ip").and_then(|v| v.to_str().ok());

    resolve(xff, x_real_ip, peer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer(a: u8, b: u8, c: u8, d: u8) -> Option<SocketAddr> {
        Some(SocketAddr::from(([a, b, c, d], 4321)))
    }

    #[test]
    fn parse_xff_absent_and_empty() {
        assert_eq!(parse_xff(None), (None, None));
        assert_eq!(parse_xff(Some("")), (None, None));
        assert_eq!(parse_xff(Some("   ")), (None, None));
    }

    #[test]
    fn parse_xff_single_hop() {
        assert_eq!(parse_xff(Some("1.2.3.4")), (Some("1.2.3.4"), None));
    }

    #[test]
    fn parse_xff_two_hops() {
        assert_eq!(
            parse_xff(Some("1.2.3.4, 5.6.7.8")),
            (Some("1.2.3.4"), Some("5.6.7.8"))
        );
    }

    #[test]
    fn parse_xff_skips_empty_tokens() {
        assert_eq!(
            parse_xff(Some(" 1.2.3.4 ,  , 5.6.7.8")),
            (Some("1.2.3.4"), Some("5.6.7.8"))
        );
    }

    #[test]
    fn parse_xff_never_yields_whitespace_tokens() {
        let cases = [" , , ", "\t,  ,\t", "a, \t , b, c"];
        for case in cases {
            let (first, second) = parse_xff(Some(case));
            for token in [first, second].into_iter().flatten() {
                assert!(!token.is_empty());
                assert_eq!(token, token.trim());
            }
        }
    }

    #[test]
    fn parse_xff_accepts_tokens_without_validation() {
        // Not an IP, still accepted: syntax validation is out of scope.
        assert_eq!(parse_xff(Some("not-an-ip")), (Some("not-an-ip"), None));
    }

    #[test]
    fn resolve_prefers_xff_first_and_real_ip() {
        let got = resolve(
            Some("9.9.9.9, 8.8.8.8"),
            Some("7.7.7.7"),
            peer(6, 6, 6, 6),
        );
        assert_eq!(got.client_ip, "9.9.9.9");
        assert_eq!(got.load_balancer_ip, "7.7.7.7");
    }

    #[test]
    fn resolve_falls_back_to_xff_second_for_balancer() {
        let got = resolve(Some("9.9.9.9, 8.8.8.8"), None, peer(6, 6, 6, 6));
        assert_eq!(got.client_ip, "9.9.9.9");
        assert_eq!(got.load_balancer_ip, "8.8.8.8");
    }

    #[test]
    fn resolve_uses_peer_when_headers_absent() {
        let got = resolve(None, None, peer(6, 6, 6, 6));
        assert_eq!(got.client_ip, "6.6.6.6");
        assert_eq!(got.load_balancer_ip, "6.6.6.6");
    }

    #[test]
    fn resolve_yields_sentinel_with_no_inputs() {
        let got = resolve(None, None, None);
        assert_eq!(got.client_ip, UNKNOWN);
        assert_eq!(got.load_balancer_ip, UNKNOWN);
        assert!(got.client_is_unknown());
    }

    #[test]
    fn resolve_skips_empty_real_ip() {
        let got = resolve(Some("9.9.9.9, 8.8.8.8"), Some(""), None);
        assert_eq!(got.load_balancer_ip, "8.8.8.8");
    }

    #[test]
    fn peer_host_discards_port() {
        assert_eq!(peer_host(peer(10, 0, 0, 1)), Some("10.0.0.1".to_owned()));
        assert_eq!(peer_host(None), None);
    }

    #[test]
    fn resolve_from_headers_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("1.2.3.4"));
        headers.insert("X-Real-IP", HeaderValue::from_static("5.6.7.8"));

        let got = resolve_from_headers(&headers, None);
        assert_eq!(got.client_ip, "1.2.3.4");
        assert_eq!(got.load_balancer_ip, "5.6.7.8");
    }

    #[test]
    fn resolve_from_headers_treats_invalid_utf8_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_bytes(b"\xff\xfe").unwrap(),
        );

        let got = resolve_from_headers(&headers, peer(6, 6, 6, 6));
        assert_eq!(got.client_ip, "6.6.6.6");
    }
}
