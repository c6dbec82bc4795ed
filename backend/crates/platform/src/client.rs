//! Client identification utilities
//!
//! Resolves the address a request came from, for rate limiting and logs.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};

/// Key used when no address can be determined
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Peer address of the TCP connection, if the server was started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// Never rejects; `None` when connect info is unavailable (e.g. in tests
/// driving a router directly).
#[derive(Debug, Clone, Copy)]
pub struct ClientAddr(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientAddr(ip))
    }
}

/// Extract client IP address from headers
///
/// With `trust_proxy` set, the first X-Forwarded-For entry wins; otherwise
/// the header is ignored since any client can forge it.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_proxy: bool,
) -> Option<IpAddr> {
    if trust_proxy {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first_ip) = xff.split(',').next() {
                if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                    return Some(ip);
                }
            }
        }
    }
    direct_ip
}

/// Rate-limit key for a request
pub fn client_key(headers: &HeaderMap, direct_ip: Option<IpAddr>, trust_proxy: bool) -> String {
    extract_client_ip(headers, direct_ip, trust_proxy)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn xff_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );
        headers
    }

    #[test]
    fn test_extract_client_ip_xff_trusted() {
        let ip = extract_client_ip(&xff_headers(), None, true);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_xff_untrusted() {
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        let ip = extract_client_ip(&xff_headers(), Some(direct), false);
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct), true);
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_client_key_fallback() {
        assert_eq!(client_key(&HeaderMap::new(), None, false), UNKNOWN_CLIENT);
        assert_eq!(client_key(&xff_headers(), None, true), "192.168.1.1");
    }

    #[tokio::test]
    async fn test_client_addr_from_connect_info() {
        let addr: SocketAddr = "10.1.2.3:5555".parse().unwrap();
        let mut request = Request::new(());
        request.extensions_mut().insert(ConnectInfo(addr));
        let (mut parts, _) = request.into_parts();

        let ClientAddr(ip) = ClientAddr::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip, Some(addr.ip()));
    }

    #[tokio::test]
    async fn test_client_addr_missing() {
        let (mut parts, _) = Request::new(()).into_parts();
        let ClientAddr(ip) = ClientAddr::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip, None);
    }
}
