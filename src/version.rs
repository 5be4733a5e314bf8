//! Server version information and the outbound User-Agent.

/// Server name reported to protocol clients.
pub const SERVER_NAME: &str = "primeng-docs";

/// Current server version.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version stamped into `metadata.json`.
pub const CACHE_FORMAT_VERSION: &str = "1.0.0";

/// Browser User-Agent sent with every documentation request.
///
/// The documentation site serves its prerendered markup to regular browsers,
/// so requests identify as one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Build the User-Agent string for documentation requests.
pub fn build_user_agent(suffix: Option<&str>) -> String {
    let mut ua = DEFAULT_USER_AGENT.to_string();

    if let Some(s) = suffix {
        ua.push(' ');
        ua.push_str(s);
    }

    ua
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_agent() {
        let ua = build_user_agent(None);
        assert_eq!(ua, DEFAULT_USER_AGENT);
        assert!(ua.contains("Chrome/"));

        let ua_with_suffix = build_user_agent(Some("primeng-docs/0.1"));
        assert!(ua_with_suffix.ends_with(" primeng-docs/0.1"));
    }

    #[test]
    fn test_version_constants() {
        assert!(!SERVER_VERSION.is_empty());
        assert_eq!(CACHE_FORMAT_VERSION.split('.').count(), 3);
    }
}
