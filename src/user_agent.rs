//! User-Agent strings for manifest and sample HTTP clients.
//!
//! The manifest request identifies the tool. Sample requests use a desktop
//! browser string instead (see [`crate::download::BROWSER_USER_AGENT`]).

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://objective-see.com/malware.html";

/// Default User-Agent for the manifest request (identifies the tool).
#[must_use]
pub(crate) fn default_manifest_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("sample-fetcher/{version} (+{PROJECT_UA_URL})")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_ua_carries_version_and_project_url() {
        let ua = default_manifest_user_agent();
        assert!(ua.contains(PROJECT_UA_URL), "UA must contain project URL: {ua}");
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("sample-fetcher/")
                .and_then(|s| s.split(' ').next())
                .expect("manifest UA has version"),
            "manifest UA must contain crate version"
        );
    }
}
