//! `Info.plist` and `config.plist` generation.
//!
//! Both documents are written as XML property lists. Field order follows the
//! struct declaration, so output is byte-for-byte deterministic.

use super::structure::{EXECUTABLE_NAME, ICON_NAME};
use crate::bundler::error::Result;
use serde::{Deserialize, Serialize};

/// Version string written to both version keys.
pub const BUNDLE_VERSION: &str = "1.0";

/// `LSMinimumSystemVersion` for generated bundles.
pub const MINIMUM_SYSTEM_VERSION: &str = "15.0";

#[derive(Serialize)]
struct InfoPlist<'a> {
    #[serde(rename = "CFBundleExecutable")]
    executable: &'a str,
    #[serde(rename = "CFBundleName")]
    name: &'a str,
    #[serde(rename = "CFBundleIdentifier")]
    identifier: &'a str,
    #[serde(rename = "CFBundleIconFile")]
    icon_file: &'a str,
    #[serde(rename = "CFBundlePackageType")]
    package_type: &'a str,
    #[serde(rename = "CFBundleVersion")]
    version: &'a str,
    #[serde(rename = "CFBundleShortVersionString")]
    short_version: &'a str,
    #[serde(rename = "LSMinimumSystemVersion")]
    minimum_system_version: &'a str,
    #[serde(rename = "NSAppTransportSecurity")]
    transport_security: TransportSecurity,
}

#[derive(Serialize)]
struct TransportSecurity {
    // The launcher has to load arbitrary HTTP and HTTPS origins.
    #[serde(rename = "NSAllowsArbitraryLoads")]
    allows_arbitrary_loads: bool,
}

/// Runtime configuration read by the launcher from `Resources/config.plist`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Absolute target URL.
    #[serde(rename = "URL")]
    pub url: String,

    /// Display name shown in the window title.
    #[serde(rename = "AppName")]
    pub app_name: String,

    /// Extra domains the launcher may navigate to. Always written, even empty.
    #[serde(rename = "AllowedDomains", default)]
    pub allowed_domains: Vec<String>,
}

/// Generates the bundle manifest (`Contents/Info.plist`).
pub fn generate_info_plist(name: &str, bundle_identifier: &str) -> Result<Vec<u8>> {
    let info = InfoPlist {
        executable: EXECUTABLE_NAME,
        name,
        identifier: bundle_identifier,
        icon_file: ICON_NAME,
        package_type: "APPL",
        version: BUNDLE_VERSION,
        short_version: BUNDLE_VERSION,
        minimum_system_version: MINIMUM_SYSTEM_VERSION,
        transport_security: TransportSecurity {
            allows_arbitrary_loads: true,
        },
    };

    let mut buffer = Vec::new();
    plist::to_writer_xml(&mut buffer, &info)?;

    log::info!("Generated Info.plist for {}", name);
    Ok(buffer)
}

/// Generates the launcher runtime configuration (`Resources/config.plist`).
pub fn generate_config_plist(url: &str, name: &str, allowed_domains: &[String]) -> Result<Vec<u8>> {
    let config = RuntimeConfig {
        url: url.to_string(),
        app_name: name.to_string(),
        allowed_domains: allowed_domains.to_vec(),
    };

    let mut buffer = Vec::new();
    plist::to_writer_xml(&mut buffer, &config)?;

    log::info!("Generated config.plist for {}", name);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plist::Value;

    fn parse(bytes: &[u8]) -> plist::Dictionary {
        Value::from_reader_xml(bytes)
            .unwrap()
            .into_dictionary()
            .unwrap()
    }

    #[test]
    fn info_plist_contains_required_keys() {
        let dict = parse(&generate_info_plist("TestApp", "com.test.app").unwrap());

        let string = |key: &str| dict.get(key).and_then(Value::as_string).map(str::to_owned);
        assert_eq!(string("CFBundleExecutable").as_deref(), Some("WebAppLauncher"));
        assert_eq!(string("CFBundleName").as_deref(), Some("TestApp"));
        assert_eq!(string("CFBundleIdentifier").as_deref(), Some("com.test.app"));
        assert_eq!(string("CFBundleIconFile").as_deref(), Some("AppIcon"));
        assert_eq!(string("CFBundlePackageType").as_deref(), Some("APPL"));
        assert_eq!(string("CFBundleVersion").as_deref(), Some("1.0"));
        assert_eq!(string("CFBundleShortVersionString").as_deref(), Some("1.0"));
        assert_eq!(string("LSMinimumSystemVersion").as_deref(), Some("15.0"));
    }

    #[test]
    fn info_plist_allows_arbitrary_loads() {
        let dict = parse(&generate_info_plist("TestApp", "com.test.app").unwrap());
        let ats = dict
            .get("NSAppTransportSecurity")
            .and_then(Value::as_dictionary)
            .unwrap();

        assert_eq!(
            ats.get("NSAllowsArbitraryLoads").and_then(Value::as_boolean),
            Some(true)
        );
    }

    #[test]
    fn config_plist_round_trips() {
        let domains = vec!["cdn.example.com".to_string()];
        let bytes = generate_config_plist("https://example.com", "Example", &domains).unwrap();
        let config: RuntimeConfig = plist::from_bytes(&bytes).unwrap();

        assert_eq!(config.url, "https://example.com");
        assert_eq!(config.app_name, "Example");
        assert_eq!(config.allowed_domains, domains);
    }

    #[test]
    fn empty_allowed_domains_are_written_as_empty_array() {
        let dict = parse(&generate_config_plist("https://example.com", "Example", &[]).unwrap());
        let domains = dict.get("AllowedDomains").and_then(Value::as_array).unwrap();
        assert!(domains.is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let a = generate_info_plist("Same", "com.web2app.same").unwrap();
        let b = generate_info_plist("Same", "com.web2app.same").unwrap();
        assert_eq!(a, b);
    }
}
