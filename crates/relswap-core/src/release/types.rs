//! Release metadata as returned by the releases API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One downloadable file of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// A published release. Fields the API adds later are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    pub name: String,
    pub id: u64,
    pub published_at: DateTime<Utc>,
    /// Assets in the order the API listed them.
    pub assets: Vec<Asset>,
}

impl ReleaseMetadata {
    /// Asset with exactly this name.
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn asset_names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "url": "https://api.example.com/repos/o/r/releases/1",
        "name": "Release 1.2.3",
        "id": 42,
        "draft": false,
        "published_at": "2021-03-01T10:00:00Z",
        "assets": [
            {"name": "tool-linux", "browser_download_url": "https://x/tool-linux", "size": 10},
            {"name": "tool-mac", "browser_download_url": "https://x/tool-mac", "state": "uploaded"},
            {"name": "tool-win.exe", "browser_download_url": "https://x/tool-win.exe"}
        ]
    }"#;

    #[test]
    fn decodes_and_ignores_unknown_fields() {
        let r: ReleaseMetadata = serde_json::from_str(BODY).unwrap();
        assert_eq!(r.name, "Release 1.2.3");
        assert_eq!(r.id, 42);
        assert_eq!(r.published_at.to_rfc3339(), "2021-03-01T10:00:00+00:00");
    }

    #[test]
    fn asset_order_is_preserved() {
        let r: ReleaseMetadata = serde_json::from_str(BODY).unwrap();
        let names: Vec<&str> = r.asset_names().collect();
        assert_eq!(names, vec!["tool-linux", "tool-mac", "tool-win.exe"]);
    }

    #[test]
    fn asset_lookup_by_name() {
        let r: ReleaseMetadata = serde_json::from_str(BODY).unwrap();
        assert_eq!(r.asset("tool-mac").unwrap().download_url, "https://x/tool-mac");
        assert!(r.asset("tool").is_none());
    }

    #[test]
    fn missing_required_field_fails() {
        let err = serde_json::from_str::<ReleaseMetadata>(r#"{"name": "x", "id": 1}"#);
        assert!(err.is_err());
    }
}
