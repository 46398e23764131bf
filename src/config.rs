//! Report configuration and asset directory discovery.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable pointing at the asset directory.
pub const ASSETS_DIR_ENV: &str = "GRI_REPORT_ASSETS_DIR";

/// Year printed when the payload carries none.
pub const DEFAULT_YEAR: &str = "2024";

/// Static texts printed around the report figures.
///
/// Every field has a default so a partial JSON config file is enough.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub organization: String,
    pub report_title: String,
    pub location_label: String,
    pub default_year: String,
    pub contact: ContactDetails,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization: "Waste Management Platform".to_owned(),
            report_title: "GRI 306: Waste 2020".to_owned(),
            location_label: "All Location".to_owned(),
            default_year: DEFAULT_YEAR.to_owned(),
            contact: ContactDetails::default(),
        }
    }
}

impl ReportConfig {
    /// Returns the payload year, or the configured default when it is missing or blank.
    pub fn effective_year<'a>(&'a self, year: Option<&'a str>) -> &'a str {
        match year.map(str::trim) {
            Some(year) if !year.is_empty() => year,
            _ => &self.default_year,
        }
    }
}

/// Contact block printed on the outro page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            phone: "+66 2 000 0000".to_owned(),
            email: "contact@example.com".to_owned(),
            website: "www.example.com".to_owned(),
            address: "Bangkok, Thailand".to_owned(),
        }
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn asset_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(ASSETS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

/// Resolves the asset directory: the explicit path, then `GRI_REPORT_ASSETS_DIR`,
/// then `assets/` beside the executable, then `assets/` in the crate root.
///
/// An explicit path is returned even when it does not exist so that every asset
/// load reports the missing file and falls back.
pub fn resolve_asset_directory(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    asset_directory_candidates()
        .into_iter()
        .find(|candidate| candidate.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_year_uses_default() {
        let config = ReportConfig::default();
        assert_eq!(config.effective_year(None), "2024");
        assert_eq!(config.effective_year(Some("  ")), "2024");
        assert_eq!(config.effective_year(Some("2023")), "2023");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"organization": "Acme", "contact": {"phone": "123"}}"#)
                .expect("parse config");
        assert_eq!(config.organization, "Acme");
        assert_eq!(config.contact.phone, "123");
        assert_eq!(config.contact.email, ContactDetails::default().email);
        assert_eq!(config.location_label, "All Location");
    }

    #[test]
    fn explicit_directory_wins() {
        let explicit = Path::new("/nonexistent/gri-assets");
        assert_eq!(
            resolve_asset_directory(Some(explicit)),
            Some(explicit.to_path_buf())
        );
    }
}
