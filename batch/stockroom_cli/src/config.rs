use std::fs;
use std::path::Path;

use anyhow::Context;

/// Endpoint and credential configuration, loaded from a JSON file.
///
/// The distributor sections are optional; they are only required by the sync action.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct Config {
    pub(crate) inventory: InventoryConfig,
    #[serde(default)]
    pub(crate) tme: Option<TmeConfig>,
    #[serde(default)]
    pub(crate) mouser: Option<MouserConfig>,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct InventoryConfig {
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct TmeConfig {
    pub(crate) token: String,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct MouserConfig {
    pub(crate) api_key: String,
}

impl Config {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Reading configuration. path: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Parsing configuration. path: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn distributor_sections_are_optional() {
        // given
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stockroom.json");
        std::fs::write(&path, indoc! {r#"
            {
                "inventory": {
                    "base_url": "https://inventory.example.com",
                    "username": "admin",
                    "password": "secret"
                }
            }
        "#})
        .unwrap();

        // when
        let config = Config::load(&path).unwrap();

        // then
        assert_eq!(config.inventory.base_url, "https://inventory.example.com");
        assert!(config.tme.is_none());
        assert!(config.mouser.is_none());
    }

    #[test]
    fn a_missing_file_is_an_error() {
        // given
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.json");

        // when, then
        assert!(Config::load(&path).is_err());
    }
}
