//! On-disk settings for the add-funds tool.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::PotAddress;
use crate::display::Denomination;
use crate::error::FundsError;

const APP_DIR: &str = "oxt-funds";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundsConfig {
    /// Pot address funds are added to.
    pub account_address: Option<PotAddress>,
    /// Wallet balance the simulated chain starts with, in OXT.
    pub starting_balance: f64,
    /// Pre-filled "Add to Balance" input.
    pub default_add_amount: Option<f64>,
    /// Pre-filled "Add to Deposit" input.
    pub default_add_escrow: Option<f64>,
    /// Decimal places between OXT and its base unit.
    pub decimals: u32,
}

impl Default for FundsConfig {
    fn default() -> Self {
        Self {
            account_address: None,
            starting_balance: 0.0,
            default_add_amount: None,
            default_add_escrow: None,
            decimals: Denomination::OXT.decimals(),
        }
    }
}

impl FundsConfig {
    /// `$XDG_CONFIG_HOME/oxt-funds/config.json` or the platform equivalent.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| FundsError::Config("cannot determine config directory".into()))?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<(), FundsError> {
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(FundsError::Config(format!(
                "starting_balance must be a non-negative number, got {}",
                self.starting_balance
            )));
        }
        if self.decimals > 38 {
            return Err(FundsError::Config(format!(
                "decimals must be at most 38, got {}",
                self.decimals
            )));
        }
        Ok(())
    }

    pub fn denomination(&self) -> Denomination {
        Denomination::new(self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FundsConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, FundsConfig::default());
        assert_eq!(config.denomination(), Denomination::OXT);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = FundsConfig {
            account_address: Some("0x4575f41308ec1483f3d399aa9a2826d74da13deb".parse().unwrap()),
            starting_balance: 25.5,
            default_add_amount: Some(2.0),
            default_add_escrow: Some(1.0),
            decimals: 18,
        };
        config.save(&path).unwrap();
        assert_eq!(FundsConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "starting_balance": 3 }"#).unwrap();
        let config = FundsConfig::load(&path).unwrap();
        assert_eq!(config.starting_balance, 3.0);
        assert_eq!(config.decimals, 18);
        assert!(config.account_address.is_none());
    }

    #[test]
    fn bad_address_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "account_address": "0x12" }"#).unwrap();
        assert!(FundsConfig::load(&path).is_err());
    }

    #[test]
    fn negative_balance_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "starting_balance": -1 }"#).unwrap();
        let err = FundsConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("starting_balance"));
    }

    #[test]
    fn default_path_is_namespaced() {
        if let Ok(path) = FundsConfig::default_path() {
            assert!(path.ends_with("oxt-funds/config.json"));
        }
    }
}
