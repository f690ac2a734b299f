//! Seam between the funds form and whatever backs the Orchid account: a real
//! chain client, or the in-memory [`crate::sim::SimulatedChain`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::FundsError;

/// On-chain identifier of the lottery pot funds are added to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PotAddress(String);

impl PotAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PotAddress {
    type Err = FundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| FundsError::InvalidAddress(s.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FundsError::InvalidAddress(s.to_string()));
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for PotAddress {
    type Error = FundsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PotAddress> for String {
    fn from(value: PotAddress) -> Self {
        value.0
    }
}

impl fmt::Display for PotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the signed-in account as delivered by the account stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: PotAddress,
    /// Wallet OXT balance in base units.
    pub oxt_balance: u128,
}

/// A funding transaction as reported by the transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: String,
    pub pot: PotAddress,
    /// Amount added to the pot balance, in base units.
    pub amount: u128,
    /// Amount added to the pot escrow, in base units.
    pub escrow: u128,
}

/// Everything the funds form needs from the outside world.
///
/// Futures are `Send` so refreshes can be spawned onto the runtime without
/// tying them to the form's lifetime.
pub trait OrchidApi: Send + Sync + 'static {
    /// Stream of account snapshots. `None` until the first account arrives.
    fn subscribe_account(&self) -> watch::Receiver<Option<Account>>;

    /// Move `amount` into the pot balance and `escrow` into its deposit.
    /// Resolves to the transaction id.
    fn add_funds(
        &self,
        pot: &PotAddress,
        amount: u128,
        escrow: u128,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Re-fetch the account and publish it on the account stream.
    fn update_account(&self) -> impl Future<Output = Result<()>> + Send;

    /// Re-fetch the transaction history.
    fn update_transactions(&self) -> impl Future<Output = Result<()>> + Send;

    /// Last fetched transaction history, newest first.
    fn transactions(&self) -> impl Future<Output = Result<Vec<TransactionRecord>>> + Send;
}

/// Display collaborator that renders [`crate::status::TransactionStatus`].
pub trait ProgressView: Send {
    /// Called when a submission starts so the progress panel becomes visible.
    fn bring_into_view(&mut self);
}

/// Progress view for headless use.
#[derive(Debug, Default)]
pub struct NoProgressView;

impl ProgressView for NoProgressView {
    fn bring_into_view(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x4575f41308ec1483f3d399aa9a2826d74da13deb";

    #[test]
    fn parse_valid_address() {
        let addr: PotAddress = ADDR.parse().unwrap();
        assert_eq!(addr.as_str(), ADDR);
    }

    #[test]
    fn parse_normalizes_case() {
        let addr: PotAddress = "0X4575F41308EC1483F3D399AA9A2826D74DA13DEB".parse().unwrap();
        assert_eq!(addr.to_string(), ADDR);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!("4575f41308ec1483f3d399aa9a2826d74da13deb"
            .parse::<PotAddress>()
            .is_err());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("0x1234".parse::<PotAddress>().is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!("0x4575f41308ec1483f3d399aa9a2826d74da13dzz"
            .parse::<PotAddress>()
            .is_err());
    }

    #[test]
    fn address_serde_roundtrip_validates() {
        let json = format!("\"{ADDR}\"");
        let addr: PotAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_string(&addr).unwrap(), json);
        assert!(serde_json::from_str::<PotAddress>("\"0xbad\"").is_err());
    }
}
