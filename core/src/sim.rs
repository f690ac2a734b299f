//! In-memory Orchid backend.
//!
//! Balances move instantly (or after a fixed latency) and transaction hashes
//! are random. Good enough to drive the form end to end without a chain.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{watch, Mutex};

use crate::api::{Account, OrchidApi, PotAddress, TransactionRecord};
use crate::error::FundsError;

#[derive(Debug)]
struct ChainState {
    wallet_balance: u128,
    pot_balance: u128,
    pot_escrow: u128,
    ledger: Vec<TransactionRecord>,
    fail_next: Option<String>,
}

pub struct SimulatedChain {
    address: PotAddress,
    latency: Option<Duration>,
    state: Mutex<ChainState>,
    account_tx: watch::Sender<Option<Account>>,
    history_tx: watch::Sender<Vec<TransactionRecord>>,
}

impl SimulatedChain {
    /// A chain where `address` holds `wallet_balance` base units. The account
    /// stream stays empty until the first [`OrchidApi::update_account`].
    pub fn new(address: PotAddress, wallet_balance: u128) -> Self {
        let (account_tx, _) = watch::channel(None);
        let (history_tx, _) = watch::channel(Vec::new());
        Self {
            address,
            latency: None,
            state: Mutex::new(ChainState {
                wallet_balance,
                pot_balance: 0,
                pot_escrow: 0,
                ledger: Vec::new(),
                fail_next: None,
            }),
            account_tx,
            history_tx,
        }
    }

    /// Delay every `add_funds` call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn address(&self) -> &PotAddress {
        &self.address
    }

    /// Make the next `add_funds` call fail with `reason`.
    pub async fn fail_next(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_next = Some(reason.into());
    }

    /// Current pot balance and escrow, in base units.
    pub async fn pot(&self) -> (u128, u128) {
        let state = self.state.lock().await;
        (state.pot_balance, state.pot_escrow)
    }

    /// Number of live account subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.account_tx.receiver_count()
    }
}

fn random_hash() -> String {
    let bytes: [u8; 32] = rand::random();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("0x{hex}")
}

impl OrchidApi for SimulatedChain {
    fn subscribe_account(&self) -> watch::Receiver<Option<Account>> {
        self.account_tx.subscribe()
    }

    async fn add_funds(&self, pot: &PotAddress, amount: u128, escrow: u128) -> Result<String> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.state.lock().await;
        if let Some(reason) = state.fail_next.take() {
            return Err(anyhow!(reason));
        }
        if pot != &self.address {
            return Err(anyhow!("Unknown pot {pot}"));
        }

        let requested = amount
            .checked_add(escrow)
            .ok_or_else(|| anyhow!("Amount too large"))?;
        if requested > state.wallet_balance {
            return Err(FundsError::InsufficientBalance {
                available: state.wallet_balance,
                requested,
            }
            .into());
        }

        state.wallet_balance -= requested;
        state.pot_balance = state.pot_balance.saturating_add(amount);
        state.pot_escrow = state.pot_escrow.saturating_add(escrow);

        let hash = random_hash();
        state.ledger.insert(
            0,
            TransactionRecord {
                hash: hash.clone(),
                pot: pot.clone(),
                amount,
                escrow,
            },
        );
        tracing::info!(%hash, amount, escrow, "funds added to pot");
        Ok(hash)
    }

    async fn update_account(&self) -> Result<()> {
        let balance = self.state.lock().await.wallet_balance;
        self.account_tx.send_replace(Some(Account {
            address: self.address.clone(),
            oxt_balance: balance,
        }));
        Ok(())
    }

    async fn update_transactions(&self) -> Result<()> {
        let ledger = self.state.lock().await.ledger.clone();
        self.history_tx.send_replace(ledger);
        Ok(())
    }

    async fn transactions(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.history_tx.borrow().clone())
    }
}
