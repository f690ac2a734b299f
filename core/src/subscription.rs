use tokio::sync::watch;

use crate::api::Account;

/// Live view of the account stream, held for as long as a form is mounted.
///
/// Dropping the subscription releases the underlying receiver; that happens
/// exactly once, either through [`AccountSubscription::unsubscribe`] or when
/// the owner is dropped.
#[derive(Debug)]
pub struct AccountSubscription {
    rx: watch::Receiver<Option<Account>>,
}

impl AccountSubscription {
    pub fn new(rx: watch::Receiver<Option<Account>>) -> Self {
        tracing::debug!("account subscription acquired");
        Self { rx }
    }

    /// Most recent account, if one has been delivered.
    pub fn account(&self) -> Option<Account> {
        self.rx.borrow().clone()
    }

    pub fn balance(&self) -> Option<u128> {
        self.rx.borrow().as_ref().map(|a| a.oxt_balance)
    }

    pub fn has_account(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the next account delivery. Returns `false` once the sender
    /// is gone and no more updates can arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn unsubscribe(self) {}
}

impl Drop for AccountSubscription {
    fn drop(&mut self) {
        tracing::debug!("account subscription released");
    }
}
