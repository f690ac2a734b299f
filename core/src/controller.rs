//! The add-funds form: field state, the account subscription, and the
//! submission lifecycle tied together behind one owner.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::{Account, NoProgressView, OrchidApi, ProgressView};
use crate::display::{self, Denomination};
use crate::form::{self, FormContext, FormEvent, FormFieldState};
use crate::status::TransactionStatus;
use crate::subscription::AccountSubscription;

/// Everything a view needs to render the form at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    #[serde(flatten)]
    pub fields: FormFieldState,
    pub available: String,
    pub total: String,
    pub can_submit: bool,
    pub status: TransactionStatus,
}

pub struct FundsFormController<A: OrchidApi> {
    api: Arc<A>,
    denomination: Denomination,
    fields: FormFieldState,
    account: AccountSubscription,
    status_tx: watch::Sender<TransactionStatus>,
    progress: Box<dyn ProgressView>,
}

impl<A: OrchidApi> FundsFormController<A> {
    /// Mount the form: subscribes to the account stream for the controller's
    /// whole lifetime.
    pub fn new(api: Arc<A>, denomination: Denomination) -> Self {
        let account = AccountSubscription::new(api.subscribe_account());
        let (status_tx, _) = watch::channel(TransactionStatus::default());
        Self {
            api,
            denomination,
            fields: FormFieldState::default(),
            account,
            status_tx,
            progress: Box::new(NoProgressView),
        }
    }

    pub fn with_progress_view(mut self, view: impl ProgressView + 'static) -> Self {
        self.progress = Box::new(view);
        self
    }

    /// Pre-fill the inputs. Validated against whatever balance is known now.
    pub fn with_defaults(mut self, amount: Option<f64>, escrow: Option<f64>) -> Self {
        self.fields = FormFieldState::with_defaults(amount, escrow, &self.context());
        self
    }

    fn context(&self) -> FormContext {
        FormContext {
            wallet_balance: self.account.balance(),
            denomination: self.denomination,
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn denomination(&self) -> Denomination {
        self.denomination
    }

    pub fn fields(&self) -> &FormFieldState {
        &self.fields
    }

    pub fn account(&self) -> Option<Account> {
        self.account.account()
    }

    pub fn wallet_balance(&self) -> Option<u128> {
        self.account.balance()
    }

    /// Wait for the next account delivery.
    pub async fn account_changed(&mut self) -> bool {
        self.account.changed().await
    }

    pub fn status(&self) -> TransactionStatus {
        self.status_tx.borrow().clone()
    }

    /// Follow status transitions, including `Running` while a submit is in flight.
    pub fn watch_status(&self) -> watch::Receiver<TransactionStatus> {
        self.status_tx.subscribe()
    }

    pub fn dispatch(&mut self, event: FormEvent) {
        let ctx = self.context();
        self.fields = std::mem::take(&mut self.fields).reduce(&event, &ctx);
    }

    pub fn amount_changed(&mut self, raw: &str) {
        self.dispatch(FormEvent::AmountChanged(raw.to_string()));
    }

    pub fn escrow_changed(&mut self, raw: &str) {
        self.dispatch(FormEvent::EscrowChanged(raw.to_string()));
    }

    pub fn can_submit(&self) -> bool {
        form::can_submit(
            self.account.has_account(),
            &self.status_tx.borrow(),
            self.fields.amount_error,
            self.fields.escrow_error,
        )
    }

    pub fn total(&self) -> String {
        self.fields.total()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields.clone(),
            available: display::format_available(self.account.balance(), self.denomination),
            total: self.total(),
            can_submit: self.can_submit(),
            status: self.status(),
        }
    }

    /// Submit the add-funds transaction.
    ///
    /// Returns `false` without touching any state when the account, amount or
    /// escrow is missing. Otherwise moves through `Running` and settles into
    /// `Result` or `Error`, and returns `true`. Dropping the future while it is
    /// pending abandons the result; the backend call is not cancelled.
    pub async fn submit(&mut self) -> bool {
        let (Some(account), Some(amount), Some(escrow)) =
            (self.account.account(), self.fields.amount, self.fields.escrow)
        else {
            tracing::debug!("submit ignored: account, amount or escrow missing");
            return false;
        };

        self.status_tx.send_replace(TransactionStatus::running());
        self.progress.bring_into_view();

        let amount_wei = self.denomination.to_base_units(amount);
        let escrow_wei = self.denomination.to_base_units(escrow);
        tracing::info!(pot = %account.address, amount_wei, escrow_wei, "submitting add funds");

        let status = match self
            .api
            .add_funds(&account.address, amount_wei, escrow_wei)
            .await
        {
            Ok(tx_id) => {
                tracing::info!(%tx_id, "add funds complete");
                TransactionStatus::complete(tx_id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "add funds failed");
                TransactionStatus::failed(format!("{e:#}"))
            }
        };
        let succeeded = status.transaction_id().is_some();
        self.status_tx.send_replace(status);

        if succeeded {
            self.spawn_refresh();
        }
        true
    }

    /// Kick off account and history refreshes without waiting on them.
    fn spawn_refresh(&self) {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            if let Err(e) = api.update_account().await {
                tracing::warn!(error = %e, "account refresh failed");
            }
        });
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            if let Err(e) = api.update_transactions().await {
                tracing::warn!(error = %e, "transaction refresh failed");
            }
        });
    }
}
