//! Add-funds form fields, their validation, and the submit gate.
//!
//! The form is a plain value: every input event produces a new
//! [`FormFieldState`] through [`FormFieldState::reduce`], so validation can be
//! exercised without any rendering layer.

use serde::Serialize;

use crate::display::{self, Denomination};
use crate::status::TransactionStatus;

/// A user edit to one of the two numeric inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    AmountChanged(String),
    EscrowChanged(String),
}

/// Outside values the reducer validates against.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormContext {
    /// Wallet balance in base units, `None` until the account stream delivers one.
    pub wallet_balance: Option<u128>,
    pub denomination: Denomination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFieldState {
    pub amount: Option<f64>,
    pub escrow: Option<f64>,
    pub amount_error: bool,
    pub escrow_error: bool,
}

impl Default for FormFieldState {
    /// An empty amount is invalid; the deposit starts at zero, which is valid.
    fn default() -> Self {
        Self {
            amount: None,
            escrow: Some(0.0),
            amount_error: true,
            escrow_error: false,
        }
    }
}

impl FormFieldState {
    /// Form pre-filled with the given defaults, validated as if typed.
    pub fn with_defaults(
        amount: Option<f64>,
        escrow: Option<f64>,
        ctx: &FormContext,
    ) -> Self {
        let mut state = Self::default();
        if let Some(amount) = amount {
            state = state.on_amount_changed(&amount.to_string(), ctx);
        }
        if let Some(escrow) = escrow {
            state = state.on_escrow_changed(&escrow.to_string());
        }
        state
    }

    pub fn reduce(self, event: &FormEvent, ctx: &FormContext) -> Self {
        match event {
            FormEvent::AmountChanged(raw) => self.on_amount_changed(raw, ctx),
            FormEvent::EscrowChanged(raw) => self.on_escrow_changed(raw),
        }
    }

    /// An amount is invalid when it does not parse or exceeds the wallet
    /// balance. An unknown balance counts as zero.
    pub fn on_amount_changed(self, raw: &str, ctx: &FormContext) -> Self {
        let amount = display::parse_float_safe(raw);
        let available = ctx.wallet_balance.unwrap_or(0);
        let amount_error = match amount {
            None => true,
            Some(a) => ctx.denomination.to_base_units(a) > available,
        };
        Self {
            amount,
            amount_error,
            ..self
        }
    }

    /// The deposit is only checked for parseability, never against the balance.
    pub fn on_escrow_changed(self, raw: &str) -> Self {
        let escrow = display::parse_float_safe(raw);
        Self {
            escrow,
            escrow_error: escrow.is_none(),
            ..self
        }
    }

    /// Total being moved, formatted to two decimals.
    pub fn total(&self) -> String {
        display::format_total(self.amount, self.escrow)
    }
}

/// Whether the submit control is enabled.
#[must_use]
pub fn can_submit(
    account_present: bool,
    tx: &TransactionStatus,
    amount_error: bool,
    escrow_error: bool,
) -> bool {
    account_present && !tx.is_running() && !amount_error && !escrow_error
}
