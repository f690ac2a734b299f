//! Output formatting: OXT denomination conversion and display helpers.
//!
//! OXT uses 18 decimal places on chain. 1 OXT = 10^18 base units.

use serde::{Deserialize, Serialize};

use crate::api::TransactionRecord;
use crate::status::TransactionStatus;

/// Placeholder shown in empty amount inputs.
pub const AMOUNT_PLACEHOLDER: &str = "0.00";

/// Largest supported decimal count; 10^38 is the last power of ten in a `u128`.
const MAX_DECIMALS: u32 = 38;

/// Precision used when showing balances and totals.
pub const DISPLAY_PRECISION: usize = 2;

/// Fixed-point relationship between the display unit and the base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDenomination")]
pub struct Denomination {
    decimals: u32,
}

#[derive(Deserialize)]
struct RawDenomination {
    decimals: u32,
}

impl From<RawDenomination> for Denomination {
    fn from(raw: RawDenomination) -> Self {
        Self::new(raw.decimals)
    }
}

impl Default for Denomination {
    fn default() -> Self {
        Self::OXT
    }
}

impl Denomination {
    pub const OXT: Self = Self { decimals: 18 };

    /// Decimal counts above 38 are clamped.
    pub const fn new(decimals: u32) -> Self {
        let decimals = if decimals > MAX_DECIMALS {
            MAX_DECIMALS
        } else {
            decimals
        };
        Self { decimals }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    fn scale(&self) -> u128 {
        10u128.pow(self.decimals)
    }

    /// Convert a display amount to base units.
    ///
    /// Non-finite and non-positive inputs map to zero; values beyond `u128`
    /// saturate. Monotonic in `amount`.
    #[must_use]
    pub fn to_base_units(&self, amount: f64) -> u128 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0;
        }
        (amount * self.scale() as f64).round() as u128
    }

    /// Render base units with exactly `precision` decimals, truncating.
    /// Examples (18 decimals): 1_500_000_000_000_000_000 -> "1.50", 0 -> "0.00"
    #[must_use]
    pub fn format(&self, base: u128, precision: usize) -> String {
        let scale = self.scale();
        let whole = base / scale;
        if precision == 0 {
            return whole.to_string();
        }
        let frac = base % scale;
        let mut digits = if self.decimals == 0 {
            String::new()
        } else {
            format!("{frac:0width$}", width = self.decimals as usize)
        };
        digits.truncate(precision);
        while digits.len() < precision {
            digits.push('0');
        }
        format!("{whole}.{digits}")
    }
}

/// Parse free-text numeric input. Anything empty, malformed, negative or
/// non-finite yields `None`.
#[must_use]
pub fn parse_float_safe(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('-') {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Format a base-unit balance for display, e.g. "12.34 OXT".
#[must_use]
pub fn format_balance(base: u128, denomination: Denomination) -> String {
    format!("{} OXT", denomination.format(base, DISPLAY_PRECISION))
}

/// Available wallet balance, or "..." while it is still loading.
#[must_use]
pub fn format_available(balance: Option<u128>, denomination: Denomination) -> String {
    match balance {
        Some(b) => format_balance(b, denomination),
        None => "...".to_string(),
    }
}

/// Sum of escrow and amount, missing values counted as zero.
#[must_use]
pub fn format_total(amount: Option<f64>, escrow: Option<f64>) -> String {
    format!("{:.2}", escrow.unwrap_or(0.0) + amount.unwrap_or(0.0))
}

/// One-line rendering of a transaction status for the progress panel.
#[must_use]
pub fn format_status(status: &TransactionStatus) -> String {
    match status {
        TransactionStatus::Idle => "No transaction submitted.".to_string(),
        TransactionStatus::Running => "Transaction running...".to_string(),
        TransactionStatus::Result {
            message,
            transaction_id,
        } => format!("{message}\n  Transaction: {transaction_id}"),
        TransactionStatus::Error { message } => message.clone(),
    }
}

/// Format funding history for display.
#[must_use]
pub fn format_transactions(txs: &[TransactionRecord], denomination: Denomination) -> String {
    if txs.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<66}  {:>14}  {:>14}\n", "Hash", "Balance", "Deposit"));
    output.push_str(&format!("{:-<66}  {:->14}  {:->14}\n", "", "", ""));
    for tx in txs {
        output.push_str(&format!(
            "{:<66}  {:>14}  {:>14}\n",
            tx.hash,
            format_balance(tx.amount, denomination),
            format_balance(tx.escrow, denomination),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEI: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn oxt_to_base_units_whole() {
        assert_eq!(Denomination::OXT.to_base_units(1.0), WEI);
    }

    #[test]
    fn oxt_to_base_units_fractional() {
        assert_eq!(Denomination::OXT.to_base_units(1.5), WEI + WEI / 2);
    }

    #[test]
    fn two_decimal_denomination() {
        let cents = Denomination::new(2);
        assert_eq!(cents.to_base_units(5.0), 500);
        assert_eq!(cents.to_base_units(500.0), 50_000);
    }

    #[test]
    fn to_base_units_rejects_non_finite() {
        assert_eq!(Denomination::OXT.to_base_units(f64::NAN), 0);
        assert_eq!(Denomination::OXT.to_base_units(f64::INFINITY), 0);
        assert_eq!(Denomination::OXT.to_base_units(-3.0), 0);
    }

    #[test]
    fn to_base_units_is_monotonic() {
        let d = Denomination::OXT;
        let samples = [0.0, 0.001, 0.01, 0.5, 1.0, 2.25, 10.0, 1234.5];
        for pair in samples.windows(2) {
            assert!(d.to_base_units(pair[0]) < d.to_base_units(pair[1]));
        }
    }

    #[test]
    fn to_base_units_saturates() {
        assert_eq!(Denomination::OXT.to_base_units(1e300), u128::MAX);
    }

    #[test]
    fn decimals_are_clamped() {
        assert_eq!(Denomination::new(90).decimals(), 38);
    }

    #[test]
    fn deserialized_decimals_are_clamped() {
        let d: Denomination = serde_json::from_str(r#"{"decimals":90}"#).unwrap();
        assert_eq!(d.decimals(), 38);
        assert!(d.to_base_units(1.0) > 10u128.pow(37));
        assert_eq!(d.format(5, 2), "0.00");
    }

    #[test]
    fn denomination_json_shape() {
        let json = serde_json::to_string(&Denomination::new(2)).unwrap();
        assert_eq!(json, r#"{"decimals":2}"#);
        assert_eq!(serde_json::from_str::<Denomination>(&json).unwrap(), Denomination::new(2));
    }

    #[test]
    fn format_zero() {
        assert_eq!(Denomination::OXT.format(0, 2), "0.00");
    }

    #[test]
    fn format_truncates() {
        assert_eq!(Denomination::OXT.format(WEI + WEI * 999 / 1000, 2), "1.99");
    }

    #[test]
    fn format_pads_past_decimals() {
        assert_eq!(Denomination::new(1).format(15, 3), "1.500");
        assert_eq!(Denomination::new(0).format(7, 2), "7.00");
    }

    #[test]
    fn format_without_precision() {
        assert_eq!(Denomination::OXT.format(3 * WEI + 1, 0), "3");
    }

    #[test]
    fn format_balance_display() {
        assert_eq!(format_balance(12 * WEI + WEI / 4, Denomination::OXT), "12.25 OXT");
    }

    #[test]
    fn available_while_loading() {
        assert_eq!(format_available(None, Denomination::OXT), "...");
        assert_eq!(format_available(Some(WEI), Denomination::OXT), "1.00 OXT");
    }

    #[test]
    fn parse_simple() {
        assert_eq!(parse_float_safe("5"), Some(5.0));
        assert_eq!(parse_float_safe(" 2.5 "), Some(2.5));
        assert_eq!(parse_float_safe(".5"), Some(0.5));
        assert_eq!(parse_float_safe("0"), Some(0.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_float_safe(""), None);
        assert_eq!(parse_float_safe("   "), None);
        assert_eq!(parse_float_safe("abc"), None);
        assert_eq!(parse_float_safe("1.2.3"), None);
        assert_eq!(parse_float_safe("12abc"), None);
    }

    #[test]
    fn parse_rejects_negative() {
        assert_eq!(parse_float_safe("-1"), None);
        assert_eq!(parse_float_safe("-0"), None);
        assert_eq!(parse_float_safe(" -0.5"), None);
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert_eq!(parse_float_safe("inf"), None);
        assert_eq!(parse_float_safe("NaN"), None);
        assert_eq!(parse_float_safe("1e400"), None);
    }

    #[test]
    fn total_sums_fields() {
        assert_eq!(format_total(Some(2.0), Some(3.0)), "5.00");
        assert_eq!(format_total(None, Some(1.25)), "1.25");
        assert_eq!(format_total(Some(0.5), None), "0.50");
        assert_eq!(format_total(None, None), "0.00");
    }

    #[test]
    fn status_lines() {
        assert_eq!(
            format_status(&TransactionStatus::Running),
            "Transaction running..."
        );
        let done = format_status(&TransactionStatus::complete("0xabc"));
        assert!(done.starts_with("Transaction Complete!"));
        assert!(done.contains("0xabc"));
        assert_eq!(
            format_status(&TransactionStatus::failed("boom")),
            "Transaction Failed: boom"
        );
    }

    #[test]
    fn format_empty_transactions() {
        assert_eq!(
            format_transactions(&[], Denomination::OXT),
            "No transactions found."
        );
    }

    #[test]
    fn format_transactions_table() {
        let txs = vec![TransactionRecord {
            hash: "0xfeed".to_string(),
            pot: "0x4575f41308ec1483f3d399aa9a2826d74da13deb".parse().unwrap(),
            amount: 2 * WEI,
            escrow: WEI,
        }];
        let output = format_transactions(&txs, Denomination::OXT);
        assert!(output.contains("0xfeed"));
        assert!(output.contains("2.00 OXT"));
        assert!(output.contains("1.00 OXT"));
    }
}
