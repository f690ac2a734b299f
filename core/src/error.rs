use thiserror::Error;

/// Domain failures raised by the funds backend and configuration layer.
///
/// The API seam itself speaks `anyhow::Result`; these variants are what ends
/// up inside it when the failure is something we can name.
#[derive(Debug, Error)]
pub enum FundsError {
    #[error("insufficient balance: have {available} wei, need {requested} wei")]
    InsufficientBalance { available: u128, requested: u128 },

    #[error("invalid pot address '{0}': expected 0x followed by 40 hex digits")]
    InvalidAddress(String),

    #[error("config error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_message() {
        let err = FundsError::InsufficientBalance {
            available: 10,
            requested: 25,
        };
        assert_eq!(
            err.to_string(),
            "insufficient balance: have 10 wei, need 25 wei"
        );
    }

    #[test]
    fn invalid_address_mentions_input() {
        let err = FundsError::InvalidAddress("0xnope".into());
        assert!(err.to_string().contains("0xnope"));
    }
}
