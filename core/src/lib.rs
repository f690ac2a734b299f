pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod form;
pub mod sim;
pub mod status;
pub mod subscription;

pub use api::{Account, OrchidApi, PotAddress, ProgressView};
pub use commands::Command;
pub use config::FundsConfig;
pub use controller::FundsFormController;
pub use error::FundsError;
pub use status::TransactionStatus;
