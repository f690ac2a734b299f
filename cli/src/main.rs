use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use oxt_funds_core::sim::SimulatedChain;
use oxt_funds_core::{Command, FundsConfig, FundsFormController, OrchidApi, PotAddress, ProgressView};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "oxt-funds", version, about = "Add OXT to an Orchid lottery pot")]
struct Cli {
    /// Config file [default: <config dir>/oxt-funds/config.json]
    #[arg(long, env = "OXT_FUNDS_CONFIG")]
    config: Option<PathBuf>,

    /// Pot address to fund (overrides config)
    #[arg(long)]
    address: Option<String>,

    /// Starting wallet balance in OXT (overrides config)
    #[arg(long)]
    balance: Option<f64>,

    /// Pre-fill the amount added to the pot balance
    #[arg(long)]
    amount: Option<f64>,

    /// Pre-fill the amount added to the pot deposit
    #[arg(long)]
    escrow: Option<f64>,

    /// Simulated confirmation delay in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write the settings in effect (config plus flags) back to the config file
    #[arg(long)]
    save_config: bool,

    /// Run a single command and exit, e.g. `oxt-funds --amount 2 submit`
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

impl Cli {
    /// Layer command-line flags over the loaded config.
    fn apply_overrides(&self, mut config: FundsConfig) -> Result<FundsConfig> {
        if let Some(addr) = self.address.as_deref() {
            config.account_address = Some(addr.parse()?);
        }
        if let Some(balance) = self.balance {
            if !balance.is_finite() || balance < 0.0 {
                bail!("Starting balance must be a non-negative number.");
            }
            config.starting_balance = balance;
        }
        if self.amount.is_some() {
            config.default_add_amount = self.amount;
        }
        if self.escrow.is_some() {
            config.default_add_escrow = self.escrow;
        }
        Ok(config)
    }
}

/// Prints submission progress to stderr so stdout stays clean for output.
struct TerminalProgress;

impl ProgressView for TerminalProgress {
    fn bring_into_view(&mut self) {
        eprintln!("Submitting transaction...");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => FundsConfig::default_path()?,
    };
    let config = cli.apply_overrides(FundsConfig::load(&config_path)?)?;
    if cli.save_config {
        config.save(&config_path)?;
        eprintln!("Settings saved to {}", config_path.display());
    }
    let denomination = config.denomination();

    let address: PotAddress = config.account_address.clone().ok_or_else(|| {
        anyhow!(
            "No pot address configured. Pass --address or set account_address in {}",
            config_path.display()
        )
    })?;

    let mut chain = SimulatedChain::new(address, denomination.to_base_units(config.starting_balance));
    if cli.latency_ms > 0 {
        chain = chain.with_latency(Duration::from_millis(cli.latency_ms));
    }
    let chain = Arc::new(chain);
    chain.update_account().await?;
    chain.update_transactions().await?;
    tracing::debug!(pot = %chain.address(), "account loaded");

    let mut form = FundsFormController::new(chain, denomination)
        .with_progress_view(TerminalProgress)
        .with_defaults(config.default_add_amount, config.default_add_escrow);

    if !cli.command.is_empty() {
        let cmd = Command::parse(&cli.command.join(" "))?;
        let output = cmd.execute(&mut form, cli.json).await?;
        if !output.is_empty() {
            println!("{output}");
        }
        return Ok(());
    }

    run_repl(&mut form, cli.json).await
}

async fn run_repl<A: OrchidApi>(form: &mut FundsFormController<A>, json: bool) -> Result<()> {
    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("oxt".to_string()),
        DefaultPromptSegment::Empty,
    );

    println!("{}", Command::Form.execute(form, json).await?);
    println!("Type 'help' for a list of commands.");

    loop {
        let line = match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => line,
            Ok(_) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Exit) => break,
            Ok(cmd) => match cmd.execute(form, json).await {
                Ok(output) if output.is_empty() => {}
                Ok(output) => println!("{output}"),
                Err(e) => eprintln!("Error: {e}"),
            },
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}
