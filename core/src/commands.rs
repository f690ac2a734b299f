//! Command definitions and parsing for the add-funds REPL and one-shot mode.

use anyhow::{bail, Result};

use crate::api::OrchidApi;
use crate::controller::FundsFormController;
use crate::display;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Edit the "Add to Balance" field: amount <oxt>
    Amount { raw: String },
    /// Edit the "Add to Deposit" field: escrow <oxt>
    Escrow { raw: String },
    /// Show the form: fields, errors, total
    Form,
    /// Submit the add-funds transaction
    Submit,
    /// Show the last transaction status
    Status,
    /// Show available wallet balance
    Balance,
    /// Show funding history
    History,
    /// Print help
    Help { command: Option<String> },
    /// Exit
    Exit,
}

impl Command {
    /// Parse a command from a raw input string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("No command entered. Type 'help' for a list of commands.");
        }

        let mut parts = input.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

        match cmd.as_str() {
            // The raw text goes to the form unparsed; invalid input is shown
            // as a field error rather than rejected here.
            "amount" | "add" => Ok(Command::Amount {
                raw: arg.unwrap_or_default().to_string(),
            }),

            "escrow" | "deposit" => Ok(Command::Escrow {
                raw: arg.unwrap_or_default().to_string(),
            }),

            "form" | "show" => Ok(Command::Form),

            "submit" => Ok(Command::Submit),

            "status" => Ok(Command::Status),

            "balance" | "bal" => Ok(Command::Balance),

            "history" | "txs" => Ok(Command::History),

            "help" | "?" => Ok(Command::Help {
                command: arg.map(|s| s.to_string()),
            }),

            "exit" | "quit" | "q" => Ok(Command::Exit),

            other => bail!("Unknown command: '{other}'. Type 'help' for a list of commands."),
        }
    }

    /// Execute a command against the form and return the output string.
    pub async fn execute<A: OrchidApi>(
        &self,
        form: &mut FundsFormController<A>,
        json_output: bool,
    ) -> Result<String> {
        match self {
            Command::Amount { raw } => {
                form.amount_changed(raw);
                render_form(form, json_output)
            }

            Command::Escrow { raw } => {
                form.escrow_changed(raw);
                render_form(form, json_output)
            }

            Command::Form => render_form(form, json_output),

            Command::Submit => {
                if !form.can_submit() {
                    bail!("{}", blocked_reason(form));
                }
                form.submit().await;
                render_status(form, json_output)
            }

            Command::Status => render_status(form, json_output),

            Command::Balance => {
                let balance = form.wallet_balance();
                let denomination = form.denomination();
                if json_output {
                    Ok(serde_json::json!({
                        "balance_wei": balance.map(|b| b.to_string()),
                        "balance_oxt": balance.map(|b| denomination.format(b, display::DISPLAY_PRECISION)),
                    })
                    .to_string())
                } else {
                    Ok(format!(
                        "Available: {}",
                        display::format_available(balance, denomination)
                    ))
                }
            }

            Command::History => {
                let txs = form.api().transactions().await?;
                if json_output {
                    Ok(serde_json::to_string_pretty(&txs)?)
                } else {
                    Ok(display::format_transactions(&txs, form.denomination()))
                }
            }

            Command::Help { command } => Ok(help_text(command.as_deref())),

            Command::Exit => Ok(String::new()),
        }
    }
}

fn render_form<A: OrchidApi>(form: &FundsFormController<A>, json_output: bool) -> Result<String> {
    let snap = form.snapshot();
    if json_output {
        return Ok(serde_json::to_string(&snap)?);
    }

    let field = |value: Option<f64>, error: bool| {
        let shown = value.map_or_else(|| display::AMOUNT_PLACEHOLDER.to_string(), |v| v.to_string());
        if error {
            format!("{shown} *")
        } else {
            shown
        }
    };
    Ok(format!(
        "From Available:  {}\n\
         Add to Balance:  {}\n\
         Add to Deposit:  {}\n\
         Total:           {} OXT\n\
         Submit:          {}",
        snap.available,
        field(snap.fields.amount, snap.fields.amount_error),
        field(snap.fields.escrow, snap.fields.escrow_error),
        snap.total,
        if snap.can_submit { "ready" } else { "disabled" },
    ))
}

fn render_status<A: OrchidApi>(form: &FundsFormController<A>, json_output: bool) -> Result<String> {
    let status = form.status();
    if json_output {
        Ok(serde_json::to_string(&status)?)
    } else {
        Ok(display::format_status(&status))
    }
}

fn blocked_reason<A: OrchidApi>(form: &FundsFormController<A>) -> &'static str {
    let fields = form.fields();
    if form.account().is_none() {
        "Cannot submit: no account loaded."
    } else if form.status().is_running() {
        "Cannot submit: a transaction is already running."
    } else if fields.amount_error {
        "Cannot submit: amount is missing or exceeds the available balance."
    } else if fields.escrow_error {
        "Cannot submit: deposit is not a valid number."
    } else {
        "Cannot submit."
    }
}

#[must_use]
pub fn help_text(command: Option<&str>) -> String {
    match command {
        Some("amount") | Some("add") => {
            "amount <oxt>\n  Set the amount to add to the pot balance.\n  Must not exceed the available wallet balance.\n  Alias: add".to_string()
        }
        Some("escrow") | Some("deposit") => {
            "escrow <oxt>\n  Set the amount to add to the pot deposit.\n  Your deposit secures access to the Orchid network and\n  demonstrates authenticity to bandwidth sellers.\n  Alias: deposit".to_string()
        }
        Some("form") | Some("show") => {
            "form\n  Show the current form: available balance, fields, total.\n  Fields marked '*' are invalid.\n  Alias: show".to_string()
        }
        Some("submit") => {
            "submit\n  Add the balance and deposit to the pot.\n  Only available when the form is valid.".to_string()
        }
        Some("status") => "status\n  Show the progress of the last submission.".to_string(),
        Some("balance") | Some("bal") => {
            "balance\n  Show the available OXT wallet balance.\n  Alias: bal".to_string()
        }
        Some("history") | Some("txs") => {
            "history\n  Show funding transactions.\n  Alias: txs".to_string()
        }
        Some("exit") | Some("quit") | Some("q") => {
            "exit\n  Exit.\n  Aliases: quit, q".to_string()
        }
        Some(other) => format!("Unknown command: '{other}'. Type 'help' for a list."),
        None => {
            "Available commands:\n\
             \n\
             \x20 amount <oxt>     Set amount to add to balance\n\
             \x20 escrow <oxt>     Set amount to add to deposit\n\
             \x20 form             Show the form\n\
             \x20 submit           Submit the transaction\n\
             \x20 status           Show transaction status\n\
             \x20 balance          Show wallet balance\n\
             \x20 history          Show funding history\n\
             \x20 help [cmd]       Show help for a command\n\
             \x20 exit             Exit\n\
             \n\
             Type 'help <command>' for detailed help on a specific command."
                .to_string()
        }
    }
}
