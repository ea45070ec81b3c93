//! Receipts command - inspect the receipt ledger.

use clap::{Args, Subcommand};
use console::style;

use rcpt_core::{ReceiptLedger, ReceiptRecord};

use super::load_config;

/// Arguments for the receipts command.
#[derive(Args)]
pub struct ReceiptsArgs {
    #[command(subcommand)]
    command: ReceiptsCommand,
}

#[derive(Subcommand)]
enum ReceiptsCommand {
    /// List receipts, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one receipt with its source file
    Show {
        /// Receipt id
        id: u64,
    },
}

pub async fn run(args: ReceiptsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let ledger = ReceiptLedger::open(&config.storage.ledger_file)?;

    match args.command {
        ReceiptsCommand::List { json } => list_receipts(&ledger, json),
        ReceiptsCommand::Show { id } => show_receipt(&ledger, id),
    }
}

fn list_receipts(ledger: &ReceiptLedger, json: bool) -> anyhow::Result<()> {
    let receipts = ledger.receipts();

    if json {
        println!("{}", serde_json::to_string_pretty(&receipts)?);
        return Ok(());
    }

    if receipts.is_empty() {
        println!("{} No receipts recorded yet.", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{:>5}  {:<12}  {:<28}  {:>10}  {}",
        "ID", "DATE", "MERCHANT", "TOTAL", "FILE"
    );
    for receipt in receipts {
        println!("{}", format_row(receipt));
    }

    Ok(())
}

fn format_row(receipt: &ReceiptRecord) -> String {
    format!(
        "{:>5}  {:<12}  {:<28}  {:>10}  {}",
        receipt.id,
        receipt.purchased_at.as_deref().unwrap_or("-"),
        receipt.merchant_name.as_deref().unwrap_or("-"),
        receipt
            .total_amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string()),
        receipt.file_path.display()
    )
}

fn show_receipt(ledger: &ReceiptLedger, id: u64) -> anyhow::Result<()> {
    let receipt = ledger.receipt(id)?;
    let file = ledger.file(receipt.file_id)?;

    let value = serde_json::json!({
        "receipt": receipt,
        "file": file,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}
