//! Merchants command - list the active known-merchant table.

use clap::Args;

use super::load_config;

/// Arguments for the merchants command.
#[derive(Args)]
pub struct MerchantsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn run(args: MerchantsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let table = config.merchant_table()?;

    if args.json {
        let merchants: Vec<_> = table.iter().collect();
        println!("{}", serde_json::to_string_pretty(&merchants)?);
        return Ok(());
    }

    println!("{:>3}  {:<20}  {:<24}  {}", "#", "PATTERN", "NAME", "CATEGORY");
    for (i, merchant) in table.iter().enumerate() {
        println!(
            "{:>3}  {:<20}  {:<24}  {}",
            i + 1,
            merchant.search_pattern,
            merchant.display_name,
            merchant.category.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
