//! Moove DAO command-line entry point.

use anyhow::Context;
use clap::Parser;
use moove_governance::{DaoConfig, GovernanceDao};
use moove_types::{SystemClock, SECONDS_PER_DAY};
use moove_utils::{format_duration, init_logging, LogFormat};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moove", about = "Moove DAO governance tooling")]
struct Cli {
    /// Path to a TOML deployment config. Defaults are used when omitted;
    /// CLI flags and env vars override file values.
    #[arg(long, env = "MOOVE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter: "trace", "debug", "info", "warn", "error" or a full directive.
    #[arg(long, env = "MOOVE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format: "human" or "json".
    #[arg(long, env = "MOOVE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy the DAO in memory and print the resulting state.
    Deploy {
        /// Open token trading right after deployment.
        #[arg(long)]
        enable_trading: bool,
    },
    /// Print the effective configuration as TOML.
    PrintConfig,
}

fn load_config(cli: &Cli) -> anyhow::Result<DaoConfig> {
    let mut config = match &cli.config {
        Some(path) => DaoConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DaoConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn deploy(config: DaoConfig, enable_trading: bool) -> anyhow::Result<()> {
    let mut dao = GovernanceDao::deploy_with_vault(
        config.params.clone(),
        config.addresses(),
        Arc::new(SystemClock),
    )
    .context("DAO deployment rejected")?;
    if enable_trading {
        dao.change_trading_status(&config.owner)?;
    }

    let token = dao.token();
    let addresses = dao.addresses();
    let now = dao.now();
    let vesting_left = token.vesting_ends_at().remaining_from(now);

    println!("{} ({})", token.name(), token.symbol());
    println!("  dao:                 {}", addresses.dao);
    println!("  owner:               {}", addresses.owner);
    println!("  token ledger:        {}", addresses.token);
    println!("  staking ledger:      {}", addresses.staking);
    println!("  treasury:            {}", addresses.treasury);
    println!("  cap:                 {}", token.get_cap());
    println!("  total supply:        {}", token.total_supply());
    println!("  team balance:        {}", token.balance_of(&addresses.owner));
    println!("  dao balance:         {}", token.balance_of(&addresses.dao));
    println!("  early-adopter pool:  {}", token.balance_of(&addresses.token));
    println!("  circulating supply:  {}", dao.circulating_supply());
    println!("  token price:         {}", dao.params().token_price);
    println!(
        "  voting period:       {}",
        format_duration(dao.params().voting_period_in_days * SECONDS_PER_DAY)
    );
    println!("  vesting ends in:     {}", format_duration(vesting_left));
    println!("  trading allowed:     {}", dao.is_trading_allowed());
    println!("  treasury balance:    {}", dao.treasury_balance());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;

    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Deploy { enable_trading } => deploy(config, enable_trading),
        Command::PrintConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
