use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use solana_sdk::signature::read_keypair_file;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod config;
mod error;

use client::HookClient;
use commands::handlers;
use config::{expand_home, load_config, DEFAULT_CONFIG_PATH};
use error::parse_pubkey;

#[derive(Parser, Debug)]
#[command(name = "whitelist-hook-cli")]
#[command(about = "Admin CLI for the whitelist transfer hook")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "WHITELIST_HOOK_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Solana RPC URL (overrides the configuration file)
    #[arg(long)]
    url: Option<String>,

    /// Path to the keypair that pays for and signs transactions
    #[arg(long)]
    keypair: Option<String>,

    /// Deployed hook program id
    #[arg(long)]
    program_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the derived white list and extra account meta list addresses
    Addresses {
        /// Mint whose extra account meta list address should be derived
        #[arg(long)]
        mint: Option<String>,
    },
    /// Create the white list account
    InitWhiteList {
        /// Maximum number of entries (defaults to the configured capacity)
        #[arg(long)]
        capacity: Option<u16>,
        /// Admin of the white list (defaults to the payer)
        #[arg(long)]
        admin: Option<String>,
    },
    /// Record the extra accounts Token-2022 must pass to the hook for a mint
    InitRegistry {
        /// The Token-2022 mint using this hook
        #[arg(long)]
        mint: String,
        /// Number of account descriptors to reserve space for
        #[arg(long)]
        extra_account_count: Option<u8>,
    },
    /// Add an account to the white list
    Add {
        /// Source token account allowed to send
        identity: String,
    },
    /// Remove an account from the white list
    Remove {
        /// Source token account to remove
        identity: String,
    },
    /// Hand white list administration to another account
    SetAdmin {
        /// The new admin
        new_admin: String,
    },
    /// Switch white list enforcement on or off
    Enforcement {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Display the white list
    Status {
        /// Optional file path to export the white list as JSON
        #[arg(long)]
        export: Option<String>,
    },
    /// Evaluate the transfer policy locally for a source token account
    CheckTransfer {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        source: String,
    },
    /// Check that a mint's transfer hook extension points at this program
    VerifyMint {
        #[arg(long)]
        mint: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whitelist_hook_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let program_id = parse_pubkey(cli.program_id.as_deref().unwrap_or(&config.program_id))?;

    let keypair_path = expand_home(cli.keypair.as_deref().unwrap_or(&config.keypair_path));
    let rpc_url = cli.url.clone().unwrap_or_else(|| config.rpc_url.clone());
    let connect = || -> anyhow::Result<HookClient> {
        let keypair = read_keypair_file(&keypair_path).map_err(|e| {
            error::CliError::KeypairError(format!("{}: {}", keypair_path.display(), e))
        })?;
        HookClient::connect(&rpc_url, keypair, program_id)
            .context("failed to create program client")
    };

    match cli.command {
        Commands::Addresses { mint } => {
            let mint = mint.as_deref().map(parse_pubkey).transpose()?;
            handlers::handle_addresses(&program_id, mint);
        }
        Commands::InitWhiteList { capacity, admin } => {
            let admin = admin.as_deref().map(parse_pubkey).transpose()?;
            handlers::handle_init_white_list(
                &connect()?,
                capacity.unwrap_or(config.default_capacity),
                admin,
            )?
        }
        Commands::InitRegistry {
            mint,
            extra_account_count,
        } => handlers::handle_init_registry(
            &connect()?,
            parse_pubkey(&mint)?,
            extra_account_count.unwrap_or(config.extra_account_count),
        )?,
        Commands::Add { identity } => handlers::handle_add(&connect()?, parse_pubkey(&identity)?)?,
        Commands::Remove { identity } => {
            handlers::handle_remove(&connect()?, parse_pubkey(&identity)?)?
        }
        Commands::SetAdmin { new_admin } => {
            handlers::handle_set_admin(&connect()?, parse_pubkey(&new_admin)?)?
        }
        Commands::Enforcement { state } => {
            handlers::handle_enforcement(&connect()?, state == Switch::On)?
        }
        Commands::Status { export } => handlers::handle_status(&connect()?, export)?,
        Commands::CheckTransfer { mint, source } => handlers::handle_check_transfer(
            &connect()?,
            &program_id,
            parse_pubkey(&mint)?,
            parse_pubkey(&source)?,
        )?,
        Commands::VerifyMint { mint } => {
            handlers::handle_verify_mint(&connect()?, &program_id, parse_pubkey(&mint)?)?
        }
    }

    Ok(())
}
