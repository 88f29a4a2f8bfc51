//! GeoAddress CLI - generate, save and share address codes.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (signs in as well)
//! geoaddress signup -e ada@example.com -n "Ada" -p secret
//!
//! # Get a code for the current location and save it
//! geoaddress generate --save Home --note "Blue gate"
//!
//! # Get a code and print its share text and directions link
//! geoaddress generate --share --navigate
//!
//! # Find a saved address from part of its code
//! geoaddress decipher f8g
//!
//! # Bulk add addresses from a YAML file
//! geoaddress import addresses.yaml
//! ```
//!
//! # Commands
//!
//! - `signup`, `login`, `logout`, `whoami` - Session management
//! - `generate` - Mock location fix, optionally saved, shared or linked
//! - `add`, `list`, `edit`, `delete` - Saved addresses
//! - `decipher` - Search saved codes
//! - `share`, `navigate`, `qr` - Hand-off text for a saved address
//! - `import` - Bulk add from YAML
//!
//! All state lives in the data directory (`GEOADDRESS_DATA_DIR`, or
//! `--data-dir`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "geoaddress")]
#[command(author, version, about = "GeoAddress NG command-line client")]
struct Cli {
    /// Directory holding the local store (overrides `GEOADDRESS_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign in to an existing account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Get a GeoAddress code for the current location
    Generate {
        /// Save the fix under this label
        #[arg(long, value_name = "LABEL")]
        save: Option<String>,

        /// Note stored with `--save`
        #[arg(long, requires = "save", default_value = "")]
        note: String,

        /// Print share text for the fix
        #[arg(long)]
        share: bool,

        /// Print a maps directions link to the fix
        #[arg(long)]
        navigate: bool,

        /// Print the QR payload for the fix
        #[arg(long)]
        qr: bool,
    },
    /// Add an address by hand
    Add {
        label: String,

        #[arg(long, default_value = "")]
        note: String,

        /// Code to store; generated when omitted
        #[arg(long)]
        code: Option<String>,
    },
    /// List saved addresses
    List,
    /// Change the label, note or code of a saved address
    Edit {
        id: String,

        #[arg(long)]
        label: Option<String>,

        /// New note; an empty string removes the note
        #[arg(long)]
        note: Option<String>,

        #[arg(long)]
        code: Option<String>,
    },
    /// Delete a saved address
    Delete { id: String },
    /// Find a saved address by part of its code
    Decipher { query: String },
    /// Print share text for a saved address
    Share { id: String },
    /// Print a maps directions link for a saved address
    Navigate { id: String },
    /// Print the QR payload for a saved address
    Qr { id: String },
    /// Add addresses from a YAML file
    Import {
        /// YAML list of `{label, note?, code?}` entries
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoaddress=info,geoaddress_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let state = commands::open_state(cli.data_dir)?;

    match cli.command {
        Commands::Signup {
            email,
            name,
            password,
        } => commands::auth::signup(&state, &email, &password, &name).await?,
        Commands::Login { email, password } => {
            commands::auth::login(&state, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&state)?,
        Commands::Whoami => commands::auth::whoami(&state)?,
        Commands::Generate {
            save,
            note,
            share,
            navigate,
            qr,
        } => {
            let handoff = commands::addresses::Handoff {
                share,
                navigate,
                qr,
            };
            commands::addresses::generate(&state, save.as_deref(), &note, handoff).await?;
        }
        Commands::Add { label, note, code } => {
            commands::addresses::add(&state, &label, &note, code.as_deref())?;
        }
        Commands::List => commands::addresses::list(&state)?,
        Commands::Edit {
            id,
            label,
            note,
            code,
        } => commands::addresses::edit(&state, &id, label, note, code)?,
        Commands::Delete { id } => commands::addresses::delete(&state, &id)?,
        Commands::Decipher { query } => commands::addresses::decipher(&state, &query)?,
        Commands::Share { id } => commands::addresses::share(&state, &id)?,
        Commands::Navigate { id } => commands::addresses::navigate(&state, &id)?,
        Commands::Qr { id } => commands::addresses::qr(&state, &id)?,
        Commands::Import { file } => commands::import::addresses(&state, &file).await?,
    }
    Ok(())
}
