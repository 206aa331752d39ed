//! vaultctl - manage the personal vault from a terminal
//!
//! Usage:
//!   vaultctl status                     Check the server and the login
//!   vaultctl keys list                  List stored API keys
//!   vaultctl keys add NAME [--key K]    Store a key (reads stdin when --key is absent)
//!   vaultctl keys rm ID [--yes]         Delete a key
//!   vaultctl hackathons list            List hackathons
//!   vaultctl hackathons add NAME ...    Save a hackathon
//!   vaultctl hackathons edit ID ...     Change fields of a saved hackathon
//!   vaultctl hackathons rm ID [--yes]   Delete a hackathon

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use personal_vault::client::{
    DeleteConfirmation, VaultClient,
    form::HackathonForm,
    view::{self, Feedback},
};
use personal_vault::models::{api_key::CreateApiKeyRequest, hackathon::HackathonFields};

/// vaultctl - manage the personal vault from a terminal
#[derive(Parser)]
#[command(name = "vaultctl")]
#[command(about = "Manage API keys and hackathons stored in a personal vault server")]
#[command(version)]
struct Cli {
    /// Vault server URL
    #[arg(long, env = "VAULT_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Operator email
    #[arg(long, env = "VAULT_EMAIL")]
    email: String,

    /// Operator password
    #[arg(long, env = "VAULT_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is reachable and the login works
    #[command(alias = "st")]
    Status,

    /// Manage stored API keys
    #[command(subcommand, alias = "k")]
    Keys(KeyCommands),

    /// Manage hackathons
    #[command(subcommand, alias = "h")]
    Hackathons(HackathonCommands),
}

#[derive(Subcommand)]
enum KeyCommands {
    /// List stored keys, newest first
    #[command(alias = "ls")]
    List,

    /// Store a new key
    Add {
        /// Display name
        name: String,

        /// Optional description
        #[arg(long, short)]
        description: Option<String>,

        /// The secret; read from stdin when omitted
        #[arg(long)]
        key: Option<String>,
    },

    /// Delete a key
    #[command(alias = "delete")]
    Rm {
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum HackathonCommands {
    /// List hackathons, newest first
    #[command(alias = "ls")]
    List,

    /// Save a new hackathon
    Add {
        /// Hackathon name
        name: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Change fields of a saved hackathon; unspecified fields keep their value
    Edit {
        id: Uuid,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a hackathon
    #[command(alias = "delete")]
    Rm {
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Optional hackathon fields. An empty string clears a field.
#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    organizer: Option<String>,
    #[arg(long)]
    deadline: Option<String>,
    #[arg(long)]
    event_date: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    fee: Option<String>,
    #[arg(long)]
    prize_pool: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    eligibility: Option<String>,
    #[arg(long)]
    team_size: Option<String>,
    #[arg(long)]
    link: Option<String>,
}

impl FieldArgs {
    fn apply(self, fields: &mut HackathonFields) {
        let targets = [
            (self.organizer, &mut fields.organizer),
            (self.deadline, &mut fields.registration_deadline),
            (self.event_date, &mut fields.event_date),
            (self.location, &mut fields.location),
            (self.fee, &mut fields.registration_fee),
            (self.prize_pool, &mut fields.prize_pool),
            (self.description, &mut fields.description),
            (self.eligibility, &mut fields.eligibility),
            (self.team_size, &mut fields.team_size),
            (self.link, &mut fields.link),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(feedback) => {
            if let Some(feedback) = feedback {
                eprintln!("{feedback}");
                if feedback.is_error() {
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", Feedback::Error(format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Option<Feedback>> {
    let client = VaultClient::new(&cli.url)?;
    run_session(&client, cli).await
}

/// Log in, run one command, log out. `Ok(Some(_))` carries the action's feedback line.
///
/// Once logged in, the session is ended whether or not the command succeeds.
async fn run_session(client: &VaultClient, cli: Cli) -> Result<Option<Feedback>> {
    if let Err(e) = client.login(&cli.email, &cli.password).await {
        return Ok(Some(Feedback::failure("Login failed", &e)));
    }

    let outcome = run_command(client, cli.command, &cli.url).await;

    if let Err(e) = client.logout().await {
        tracing::warn!("logout failed: {}", e);
    }

    outcome.map(Some)
}

async fn run_command(client: &VaultClient, command: Commands, url: &str) -> Result<Feedback> {
    match command {
        Commands::Status => {
            if client.auth_status().await? {
                Ok(Feedback::success(format!("Logged in to {url}")))
            } else {
                Ok(Feedback::Error(
                    "Login did not stick; check cookie settings".to_string(),
                ))
            }
        }
        Commands::Keys(command) => run_keys(client, command).await,
        Commands::Hackathons(command) => run_hackathons(client, command).await,
    }
}

async fn run_keys(client: &VaultClient, command: KeyCommands) -> Result<Feedback> {
    let feedback = match command {
        KeyCommands::List => match client.list_keys().await {
            Ok(keys) => {
                println!("{}", view::render_api_keys(&keys));
                Feedback::success(format!("{} key(s)", keys.len()))
            }
            Err(e) => Feedback::failure("Failed to load API keys", &e),
        },
        KeyCommands::Add {
            name,
            description,
            key,
        } => {
            let api_key = match key {
                Some(key) => key,
                None => read_secret()?,
            };
            let request = CreateApiKeyRequest {
                name,
                description,
                api_key,
            };
            match client.add_key(&request).await {
                Ok(_) => Feedback::success("API key added successfully!"),
                Err(e) => Feedback::failure("Failed to add API key", &e),
            }
        }
        KeyCommands::Rm { id, yes } => {
            let Some(confirmed) = confirmation("API key", yes) else {
                return Ok(Feedback::Error("Cancelled".to_string()));
            };
            match client.delete_key(id, confirmed).await {
                Ok(()) => Feedback::success("API key deleted successfully!"),
                Err(e) => Feedback::failure("Failed to delete API key", &e),
            }
        }
    };

    Ok(feedback)
}

async fn run_hackathons(client: &VaultClient, command: HackathonCommands) -> Result<Feedback> {
    let feedback = match command {
        HackathonCommands::List => match client.list_hackathons().await {
            Ok(hackathons) => {
                println!("{}", view::render_hackathons(&hackathons));
                Feedback::success(format!("{} hackathon(s)", hackathons.len()))
            }
            Err(e) => Feedback::failure("Failed to load hackathons", &e),
        },
        HackathonCommands::Add { name, fields } => {
            let mut form = HackathonForm::new();
            form.fields.hackathon_name = name;
            fields.apply(&mut form.fields);
            submit(client, &mut form).await
        }
        HackathonCommands::Edit { id, name, fields } => {
            let hackathons = match client.list_hackathons().await {
                Ok(hackathons) => hackathons,
                Err(e) => return Ok(Feedback::failure("Failed to load hackathons", &e)),
            };
            let Some(record) = hackathons.iter().find(|h| h.id == id) else {
                bail!("no hackathon with id {id}");
            };

            let mut form = HackathonForm::new();
            form.edit(record);
            if let Some(name) = name {
                form.fields.hackathon_name = name;
            }
            fields.apply(&mut form.fields);
            submit(client, &mut form).await
        }
        HackathonCommands::Rm { id, yes } => {
            let Some(confirmed) = confirmation("hackathon", yes) else {
                return Ok(Feedback::Error("Cancelled".to_string()));
            };
            match client.delete_hackathon(id, confirmed).await {
                Ok(()) => Feedback::success("Hackathon deleted successfully!"),
                Err(e) => Feedback::failure("Failed to delete hackathon", &e),
            }
        }
    };

    Ok(feedback)
}

async fn submit(client: &VaultClient, form: &mut HackathonForm) -> Feedback {
    let mode = form.mode();
    match form.submit(client).await {
        Ok(_) => Feedback::success(mode.success_message()),
        Err(e) => Feedback::failure("Failed to save hackathon", &e),
    }
}

fn confirmation(what: &str, yes: bool) -> Option<DeleteConfirmation> {
    if yes {
        return Some(DeleteConfirmation::given());
    }
    DeleteConfirmation::ask(what, |question| {
        eprint!("{question} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).is_ok()
            && matches!(answer.trim(), "y" | "Y" | "yes")
    })
}

fn read_secret() -> Result<String> {
    eprint!("API key: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read API key from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use personal_vault::{
        app::{self, AppState, SessionSettings},
        crypto::KeyCipher,
        services::auth_service::Credentials,
        store::MemoryVaultStore,
    };
    use secrecy::SecretString;
    use tower_sessions::MemoryStore;

    async fn spawn_server() -> String {
        let credentials =
            Credentials::new("me@example.com", SecretString::from("pw".to_string())).unwrap();
        let state = AppState::new(
            Arc::new(MemoryVaultStore::new()),
            KeyCipher::from_config_value("cli test key").unwrap(),
            credentials,
        );
        let router = app::build_router(
            state,
            app::session_layer(MemoryStore::default(), SessionSettings::default()),
            None,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn cli(url: &str, command: &[&str]) -> Cli {
        let args = ["vaultctl", "--url", url, "--email", "me@example.com", "--password", "pw"];
        Cli::try_parse_from(args.iter().chain(command)).unwrap()
    }

    #[tokio::test]
    async fn test_failed_command_still_logs_out() {
        let url = spawn_server().await;
        let client = VaultClient::new(&url).unwrap();
        let missing = Uuid::new_v4().to_string();

        let result = run_session(&client, cli(&url, &["hackathons", "edit", &missing])).await;

        assert!(result.is_err());
        assert!(!client.auth_status().await.unwrap());
    }

    #[tokio::test]
    async fn test_status_logs_out_after_success() {
        let url = spawn_server().await;
        let client = VaultClient::new(&url).unwrap();

        let feedback = run_session(&client, cli(&url, &["status"])).await.unwrap();

        assert!(matches!(feedback, Some(Feedback::Success(_))));
        assert!(!client.auth_status().await.unwrap());
    }
}
