//! `phonebook` command-line client.
//!
//! # Responsibility
//! - Parse flags/env into client and logging configuration.
//! - Run one-shot contact commands or the interactive shell.
//!
//! # Invariants
//! - Every command starts from a fresh `load_all`, like the page does on open.
//! - Errors are printed once to stderr and map to exit code 1.

mod shell;

use clap::{Args, Parser, Subcommand};
use log::info;
use phonebook_core::config::{DEFAULT_BASE_URL, DEFAULT_COLLECTION};
use phonebook_core::{
    core_version, default_log_level, init_logging, ClientConfig, Contact, ContactDirectory,
    ContactDraft, ContactId, HttpContactDirectory, InMemoryDirectory, LogTarget, PhonebookApp,
};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "phonebook", version, about = "Address-book client for a JSON contacts API")]
struct Cli {
    /// Base URL of the directory service.
    #[arg(long, env = "PHONEBOOK_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Collection path segment under the base URL.
    #[arg(long, env = "PHONEBOOK_COLLECTION", default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Request timeout in seconds. Unbounded when omitted.
    #[arg(long, env = "PHONEBOOK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Use a seeded in-memory directory instead of the network.
    #[arg(long)]
    demo: bool,

    /// trace|debug|info|warn|error
    #[arg(long, env = "PHONEBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr otherwise.
    #[arg(long, env = "PHONEBOOK_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every contact.
    List,
    /// Print contacts whose name or phone contains QUERY.
    Search { query: String },
    /// Create a contact.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
    },
    /// Replace a contact; omitted fields keep their current value.
    Update {
        id: String,
        #[command(flatten)]
        fields: FieldOverrides,
    },
    /// Delete a contact by id.
    Delete { id: String },
    /// Interactive session.
    Shell,
}

#[derive(Debug, Args)]
struct FieldOverrides {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let target = match cli.log_dir.as_deref() {
        Some(dir) => match LogTarget::directory(dir) {
            Ok(target) => target,
            Err(err) => return fail(&err),
        },
        None => LogTarget::Stderr,
    };
    if let Err(err) = init_logging(&level, target) {
        return fail(&err);
    }

    let directory = match open_directory(&cli) {
        Ok(directory) => directory,
        Err(err) => return fail(&err),
    };
    let mut app = PhonebookApp::new(directory);

    match run(&mut app, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => fail(&message),
    }
}

fn open_directory(cli: &Cli) -> Result<Box<dyn ContactDirectory>, String> {
    if cli.demo {
        info!(
            "event=cli_start module=cli status=ok mode=demo core_version={}",
            core_version()
        );
        return Ok(Box::new(demo_directory()));
    }

    let config = ClientConfig::new(&cli.api_url)
        .and_then(|config| config.with_collection(&cli.collection))
        .map_err(|err| err.to_string())?
        .with_timeout(cli.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs));
    info!(
        "event=cli_start module=cli status=ok mode=http core_version={} endpoint={}",
        core_version(),
        config.collection_url()
    );
    let directory = HttpContactDirectory::new(config).map_err(|err| err.to_string())?;
    Ok(Box::new(directory))
}

fn run<D: ContactDirectory>(app: &mut PhonebookApp<D>, command: Command) -> Result<(), String> {
    if let Command::Shell = command {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return shell::run_shell(app, stdin.lock(), stdout.lock()).map_err(|err| err.to_string());
    }

    app.init().map_err(|err| err.to_string())?;
    let mut out = io::stdout().lock();

    match command {
        Command::List => print_view(&mut out, app.visible().render_text()),
        Command::Search { query } => print_view(&mut out, app.search(&query).render_text()),
        Command::Add { name, phone, email } => {
            let saved = app
                .submit_draft(ContactDraft::new(name, phone, email))
                .map_err(|err| err.to_string())?;
            print_saved(&mut out, "Added", &saved)
        }
        Command::Update { id, fields } => {
            let id = id.parse::<ContactId>().map_err(|err| err.to_string())?;
            if !app.edit(&id) {
                return Err(format!("No contact with id {id}."));
            }
            let form = &mut app.session_mut().form;
            if let Some(name) = fields.name {
                form.name = name;
            }
            if let Some(phone) = fields.phone {
                form.phone = phone;
            }
            if let Some(email) = fields.email {
                form.email = email;
            }
            let saved = app.submit().map_err(|err| err.to_string())?;
            print_saved(&mut out, "Updated", &saved)
        }
        Command::Delete { id } => {
            let id = id.parse::<ContactId>().map_err(|err| err.to_string())?;
            app.delete(&id).map_err(|err| err.to_string())?;
            writeln!(out, "Deleted {id}.").map_err(|err| err.to_string())
        }
        Command::Shell => Ok(()),
    }
}

fn print_view(out: &mut impl Write, text: String) -> Result<(), String> {
    out.write_all(text.as_bytes()).map_err(|err| err.to_string())
}

fn print_saved(out: &mut impl Write, verb: &str, contact: &Contact) -> Result<(), String> {
    writeln!(
        out,
        "{verb} {}: {} / {} / {}",
        contact.id, contact.name, contact.phone, contact.email
    )
    .map_err(|err| err.to_string())
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{message}");
    ExitCode::FAILURE
}

fn demo_directory() -> InMemoryDirectory {
    InMemoryDirectory::with_contacts(vec![
        Contact::new(1_u64, "Ada Lovelace", "2025550101", "ada@example.com"),
        Contact::new(2_u64, "Grace Hopper", "2025550102", "grace@example.com"),
        Contact::new(3_u64, "Alan Turing", "2025550103", "alan@example.com"),
    ])
}
