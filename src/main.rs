//! consolescreen demo
//!
//! A small records desk built from validated full-screen forms.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use consolescreen::art;
use consolescreen::config::{default_config_path, load_config, save_config};
use consolescreen::error::{ScreenError, ScreenResult};
use consolescreen::tui::dialog::{self, Confirmation};
use consolescreen::tui::surface::{install_panic_hook, restore_terminal, setup_terminal};
use consolescreen::tui::{Response, Screen, Surface, theme};
use consolescreen::types::{Color, EngineConfig, Money, Outcome, Renderable};
use consolescreen::validate;

const TITLE: &str = "Records Desk";

#[derive(Parser)]
#[command(name = "consolescreen")]
#[command(about = "Full-screen text forms with validated fields")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/consolescreen/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the screens)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose between the other forms until Exit (default)
    Menu,

    /// Log in with a name and password
    Login,

    /// Register a new record
    Register,

    /// Find a record by ID
    Find,

    /// Deposit money into a record
    Deposit,

    /// Print the effective config as JSON
    Config {
        /// Store the defaults at the config path instead
        #[arg(long)]
        write: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path, cli.verbose) {
            eprintln!("Error: cannot open log file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let command = cli.command.unwrap_or(Commands::Menu);

    let result = match command {
        Commands::Config { write } => cmd_config(&config_path, write),
        form => load_config(&config_path).and_then(|config| run_forms(form, config)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ScreenError::Interrupted) => ExitCode::from(130),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

fn init_logging(path: &Path, verbose: bool) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let default_filter = if verbose {
        "consolescreen=debug"
    } else {
        "consolescreen=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run one form command on the real terminal, restoring it however the
/// command ends.
fn run_forms(command: Commands, config: EngineConfig) -> ScreenResult<()> {
    install_panic_hook();
    let mut surface = setup_terminal()?;
    let desk = Desk::new(config);

    let result = match command {
        Commands::Menu => cmd_menu(&mut surface, &desk),
        Commands::Login => cmd_login(&mut surface, &desk),
        Commands::Register => cmd_register(&mut surface, &desk),
        Commands::Find => cmd_find(&mut surface, &desk),
        Commands::Deposit => cmd_deposit(&mut surface, &desk),
        Commands::Config { .. } => Ok(()),
    };

    restore_terminal()?;
    result
}

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    balance: Money,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Record ID: {}", self.id)?;
        writeln!(f, "Name: {} {}", self.first_name, self.last_name)?;
        writeln!(f, "Email: {}", self.email)?;
        write!(f, "Balance: ${}", self.balance)
    }
}

/// In-memory records and logins; nothing outlives the process.
#[derive(Debug)]
struct Directory {
    records: BTreeMap<i64, Record>,
    logins: Vec<(String, String)>,
    next_id: i64,
}

impl Directory {
    fn seeded() -> Self {
        let mut directory = Self {
            records: BTreeMap::new(),
            logins: vec![("demo".to_string(), "demo".to_string())],
            next_id: 100_001,
        };
        directory.register("Ada", "Lovelace", "ada@outlook.com", "engine");
        directory
    }

    fn register(&mut self, first_name: &str, last_name: &str, email: &str, password: &str) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(
            id,
            Record {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                balance: Money::ZERO,
            },
        );
        self.logins.push((first_name.to_string(), password.to_string()));
        id
    }

    fn find(&self, id: i64) -> Option<Record> {
        self.records.get(&id).cloned()
    }

    fn can_log_in(&self, name: &str, password: &str) -> bool {
        self.logins.iter().any(|(n, p)| n == name && p == password)
    }

    /// Add `amount` to a record, returning the updated record; `None` when
    /// the record is gone or the balance would overflow.
    fn deposit(&mut self, id: i64, amount: Money) -> Option<Record> {
        let record = self.records.get_mut(&id)?;
        record.balance = record.balance.checked_add(amount)?;
        Some(record.clone())
    }
}

/// Config plus the shared directory handed to every form.
struct Desk {
    config: EngineConfig,
    directory: Rc<RefCell<Directory>>,
}

impl Desk {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            directory: Rc::new(RefCell::new(Directory::seeded())),
        }
    }

    fn screen(&self, title: &str, decoration: &[Renderable]) -> Screen {
        Screen::with_style(self.config.style.clone()).header(art::as_header(title, decoration))
    }

    /// Free text up to the configured length.
    fn free_text(&self) -> validate::Validator<String> {
        validate::text_length(0, self.config.validation.max_text_length)
    }

    fn message(&self, surface: &mut dyn Surface, header: &str, message: &str) -> ScreenResult<()> {
        let style = &self.config.style;
        dialog::show_framed_message(surface, &style.border, header, message, style.colors)
    }

    fn error(&self, surface: &mut dyn Surface, header: &str, message: &str) -> ScreenResult<()> {
        let border = &self.config.style.border;
        dialog::show_framed_message(surface, border, header, message, theme::ERROR)
    }

    fn confirmation(&self, header: &str, message: &str) -> Confirmation {
        Confirmation::new(header, message).border(self.config.style.border.clone())
    }

    fn record_lookup(&self) -> validate::Validator<Record> {
        let directory = Rc::clone(&self.directory);
        validate::lookup("record", move |id| directory.borrow().find(id))
    }
}

// ============================================================================
// ART
// ============================================================================

fn coin() -> Vec<Renderable> {
    vec![
        Renderable::text("  .---.  \n / $$$ \\ \n \\ $$$ / \n  '---'  \n ")
            .centered()
            .with_foreground(Color::Yellow),
    ]
}

fn wave() -> Vec<Renderable> {
    vec![Renderable::text(" \\o/ \n  |  \n / \\ ").centered()]
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_config(path: &Path, write: bool) -> ScreenResult<()> {
    if write {
        save_config(&EngineConfig::default(), path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load_config(path)?;
    let json = serde_json::to_string_pretty(&config).map_err(|source| ScreenError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    println!("{}", json);
    Ok(())
}

fn cmd_menu(surface: &mut dyn Surface, desk: &Desk) -> ScreenResult<()> {
    loop {
        let mut screen = desk.screen(TITLE, &coin());
        screen.add_text("1. Log in\n2. Register\n3. Find a record\n4. Deposit\n5. Settings\n6. Exit");
        screen.add_blank_lines(1);
        let choice = screen.add_input("Enter your choice (1-6): ", validate::number_between(1, 6));

        if screen.run(surface)? == Outcome::Cancelled {
            return Ok(());
        }

        match screen.response(choice).copied() {
            Some(1) => cmd_login(surface, desk)?,
            Some(2) => cmd_register(surface, desk)?,
            Some(3) => cmd_find(surface, desk)?,
            Some(4) => cmd_deposit(surface, desk)?,
            Some(5) => show_settings(surface, desk)?,
            _ => return Ok(()),
        }
    }
}

fn cmd_login(surface: &mut dyn Surface, desk: &Desk) -> ScreenResult<()> {
    loop {
        let mut screen = desk.screen(TITLE, &coin());
        screen.add_text("Log in to start");
        screen.add_blank_lines(1);
        let name = screen.add_input("User name: ", desk.free_text());
        let password = screen.add_password_checked("Password: ", desk.free_text());

        if screen.run(surface)?.is_completed() {
            let name = screen.response(name).map(String::as_str).unwrap_or_default();
            let password = screen.response(password).map(String::as_str).unwrap_or_default();
            if desk.directory.borrow().can_log_in(name, password) {
                info!(name, "logged in");
                let message = format!("Logged in as {}.", name);
                return desk.message(surface, "Welcome", &message);
            }
        }

        info!("login rejected");
        desk.error(
            surface,
            "Login Error",
            "User name and password combination was not valid.",
        )?;
    }
}

fn cmd_register(surface: &mut dyn Surface, desk: &Desk) -> ScreenResult<()> {
    let validation = &desk.config.validation;
    let mut screen = desk.screen("Register", &wave());
    let first_name = screen.add_input("First Name: ", validate::name());
    let last_name = screen.add_input("Last Name: ", validate::name());
    let email = screen.add_input(
        "Email: ",
        validate::email_with_domains(validation.recognised_domains.clone()),
    );
    screen.add_separator(" \n-\n ");
    let password = screen.add_password_checked("Password: ", desk.free_text());

    if screen.run(surface)? == Outcome::Cancelled {
        return Ok(());
    }

    let confirmed = desk
        .confirmation(
            "Confirm registration",
            "Are you sure you would like to create this record?",
        )
        .ask(surface)?;
    if !confirmed {
        return Ok(());
    }

    let answer = |response: Response<String>| screen.response(response).cloned().unwrap_or_default();
    let id = desk.directory.borrow_mut().register(
        &answer(first_name),
        &answer(last_name),
        &answer(email),
        &answer(password),
    );
    info!(id, "record registered");
    desk.message(
        surface,
        "Record Created",
        &format!("Created new record with ID {}.", id),
    )
}

fn cmd_find(surface: &mut dyn Surface, desk: &Desk) -> ScreenResult<()> {
    let mut screen = desk.screen("Find a record", &[]);
    screen.add_piece(Renderable::text("Enter the record details").centered());
    let record = screen.add_input("Record ID: ", desk.record_lookup());

    if screen.run(surface)?.is_completed() {
        if let Some(record) = screen.response(record) {
            return show_record(surface, desk, record);
        }
    }
    Ok(())
}

fn cmd_deposit(surface: &mut dyn Surface, desk: &Desk) -> ScreenResult<()> {
    let mut screen = desk.screen("Deposit", &coin());
    screen.add_piece(Renderable::text("Enter the details").centered());
    let record = screen.add_input("Record ID: ", desk.record_lookup());
    let amount = screen.add_input(
        "Amount: $",
        validate::money_up_to(desk.config.validation.max_amount),
    );

    if screen.run(surface)? == Outcome::Cancelled {
        return Ok(());
    }

    let (Some(record), Some(amount)) = (screen.response(record), screen.response(amount)) else {
        return Ok(());
    };

    let updated = desk.directory.borrow_mut().deposit(record.id, *amount);
    match updated {
        Some(updated) => {
            info!(id = updated.id, amount = %amount, "deposit made");
            show_record(surface, desk, &updated)
        }
        None => desk.error(
            surface,
            "Deposit Error",
            "That deposit would take the balance past what can be recorded.",
        ),
    }
}

fn show_record(surface: &mut dyn Surface, desk: &Desk, record: &Record) -> ScreenResult<()> {
    desk.message(surface, "Success", &record.to_string())
}

fn show_settings(surface: &mut dyn Surface, desk: &Desk) -> ScreenResult<()> {
    let validation = &desk.config.validation;
    let message = format!(
        "Largest amount: ${}\nLongest text: {} characters\nRecognised domains: {}",
        validation.max_amount,
        validation.max_text_length,
        validation.recognised_domains.join(", "),
    );
    desk.message(surface, "Settings", &message)
}
