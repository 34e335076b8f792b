use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::StdRng;
use secret_santa::utils::storage::{load_exchange, load_snapshot, save_exchange, save_snapshot};
use secret_santa::{Exchange, SantaConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Secret Santa organizer", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", default_value = secret_santa::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Exchange state file (overrides the configured one)
    #[arg(short, long, value_name = "FILE")]
    state: Option<PathBuf>,
    /// Seed for reproducible drawings
    #[arg(long)]
    seed: Option<u64>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the people taking part
    Participants {
        #[command(subcommand)]
        action: ParticipantAction,
    },
    /// Manage the pool of gift ideas
    Gifts {
        #[command(subcommand)]
        action: GiftAction,
    },
    /// Draw a new set of assignments, replacing the current one
    Generate,
    /// Print the current assignments
    Show,
    /// Remove all participants and assignments and restore the default gifts
    Clear,
    /// Write a binary snapshot of the exchange
    Export {
        #[arg(value_name = "FILE")]
        output: PathBuf,
    },
    /// Replace the exchange with a previously exported snapshot
    Import {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Subcommand)]
enum ParticipantAction {
    Add { name: String },
    Rename { id: String, name: String },
    Remove { id: String },
    List,
}

#[derive(Subcommand)]
enum GiftAction {
    Add { description: String },
    Edit { id: String, description: String },
    Remove { id: String },
    List,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = SantaConfig::load(&cli.config)?;
    if let Some(state) = cli.state {
        config.state_path = state;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut exchange = load_exchange(&config.state_path)?;
    let mut rng = config.rng();
    info!(state = %config.state_path.display(), "loaded exchange");

    let changed = match cli.command {
        Commands::Participants { action } => run_participants(&mut exchange, action, &mut rng)?,
        Commands::Gifts { action } => run_gifts(&mut exchange, action, &mut rng)?,
        Commands::Generate => {
            exchange.generate(&config.builder(), &mut rng)?;
            print_assignments(&exchange);
            true
        }
        Commands::Show => {
            print_assignments(&exchange);
            false
        }
        Commands::Clear => {
            exchange.clear();
            println!("Cleared all data.");
            true
        }
        Commands::Export { output } => {
            save_snapshot(&output, &exchange)?;
            println!("Snapshot saved to {}", output.display());
            false
        }
        Commands::Import { input } => {
            exchange = load_snapshot(&input)?;
            println!(
                "Imported {} participants, {} gifts, {} assignments from {}",
                exchange.participants().len(),
                exchange.gifts().len(),
                exchange.assignments().len(),
                input.display()
            );
            true
        }
    };

    if changed {
        save_exchange(&config.state_path, &exchange)?;
    }
    Ok(())
}

fn run_participants(
    exchange: &mut Exchange,
    action: ParticipantAction,
    rng: &mut StdRng,
) -> CliResult<bool> {
    match action {
        ParticipantAction::Add { name } => {
            let participant = exchange.add_participant(&name, rng)?;
            println!("Added {} ({})", participant.name, participant.id);
        }
        ParticipantAction::Rename { id, name } => {
            exchange.rename_participant(&id, &name)?;
            println!("Renamed {id} to {}", exchange.participant_name(&id));
        }
        ParticipantAction::Remove { id } => {
            let removed = exchange.remove_participant(&id)?;
            println!("Removed {} ({})", removed.name, removed.id);
        }
        ParticipantAction::List => {
            if exchange.participants().is_empty() {
                println!("No participants yet.");
            }
            for participant in exchange.participants() {
                println!("{:<14} {}", participant.id, participant.name);
            }
            return Ok(false);
        }
    }
    Ok(true)
}

fn run_gifts(exchange: &mut Exchange, action: GiftAction, rng: &mut StdRng) -> CliResult<bool> {
    match action {
        GiftAction::Add { description } => {
            let gift = exchange.add_gift(&description, rng)?;
            println!("Added {} ({})", gift.description, gift.id);
        }
        GiftAction::Edit { id, description } => {
            exchange.edit_gift(&id, &description)?;
            println!("Updated {id} to {}", exchange.gift_description(&id));
        }
        GiftAction::Remove { id } => {
            let removed = exchange.remove_gift(&id)?;
            println!("Removed {} ({})", removed.description, removed.id);
        }
        GiftAction::List => {
            if exchange.gifts().is_empty() {
                println!("No gift ideas yet.");
            }
            for gift in exchange.gifts() {
                println!("{:<14} {}", gift.id, gift.description);
            }
            return Ok(false);
        }
    }
    Ok(true)
}

fn print_assignments(exchange: &Exchange) {
    if exchange.assignments().is_empty() {
        println!("No assignments yet. Add at least 2 participants and 1 gift, then run `generate`.");
        return;
    }
    println!("Secret Santa assignments:");
    for pairing in exchange.pairings() {
        println!("  {pairing}");
    }
}
