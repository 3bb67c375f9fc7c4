use clap::Parser;
use resolve::cli::{
    handle_add, handle_delete, handle_get, handle_init, handle_list, handle_quota, handle_remind,
    handle_reminders, handle_snapshot, handle_update, Cli, Commands,
};
use tracing_subscriber::EnvFilter;

fn main() {
    // Store diagnostics go to stderr; RESOLVE_LOG=debug shows every slot write
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RESOLVE_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { backend } => handle_init(backend),
        Commands::Add {
            title,
            pros,
            cons,
            gut,
            factors,
            status,
            reflection,
            outcome,
            remind,
            json,
        } => handle_add(
            title, pros, cons, gut, factors, status, reflection, outcome, remind, json,
        ),
        Commands::List { active, json } => handle_list(active, json),
        Commands::Get { id, json } => handle_get(id, json),
        Commands::Update {
            id,
            title,
            pros,
            cons,
            gut,
            factors,
            status,
            reflection,
            clear_reflection,
            outcome,
            clear_outcome,
            json,
        } => handle_update(
            id,
            title,
            pros,
            cons,
            gut,
            factors,
            status,
            reflection,
            clear_reflection,
            outcome,
            clear_outcome,
            json,
        ),
        Commands::Delete { id, force } => handle_delete(id, force),
        Commands::Quota { json } => handle_quota(json),
        Commands::Remind { id, days } => handle_remind(id, days),
        Commands::Reminders { due, json } => handle_reminders(due, json),
        Commands::Snapshot => handle_snapshot(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
