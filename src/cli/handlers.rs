use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{Duration, Utc};

use crate::config::{Backend, ResolveConfig};
use crate::entity::{DecisionLog, KeyFactor, LogId, LogStatus};
use crate::error::{ResolveError, Result};
use crate::form::{quota_message, LogDraft};
use crate::reminder::{schedule_review_reminder, ReminderOutbox, ReminderOutcome};
use crate::snapshot::{format_timestamp, generate_snapshot};
use crate::storage::{
    preserve_unreadable, DecisionLogStore, FileSlot, KeyValueSlot, SqliteSlot, SystemClock,
};
use crate::warnings::{check_quota, format_warning, from_load_error, Warning};

const RESOLVE_DIR: &str = ".resolve";
const SNAPSHOT_DIR: &str = "snapshot";

type CliStore = DecisionLogStore<Box<dyn KeyValueSlot>, SystemClock>;

/// Find the project root by looking for .resolve/ or .git/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(RESOLVE_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

struct Project {
    dir: PathBuf,
    config: ResolveConfig,
}

impl Project {
    fn open() -> Result<Self> {
        let dir = find_project_root().join(RESOLVE_DIR);
        if !dir.is_dir() {
            return Err(ResolveError::NotInitialized);
        }
        let config = ResolveConfig::load(&dir)?;
        Ok(Self { dir, config })
    }

    fn open_store(&self) -> Result<CliStore> {
        let mut slot: Box<dyn KeyValueSlot> = match self.config.storage.backend {
            Backend::File => Box::new(FileSlot::new(&self.dir)),
            Backend::Sqlite => Box::new(SqliteSlot::open(&self.dir)?),
        };
        let key = &self.config.storage.slot_key;
        let backup = preserve_unreadable(slot.as_mut(), key)?;
        let store = DecisionLogStore::with_clock(slot, SystemClock, key.clone());

        if let Some(err) = store.load_error() {
            eprintln!("{}", format_warning(&from_load_error(err)));
        }
        if let Some(backup) = backup {
            eprintln!("{}", format_warning(&Warning::StoredDataPreserved { backup }));
        }
        Ok(store)
    }
}

/// Resolve a full id or unique id prefix to a stored log id
fn resolve_id(store: &CliStore, prefix: &str) -> Result<LogId> {
    let matches = store.find_by_prefix(prefix);
    match matches.as_slice() {
        [] => Err(ResolveError::LogNotFound(prefix.to_string())),
        [log] => Ok(log.id.clone()),
        many => Err(ResolveError::AmbiguousId {
            prefix: prefix.to_string(),
            count: many.len(),
        }),
    }
}

fn parse_factors(factors: &[String]) -> Result<Vec<KeyFactor>> {
    factors
        .iter()
        .map(|f| f.parse::<KeyFactor>().map_err(ResolveError::Validation))
        .collect()
}

fn parse_status(status: &str) -> Result<LogStatus> {
    status.parse().map_err(ResolveError::Validation)
}

/// Reflection and outcome are only accepted once a decision has been made
fn check_reflection_fields(draft: &LogDraft, given: bool) -> Result<()> {
    if given && !draft.shows_reflection_fields() {
        return Err(ResolveError::Validation(
            "Reflection and outcome can only be recorded once a decision has been made"
                .to_string(),
        ));
    }
    Ok(())
}

fn print_quota_warnings(store: &CliStore) {
    for warning in check_quota(store.active_count(), store.free_tier_limit()) {
        eprintln!("{}", format_warning(&warning));
    }
}

fn print_log_line(log: &DecisionLog) {
    println!(
        "  ({}) [{}] gut {:>3}% {}",
        log.id.short(),
        log.status,
        log.gut_feeling,
        log.title
    );
    if !log.key_factors.is_empty() {
        let factors: Vec<String> = log.key_factors.iter().map(|f| f.to_string()).collect();
        println!("      factors: {}", factors.join(", "));
    }
}

fn print_log_detail(log: &DecisionLog) {
    println!("{}", log.title);
    println!("  id:       {}", log.id);
    println!("  status:   {}", log.status);
    println!("  gut:      {}%", log.gut_feeling);
    let factors: Vec<String> = log.key_factors.iter().map(|f| f.to_string()).collect();
    println!("  factors:  {}", factors.join(", "));
    println!("  created:  {}", format_timestamp(&log.created_at));
    println!("  updated:  {}", format_timestamp(&log.updated_at));

    if !log.pros.is_empty() {
        println!("\nPros:");
        for pro in &log.pros {
            println!("  + {}", pro);
        }
    }
    if !log.cons.is_empty() {
        println!("\nCons:");
        for con in &log.cons {
            println!("  - {}", con);
        }
    }
    if let Some(reflection) = &log.reflection {
        println!("\nReflection:\n  {}", reflection);
    }
    if let Some(outcome) = &log.outcome {
        println!("\nOutcome:\n  {}", outcome);
    }
}

fn report_reminder(outcome: &ReminderOutcome) {
    match outcome {
        ReminderOutcome::Scheduled(reminder) => {
            eprintln!("Reminder scheduled for {}", format_timestamp(&reminder.fire_at));
        }
        ReminderOutcome::Skipped(reason) => eprintln!("Reminder not scheduled: {}", reason),
        ReminderOutcome::Failed(message) => eprintln!("Warning: {}", message),
    }
}

pub fn handle_init(backend: String) -> Result<()> {
    let root = env::current_dir()?;
    let dir = root.join(RESOLVE_DIR);

    if dir.exists() {
        return Err(ResolveError::AlreadyInitialized);
    }

    let backend: Backend = backend.parse().map_err(ResolveError::Validation)?;
    fs::create_dir_all(&dir)?;

    let mut config = ResolveConfig::default();
    config.storage.backend = backend;
    config.save(&dir)?;

    if backend == Backend::Sqlite {
        let slot = SqliteSlot::open(&dir)?;
        tracing::debug!(path = %slot.path().display(), "created sqlite slot");
    }

    println!("Initialized decision journal in {} ({} backend)", root.display(), backend);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_add(
    title: String,
    pros: Vec<String>,
    cons: Vec<String>,
    gut: u8,
    factors: Vec<String>,
    status: String,
    reflection: Option<String>,
    outcome: Option<String>,
    remind: bool,
    json: bool,
) -> Result<()> {
    let project = Project::open()?;
    let mut store = project.open_store()?;

    let reflection_given = reflection.is_some() || outcome.is_some();
    let mut draft = LogDraft {
        title,
        pros: pros.join("\n"),
        cons: cons.join("\n"),
        gut_feeling: gut,
        status: parse_status(&status)?,
        reflection: reflection.unwrap_or_default(),
        outcome: outcome.unwrap_or_default(),
        ..LogDraft::default()
    };
    for factor in parse_factors(&factors)? {
        draft.toggle_key_factor(factor, true);
    }
    check_reflection_fields(&draft, reflection_given)?;
    let input = draft.validate()?;

    if store.is_quota_reached() {
        return Err(ResolveError::Validation(quota_message(store.free_tier_limit())));
    }

    let log = store.create(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        println!("Created decision log ({}) - {} [{}]", log.id.short(), log.title, log.status);
    }

    if remind {
        let mut outbox = ReminderOutbox::new(&project.dir);
        let outcome =
            schedule_review_reminder(&mut outbox, &log, Utc::now(), project.config.reminders.days);
        report_reminder(&outcome);
    }

    print_quota_warnings(&store);
    Ok(())
}

pub fn handle_list(active: bool, json: bool) -> Result<()> {
    let project = Project::open()?;
    let store = project.open_store()?;

    let logs: Vec<&DecisionLog> = store
        .logs()
        .iter()
        .filter(|log| !active || log.is_active())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }

    if logs.is_empty() {
        println!("No decision logs found.");
    } else {
        println!("Decision logs:\n");
        for log in logs {
            print_log_line(log);
        }
    }
    println!(
        "\nActive: {}/{}",
        store.active_count(),
        store.free_tier_limit()
    );
    Ok(())
}

pub fn handle_get(id: String, json: bool) -> Result<()> {
    let project = Project::open()?;
    let store = project.open_store()?;

    let id = resolve_id(&store, &id)?;
    let log = store
        .get(&id)
        .ok_or_else(|| ResolveError::LogNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(log)?);
    } else {
        print_log_detail(log);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_update(
    id: String,
    title: Option<String>,
    pros: Vec<String>,
    cons: Vec<String>,
    gut: Option<u8>,
    factors: Vec<String>,
    status: Option<String>,
    reflection: Option<String>,
    clear_reflection: bool,
    outcome: Option<String>,
    clear_outcome: bool,
    json: bool,
) -> Result<()> {
    let nothing_given = title.is_none()
        && pros.is_empty()
        && cons.is_empty()
        && gut.is_none()
        && factors.is_empty()
        && status.is_none()
        && reflection.is_none()
        && outcome.is_none()
        && !clear_reflection
        && !clear_outcome;
    if nothing_given {
        return Err(ResolveError::Validation("Nothing to update".to_string()));
    }

    let project = Project::open()?;
    let mut store = project.open_store()?;

    let id = resolve_id(&store, &id)?;
    let current = store
        .get(&id)
        .ok_or_else(|| ResolveError::LogNotFound(id.to_string()))?;

    // Edit the stored log the way the form does: pre-fill, override, revalidate
    let mut draft = LogDraft::from_log(current);
    if let Some(title) = title {
        draft.title = title;
    }
    if !pros.is_empty() {
        draft.pros = pros.join("\n");
    }
    if !cons.is_empty() {
        draft.cons = cons.join("\n");
    }
    if let Some(gut) = gut {
        draft.gut_feeling = gut;
    }
    if !factors.is_empty() {
        draft.key_factors.clear();
        for factor in parse_factors(&factors)? {
            draft.toggle_key_factor(factor, true);
        }
    }
    if let Some(status) = status {
        draft.status = parse_status(&status)?;
    }
    check_reflection_fields(&draft, reflection.is_some() || outcome.is_some())?;
    if clear_reflection {
        draft.reflection.clear();
    } else if let Some(text) = reflection {
        draft.reflection = text;
    }
    if clear_outcome {
        draft.outcome.clear();
    } else if let Some(text) = outcome {
        draft.outcome = text;
    }

    store.update(&id, draft.into_update()?)?;

    let log = store
        .get(&id)
        .ok_or_else(|| ResolveError::LogNotFound(id.to_string()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(log)?);
    } else {
        println!("Updated decision log ({}) - {} [{}]", log.id.short(), log.title, log.status);
    }
    print_quota_warnings(&store);
    Ok(())
}

pub fn handle_delete(id: String, force: bool) -> Result<()> {
    let project = Project::open()?;
    let mut store = project.open_store()?;

    let id = resolve_id(&store, &id)?;
    let title = store
        .get(&id)
        .map(|log| log.title.clone())
        .unwrap_or_default();

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete decision log ({}) - {}? [y/N] ", id.short(), title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(ResolveError::Validation(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    store.delete(&id)?;
    println!("Deleted decision log ({}) - {}", id.short(), title);
    Ok(())
}

pub fn handle_quota(json: bool) -> Result<()> {
    let project = Project::open()?;
    let store = project.open_store()?;

    if json {
        let value = serde_json::json!({
            "active": store.active_count(),
            "limit": store.free_tier_limit(),
            "reached": store.is_quota_reached(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "Active decision logs: {}/{}",
        store.active_count(),
        store.free_tier_limit()
    );
    print_quota_warnings(&store);
    Ok(())
}

pub fn handle_remind(id: String, days: Option<i64>) -> Result<()> {
    let project = Project::open()?;
    let store = project.open_store()?;

    let days = days.unwrap_or(project.config.reminders.days);

    let id = resolve_id(&store, &id)?;
    let log = store
        .get(&id)
        .ok_or_else(|| ResolveError::LogNotFound(id.to_string()))?;

    let mut outbox = ReminderOutbox::new(&project.dir);
    let outcome = schedule_review_reminder(&mut outbox, log, Utc::now(), days);
    report_reminder(&outcome);
    Ok(())
}

pub fn handle_reminders(due: bool, json: bool) -> Result<()> {
    let project = Project::open()?;
    let outbox = ReminderOutbox::new(&project.dir);

    let now = Utc::now();
    let reminders = if due { outbox.due(now)? } else { outbox.list()? };

    if json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
        return Ok(());
    }

    if reminders.is_empty() {
        println!("No reminders scheduled.");
        return Ok(());
    }

    println!("Reminders:\n");
    for reminder in &reminders {
        let marker = if reminder.fire_at <= now {
            "due"
        } else if reminder.fire_at <= now + Duration::days(1) {
            "soon"
        } else {
            "later"
        };
        println!(
            "  {} [{}] {}",
            format_timestamp(&reminder.fire_at),
            marker,
            reminder.body
        );
    }
    Ok(())
}

pub fn handle_snapshot() -> Result<()> {
    let project = Project::open()?;
    let store = project.open_store()?;

    let snapshot_dir = project.dir.join(SNAPSHOT_DIR);
    let stats = generate_snapshot(store.logs(), store.free_tier_limit(), &snapshot_dir, Utc::now())?;

    println!(
        "Generated snapshot of {} decision logs ({} files) in {}",
        stats.total,
        stats.files_generated.len(),
        snapshot_dir.display()
    );
    Ok(())
}
