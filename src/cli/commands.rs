use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "resolve")]
#[command(version, about = "A local-first decision journal")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new decision journal in the current directory
    Init {
        /// Storage backend for the journal (file, sqlite)
        #[arg(long, default_value = "file")]
        backend: String,
    },

    /// Log a new decision
    Add {
        /// What is being decided
        title: String,

        /// A reason in favour (repeatable; newlines split into several)
        #[arg(long = "pro", short = 'p')]
        pros: Vec<String>,

        /// A reason against (repeatable; newlines split into several)
        #[arg(long = "con", short = 'c')]
        cons: Vec<String>,

        /// Gut feeling from 0 (fully against) to 100 (fully for)
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
        gut: u8,

        /// Key factor (career, finance, relationship, health, education, family, personal-growth)
        #[arg(long = "factor", short = 'f')]
        factors: Vec<String>,

        /// Status (pending, decision-made, reviewing-outcome)
        #[arg(long, default_value = "pending")]
        status: String,

        /// Reflection on the decision
        #[arg(long)]
        reflection: Option<String>,

        /// Observed outcome
        #[arg(long)]
        outcome: Option<String>,

        /// Schedule a review reminder (pending decisions only)
        #[arg(long)]
        remind: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List decision logs
    List {
        /// Only logs that count toward the free-tier quota
        #[arg(long)]
        active: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single decision log
    Get {
        /// Log ID or a unique prefix of it
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields of a decision log
    Update {
        /// Log ID or a unique prefix of it
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Replace the pros (repeatable)
        #[arg(long = "pro", short = 'p')]
        pros: Vec<String>,

        /// Replace the cons (repeatable)
        #[arg(long = "con", short = 'c')]
        cons: Vec<String>,

        /// New gut feeling (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        gut: Option<u8>,

        /// Replace the key factors (repeatable)
        #[arg(long = "factor", short = 'f')]
        factors: Vec<String>,

        /// New status (pending, decision-made, reviewing-outcome)
        #[arg(long)]
        status: Option<String>,

        /// Set the reflection
        #[arg(long, conflicts_with = "clear_reflection")]
        reflection: Option<String>,

        /// Remove the reflection
        #[arg(long)]
        clear_reflection: bool,

        /// Set the outcome
        #[arg(long, conflicts_with = "clear_outcome")]
        outcome: Option<String>,

        /// Remove the outcome
        #[arg(long)]
        clear_outcome: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a decision log
    Delete {
        /// Log ID or a unique prefix of it
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show how many active logs the free tier allows
    Quota {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Schedule a review reminder for a pending decision
    Remind {
        /// Log ID or a unique prefix of it
        id: String,

        /// Days from now, 1-3650 (defaults to reminders.days in config)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=crate::reminder::MAX_REMINDER_DAYS))]
        days: Option<i64>,
    },

    /// List scheduled reminders
    Reminders {
        /// Only reminders whose time has come
        #[arg(long)]
        due: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a markdown snapshot of the journal to .resolve/snapshot
    Snapshot,
}
