// src/snapshot/decision_log.rs
//! Per-log markdown files

use std::path::Path;

use serde::Serialize;

use crate::entity::DecisionLog;
use crate::Result;

use super::utils::{format_date, log_filename, write_snapshot_file};
use super::{yaml_frontmatter, GeneratedFile, LOGS_DIR};

#[derive(Serialize)]
struct LogFrontmatter {
    id: String,
    title: String,
    status: String,
    gut_feeling: u8,
    key_factors: Vec<String>,
    created: String,
    updated: String,
}

impl LogFrontmatter {
    fn from_log(log: &DecisionLog) -> Self {
        Self {
            id: log.id.to_string(),
            title: log.title.clone(),
            status: log.status.to_string(),
            gut_feeling: log.gut_feeling,
            key_factors: log.key_factors.iter().map(|f| f.to_string()).collect(),
            created: format_date(&log.created_at),
            updated: format_date(&log.updated_at),
        }
    }
}

fn push_list(body: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    body.push_str(&format!("\n## {}\n\n", heading));
    for item in items {
        body.push_str(&format!("- {}\n", item));
    }
}

fn push_text(body: &mut String, heading: &str, text: Option<&str>) {
    if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        body.push_str(&format!("\n## {}\n\n{}\n", heading, text));
    }
}

/// Markdown body: gut feeling line, then pros, cons, reflection and outcome
fn generate_body(log: &DecisionLog) -> String {
    let mut body = format!("\nGut feeling: {}% in favour\n", log.gut_feeling);

    push_list(&mut body, "Pros", &log.pros);
    push_list(&mut body, "Cons", &log.cons);
    push_text(&mut body, "Reflection", log.reflection.as_deref());
    push_text(&mut body, "Outcome", log.outcome.as_deref());

    body
}

pub fn generate(logs: &[DecisionLog], snapshot_dir: &Path) -> Result<Vec<GeneratedFile>> {
    let mut generated = Vec::with_capacity(logs.len());
    let logs_dir = snapshot_dir.join(LOGS_DIR);

    for (idx, log) in logs.iter().enumerate() {
        let yaml = yaml_frontmatter(&LogFrontmatter::from_log(log))?;
        let content = format!("{}{}", yaml, generate_body(log));

        let filename = log_filename(idx + 1, log);
        write_snapshot_file(&logs_dir.join(&filename), &content)?;

        generated.push(GeneratedFile {
            relative_path: format!("{}/{}", LOGS_DIR, filename),
        });
    }

    Ok(generated)
}
