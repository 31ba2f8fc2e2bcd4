//! Weekly report rendering.
//!
//! # Responsibility
//! - Turn a weekly rollup into a mail-ready draft (subject, body,
//!   recipients).
//!
//! # Invariants
//! - Rendering is pure text assembly; drafting into a mail client stays an
//!   external collaborator.
//! - Unknown template placeholders are left verbatim, never an error.

use crate::config::ReportConfig;
use crate::model::todo::TodoItem;
use crate::service::review_service::WeeklyRollup;
use chrono::NaiveDate;
use log::warn;

/// One ready-to-send weekly update draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub from_name: String,
}

/// Renders the weekly update draft for a rollup.
///
/// The body comes from the configured template file when one exists and is
/// readable, otherwise from the built-in format.
pub fn render_weekly_report(rollup: &WeeklyRollup, config: &ReportConfig) -> EmailDraft {
    let vars = template_vars(rollup, config);
    let subject = fill_placeholders(&config.subject_template, &vars);

    let body = match load_template(config) {
        Some(template) => fill_placeholders(&template, &vars),
        None => default_body(rollup, config),
    };

    EmailDraft {
        subject,
        body,
        to: config.to.clone(),
        cc: config.cc.clone(),
        from_name: config.your_name.clone(),
    }
}

/// Serializes a draft in the on-disk layout: header lines, a separator rule,
/// then the body.
pub fn format_draft(draft: &EmailDraft) -> String {
    let mut out = String::new();
    out.push_str(&format!("To: {}\n", draft.to.join(", ")));
    out.push_str(&format!("From: {}\n", draft.from_name));
    out.push_str(&format!("Subject: {}\n", draft.subject));
    out.push('\n');
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");
    out.push_str(&draft.body);
    out
}

fn template_vars(rollup: &WeeklyRollup, config: &ReportConfig) -> Vec<(&'static str, String)> {
    vec![
        ("{week_start}", rollup.week.start.format("%B %d").to_string()),
        ("{week_end}", rollup.week.end.format("%B %d, %Y").to_string()),
        ("{your_name}", config.your_name.clone()),
        ("{total_tasks}", rollup.total_items().to_string()),
        ("{project_count}", rollup.project_count().to_string()),
        ("{project_summaries}", project_summaries(rollup)),
    ]
}

fn fill_placeholders(template: &str, vars: &[(&'static str, String)]) -> String {
    let mut filled = template.to_string();
    for (placeholder, value) in vars {
        filled = filled.replace(placeholder, value);
    }
    filled
}

fn load_template(config: &ReportConfig) -> Option<String> {
    let path = config.template_path.as_deref()?;
    if !path.exists() {
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(template) => Some(template),
        Err(err) => {
            warn!(
                "event=template_load module=report status=error path={} error={err}",
                path.display()
            );
            None
        }
    }
}

/// Compact per-project listing used by the `{project_summaries}` placeholder.
fn project_summaries(rollup: &WeeklyRollup) -> String {
    let mut sections = Vec::new();
    for (prefix, items) in &rollup.by_prefix {
        let mut lines = vec![format!("## {prefix}")];
        for item in items {
            lines.push(format!(
                "- {}: {}",
                item.date.format("%m/%d"),
                item.text_without_prefix()
            ));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

/// Built-in body: greeting, per-project sections with day groupings, closing
/// summary and sign-off.
fn default_body(rollup: &WeeklyRollup, config: &ReportConfig) -> String {
    let mut lines = vec![
        "Hi,".to_string(),
        String::new(),
        format!(
            "Here's my weekly update for {} - {}:",
            rollup.week.start.format("%B %d"),
            rollup.week.end.format("%B %d, %Y")
        ),
        String::new(),
    ];

    for (prefix, items) in &rollup.by_prefix {
        lines.push(format!("## {prefix}"));
        lines.push(String::new());

        let by_day = group_by_day(items);
        let multi_day = by_day.len() > 1;
        for (day, day_items) in by_day {
            if multi_day {
                lines.push(format!("**{}:**", day.format("%A, %B %d")));
            }
            for item in day_items {
                lines.push(format!("- {}", item.text_without_prefix()));
            }
            if multi_day {
                lines.push(String::new());
            }
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "**Summary:** Completed {} tasks across {} projects this week.",
        rollup.total_items(),
        rollup.project_count()
    ));
    lines.push(String::new());
    lines.push("Let me know if you have any questions!".to_string());
    lines.push(String::new());
    lines.push("Best regards,".to_string());
    lines.push(config.your_name.clone());

    lines.join("\n")
}

/// Groups a day-ordered item slice into runs per date, preserving order.
fn group_by_day(items: &[TodoItem]) -> Vec<(NaiveDate, Vec<&TodoItem>)> {
    let mut grouped: Vec<(NaiveDate, Vec<&TodoItem>)> = Vec::new();
    for item in items {
        match grouped.last_mut() {
            Some((day, bucket)) if *day == item.date => bucket.push(item),
            _ => grouped.push((item.date, vec![item])),
        }
    }
    grouped
}
