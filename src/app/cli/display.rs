//! Rendering of scan reports for the terminal

use crate::core::styles::StyleRole;
use crate::scanner::api::{OutcomeMessage, ScanOutcome, ScanReport};
use prettytable::{format, Cell, Row, Table};

/// Summary lines shown above the exposed-repository table
pub fn summary_lines(report: &ScanReport, color: bool) -> Vec<String> {
    let label = |text: &str| StyleRole::Header.paint(text, color);
    let mut lines = vec![format!("{} {}", label("User:"), report.username)];

    if let Some(outcome) = &report.outcome {
        if let Some(avatar) = &outcome.avatar_url {
            lines.push(format!("{} {}", label("Avatar:"), StyleRole::Link.paint(avatar, color)));
        }
        lines.push(format!(
            "{} {}",
            label(".env commits:"),
            outcome.total_env_commits
        ));
    }

    let role = match &report.message {
        OutcomeMessage::Safe | OutcomeMessage::NoRepositories { .. } => StyleRole::Safe,
        OutcomeMessage::Exposed { .. } => StyleRole::Exposed,
        OutcomeMessage::Failed { .. } => StyleRole::Error,
    };
    lines.push(role.paint(&report.message.to_string(), color));
    lines
}

/// Notes printed after the table: unverified and unevaluated repositories
pub fn warning_lines(report: &ScanReport, color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(outcome) = report.outcome.as_ref().filter(|o| !o.unverified_repos.is_empty()) {
        lines.push(StyleRole::Warning.paint(
            &format!(
                "Warning: could not verify {} repositor{}: {}",
                outcome.unverified_repos.len(),
                if outcome.unverified_repos.len() == 1 { "y" } else { "ies" },
                outcome.unverified_repos.join(", ")
            ),
            color,
        ));
    }

    if !report.unevaluated.is_empty() {
        let names: Vec<&str> = report.unevaluated.iter().map(|r| r.name.as_str()).collect();
        lines.push(StyleRole::Dim.paint(
            &format!("Not evaluated: {}", names.join(", ")),
            color,
        ));
    }

    lines
}

/// Table of exposed repositories, `None` when nothing is exposed
pub fn exposed_table(outcome: &ScanOutcome, color: bool) -> Option<Table> {
    if !outcome.is_exposed() {
        return None;
    }

    let spec = |role: StyleRole| {
        if color {
            role.to_prettytable_spec().unwrap_or_default()
        } else {
            String::new()
        }
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("Repository").style_spec("b"),
        Cell::new("Commits").style_spec("b"),
        Cell::new("URL").style_spec("b"),
        Cell::new("Description").style_spec("b"),
    ]));

    for repo in &outcome.exposed_repos {
        table.add_row(Row::new(vec![
            Cell::new(&repo.name).style_spec(&spec(StyleRole::Exposed)),
            Cell::new(&repo.commit_count.to_string()),
            Cell::new(&repo.url).style_spec(&spec(StyleRole::Link)),
            Cell::new(&repo.description),
        ]));
    }

    Some(table)
}

pub fn render_json(report: &ScanReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Write the report to stdout
pub fn print_report(report: &ScanReport, color: bool) -> std::io::Result<()> {
    for line in summary_lines(report, color) {
        println!("{line}");
    }

    if let Some(table) = report.outcome.as_ref().and_then(|o| exposed_table(o, color)) {
        println!();
        if color {
            table.print_tty(false)?;
        } else {
            print!("{table}");
        }
    }

    let warnings = warning_lines(report, color);
    if !warnings.is_empty() {
        println!();
        for line in warnings {
            println!("{line}");
        }
    }

    Ok(())
}
