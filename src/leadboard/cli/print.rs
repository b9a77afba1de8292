use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use leadboard::analytics::{distribution, Bar, Metrics, StageSummary};
use leadboard::api::{CmdMessage, MessageLevel};
use leadboard::error::{LeadError, Result};
use leadboard::index::DisplayLead;
use leadboard::model::{Lead, LeadStatus, Priority};
use leadboard::query::Board;
use serde::Serialize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

const DEFAULT_LINE_WIDTH: usize = 100;
const MAX_LINE_WIDTH: usize = 140;
const TIME_WIDTH: usize = 16;
const STATUS_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 10;
const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 20;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(LeadError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// One row per lead: position, name and email, stage, value, next follow-up.
pub(super) fn print_leads(leads: &[DisplayLead]) {
    if leads.is_empty() {
        println!("No leads found.");
        return;
    }

    let line_width = line_width();
    for dl in leads {
        let idx_str = format!("{:>3}. ", dl.index);
        let status = format!("{:<width$}", dl.lead.status.as_str(), width = STATUS_WIDTH);
        let value = format!("{:>width$}", format_money(dl.lead.value), width = VALUE_WIDTH);
        let follow_up = format!(
            "{:>width$}",
            format_relative(dl.lead.next_follow_up),
            width = TIME_WIDTH
        );

        let fixed_width = idx_str.width() + 2 + STATUS_WIDTH + 1 + VALUE_WIDTH + 2 + TIME_WIDTH;
        let available = line_width.saturating_sub(fixed_width);
        let title = truncate_to_width(
            &format!("{} <{}>", dl.lead.name, dl.lead.email),
            available,
        );
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{}  {} {}  {}",
            idx_str.yellow(),
            priority_marker(&title, dl.lead.priority),
            " ".repeat(padding),
            status_colored(&status, dl.lead.status),
            value,
            follow_up.dimmed()
        );
    }
}

pub(super) fn print_lead_detail(index: Option<usize>, lead: &Lead) {
    let idx = index.map(|i| format!("{}. ", i)).unwrap_or_default();
    println!("{}{}", idx.yellow(), lead.name.bold());
    println!("--------------------------------");
    println!("  {:<14}{}", "Id", lead.id);
    println!("  {:<14}{}", "Email", lead.email);
    println!("  {:<14}{}", "Phone", lead.phone);
    println!("  {:<14}{}", "Product", lead.product);
    println!(
        "  {:<14}{}",
        "Stage",
        status_colored(lead.status.title(), lead.status)
    );
    println!(
        "  {:<14}{}",
        "Priority",
        priority_marker(lead.priority.as_str(), lead.priority)
    );
    println!("  {:<14}{}", "Source", lead.source);
    println!("  {:<14}{}", "Value", format_money(lead.value));
    println!("  {:<14}{}", "Assigned to", lead.assigned_to);
    println!(
        "  {:<14}{} ({})",
        "Created",
        lead.created_at.format("%Y-%m-%d"),
        format_relative(lead.created_at).trim()
    );
    println!(
        "  {:<14}{} ({})",
        "Last contact",
        lead.last_contact.format("%Y-%m-%d"),
        format_relative(lead.last_contact).trim()
    );
    println!(
        "  {:<14}{} ({})",
        "Follow up",
        lead.next_follow_up.format("%Y-%m-%d"),
        format_relative(lead.next_follow_up).trim()
    );
    if lead.notes.is_empty() {
        return;
    }
    println!("  Notes");
    for note in &lead.notes {
        println!("    - {}", note);
    }
}

/// Columns are printed one under the other; each card shows its list position.
pub(super) fn print_board(board: &Board, stages: &[StageSummary], positions: &[(usize, Uuid)]) {
    let line_width = line_width();
    for (column, stage) in board.columns.iter().zip(stages) {
        let header = format!("{} ({})", column.title(), stage.count);
        let total = format_money(stage.value);
        let padding = line_width.saturating_sub(header.width() + total.width());
        println!(
            "{}{}{}",
            status_colored(&header, column.status).bold(),
            " ".repeat(padding),
            total.dimmed()
        );

        if column.leads.is_empty() {
            println!("    {}", "(empty)".dimmed());
        }
        for lead in &column.leads {
            let index = positions
                .iter()
                .find(|(_, id)| *id == lead.id)
                .map(|(i, _)| format!("{:>3}. ", i))
                .unwrap_or_else(|| "     ".to_string());
            let value = format_money(lead.value);
            let available = line_width.saturating_sub(index.width() + value.width() + 4);
            let card = truncate_to_width(&format!("{} · {}", lead.name, lead.product), available);
            let padding = available.saturating_sub(card.width());
            println!(
                "  {}{}{}  {}",
                index.yellow(),
                priority_marker(&card, lead.priority),
                " ".repeat(padding),
                value
            );
        }
        println!();
    }
}

pub(super) fn print_metrics(metrics: &Metrics, stages: &[StageSummary]) {
    println!("{:<18}{}", "Total leads", metrics.total_leads.to_string().bold());
    println!("{:<18}{}", "Pipeline value", format_money(metrics.total_value).bold());
    println!("{:<18}{}", "Closed won", metrics.closed_won.to_string().bold());
    println!(
        "{:<18}{}",
        "Conversion rate",
        format!("{:.1}%", metrics.conversion_rate).bold()
    );

    println!("\n{}", "By stage".bold());
    for stage in stages {
        println!(
            "  {:<width$}{:>4}  {}",
            stage.title,
            stage.count,
            format_money(stage.value).dimmed(),
            width = LABEL_WIDTH
        );
    }

    print_distribution("Leads by status", &distribution(&metrics.status_counts));
    print_distribution("Leads by product", &distribution(&metrics.product_counts));
    print_distribution("Leads by source", &distribution(&metrics.source_counts));
}

fn print_distribution(title: &str, bars: &[Bar]) {
    println!("\n{}", title.bold());
    if bars.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }
    for bar in bars {
        let filled = ((bar.width_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let label = truncate_to_width(&bar.label, LABEL_WIDTH);
        let padding = LABEL_WIDTH.saturating_sub(label.width());
        println!(
            "  {}{}{:>4}  {}{}",
            label,
            " ".repeat(padding),
            bar.count,
            "█".repeat(filled).cyan(),
            "░".repeat(BAR_WIDTH.saturating_sub(filled)).dimmed()
        );
    }
}

fn line_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_LINE_WIDTH)
        .min(MAX_LINE_WIDTH)
}

fn status_colored(text: &str, status: LeadStatus) -> ColoredString {
    match status {
        LeadStatus::New => text.blue(),
        LeadStatus::Contacted => text.yellow(),
        LeadStatus::Qualified => text.magenta(),
        LeadStatus::Proposal => text.cyan(),
        LeadStatus::Closed => text.green(),
        LeadStatus::Lost => text.red(),
    }
}

fn priority_marker(text: &str, priority: Priority) -> ColoredString {
    match priority {
        Priority::High => text.bold(),
        Priority::Medium => text.normal(),
        Priority::Low => text.dimmed(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// `$1,200` style, no cents unless there are some.
fn format_money(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as u64;
    let (whole, cents) = (total_cents / 100, total_cents % 100);
    let sign = if value < 0.0 && total_cents > 0 { "-" } else { "" };

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if cents == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, cents)
    }
}

/// "3 days ago" for past instants, "in 3 days" for future ones.
fn format_relative(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let formatter = Formatter::new();

    if timestamp > now {
        let ahead = timestamp.signed_duration_since(now);
        let text = formatter.convert(ahead.to_std().unwrap_or_default());
        return format!("in {}", text.strip_suffix(" ago").unwrap_or(&text));
    }
    let behind = now.signed_duration_since(timestamp);
    formatter.convert(behind.to_std().unwrap_or_default())
}
