use super::print::{
    print_board, print_json, print_lead_detail, print_leads, print_messages, print_metrics,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use flexi_logger::{Logger, LoggerHandle};
use leadboard::api::LeadsApi;
use leadboard::config::LeadboardConfig;
use leadboard::error::{LeadError, Result};
use leadboard::model::{sample_leads, Lead, LeadInput, LeadPatch, LeadStatus, Priority};
use leadboard::query::LeadQuery;
use leadboard::store::memory::InMemoryStore;
use log::{debug, info};
use std::path::{Path, PathBuf};

const LOG_ENV: &str = "LEADBOARD_LOG";
const CONFIG_DIR_ENV: &str = "LEADBOARD_CONFIG_DIR";
const DEFAULT_LOG_LEVEL: &str = "warn";

struct AppContext {
    api: LeadsApi<InMemoryStore>,
}

struct AddArgs {
    name: String,
    email: String,
    phone: String,
    product: String,
    source: Option<String>,
    priority: Option<String>,
    value: Option<f64>,
    assign: Option<String>,
    note: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            status,
            priority,
            json,
        }) => handle_list(&mut ctx, search, status, priority, json),
        Some(Commands::Show { lead }) => handle_show(&mut ctx, &lead),
        Some(Commands::Add {
            name,
            email,
            phone,
            product,
            source,
            priority,
            value,
            assign,
            note,
        }) => handle_add(
            &mut ctx,
            AddArgs {
                name,
                email,
                phone,
                product,
                source,
                priority,
                value,
                assign,
                note,
            },
        ),
        Some(Commands::Update {
            lead,
            name,
            email,
            phone,
            product,
            status,
            priority,
            source,
            value,
            assign,
        }) => {
            let patch = LeadPatch {
                name,
                email,
                phone,
                product,
                status: status.map(|s| s.parse::<LeadStatus>()).transpose()?,
                priority: priority.map(|p| p.parse::<Priority>()).transpose()?,
                source,
                value,
                assigned_to: assign,
                ..LeadPatch::default()
            };
            handle_update(&mut ctx, &lead, &patch)
        }
        Some(Commands::Move { lead, stage }) => handle_move(&mut ctx, &lead, &stage),
        Some(Commands::Note { lead, text }) => handle_note(&mut ctx, &lead, &text.join(" ")),
        Some(Commands::Delete { lead }) => handle_delete(&mut ctx, &lead),
        Some(Commands::Board) => handle_board(&mut ctx),
        Some(Commands::Metrics { json }) => handle_metrics(&mut ctx, json),
        Some(Commands::Export) => handle_export(&ctx),
        None => handle_list(&mut ctx, None, None, None, false),
    }
}

/// Starts stderr logging. Level: `-v` info, `-vv` debug, else `$LEADBOARD_LOG`, else warn.
/// A logger that fails to start only costs diagnostics, so the error is reported and ignored.
fn init_logging(verbose: u8) -> Option<LoggerHandle> {
    let level = match verbose {
        0 => std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };

    let started = Logger::try_with_str(&level).and_then(|logger| logger.log_to_stderr().start());
    match started {
        Ok(handle) => {
            debug!("event=logger_init level={}", level);
            Some(handle)
        }
        Err(e) => {
            eprintln!("Warning: logging disabled ({})", e);
            None
        }
    }
}

fn config_dir(cli: &Cli) -> Option<PathBuf> {
    cli.config_dir
        .clone()
        .or_else(|| std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
        .or_else(|| {
            ProjectDirs::from("com", "leadboard", "leadboard")
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = match config_dir(cli) {
        Some(dir) => LeadboardConfig::load(&dir)?,
        None => LeadboardConfig::default(),
    };

    let leads = match &cli.data {
        Some(path) => read_snapshot(path)?,
        None => sample_leads(),
    };
    info!("event=session_start leads={}", leads.len());

    let store = InMemoryStore::with_leads(leads)?;
    Ok(AppContext {
        api: LeadsApi::new(store, config),
    })
}

fn read_snapshot(path: &Path) -> Result<Vec<Lead>> {
    let json = std::fs::read_to_string(path).map_err(LeadError::Io)?;
    leadboard::commands::import::parse_snapshot(&json)
}

/// Position of each lead in the full list, for rendering rows outside `list`.
fn positions(ctx: &AppContext) -> Result<Vec<(usize, uuid::Uuid)>> {
    let all = ctx.api.list_leads(&LeadQuery::new())?;
    Ok(all
        .listed_leads
        .iter()
        .map(|dl| (dl.index, dl.lead.id))
        .collect())
}

fn finish_write(
    ctx: &AppContext,
    affected: &[Lead],
    messages: &[leadboard::api::CmdMessage],
) -> Result<()> {
    print_messages(messages);
    let positions = positions(ctx)?;
    for lead in affected {
        let index = positions
            .iter()
            .find(|(_, id)| *id == lead.id)
            .map(|(i, _)| *i);
        print_lead_detail(index, lead);
    }
    Ok(())
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    json: bool,
) -> Result<()> {
    let mut query = LeadQuery::new().search(search.unwrap_or_default());
    if let Some(status) = non_blank(status) {
        query = query.status(status.parse()?);
    }
    if let Some(priority) = non_blank(priority) {
        query = query.priority(priority.parse()?);
    }

    let result = ctx.api.list_leads(&query)?;
    if json {
        let leads: Vec<&Lead> = result.listed_leads.iter().map(|dl| &dl.lead).collect();
        return print_json(&leads);
    }
    print_leads(&result.listed_leads);
    print_messages(&result.messages);
    Ok(())
}

/// An empty filter value means "any".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn handle_show(ctx: &mut AppContext, reference: &str) -> Result<()> {
    let result = ctx.api.view_lead(reference)?;
    for dl in &result.listed_leads {
        print_lead_detail(Some(dl.index), &dl.lead);
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let config = ctx.api.config();
    let source = args
        .source
        .unwrap_or_else(|| config.default_source.clone());
    let mut input = LeadInput::capture(
        config,
        args.name,
        args.email,
        args.phone,
        args.product,
        source,
        args.note,
    );
    if let Some(priority) = args.priority {
        input = input.with_priority(priority.parse()?);
    }
    if let Some(value) = args.value {
        input = input.with_value(value);
    }
    if let Some(assignee) = args.assign {
        input = input.with_assignee(assignee);
    }

    let result = ctx.api.create_lead(input)?;
    finish_write(ctx, &result.affected_leads, &result.messages)
}

fn handle_update(ctx: &mut AppContext, reference: &str, patch: &LeadPatch) -> Result<()> {
    let id = ctx.api.resolve(reference)?;
    let result = ctx.api.update_lead(id, patch)?;
    finish_write(ctx, &result.affected_leads, &result.messages)
}

fn handle_move(ctx: &mut AppContext, reference: &str, stage: &str) -> Result<()> {
    let to: LeadStatus = stage.parse()?;
    let id = ctx.api.resolve(reference)?;
    let result = ctx.api.set_status(id, to)?;
    finish_write(ctx, &result.affected_leads, &result.messages)
}

fn handle_note(ctx: &mut AppContext, reference: &str, text: &str) -> Result<()> {
    let id = ctx.api.resolve(reference)?;
    let result = ctx.api.append_note(id, text)?;
    finish_write(ctx, &result.affected_leads, &result.messages)
}

fn handle_delete(ctx: &mut AppContext, reference: &str) -> Result<()> {
    let id = ctx.api.resolve(reference)?;
    let result = ctx.api.delete_lead(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_board(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.board()?;
    let positions = positions(ctx)?;
    if let Some(board) = &result.board {
        print_board(board, &result.stages, &positions);
    }
    Ok(())
}

fn handle_metrics(ctx: &mut AppContext, json: bool) -> Result<()> {
    let result = ctx.api.metrics()?;
    let Some(metrics) = &result.metrics else {
        return Ok(());
    };
    if json {
        return print_json(metrics);
    }
    print_metrics(metrics, &result.stages);
    Ok(())
}

fn handle_export(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.api.export_snapshot()?);
    Ok(())
}
