//! Command line entry point for the org chart engine
//!
//! Opens an edit session against a file data directory, or against a remote
//! service when a base URL is configured, and runs one command on it.

use clap::{Parser, Subcommand};

use orgchart::core::renderer::{paginate, visible_rows, VisibleRow};
use orgchart::services::{FileRepository, RemoteContactDirectory, RemoteRepository, StaticContactDirectory};
use orgchart::{ContactDirectory, EditSession, PositionRepository, SearchFilter, SessionConfig};
use shared::{logging, CompanyId, ContactId, Department, Level, PositionId};

/// Inspect and edit organization charts
#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Renders, validates and edits company org charts")]
pub struct Args {
    /// Company whose chart to open
    #[arg(long)]
    pub company: String,

    /// Directory of chart documents (overrides ORGCHART_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Base URL of the chart service (overrides ORGCHART_REMOTE_URL)
    #[arg(long)]
    pub remote_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the chart as an indented outline
    Render {
        /// Expand every position instead of the first two levels
        #[arg(long)]
        expand_all: bool,

        /// Only show positions matching this text, plus their managers
        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        department: Option<Department>,

        /// Level 1 (C-Level) to 5 (Individual Contributor)
        #[arg(long)]
        level: Option<i64>,

        #[arg(long, default_value = "1")]
        page: usize,

        #[arg(long, default_value = "50")]
        page_size: usize,
    },
    /// Print chart statistics as JSON
    Stats,
    /// Check the stored chart and report level inversions
    Validate,
    /// Delete a position, promoting its reports
    Delete {
        #[arg(long)]
        id: PositionId,
    },
    /// Move a position under a new manager, or make it a root
    Move {
        #[arg(long)]
        id: PositionId,

        /// New manager; omit to make the position a root
        #[arg(long)]
        parent: Option<PositionId>,
    },
    /// Put a contact into a position
    Assign {
        #[arg(long)]
        id: PositionId,

        #[arg(long)]
        contact: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = SessionConfig::from_env()?;
    if let Some(dir) = &args.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(url) = &args.remote_url {
        config = config.with_remote_url(url);
    }
    if let Some(level) = &args.log_level {
        config = config.with_log_level(level)?;
    }
    logging::init_tracing_with_level(Some(&config.log_level));

    let company_id = CompanyId::new(args.company);
    match config.remote_url.clone() {
        Some(url) => {
            let repository = RemoteRepository::new(&url).with_chart_name_template(config.chart_name_template.clone());
            let directory = RemoteContactDirectory::new(&url);
            let session = EditSession::open(repository, directory, config, company_id).await?;
            run(session, args.command).await
        }
        None => {
            let repository = FileRepository::with_base_dir(config.data_dir.clone());
            let session = EditSession::open(repository, StaticContactDirectory::default(), config, company_id).await?;
            run(session, args.command).await
        }
    }
}

async fn run<R, D>(mut session: EditSession<R, D>, command: Command) -> anyhow::Result<()>
where
    R: PositionRepository,
    D: ContactDirectory,
{
    match command {
        Command::Render {
            expand_all,
            query,
            department,
            level,
            page,
            page_size,
        } => {
            if expand_all {
                session.expand_all();
            }
            let filter = SearchFilter {
                department,
                level: level.map(Level::new).transpose()?,
            };
            let forest = session.search(query.as_deref().unwrap_or(""), &filter)?;
            let page = paginate(visible_rows(&forest), page, page_size)?;
            for row in &page.rows {
                println!("{}", outline_row(row));
            }
            println!(
                "-- page {}/{} ({} rows)",
                page.page,
                page.total_pages.max(1),
                page.total_rows
            );
        }
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&session.stats()?)?);
        }
        Command::Validate => {
            let store = session.current();
            // Load already rejected structural problems; only soft ones remain
            let violations = store.level_violations();
            for v in &violations {
                println!(
                    "level inversion: {} ({}) reports to {} ({})",
                    v.child,
                    v.child_level.label(),
                    v.parent,
                    v.parent_level.label()
                );
            }
            println!("{} positions valid, {} level inversions", store.len(), violations.len());
        }
        Command::Delete { id } => {
            session.delete_position(&id)?;
            save(&mut session).await?;
        }
        Command::Move { id, parent } => {
            session.move_position(&id, parent.as_ref())?;
            save(&mut session).await?;
        }
        Command::Assign { id, contact } => {
            if let Some(previous) = session.assign_occupant(&id, ContactId::new(contact))? {
                println!("{previous} is now vacant");
            }
            save(&mut session).await?;
        }
    }
    Ok(())
}

async fn save<R, D>(session: &mut EditSession<R, D>) -> anyhow::Result<()>
where
    R: PositionRepository,
    D: ContactDirectory,
{
    let ack = session.save().await?;
    println!("saved {} positions at {}", ack.saved_positions, ack.saved_at.to_rfc3339());
    Ok(())
}

fn outline_row(row: &VisibleRow<'_>) -> String {
    let node = row.node;
    let marker = match (node.has_children(), node.is_expanded) {
        (false, _) => "•",
        (true, true) => "▾",
        (true, false) => "▸",
    };
    let occupant = node
        .position
        .occupant_id
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "vacant".to_string());
    let inversion = if node.level_inversion { " !level" } else { "" };
    format!(
        "{}{} {} [{}] {} ({}) id={} reports={}{}",
        "  ".repeat(row.depth),
        marker,
        node.position.title,
        node.position.department,
        node.style.label,
        occupant,
        node.position.id,
        node.descendant_count,
        inversion
    )
}
