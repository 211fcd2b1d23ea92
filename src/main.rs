// Release Calendar
// Command-line entry point

mod cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use release_calendar::models::ticket::Priority;
use release_calendar::models::ui::ViewGranularity;

use cmd::calendar::CalendarArgs;
use cmd::ticket::NewTicket;

#[derive(Parser)]
#[command(name = "release-calendar", about = "Ticket tracking and release scheduling")]
struct Cli {
    /// Config file (default: per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ticket database, overriding the config
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the release calendar
    Calendar {
        /// Reference date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// week or month
        #[arg(long)]
        view: Option<ViewGranularity>,
        /// Only show releases for this client
        #[arg(long)]
        client: Option<String>,
        /// Merge the partner's external calendar
        #[arg(long)]
        external: bool,
    },
    /// Move a release to another day
    Move {
        /// Entry id as shown on the calendar, e.g. <ticket id>:TEST
        drag_id: String,
        /// Day the entry is currently on (YYYY-MM-DD)
        from: String,
        /// Day to move it to (YYYY-MM-DD)
        to: String,
    },
    /// Manage tickets
    Ticket {
        #[command(subcommand)]
        command: TicketCommands,
    },
    /// Tickets grouped by board column
    Board {
        #[arg(long)]
        sprint: Option<String>,
    },
    /// Recent releases and contact alerts
    Dashboard,
}

#[derive(Subcommand)]
enum TicketCommands {
    /// Create a ticket
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Low, Medium, High or Urgent
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        sprint: Option<String>,
        #[arg(long)]
        test_release: Option<String>,
        #[arg(long)]
        production_release: Option<String>,
        #[arg(long)]
        tag_number: Option<String>,
        #[arg(long)]
        application: Option<String>,
        #[arg(long)]
        activity_type: Option<String>,
    },
    /// List every ticket
    List,
    /// Show one ticket
    Show { id: String },
    /// Change a ticket's status (a status name or a board column id)
    Status { id: String, status: String },
    /// Record contact with the client
    Ping { id: String },
    /// Delete a ticket
    Delete { id: String },
    /// Search titles and client names
    Search { query: String },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let ctx = cmd::AppContext::load(cli.config.as_deref(), cli.database.as_deref())?;

    log::info!("Starting release-calendar");

    let result = run(&ctx, cli.command);
    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    result
}

fn run(ctx: &cmd::AppContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Calendar {
            date,
            view,
            client,
            external,
        } => cmd::calendar::run(
            ctx,
            CalendarArgs {
                date: date.as_deref(),
                view,
                client: client.as_deref(),
                external,
            },
        ),
        Commands::Move { drag_id, from, to } => cmd::move_release::run(ctx, &drag_id, &from, &to),
        Commands::Ticket { command } => run_ticket(ctx, command),
        Commands::Board { sprint } => cmd::board::run(ctx, sprint.as_deref()),
        Commands::Dashboard => cmd::dashboard::run(ctx),
    }
}

fn run_ticket(ctx: &cmd::AppContext, command: TicketCommands) -> anyhow::Result<()> {
    match command {
        TicketCommands::Add {
            title,
            description,
            client,
            status,
            priority,
            assignee,
            sprint,
            test_release,
            production_release,
            tag_number,
            application,
            activity_type,
        } => cmd::ticket::add(
            ctx,
            NewTicket {
                title,
                description,
                client,
                status,
                priority,
                assignee,
                sprint,
                test_release,
                production_release,
                tag_number,
                application,
                activity_type,
            },
        ),
        TicketCommands::List => cmd::ticket::list(ctx),
        TicketCommands::Show { id } => cmd::ticket::show(ctx, &id),
        TicketCommands::Status { id, status } => cmd::ticket::set_status(ctx, &id, &status),
        TicketCommands::Ping { id } => cmd::ticket::ping(ctx, &id),
        TicketCommands::Delete { id } => cmd::ticket::delete(ctx, &id),
        TicketCommands::Search { query } => cmd::ticket::search(ctx, &query),
    }
}
