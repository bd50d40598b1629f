use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::{miette, IntoDiagnostic};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use dm_copilot::config::AppConfig;
use dm_copilot::core::campaign::{builtin_templates, CampaignDraft, CampaignStore};
use dm_copilot::core::llm::CoPilot;
use dm_copilot::core::logging;
use dm_copilot::tui::AppState;

/// DM Co-Pilot - an AI companion at the game table.
#[derive(Parser, Debug)]
#[command(name = "dm-copilot", version, about, long_about = None)]
struct Cli {
    /// Name of the campaign to run.
    #[arg(default_value = "The Obsidian Spires")]
    name: String,

    /// Let the AI run the table while you play.
    #[arg(long)]
    ai_dm: bool,

    /// Start from a published adventure instead (see --list-templates).
    #[arg(long, value_name = "ID", conflicts_with = "ai_dm")]
    template: Option<String>,

    /// Print the available adventures and exit.
    #[arg(long)]
    list_templates: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    if cli.list_templates {
        for template in builtin_templates() {
            println!("{:<4} {} ({})\n     {}", template.id, template.name, template.difficulty, template.description);
        }
        return Ok(());
    }

    let _log_guard = logging::init_tui();
    log::info!("{} v{} starting", dm_copilot::NAME, dm_copilot::VERSION);

    let config = AppConfig::load();
    let copilot = CoPilot::from_config(&config.ai);

    let mut rng = rand::thread_rng();
    let campaign = match cli.template.as_deref() {
        Some(id) => builtin_templates()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| miette!(help = "run with --list-templates to see them", "no adventure with id '{id}'"))?
            .instantiate(&mut rng),
        None => CampaignDraft::new(cli.name)
            .with_ai_dm(cli.ai_dm)
            .build(&mut rng)
            .into_diagnostic()?,
    };
    log::info!("Opening campaign '{}' ({})", campaign.name, campaign.id);
    let campaign_id = campaign.id.clone();
    let store = CampaignStore::with_campaigns([campaign]);

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(event_rx, event_tx, store, campaign_id, copilot, &config.data_dir());
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    log::info!("Shutting down");
    result.into_diagnostic()
}
