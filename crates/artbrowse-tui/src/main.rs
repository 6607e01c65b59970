use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use artbrowse_core::CollectionSource;

mod action;
mod app;
mod backend;
mod config_file;
mod export;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;
use export::SelectionFormat;
use model::settings::Settings;
use theme::{Theme, ThemeName};

/// artbrowse: page through a remote collection and pick rows across pages.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Collection endpoint (GET <endpoint>?page=N)
    #[arg(long)]
    endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeName>,

    /// Config file to use instead of the platform/CWD cascade
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the selected records to stdout on exit
    #[arg(long, value_enum)]
    print_selection: Option<SelectionFormat>,
}

/// Log to `<cache_dir>/artbrowse/artbrowse.log`; the terminal belongs to the UI.
/// The returned guard flushes the writer on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::cache_dir()?.join("artbrowse");
    std::fs::create_dir_all(&dir).ok()?;
    let file_appender = tracing_appender::rolling::never(&dir, "artbrowse.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "artbrowse=info,artbrowse_core=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

/// Resolve settings from CLI flags > env vars > config file > defaults.
fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let file_cfg = match &args.config {
        Some(path) => config_file::read_config(path)?,
        None => config_file::load_config(),
    };

    let mut settings = Settings::default();
    config_file::apply_to_settings(&file_cfg, &mut settings);

    if let Ok(endpoint) = std::env::var("ARTBROWSE_ENDPOINT")
        && !endpoint.is_empty()
    {
        settings.endpoint = endpoint;
    }
    if let Some(secs) = std::env::var("ARTBROWSE_TIMEOUT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        settings.timeout_secs = secs.max(1);
    }

    if let Some(ref endpoint) = args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(secs) = args.timeout {
        settings.timeout_secs = secs.max(1);
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }

    if settings.endpoint.trim().is_empty() {
        anyhow::bail!("collection endpoint must not be empty");
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging();

    let settings = resolve_settings(&args)?;
    let config = settings.core_config();
    let client = config.build_client()?;
    let source: Arc<dyn CollectionSource> = Arc::new(config.source());
    tracing::info!(
        endpoint = %config.endpoint,
        timeout_secs = config.timeout.as_secs(),
        "starting"
    );

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(std::time::Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(Theme::from_name(settings.theme), source.name());

    // Set up backend channels
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run(
        cmd_rx,
        event_tx,
        Arc::clone(&source),
        client,
        config.timeout,
        cancel.clone(),
    ));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    app.start();

    // Main event loop
    let tick_rate = settings.tick_rate();

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            Some(backend_event) = event_rx.recv() => {
                app.handle_backend_event(backend_event);
                while let Ok(evt) = event_rx.try_recv() {
                    app.handle_backend_event(evt);
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            break;
        }
    }

    cancel.cancel();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    tracing::info!(selected = app.browser.selection().len(), "exiting");
    if let Some(format) = args.print_selection {
        export::write_selection(&mut io::stdout().lock(), app.browser.selection(), format)?;
    }

    Ok(())
}
