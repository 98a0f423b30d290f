use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use scry::app::{App, InputMode, Screen, StatusLevel};
use scry::config::{self, Endpoints};
use scry::domain::account::Network;
use scry::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use scry::ui;

#[derive(Debug, Parser)]
#[command(
    name = "scry",
    version,
    about = "Scry: a terminal viewer for blockchain account facts"
)]
struct Args {
    /// Ethereum HTTP JSON-RPC endpoint (e.g. http://localhost:8545)
    #[arg(long)]
    eth_rpc: Option<String>,

    /// Solana HTTP JSON-RPC endpoint (e.g. https://api.devnet.solana.com)
    #[arg(long)]
    sol_rpc: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();
    let endpoints = endpoints_from_args_and_config(&args, &config);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the runtime bridge
    let runtime = RuntimeBridge::new(endpoints.clone())?;

    let mut app = App::new();
    app.endpoints = endpoints;
    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    // Process runtime events; stale sequence numbers are dropped inside
    // the apply methods
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::LookupReady { seq, snapshot } => app.apply_lookup_success(seq, snapshot),
            RuntimeEvent::LookupFailed { seq, message } => app.apply_lookup_failure(seq, message),
        }
    }

    // Forward a pending lookup to the worker
    if let Some(request) = app.take_lookup_request() {
        let _ = runtime.send(RuntimeCommand::Lookup {
            seq: request.seq,
            network: request.network,
            address: request.address,
        });
    }
}

fn endpoints_from_args_and_config(args: &Args, config: &config::Config) -> Endpoints {
    let from_sources = |cli: &Option<String>, env_key: &str, file: &Option<String>, default: &str| {
        cli.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(env_key)
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .or_else(|| {
                file.as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| default.to_string())
    };

    Endpoints {
        ethereum: normalize_http_endpoint(&from_sources(
            &args.eth_rpc,
            "SCRY_ETHEREUM_RPC",
            &config.ethereum_rpc,
            config::DEFAULT_ETHEREUM_RPC,
        )),
        solana: normalize_http_endpoint(&from_sources(
            &args.sol_rpc,
            "SCRY_SOLANA_RPC",
            &config.solana_rpc,
            config::DEFAULT_SOLANA_RPC,
        )),
    }
}

fn normalize_http_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match (app.screen, app.input_mode) {
        (Screen::Home, _) => handle_home_key(app, key),
        (Screen::Lookup, InputMode::Editing) => handle_editing_key(app, key),
        (Screen::Lookup, InputMode::Normal) => handle_lookup_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Left | KeyCode::Char('h') => app.move_card_selection(false),
        KeyCode::Right | KeyCode::Char('l') => app.move_card_selection(true),
        KeyCode::Char('1') => app.select_network(Network::Ethereum),
        KeyCode::Char('2') => app.select_network(Network::Solana),
        KeyCode::Enter => {
            let network = app.selected_card();
            app.select_network(network);
        }
        _ => {}
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            if app.begin_lookup() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.input.push(ch);
        }
        _ => {}
    }
}

fn handle_lookup_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char('i') | KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Char('r') | KeyCode::Enter => {
            app.begin_lookup();
        }
        KeyCode::Char('y') => handle_copy_to_clipboard(app),
        KeyCode::Esc => app.back_home(),
        _ => {}
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;
    use scry::app::short_address;

    let Some(text) = app.display_address() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(&text).is_ok() {
                app.set_status(format!("Copied: {}", short_address(&text)), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
