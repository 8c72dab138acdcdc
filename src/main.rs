mod animator;
mod app;
mod catalog;
mod config;
mod error;
mod filter;
mod logging;
mod modal;
mod particles;
mod raster;
mod router;
mod ui;
mod view_model;

use animator::Animator;
use app::{App, InputMode};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use config::{Config, project_dirs};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use error::PortfolioError;
use log::{info, warn};
use modal::ModalOverlay;
use router::Page;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Poll timeout when no animation is driving redraws.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Lines moved by PgUp/PgDn in a detail panel.
const PAGE_SCROLL: u16 = 10;

/// Terminal explorer for a research portfolio
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Portfolio JSON file (defaults to the bundled sample)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page to open on start
    #[arg(short, long)]
    page: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run,
    /// Load the catalog and print how many records each category holds
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Validate => {
            let catalog = load_catalog(cli.catalog.as_deref()).unwrap_or_else(|e| fail(&e));
            println!("Catalog OK");
            for (category, count) in catalog.counts() {
                println!("  {:<14}{:>5}", category, count);
            }
        }
        Commands::Run => {
            let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| fail(&e));

            // Keep the handle alive until exit; dropping it stops the logger.
            let _logger = match project_dirs() {
                Some(dirs) => {
                    match logging::init_logging(&config.log_level, &dirs.data_local_dir().join("logs")) {
                        Ok(handle) => Some(handle),
                        Err(e) => {
                            eprintln!("Warning: Failed to start logging: {}", e.user_message());
                            None
                        }
                    }
                }
                None => None,
            };

            let catalog = load_catalog(cli.catalog.as_deref()).unwrap_or_else(|e| fail(&e));
            let mut app = App::new(catalog, ModalOverlay::default());

            if config.show_background {
                let (cols, rows) = crossterm::terminal::size()?;
                let animator = Animator::start(
                    cols,
                    rows,
                    config.animation.clone(),
                    config.frame_interval(),
                    &mut rand::thread_rng(),
                    Instant::now(),
                );
                info!(
                    "event=animation_start particles={} surface={:?} interval_ms={}",
                    animator.field().particles().len(),
                    animator.field().bounds(),
                    config.frame_interval_ms
                );
                app.background = Some(animator);
            }

            let start_page = cli.page.as_deref().unwrap_or(&config.default_page);
            app.navigate_to(start_page);

            // Init terminal
            let mut terminal = ratatui::init();

            // Main loop
            let result = run_app(&mut terminal, &mut app);

            if let Some(animator) = app.background.as_mut() {
                animator.stop();
                info!("event=animation_stop frames={}", animator.frames());
            }

            // Restore terminal
            ratatui::restore();
            info!("event=app_exit");

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, PortfolioError> {
    match path {
        Some(p) => Catalog::load(p),
        None => Catalog::bundled(),
    }
}

fn fail(e: &PortfolioError) -> ! {
    eprintln!("Error: {}", e.user_message());
    std::process::exit(1);
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(animator) = app.background.as_mut() {
            animator.tick(Instant::now());
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Wake for the next animation frame, or idle until input
        let timeout = app
            .background
            .as_ref()
            .filter(|animator| animator.is_running())
            .and_then(|animator| animator.until_next_frame(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(cols, rows) => {
                    if let Some(animator) = app.background.as_mut() {
                        animator.resize(cols, rows);
                    }
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.presenter.is_open() {
        handle_modal_key(app, key);
    } else if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
    } else {
        handle_page_key(app, key);
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.presenter.close(),
        KeyCode::Down | KeyCode::Char('j') => app.presenter.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.presenter.scroll_up(1),
        KeyCode::PageDown => app.presenter.scroll_down(PAGE_SCROLL),
        KeyCode::PageUp => app.presenter.scroll_up(PAGE_SCROLL),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.apply_search_input();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.apply_search_input();
        }
        _ => {}
    }
}

fn handle_page_key(app: &mut App, key: KeyEvent) {
    let page = app.current_page();
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Tab => {
            app.navigate(page.map_or(Page::Home, Page::next));
        }
        KeyCode::BackTab => {
            app.navigate(page.map_or(Page::Home, Page::prev));
        }
        KeyCode::Char(c @ '1'..='8') => {
            let index = usize::from(c as u8 - b'1');
            app.navigate(Page::ALL[index]);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if page == Some(Page::Bio) {
                app.scroll_down();
            } else {
                app.select_next();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if page == Some(Page::Bio) {
                app.scroll_up();
            } else {
                app.select_prev();
            }
        }
        KeyCode::Char('g') => app.select_first(),
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => app.show_selected_detail(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('t') if page == Some(Page::Episodes) => cycle_dimension(app, Page::Episodes),
        KeyCode::Char('c') if page == Some(Page::Awards) => cycle_dimension(app, Page::Awards),
        KeyCode::Esc => app.clear_narrowing(),
        KeyCode::Char('o') => {
            if let Some(link) = selected_link(app) {
                app.status_msg = match Command::new("xdg-open")
                    .arg(&link)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                {
                    Ok(_) => format!("Opening: {}", link),
                    Err(e) => {
                        warn!("event=open_link_failed url={} error={}", link, e);
                        format!("Link: {} (no browser available)", link)
                    }
                };
            }
        }
        KeyCode::Char('y') => {
            if let Some(link) = selected_link(app) {
                app.status_msg = if copy_to_clipboard(&link) {
                    format!("Copied: {}", link)
                } else {
                    format!("Link: {} (clipboard not available)", link)
                };
            }
        }
        _ => {}
    }
}

fn cycle_dimension(app: &mut App, page: Page) {
    if let Err(e) = app.cycle_dimension(page) {
        app.status_msg = e.to_string();
    }
}

fn selected_link(app: &mut App) -> Option<String> {
    let link = app.selected_card().and_then(|card| card.link()).map(str::to_string);
    if link.is_none() {
        app.status_msg = "This card has no link".to_string();
    }
    link
}

/// Pipe `text` into the first clipboard tool that starts: xclip, then wl-copy.
fn copy_to_clipboard(text: &str) -> bool {
    let candidates: [(&str, &[&str]); 2] = [("xclip", &["-selection", "clipboard"]), ("wl-copy", &[])];
    for (program, args) in candidates {
        let Ok(mut child) = Command::new(program).args(args).stdin(Stdio::piped()).spawn() else {
            continue;
        };
        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(text.as_bytes());
        }
        let _ = child.wait();
        return true;
    }
    false
}
