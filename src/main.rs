mod app;
mod config;
mod controller;
mod detail;
mod item;
mod loader;
mod markup;
mod price;
mod sort;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Args, Parser, Subcommand};
use config::{CatalogConfig, SOURCE_ENV};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use item::Category;
use loader::CatalogSource;
use markup::HtmlRenderer;
use sort::{SortPolicy, sort_items};
use std::io::Write;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Browse game item catalogs served as static JSON
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: SourceOptions,
}

#[derive(Args)]
struct SourceOptions {
    /// Base URL or directory holding <category>.json files
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Item ordering
    #[arg(long, value_enum, global = true)]
    sort: Option<SortPolicy>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run,
    /// Write a standalone HTML page for one category
    Render {
        #[arg(short = 'k', long, value_enum)]
        category: Category,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the sorted items of one category
    List {
        #[arg(short = 'k', long, value_enum)]
        category: Category,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CatalogConfig::load(cli.options.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(
            cli.options.source,
            std::env::var(SOURCE_ENV).ok(),
            cli.options.sort,
        );

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let _guard = setup_file_logging()?;
            tracing::info!(source = %config.source, policy = config.sort_policy.label(), "starting explorer");
            run(config).await
        }
        Commands::Render { category, output } => {
            setup_stderr_logging();
            let items = load_sorted(&config, category).await?;
            let html = HtmlRenderer::new(config.asset_base.as_str()).page(category, &items);
            match output {
                Some(path) => std::fs::write(&path, html)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => std::io::stdout().write_all(html.as_bytes())?,
            }
            Ok(())
        }
        Commands::List { category } => {
            setup_stderr_logging();
            let items = load_sorted(&config, category).await?;
            let mut out = std::io::stdout().lock();
            for item in &items {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    item.id.as_deref().unwrap_or("-"),
                    item.kind.as_deref().unwrap_or("-"),
                    item.name
                )?;
            }
            Ok(())
        }
    }
}

async fn load_sorted(config: &CatalogConfig, category: Category) -> Result<Vec<item::Item>> {
    let source = CatalogSource::from_location(&config.source, config.request_timeout())?;
    let mut items = source
        .load(category)
        .await
        .with_context(|| format!("failed to load {}", category.key()))?;
    sort_items(&mut items, config.sort_policy);
    Ok(items)
}

async fn run(config: CatalogConfig) -> Result<()> {
    let source = CatalogSource::from_location(&config.source, config.request_timeout())?;
    let mut app = App::new(source, config.sort_policy);

    // Init terminal
    let mut terminal = ratatui::init();

    // Main loop; setup failures still reach the restore below
    let result = start_explorer(&mut terminal, &mut app).await;

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    if let Err(ref e) = result {
        tracing::error!(error = %e, "explorer exited with error");
    }
    result
}

async fn start_explorer(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    run_app(terminal, app).await
}

async fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        app.poll_loads();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so finished loads show up promptly
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }
        tokio::task::yield_now().await;
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
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

    if app.modal().is_some() {
        handle_modal_key(app, key);
    } else {
        handle_grid_key(app, key);
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
        KeyCode::Char('g') => app.cursor_first(),
        KeyCode::Char('G') => app.cursor_last(),
        KeyCode::Enter => app.select_cursor(),
        KeyCode::Char('1') => app.start_load(Category::Projectiles),
        KeyCode::Char('2') => app.start_load(Category::Artifacts),
        KeyCode::Char('3') => app.start_load(Category::Trinkets),
        KeyCode::Tab => app.next_category(),
        KeyCode::BackTab => app.prev_category(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('s') => app.cycle_sort_policy(),
        _ => {}
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        // Browse neighbours without closing: the modal content is replaced
        KeyCode::Left | KeyCode::Char('h') => {
            app.move_cursor(-1, 0);
            app.select_cursor();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.move_cursor(1, 0);
            app.select_cursor();
        }
        KeyCode::Enter => app.select_cursor(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let modal_open = app.modal().is_some();
    match mouse.kind {
        MouseEventKind::Moved if !modal_open => {
            if let Some(index) = ui::grid::tile_at(app, mouse.column, mouse.row) {
                app.hover(index);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if modal_open {
                if ui::modal::is_backdrop(app, mouse.column, mouse.row) {
                    app.backdrop();
                }
            } else if let Some(index) = ui::grid::tile_at(app, mouse.column, mouse.row) {
                app.hover(index);
                app.select(index);
            }
        }
        MouseEventKind::ScrollDown if modal_open => app.scroll_down(),
        MouseEventKind::ScrollUp if modal_open => app.scroll_up(),
        _ => {}
    }
}

/// Log to a file in the cache directory; the TUI owns the terminal.
fn setup_file_logging() -> Result<WorkerGuard> {
    let log_dir = config::project_dirs()?.cache_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "catalog-explorer.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/catalog-explorer.log", log_dir.display());
    Ok(guard)
}

fn setup_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
