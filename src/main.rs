use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use parkwatch::logging::{self, LogTarget};
use parkwatch::ui::spots::format_value;
use parkwatch::{
    events, export, ui, App, DataSource, FileSource, HttpSource, LotData, Settings, Thresholds,
};

/// Payload file watched when neither a URL nor a file is given.
const DEFAULT_FEED_FILE: &str = "feed.json";

/// How often the TUI polls its source. HTTP fetch timing is owned by the worker.
const UI_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "parkwatch")]
#[command(about = "Terminal viewer for parking sensor feeds")]
struct Args {
    /// Feed URL to poll (overrides `feed_url` from the config)
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Saved feed payload to watch instead of a URL [default: feed.json]
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (defaults to ./parkwatch.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interval between fetches or file checks (e.g. "30s", "1m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Time allowed to connect (e.g. "15s")
    #[arg(long)]
    connect_timeout: Option<String>,

    /// Time allowed to receive the response (e.g. "10s")
    #[arg(long)]
    read_timeout: Option<String>,

    /// Sensor value at or above which a spot is occupied
    #[arg(long)]
    occupied_at: Option<f64>,

    /// Fetch once, print the spots and exit
    #[arg(long)]
    once: bool,

    /// Print JSON instead of a table (with --once)
    #[arg(long, requires = "once")]
    json: bool,

    /// Export current state to JSON file and exit
    #[arg(short, long, conflicts_with = "once")]
    export: Option<PathBuf>,

    /// Append logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Where readings come from.
#[derive(Debug)]
enum FeedTarget {
    Url,
    File(PathBuf),
}

fn main() -> Result<()> {
    let args = Args::parse();

    let interactive = !args.once && args.export.is_none();
    let log_target = match (interactive, args.log_file.as_deref()) {
        (false, _) => LogTarget::Stderr,
        (true, Some(path)) => LogTarget::File(path),
        (true, None) => LogTarget::Off,
    };
    logging::init(log_target)?;

    let settings = load_settings(&args)?;
    let target = feed_target(&args, &settings);
    info!(?target, "starting");

    if args.once {
        let data = load_once(&target, &settings)?;
        return print_once(&data, args.json);
    }

    if let Some(ref export_path) = args.export {
        let data = load_once(&target, &settings)?;
        export::write_export(export_path, &data)?;
        println!("Exported lot state to: {}", export_path.display());
        return Ok(());
    }

    let refresh = settings.refresh_interval()?;
    match target {
        FeedTarget::Url => {
            let source = HttpSource::spawn(settings.feed_client()?, refresh)
                .context("starting fetch worker")?;
            run_tui(Box::new(source), settings.thresholds(), UI_POLL_INTERVAL)
        }
        FeedTarget::File(path) => {
            let source = FileSource::with_defaults(path, settings.spots.clone());
            run_tui(Box::new(source), settings.thresholds(), refresh)
        }
    }
}

/// Layer command-line flags over the file and environment settings.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(ref url) = args.url {
        settings.feed_url = Some(url.clone());
    }
    if let Some(ref refresh) = args.refresh {
        settings.refresh = refresh.clone();
    }
    if let Some(ref timeout) = args.connect_timeout {
        settings.connect_timeout = timeout.clone();
    }
    if let Some(ref timeout) = args.read_timeout {
        settings.read_timeout = timeout.clone();
    }
    if let Some(occupied_at) = args.occupied_at {
        settings.occupied_at = occupied_at;
    }

    Ok(settings)
}

/// An explicit `--file` wins, then a configured URL, then the default file.
fn feed_target(args: &Args, settings: &Settings) -> FeedTarget {
    match (&args.file, &settings.feed_url) {
        (Some(path), _) => FeedTarget::File(path.clone()),
        (None, Some(_)) => FeedTarget::Url,
        (None, None) => FeedTarget::File(PathBuf::from(DEFAULT_FEED_FILE)),
    }
}

fn load_once(target: &FeedTarget, settings: &Settings) -> Result<LotData> {
    let thresholds = settings.thresholds();
    match target {
        FeedTarget::Url => {
            let reading = settings.feed_client()?.fetch()?;
            Ok(LotData::from_reading(reading, &thresholds))
        }
        FeedTarget::File(path) => LotData::load(path, &settings.spots, &thresholds),
    }
}

fn print_once(data: &LotData, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&export::export_json(data))?);
        return Ok(());
    }

    println!("entry {} at {}", data.entry_id, data.created_at);
    for spot in &data.spots {
        println!(
            "{:<24} {:>8}  {}",
            spot.label,
            format_value(spot.value),
            spot.status.symbol()
        );
    }
    println!(
        "{} free, {} occupied",
        data.free_count(),
        data.occupied_count()
    );
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    thresholds: Thresholds,
    poll_interval: Duration,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before the panic message prints
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, thresholds);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, poll_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    poll_interval: Duration,
) -> Result<()> {
    let mut last_poll = Instant::now();

    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                        .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::draw(frame, app);
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    events::handle_mouse_event(app, mouse, ui::TABLE_HEADER_ROW);
                }
                // Redrawn on the next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_poll.elapsed() >= poll_interval {
            app.reload_data();
            last_poll = Instant::now();
        }
    }

    Ok(())
}
