use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quake_map::app::App;
use quake_map::chart::SymbolMap;
use quake_map::config::{Args, DataSettings, LogSettings, Settings};
use quake_map::{data, ui};

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::resolve(&args).context("failed to load settings")?;
    init_logging(&settings.log)?;
    let chart = build_chart(&settings)?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, chart, &settings.data);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// The terminal belongs to the map, so logs go to a file
fn init_logging(log: &LogSettings) -> Result<()> {
    if let Some(dir) = log.file.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.file)
        .with_context(|| format!("failed to open log file {}", log.file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Chart configured from settings, no data yet
fn build_chart(settings: &Settings) -> Result<SymbolMap> {
    let chart_settings = &settings.chart;
    let mut chart = SymbolMap::new();
    chart
        .set_projection(chart_settings.projection()?)
        .set_radius(chart_settings.radius_scale())
        .set_color(chart_settings.color_scale()?)
        .set_value(chart_settings.value_accessor()?);
    Ok(chart)
}

/// Feed every input file to the chart; failures are returned for the banner
fn load_inputs(chart: &mut SymbolMap, paths: &DataSettings) -> Vec<anyhow::Error> {
    let mut errors = Vec::new();

    if let Some(path) = &paths.regions {
        match data::load_region_names(path) {
            Ok(records) => {
                chart.set_lookup(records);
            }
            Err(e) => errors.push(anyhow::Error::new(e).context("region names")),
        }
    }

    let landmass = paths
        .landmass
        .as_deref()
        .filter(|p| p.exists())
        .map(data::load_landmass);
    match landmass {
        Some(Ok(landmass)) if !landmass.is_empty() => {
            chart.set_map(landmass);
        }
        Some(Err(e)) => {
            errors.push(anyhow::Error::new(e).context("landmass"));
            chart.set_map(data::simple_world());
        }
        _ => {
            info!("no landmass file, using built-in continents");
            chart.set_map(data::simple_world());
        }
    }

    if let Some(path) = &paths.quakes {
        match data::load_quakes(path) {
            Ok(records) => {
                info!(records = records.len(), path = %path.display(), "loaded quakes");
                chart.set_values(records);
            }
            Err(e) => errors.push(anyhow::Error::new(e).context("quake records")),
        }
    }

    errors
}

/// Handle mouse events for drag rotation and hover
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            app.mouse_move(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, mut chart: SymbolMap, paths: &DataSettings) -> Result<()> {
    let errors = load_inputs(&mut chart, paths);

    let size = terminal.size()?;
    let mut app = App::new(chart, size.width, size.height);
    for error in &errors {
        app.report(error);
    }
    app.draw();

    // Main loop; the scene only changes in response to events
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                KeyCode::Left | KeyCode::Char('h') => app.rotate_left(),
                KeyCode::Right | KeyCode::Char('l') => app.rotate_right(),
                KeyCode::Char('r') | KeyCode::Char('0') => app.reset(),
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    info!("quit");
    Ok(())
}
