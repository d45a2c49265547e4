pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use app::{
    events::{AppEvent, spawn_input_task},
    settings::{Settings, load_settings},
    state::{AppMode, AppState},
};
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use pipeline::{ResolutionPipeline, SolarReport};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    if cli.one_shot {
        logging::init_stderr_logging()?;
    } else if let Some(path) = cli.log_file.as_deref() {
        logging::init_file_logging(path)?;
    }

    let settings = load_settings(&cli)?;
    if cli.one_shot {
        return run_one_shot(&cli, &settings).await;
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, &cli, &settings).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(settings, cli)?;

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

async fn run_one_shot(cli: &Cli, settings: &Settings) -> Result<()> {
    let request = cli
        .initial_request()
        .context("--one-shot needs a LOCATION, --lat/--lon or --here")?;
    let pipeline = ResolutionPipeline::from_settings(settings)?;
    let report = pipeline.execute(request, |_| {}).await?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &report).context("serializing report failed")?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_plain(&report))?;
    }
    Ok(())
}

#[must_use]
pub fn render_plain(report: &SolarReport) -> String {
    let mut out = format!("{}\n", report.label);
    for section in &report.sections {
        out.push_str(&format!("{:<18}{}\n", section.title, section.content));
    }
    out
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
