use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::{sync::mpsc, task::AbortHandle};
use tracing::{Instrument, debug, info, info_span};

use crate::{
    app::{
        events::{AppEvent, start_refresh_task},
        settings::Settings,
    },
    cli::Cli,
    domain::solar::{LocationQuery, RenderSection},
    error::PipelineError,
    pipeline::{PipelineStage, ResolutionPipeline, RunId, RunRequest, RunSequence, SolarReport},
};

mod input;
mod runs;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Empty,
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
struct InFlightRun {
    run: RunId,
    request: RunRequest,
    abort: AbortHandle,
}

/// Dashboard controller: owns everything the view shows.
#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub stage: PipelineStage,
    pub sections: Vec<RenderSection>,
    pub report_label: Option<String>,
    pub last_error: Option<String>,
    pub selected_location: Option<LocationQuery>,
    pub search_open: bool,
    pub search_query: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub refresh_interval_secs: u64,
    initial_request: Option<RunRequest>,
    runs: RunSequence,
    in_flight: Option<InFlightRun>,
    pipeline: ResolutionPipeline,
}

impl AppState {
    pub fn new(settings: &Settings, cli: &Cli) -> Result<Self> {
        let pipeline = ResolutionPipeline::from_settings(settings)?;
        Ok(Self::with_pipeline(
            pipeline,
            settings.refresh_interval_secs,
            cli.initial_request(),
        ))
    }

    #[must_use]
    pub fn with_pipeline(
        pipeline: ResolutionPipeline,
        refresh_interval_secs: u64,
        initial_request: Option<RunRequest>,
    ) -> Self {
        Self {
            mode: AppMode::Empty,
            running: true,
            stage: PipelineStage::Idle,
            sections: Vec::new(),
            report_label: None,
            last_error: None,
            selected_location: None,
            search_open: initial_request.is_none(),
            search_query: String::new(),
            last_updated: None,
            refresh_interval_secs,
            initial_request,
            runs: RunSequence::default(),
            in_flight: None,
            pipeline,
        }
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.handle_bootstrap(tx),
            AppEvent::TickRefresh => self.handle_tick_refresh(tx),
            AppEvent::Input(input) => self.handle_input(input, tx).await?,
            AppEvent::RunProgress { run, stage } => self.handle_run_progress(run, stage),
            AppEvent::RunFinished { run, outcome } => self.handle_run_finished(run, outcome),
            AppEvent::Quit => {
                self.cancel_in_flight();
                self.mode = AppMode::Quit;
            }
        }
        Ok(())
    }

    fn handle_bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>) {
        start_refresh_task(tx.clone(), self.refresh_interval_secs);
        if let Some(request) = self.initial_request.take() {
            self.start_run(request, tx);
        }
    }

    fn handle_tick_refresh(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.in_flight.is_some() {
            debug!("refresh tick skipped, run in flight");
            return;
        }
        if let Some(query) = self.selected_location.clone() {
            self.start_run(RunRequest::Query(query), tx);
        }
    }

    #[must_use]
    pub fn run_in_flight(&self) -> Option<RunId> {
        self.in_flight.as_ref().map(|flight| flight.run)
    }

    /// Clears the error banner without touching displayed sections.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
        if self.mode == AppMode::Error {
            self.mode = if self.sections.is_empty() {
                AppMode::Empty
            } else {
                AppMode::Ready
            };
        }
    }

    #[must_use]
    pub fn status_line(&self) -> String {
        if self.in_flight.is_some() {
            return self.stage.describe().to_string();
        }
        match self.last_updated {
            Some(at) => format!("Updated {} UTC", at.format("%H:%M:%S")),
            None => "No data yet".to_string(),
        }
    }
}
