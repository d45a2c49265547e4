use super::*;

impl AppState {
    /// Starts a pipeline run, superseding (and aborting) any run still in flight.
    pub fn start_run(&mut self, request: RunRequest, tx: &mpsc::Sender<AppEvent>) -> RunId {
        self.cancel_in_flight();

        let run = self.runs.begin();
        self.stage = PipelineStage::Idle;
        if self.sections.is_empty() {
            self.mode = AppMode::Loading;
        }

        let pipeline = self.pipeline.clone();
        let task_request = request.clone();
        let progress_tx = tx.clone();
        let result_tx = tx.clone();
        let span = info_span!("run", run = run.get(), request = ?task_request);
        let handle = tokio::spawn(
            async move {
                let on_stage = move |stage| {
                    let _ = progress_tx.try_send(AppEvent::RunProgress { run, stage });
                };
                let outcome = pipeline.execute(task_request, on_stage).await;
                let _ = result_tx.send(AppEvent::RunFinished { run, outcome }).await;
            }
            .instrument(span),
        );

        info!(run = run.get(), "run started");
        self.in_flight = Some(InFlightRun {
            run,
            request,
            abort: handle.abort_handle(),
        });
        run
    }

    pub(crate) fn cancel_in_flight(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            debug!(run = flight.run.get(), "aborting superseded run");
            flight.abort.abort();
        }
    }

    pub(crate) fn handle_run_progress(&mut self, run: RunId, stage: PipelineStage) {
        if self.runs.is_current(run) && self.in_flight.is_some() {
            self.stage = stage;
        }
    }

    pub(crate) fn handle_run_finished(
        &mut self,
        run: RunId,
        outcome: Result<SolarReport, PipelineError>,
    ) {
        if !self.runs.is_current(run) {
            debug!(run = run.get(), "discarding result of superseded run");
            return;
        }
        let request = self
            .in_flight
            .take()
            .filter(|flight| flight.run == run)
            .map(|flight| flight.request);

        match outcome {
            Ok(report) => self.apply_report(report, request.as_ref()),
            Err(err) => self.apply_failure(&err),
        }
    }

    fn apply_report(&mut self, report: SolarReport, request: Option<&RunRequest>) {
        // only a successful run becomes the refresh target
        match request {
            Some(RunRequest::Query(query)) => self.selected_location = Some(query.clone()),
            Some(RunRequest::CurrentPosition) => {
                self.selected_location = Some(LocationQuery::Coordinates(report.coordinate));
            }
            None => {}
        }
        self.sections = report.sections;
        self.report_label = Some(report.label);
        self.last_error = None;
        self.last_updated = Some(Utc::now());
        self.stage = PipelineStage::Done;
        self.mode = AppMode::Ready;
    }

    fn apply_failure(&mut self, err: &PipelineError) {
        self.last_error = Some(err.to_string());
        self.stage = PipelineStage::Errored;
        self.mode = AppMode::Error;
    }
}
