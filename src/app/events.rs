use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};

use crate::{
    error::PipelineError,
    pipeline::{PipelineStage, RunId, SolarReport},
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickRefresh,
    Input(Event),
    RunProgress {
        run: RunId,
        stage: PipelineStage,
    },
    RunFinished {
        run: RunId,
        outcome: Result<SolarReport, PipelineError>,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_refresh_task(tx: mpsc::Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        let period = Duration::from_secs(refresh_secs.max(1));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately; startup already ran the pipeline
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}
