//! Re-runs the standings lookup whenever the selected league changes.
//!
//! A newer selection cancels the fetch still running for an older one, so the
//! published display always belongs to the latest selection.

use crate::core::service::StandingsService;
use crate::core::{StandingsSource, StandingsView};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueDisplay {
    pub league: String,
    pub view: StandingsView,
}

pub struct SelectionDriver<S: StandingsSource> {
    service: Arc<StandingsService<S>>,
}

impl<S: StandingsSource + 'static> SelectionDriver<S> {
    pub fn new(service: Arc<StandingsService<S>>) -> Self {
        Self { service }
    }

    /// Runs until the selection sender is dropped. The receiver yields one
    /// display per completed, non-superseded selection.
    pub fn spawn(
        self,
        selections: watch::Receiver<Option<String>>,
    ) -> (watch::Receiver<Option<LeagueDisplay>>, JoinHandle<()>) {
        let (displays, display_rx) = watch::channel(None);
        let handle = tokio::spawn(run(self.service, selections, displays));
        (display_rx, handle)
    }
}

async fn run<S: StandingsSource>(
    service: Arc<StandingsService<S>>,
    mut selections: watch::Receiver<Option<String>>,
    displays: watch::Sender<Option<LeagueDisplay>>,
) {
    loop {
        let selected = selections.borrow_and_update().clone();

        if let Some(league) = selected {
            let fetch = service.standings_for(&league);
            tokio::pin!(fetch);

            tokio::select! {
                view = &mut fetch => {
                    if !publish(&displays, league.clone(), view) {
                        return;
                    }
                }
                changed = selections.changed() => match changed {
                    Ok(()) => {
                        tracing::debug!("Selection changed, dropping fetch for {}", league);
                        continue;
                    }
                    Err(_) => {
                        // Sender gone: let the last selection finish.
                        let view = fetch.await;
                        publish(&displays, league.clone(), view);
                        return;
                    }
                },
            }
        }

        if selections.changed().await.is_err() {
            tracing::debug!("Selection channel closed");
            return;
        }
    }
}

fn publish(
    displays: &watch::Sender<Option<LeagueDisplay>>,
    league: String,
    view: StandingsView,
) -> bool {
    displays.send(Some(LeagueDisplay { league, view })).is_ok()
}
