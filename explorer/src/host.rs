//! Event loop driving one widget instance

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};
use crate::chart::ChartRenderer;
use crate::effects::EffectRunner;
use crate::error::Result;
use crate::range::TimeRange;
use crate::store::{BlocksState, StatisticsStore};
use crate::widget::{GlobalHashRate, WidgetPhase};

/// Runs the widget on a single task. Range selections and store updates are
/// handled one at a time, so the widget is never touched concurrently.
pub struct WidgetHost<R: ChartRenderer> {
    widget: GlobalHashRate,
    runner: EffectRunner,
    store: Arc<StatisticsStore>,
    renderer: R,
}

impl<R: ChartRenderer> WidgetHost<R> {
    pub fn new(
        widget: GlobalHashRate,
        runner: EffectRunner,
        store: Arc<StatisticsStore>,
        renderer: R,
    ) -> Self {
        Self { widget, runner, store, renderer }
    }

    /// Mounts the widget and processes events until `selections` closes,
    /// then waits for the outstanding fetch to settle before unmounting.
    /// Returns the renderer so callers can inspect what was drawn.
    pub async fn run(mut self, mut selections: mpsc::Receiver<TimeRange>) -> Result<R> {
        let mut updates = self.store.subscribe();

        let effect = self.widget.mount();
        self.runner.run(effect);
        self.render()?;
        info!("Mounted global hash rate widget ({})", self.widget.range());

        loop {
            tokio::select! {
                selection = selections.recv() => match selection {
                    Some(range) => {
                        debug!("Range selected: {}", range);
                        let effect = self.widget.handle_change(range);
                        self.runner.run(effect);
                        self.render()?;
                    }
                    None => break,
                },
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.on_store_update(&mut updates)?;
                }
            }
        }

        while self.widget.phase() == WidgetPhase::Fetching {
            if updates.changed().await.is_err() {
                break;
            }
            self.on_store_update(&mut updates)?;
        }

        info!("Unmounted global hash rate widget");
        Ok(self.renderer)
    }

    fn on_store_update(&mut self, updates: &mut watch::Receiver<BlocksState>) -> Result<()> {
        let settled = self.store.is_settled(&updates.borrow_and_update());
        if settled {
            self.widget.fetch_settled();
        }
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        let state = self.store.snapshot();
        let props = self.widget.chart_props(&state.statistics);
        self.renderer.render(&props)
    }
}
