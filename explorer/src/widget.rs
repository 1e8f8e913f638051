//! Global hash rate chart widget
//!
//! The widget owns only the selected range and whether a fetch is in flight.
//! Mounting and range changes return an [`Effect`] describing the fetch to
//! issue; the host hands it to an [`EffectRunner`](crate::effects::EffectRunner).
//! The series itself lives in the shared store and is borrowed per render.

use crate::chart::{AxisSpec, ChartFormatters, ChartProps, ChartStyle};
use crate::models::{Metric, StatisticPoint};
use crate::range::TimeRange;

pub const TITLE: &str = "Global Hashrate";
pub const SUBTITLE: &str = "Estimated from mining difficulty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    /// Showing the last settled series for the current range.
    Idle,
    /// A fetch is outstanding; the previous series stays on screen.
    Fetching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchStatistics { metric: Metric, range: TimeRange },
}

pub struct GlobalHashRate {
    range: TimeRange,
    phase: WidgetPhase,
    formatters: ChartFormatters,
    style: ChartStyle,
}

impl GlobalHashRate {
    pub fn new(formatters: ChartFormatters, style: ChartStyle) -> Self {
        Self {
            range: TimeRange::default(),
            phase: WidgetPhase::Idle,
            formatters,
            style,
        }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn phase(&self) -> WidgetPhase {
        self.phase
    }

    pub fn mount(&mut self) -> Effect {
        self.phase = WidgetPhase::Fetching;
        self.fetch_effect()
    }

    /// Selects `range` and requests its series, even if it was already selected.
    pub fn handle_change(&mut self, range: TimeRange) -> Effect {
        self.range = range;
        self.phase = WidgetPhase::Fetching;
        self.fetch_effect()
    }

    /// The shared series was updated, successfully or not.
    pub fn fetch_settled(&mut self) {
        self.phase = WidgetPhase::Idle;
    }

    pub fn chart_props<'a>(&'a self, series: &'a [StatisticPoint]) -> ChartProps<'a> {
        ChartProps {
            title: TITLE,
            subtitle: SUBTITLE,
            tabs: TimeRange::ALL.iter().map(|r| r.label()).collect(),
            selected_tab: self.range.index(),
            data: series,
            x_axis: AxisSpec { data_key: "timestamp" },
            y_axis: AxisSpec { data_key: "difficulty" },
            formatters: &self.formatters,
            style: &self.style,
        }
    }

    fn fetch_effect(&self) -> Effect {
        Effect::FetchStatistics {
            metric: Metric::Difficulty,
            range: self.range,
        }
    }
}

impl Default for GlobalHashRate {
    fn default() -> Self {
        Self::new(ChartFormatters::default(), ChartStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_fetches_default_range() {
        let mut widget = GlobalHashRate::default();
        assert_eq!(widget.range(), TimeRange::Month);
        assert_eq!(widget.phase(), WidgetPhase::Idle);

        let effect = widget.mount();
        assert_eq!(effect, Effect::FetchStatistics { metric: Metric::Difficulty, range: TimeRange::Month });
        assert_eq!(widget.phase(), WidgetPhase::Fetching);
    }

    #[test]
    fn test_change_updates_range_then_fetches() {
        let mut widget = GlobalHashRate::default();
        widget.mount();
        widget.fetch_settled();

        let effect = widget.handle_change(TimeRange::Day);
        assert_eq!(widget.range(), TimeRange::Day);
        assert_eq!(widget.range().index(), 0);
        assert_eq!(effect, Effect::FetchStatistics { metric: Metric::Difficulty, range: TimeRange::Day });
        assert_eq!(widget.phase(), WidgetPhase::Fetching);

        widget.fetch_settled();
        assert_eq!(widget.phase(), WidgetPhase::Idle);
    }

    #[test]
    fn test_reselecting_same_range_fetches_again() {
        let mut widget = GlobalHashRate::default();
        let effect = widget.handle_change(TimeRange::Month);
        assert_eq!(effect, Effect::FetchStatistics { metric: Metric::Difficulty, range: TimeRange::Month });
    }

    #[test]
    fn test_chart_props() {
        let mut widget = GlobalHashRate::default();
        widget.handle_change(TimeRange::Year);
        let series = [StatisticPoint { timestamp: 0, difficulty: 1.0 }];

        let props = widget.chart_props(&series);
        assert_eq!(props.title, TITLE);
        assert_eq!(props.tabs, vec!["Day", "Week", "Month", "Year"]);
        assert_eq!(props.selected_tab, 3);
        assert_eq!(props.x_axis.data_key, "timestamp");
        assert_eq!(props.y_axis.data_key, "difficulty");
        assert_eq!(props.data.len(), 1);
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let widget = GlobalHashRate::default();
        let series = [
            StatisticPoint { timestamp: 1_614_927_840, difficulty: 15.0 },
            StatisticPoint { timestamp: 1_614_931_440, difficulty: 90_000.0 },
        ];
        let first = widget.chart_props(&series).labelled_points();
        for _ in 0..3 {
            assert_eq!(widget.chart_props(&series).labelled_points(), first);
        }
    }
}
