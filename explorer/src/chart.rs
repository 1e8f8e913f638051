//! Chart description handed to a renderer

use std::io::Write;
use serde::Serialize;
use crate::error::Result;
use crate::labels::{format_difficulty_axis_label, LabelTimeZone};
use crate::models::StatisticPoint;
use crate::policy::NetworkPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisSpec {
    pub data_key: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset_percent: u8,
    pub color: String,
    pub opacity: f64,
}

/// Vertical fill gradient referenced by id from the area fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub id: String,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Fades `color` from 0.8 opacity at the top to transparent at the bottom.
    pub fn fading(id: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            stops: vec![
                GradientStop { offset_percent: 5, color: color.to_string(), opacity: 0.8 },
                GradientStop { offset_percent: 95, color: color.to_string(), opacity: 0.0 },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub left: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub gradients: Vec<Gradient>,
    pub stroke: String,
    /// Id of the gradient filling the area.
    pub fill_gradient: String,
    pub fill_opacity: f64,
    pub grid_dash: String,
    pub curve: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 250,
            margin: Margin { top: 10, right: 30, left: 0, bottom: 0 },
            gradients: vec![
                Gradient::fading("colorUv", "#8884d8"),
                Gradient::fading("colorPv", "#82ca9d"),
            ],
            stroke: "#8884d8".to_string(),
            fill_gradient: "colorUv".to_string(),
            fill_opacity: 1.0,
            grid_dash: "3 3".to_string(),
            curve: "monotone".to_string(),
        }
    }
}

/// Label callbacks for both axes and the tooltip.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartFormatters {
    pub policy: NetworkPolicy,
    pub time_zone: LabelTimeZone,
}

impl ChartFormatters {
    pub fn new(policy: NetworkPolicy, time_zone: LabelTimeZone) -> Self {
        Self { policy, time_zone }
    }

    pub fn x_label(&self, timestamp: i64) -> String {
        self.time_zone.format(timestamp)
    }

    pub fn y_label(&self, difficulty: f64) -> String {
        format_difficulty_axis_label(difficulty, &self.policy)
    }
}

/// A series point together with its rendered labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledPoint {
    pub timestamp: i64,
    pub difficulty: f64,
    pub x_label: String,
    pub y_label: String,
}

/// Everything a renderer needs to draw the chart. Borrows the series from
/// shared state for the duration of one render.
#[derive(Debug, Clone)]
pub struct ChartProps<'a> {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub tabs: Vec<&'static str>,
    pub selected_tab: usize,
    pub data: &'a [StatisticPoint],
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub formatters: &'a ChartFormatters,
    pub style: &'a ChartStyle,
}

impl ChartProps<'_> {
    pub fn labelled_points(&self) -> Vec<LabelledPoint> {
        self.data
            .iter()
            .map(|point| LabelledPoint {
                timestamp: point.timestamp,
                difficulty: point.difficulty,
                x_label: self.formatters.x_label(point.timestamp),
                y_label: self.formatters.y_label(point.difficulty),
            })
            .collect()
    }
}

pub trait ChartRenderer {
    fn render(&mut self, props: &ChartProps<'_>) -> Result<()>;
}

/// Plain text rendering: title, tab row, then one line per point.
pub struct TextChartRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextChartRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChartRenderer<W> {
    fn render(&mut self, props: &ChartProps<'_>) -> Result<()> {
        writeln!(self.out, "{}", props.title)?;
        writeln!(self.out, "{}", props.subtitle)?;

        let tabs: Vec<String> = props
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| if i == props.selected_tab { format!("[{}]", tab) } else { tab.to_string() })
            .collect();
        writeln!(self.out, "{}", tabs.join(" "))?;

        let points = props.labelled_points();
        if points.is_empty() {
            writeln!(self.out, "(no data)")?;
        }
        for point in points {
            writeln!(self.out, "{:<16}{}", point.x_label, point.y_label)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
