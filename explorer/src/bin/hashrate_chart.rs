//! Terminal host for the global hash rate widget
//!
//! Reads range selections (`day`, `week`, `month`, `year` or `0`-`3`) from
//! stdin, one per line, and redraws the chart on every update.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;
use hashrate_explorer::{
    chart::{ChartFormatters, ChartStyle, TextChartRenderer},
    cli,
    config::Config,
    effects::EffectRunner,
    fetcher::HttpStatisticsFetcher,
    host::WidgetHost,
    logging,
    store::StatisticsStore,
    widget::GlobalHashRate,
    TimeRange,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse_chart_args();
    logging::init(&args.log_level, args.log_json);

    let mut config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_chart_overrides(&args);

    let formatters = ChartFormatters::new(config.network_policy()?, config.label_time_zone()?);
    let fetcher = Arc::new(HttpStatisticsFetcher::new(&config.client.api_url)?);
    let store = Arc::new(StatisticsStore::new());
    let runner = EffectRunner::new(fetcher, store.clone());
    let widget = GlobalHashRate::new(formatters, ChartStyle::default());
    let renderer = TextChartRenderer::new(std::io::stdout());

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<TimeRange>() {
                Ok(range) => {
                    if tx.send(range).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
    });

    WidgetHost::new(widget, runner, store, renderer).run(rx).await?;
    Ok(())
}
