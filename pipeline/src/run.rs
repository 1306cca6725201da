use log::info;
use tokio::task;

use regression::{init, training::EpochStats};

use crate::{
    convert::convert_records,
    fetch::HomeRatesClient,
    model::{create_model, summarize},
    predict::{observed_points, probe_model, Point},
    render::{AxisOpts, SeriesSet, Surface},
    train::train_model,
    PipelineError,
};

/// Which page of home rates a run trains on.
pub const DEFAULT_PAGE: usize = 0;
pub const DEFAULT_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub page: usize,
    pub limit: usize,
}

struct TrainedRun {
    history: Vec<EpochStats>,
    predicted: Vec<Point>,
}

/// One complete run: fetch, plot the raw points, convert, build, train,
/// probe, plot predictions against observations. No retries, no
/// persistence; a failed run is abandoned.
pub async fn run<S: Surface>(config: &RunConfig, surface: &mut S) -> Result<(), PipelineError> {
    let client = HomeRatesClient::new(config.base_url.clone());
    let mut records = client.fetch_page(config.page, config.limit).await?;
    if records.is_empty() {
        return Err(PipelineError::EmptyPage { page: config.page });
    }
    info!("fetched {} usable records", records.len());

    let observed = observed_points(&records);
    render_initial_scatter(surface, observed.clone())?;

    // Training is CPU-bound; keep it off the async runtime's core threads.
    let trained = task::spawn_blocking(move || -> Result<TrainedRun, PipelineError> {
        let mut rng = rand::rng();

        let (dataset, bounds) = convert_records(&mut records, &mut rng)?;
        let model = create_model();
        info!("model: {}", summarize(&model));

        let mut params = init::glorot_normal(&model, &mut rng);
        let (mut model, history) = train_model(model, dataset, &mut params, rng, |s| {
            info!("epoch {}: loss {:.6}, mse {:.6}", s.epoch, s.loss, s.mse);
        })?;

        let predicted = probe_model(&mut model, &params, &bounds)?;
        Ok(TrainedRun { history, predicted })
    })
    .await??;
    info!("done training");

    render_training_performance(surface, &trained.history)?;
    render_predictions(surface, observed, trained.predicted)
}

/// The raw (solar, demand) points, plotted before training starts.
pub fn render_initial_scatter<S: Surface>(
    surface: &mut S,
    observed: Vec<Point>,
) -> Result<(), PipelineError> {
    surface.scatterplot(
        "solar v demand",
        &SeriesSet::single(observed),
        &AxisOpts::new("solar", "demand", 300),
    )
}

/// Loss and MSE per epoch.
pub fn render_training_performance<S: Surface>(
    surface: &mut S,
    history: &[EpochStats],
) -> Result<(), PipelineError> {
    let loss = history
        .iter()
        .map(|s| Point { x: s.epoch as f32, y: s.loss })
        .collect();
    let mse = history
        .iter()
        .map(|s| Point { x: s.epoch as f32, y: s.mse })
        .collect();

    surface.linechart(
        "Training Performance",
        &SeriesSet::labeled(vec![loss, mse], vec!["loss", "mse"]),
        &AxisOpts::new("epoch", "value", 200),
    )
}

/// Observed and predicted points on one plot for visual comparison.
pub fn render_predictions<S: Surface>(
    surface: &mut S,
    observed: Vec<Point>,
    predicted: Vec<Point>,
) -> Result<(), PipelineError> {
    surface.scatterplot(
        "Model Predictions vs Original Data",
        &SeriesSet::labeled(vec![observed, predicted], vec!["original", "predicted"]),
        &AxisOpts::new("solar", "demand", 300),
    )
}
