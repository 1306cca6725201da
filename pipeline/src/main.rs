use std::env;

use pipeline::{
    render::SvgSurface,
    run::{run, RunConfig, DEFAULT_LIMIT, DEFAULT_PAGE},
    PipelineError,
};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_PLOT_DIR: &str = "plots";

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let config = RunConfig {
        base_url: env::var("HOMERATES_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        page: DEFAULT_PAGE,
        limit: DEFAULT_LIMIT,
    };

    let plot_dir = env::var("PLOT_DIR").unwrap_or_else(|_| DEFAULT_PLOT_DIR.to_string());
    let mut surface = SvgSurface::new(plot_dir);

    run(&config, &mut surface).await
}
