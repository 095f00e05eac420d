mod app;
mod bridge;
mod config;
mod session;

use kiln_engine::device::GpuInit;
use kiln_engine::logging::{LoggingConfig, init_logging};
use kiln_engine::window::Runtime;

use crate::app::ViewerApp;
use crate::config::ViewerConfig;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = ViewerConfig::default();
    let runtime = config.runtime();
    Runtime::run(runtime, GpuInit::default(), ViewerApp::new(config))
}
