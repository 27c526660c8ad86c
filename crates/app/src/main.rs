//! Quran Unix desktop reader.

mod app;
mod pages;
mod resources;
mod search;
mod theme;

use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const APP_ID: &str = "quran-unix";

#[derive(Debug, Parser)]
#[command(name = "quran-unix", version, about = "Read the Madinah mushaf")]
pub struct Args {
    /// Mushaf PDF to open instead of the bundled one.
    #[arg(long, value_name = "FILE", env = "QURAN_UNIX_PDF")]
    pub pdf: Option<PathBuf>,

    /// Directory holding `config.json`.
    #[arg(long, value_name = "DIR", env = "QURAN_UNIX_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// 1-based page to open at, overriding the saved position.
    #[arg(long, value_name = "PAGE", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,quran_unix=info,viewer_core=info,storage=info,pdf_engine=info")
    });

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting reader");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([1100.0, 750.0])
            .with_title(format!("Quran Unix v{}", env!("CARGO_PKG_VERSION"))),
        ..Default::default()
    };

    eframe::run_native(
        APP_ID,
        options,
        Box::new(move |cc| Ok(Box::new(app::ReaderApp::new(cc, &args)))),
    )
    .map_err(|err| anyhow::anyhow!("reader window failed: {err}"))
}
