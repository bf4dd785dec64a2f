// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lumagraph Editor - a visual node editor for simple image-processing graphs.
//!
//! - Image source, brightness/contrast and display nodes
//! - Drag-to-connect links between pins
//! - Images travel along links to the display nodes
//!
//! ## Architecture
//!
//! The window, GPU surface and egui integration live here. The graph itself
//! is implemented by `lumagraph_editor_graph`, which this shell drives once
//! per frame.

mod app;
mod config;
mod theme;

use app::EditorApp;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "lumagraph_editor_app=debug,lumagraph_editor_graph=debug,wgpu=warn,naga=warn";

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lumagraph Editor v{}", env!("CARGO_PKG_VERSION"));

    let settings = config::load_settings(&config::settings_path());

    if let Err(e) = EditorApp::run(settings) {
        tracing::error!("Editor crashed: {e}");
        std::process::exit(1);
    }
}
