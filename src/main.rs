//! Enrolment Dashboard
//!
//! Loads a fixed workbook of university enrolment statistics once at startup
//! and serves dropdown-selected charts and images.
//!
//! Usage: `enroldash [workbook_dir] [initial_view]`
//! The workbook directory defaults to `data`; the initial view to `graph1`.

mod charts;
mod data;
mod gui;
mod view;

use data::Workbook;
use eframe::egui;
use gui::DashboardApp;
use view::SelectionKey;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| "data".to_string());
    let initial = match args.next() {
        Some(raw) => match raw.parse::<SelectionKey>() {
            Ok(key) => key,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(2);
            }
        },
        None => SelectionKey::Graph1,
    };

    // The workbook is loaded exactly once; a load failure is fatal and the
    // UI never starts.
    let workbook = match Workbook::load(&dir) {
        Ok(workbook) => {
            log::info!("loaded {} sheets from {dir}", workbook.sheet_count());
            workbook
        }
        Err(err) => {
            log::error!("failed to load workbook from {dir}: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Enrolment Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Enrolment Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, workbook, initial)))),
    )
}
