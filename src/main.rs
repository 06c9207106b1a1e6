use clap::Parser;
use eframe::egui;
use log::{debug, info, warn};

use timedot::app::TimedotApp;
use timedot::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
        .format_timestamp_millis()
        .init();

    info!("Timedot starting...");
    debug!("Command-line args: {:?}", args);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Timedot v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([420.0, 520.0])
            .with_transparent(true)
            .with_always_on_top(),
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Timedot",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: TimedotApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_default();

            // Apply CLI overrides (clamped like any external input)
            if let Some(date) = args.date {
                app.view_date = date;
            }
            if let Some(interval) = args.interval {
                if interval < 1 {
                    warn!("Ignoring invalid --interval {interval}");
                } else {
                    app.config.interval = interval;
                }
            }
            if let Some(row_duration) = args.row_duration {
                if row_duration < 10 {
                    warn!("Ignoring invalid --row-duration {row_duration}");
                } else {
                    app.config.row_duration = row_duration;
                }
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    info!("Application exiting");
    Ok(())
}
