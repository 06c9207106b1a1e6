//! Application module - TimedotApp and the per-tick update loop.
//!
//! The loop is single-threaded and tick-driven: every frame it derives the
//! animation targets from the pointer position, advances the scalars,
//! rebuilds the layout context and hands it to the tracker widget. Data
//! mutation only happens afterwards, through the action dispatch in
//! `events` - never concurrently with geometry computation.

mod events;

use chrono::{Local, NaiveDate, NaiveTime};
use eframe::egui;

use crate::config::{GridConfig, Metrics};
use crate::entities::{DataStore, DayRecord};
use crate::layout::{AnimScalars, Layout};
use crate::widgets::tracker::{self, TrackerState};

/// Tick period of the update loop (~60 Hz).
const TICK: std::time::Duration = std::time::Duration::from_millis(16);

/// Main application state. Persisted through eframe storage; runtime-only
/// fields are skipped and rebuilt on startup.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimedotApp {
    pub config: GridConfig,
    pub metrics: Metrics,
    pub store: DataStore,
    pub view_date: NaiveDate,
    #[serde(skip)]
    pub anim: AnimScalars,
    #[serde(skip)]
    pub tracker: TrackerState,
    /// Last date the midnight-rollover check ran on.
    #[serde(skip, default = "today")]
    pub last_date_check: NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Default for TimedotApp {
    fn default() -> Self {
        let today = today();
        Self {
            config: GridConfig::default(),
            metrics: Metrics::default(),
            store: DataStore::default(),
            view_date: today,
            anim: AnimScalars::default(),
            tracker: TrackerState::default(),
            last_date_check: today,
        }
    }
}

impl TimedotApp {
    /// Wall clock as minutes from the window's start hour. Negative before
    /// the window opens, larger than the total afterwards; the renderer
    /// compares, never indexes.
    fn minutes_since_start_hour(&self) -> f32 {
        let now = Local::now().time();
        let anchor =
            NaiveTime::from_hms_opt(self.config.start_hour() as u32, 0, 0).unwrap_or_default();
        (now - anchor).num_seconds() as f32 / 60.0
    }

    /// Follow the calendar across midnight: while the user is viewing
    /// "today", keep following it when the date flips.
    fn check_date_rollover(&mut self, today: NaiveDate) {
        if self.last_date_check != today {
            if self.view_date == self.last_date_check {
                self.view_date = today;
            }
            self.last_date_check = today;
        }
    }
}

impl eframe::App for TimedotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let today = Local::now().date_naive();
        self.check_date_rollover(today);

        // Animation targets come from the previous frame's content rect;
        // the fresh layout does not exist yet at this point in the tick.
        let pointer = ctx.pointer_latest_pos();
        let engaged = pointer.is_some_and(|p| self.tracker.last_content.contains(p));
        let moved = self.anim.advance_toward(AnimScalars::target(engaged));

        let now_minutes = self.minutes_since_start_hour();

        let mut action = tracker::TrackerAction::None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let empty = DayRecord::default();
                let day = self.store.day(self.view_date).unwrap_or(&empty);
                let layout = Layout::compute(
                    &self.config,
                    &self.metrics,
                    day,
                    self.tracker.preview.as_ref(),
                    self.anim,
                    ui.max_rect(),
                );
                action = tracker::show(
                    ui,
                    &mut self.tracker,
                    &layout,
                    day,
                    self.view_date,
                    today,
                    now_minutes,
                );
            });

        self.apply_action(action, today);

        if moved {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(TICK);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(self) {
            Ok(json) => storage.set_string(eframe::APP_KEY, json),
            Err(e) => log::error!("Failed to serialize app state: {e}"),
        }
    }
}
