//! Tracker rendering and pointer interaction.

use chrono::{Datelike, NaiveDate};
use eframe::egui::{Align2, Color32, FontId, Key, Pos2, Sense, Stroke, Ui};

use super::{DEFAULT_SEGMENT_COLOR, TrackerAction, TrackerState};
use crate::entities::{DayRecord, Segment};
use crate::layout::{ArrowSide, GAP_WIDTH_NARROW, GAP_WIDTH_WIDE, Hit, Layout, SegmentLine};

// Palette
const COLOR_BG: Color32 = Color32::from_rgba_premultiplied(17, 17, 17, 220);
const COLOR_UPCOMING: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);
const COLOR_ELAPSED: Color32 = Color32::from_rgba_premultiplied(47, 47, 47, 150);
const COLOR_CURRENT: Color32 = Color32::from_rgb(100, 200, 255);
const COLOR_ELAPSED_LINE: Color32 = Color32::from_rgba_premultiplied(56, 56, 56, 180);
const COLOR_TODAY_MARK: Color32 = Color32::from_rgb(255, 200, 100);
const COLOR_DATE_PAST: Color32 = Color32::from_rgba_premultiplied(70, 70, 70, 150);
const COLOR_DATE_FUTURE: Color32 = Color32::from_rgb(200, 200, 200);
const COLOR_WEEKEND: Color32 = Color32::from_rgb(255, 100, 100);
const COLOR_TEXT: Color32 = Color32::WHITE;

const FONT_SIZE: f32 = 11.0;
const CAL_FONT_SIZE: f32 = 8.0;
const SEGMENT_THICKNESS: f32 = 2.5;
const SEGMENT_THICKNESS_ACTIVE: f32 = 4.0;
const HOVER_DOT_SCALE: f32 = 1.3;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Render the tracker into the available area and report user intent.
///
/// `now_minutes` is the wall clock expressed as minutes from the window's
/// start hour; it only matters when `view_date == today`.
pub fn show(
    ui: &mut Ui,
    state: &mut TrackerState,
    layout: &Layout,
    day: &DayRecord,
    view_date: NaiveDate,
    today: NaiveDate,
    now_minutes: f32,
) -> TrackerAction {
    let (_, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    let pointer = response.hover_pos().or_else(|| response.interact_pointer_pos());

    // Hover bookkeeping (independent lookups; highlights are not exclusive).
    state.hovered_dot = pointer.and_then(|p| layout.dot_at(p));
    state.hovered_segment = pointer.and_then(|p| layout.segment_at(p));
    state.hovered_date = pointer.and_then(|p| layout.date_at(p, view_date));
    state.hovered_arrow = pointer.and_then(|p| layout.arrow_at(p, view_date, today));

    let action = handle_pointer(state, layout, &response, view_date, today);

    draw(ui, state, layout, day, view_date, today, now_minutes);
    state.last_content = layout.content;

    action
}

fn handle_pointer(
    state: &mut TrackerState,
    layout: &Layout,
    response: &eframe::egui::Response,
    view_date: NaiveDate,
    today: NaiveDate,
) -> TrackerAction {
    let interval = layout.grid.interval;

    // Escape abandons an in-progress creation drag; the preview is discarded.
    if state.preview.is_some() && response.ctx.input(|i| i.key_pressed(Key::Escape)) {
        state.cancel_drag();
        return TrackerAction::None;
    }

    if response.drag_started() {
        if let Some(index) = response.interact_pointer_pos().and_then(|p| layout.dot_at(p)) {
            state.drag_anchor = Some(index);
            state.preview = Some(Segment::new(index, index + interval, DEFAULT_SEGMENT_COLOR));
        }
        return TrackerAction::None;
    }

    if response.dragged() {
        if let (Some(anchor), Some(preview)) = (state.drag_anchor, state.preview.as_mut()) {
            if let Some(index) = response.interact_pointer_pos().and_then(|p| layout.dot_at(p)) {
                // Anchor stays fixed; the dragged end always covers its dot.
                if index >= anchor {
                    preview.start = anchor;
                    preview.end = index + interval;
                } else {
                    preview.start = index;
                    preview.end = anchor + interval;
                }
            }
        }
        return TrackerAction::None;
    }

    if response.drag_stopped() {
        let action = match state.preview.take() {
            Some(preview) => TrackerAction::CommitSegment(preview),
            None => TrackerAction::None,
        };
        state.drag_anchor = None;
        return action;
    }

    if response.double_clicked() {
        if let Some(id) = state.hovered_segment {
            return TrackerAction::DeleteSegment(id);
        }
        return TrackerAction::None;
    }

    if response.secondary_clicked() {
        if let Some(index) = state.hovered_dot {
            return TrackerAction::ToggleNote(index);
        }
        return TrackerAction::None;
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            return match layout.hit_test(pos, view_date, today) {
                // A stationary click still creates a one-interval segment.
                Hit::Dot(index) => TrackerAction::CommitSegment(Segment::new(
                    index,
                    index + interval,
                    DEFAULT_SEGMENT_COLOR,
                )),
                Hit::Arrow(_) => TrackerAction::JumpToToday,
                Hit::Date(date) => TrackerAction::SelectDate(date),
                Hit::Segment(_) | Hit::None => TrackerAction::None,
            };
        }
        return TrackerAction::None;
    }

    if response.hovered() && layout.anim.hover > 0.5 {
        let scroll = response.ctx.input(|i| i.raw_scroll_delta.y);
        if scroll > 0.0 {
            return TrackerAction::ScrollDays(-1);
        } else if scroll < 0.0 {
            return TrackerAction::ScrollDays(1);
        }
    }

    TrackerAction::None
}

fn draw(
    ui: &Ui,
    state: &TrackerState,
    layout: &Layout,
    day: &DayRecord,
    view_date: NaiveDate,
    today: NaiveDate,
    now_minutes: f32,
) {
    let painter = ui.painter();
    let content = layout.content;
    let hover = layout.anim.hover;
    let header = layout.anim.header;

    painter.rect_filled(content, 16.0, COLOR_BG);

    // Header: interval readout, fading in with the reveal.
    if header > 0.01 {
        painter.text(
            Pos2::new(content.right() - 22.0, content.top() + 30.0),
            Align2::RIGHT_CENTER,
            format!("{} min", layout.grid.interval),
            FontId::proportional(12.0),
            COLOR_TEXT.gamma_multiply(header),
        );
    }

    let is_today = view_date == today;
    let is_past = view_date < today;

    draw_grid_chrome(painter, layout, hover);
    draw_dots(painter, state, layout, day, is_today, is_past, now_minutes);
    draw_segments(painter, state, layout, is_today, is_past, now_minutes);

    if hover > 0.01 {
        draw_calendar(painter, state, layout, view_date, today, hover);
    }
}

/// Sidebar hour labels, half-hour separators and in-gap hour numerals.
fn draw_grid_chrome(painter: &eframe::egui::Painter, layout: &Layout, hover: f32) {
    if hover <= 0.05 {
        return;
    }
    let radius = layout.metrics.dot_radius;
    let spacing = layout.spacing();
    let text_color = COLOR_TEXT.gamma_multiply(hover);
    let font = FontId::proportional(FONT_SIZE);
    let rd = layout.grid.row_duration;

    let sidebar_width = layout.sidebar_width();
    let mut last_sidebar_hour = -1;
    for row in 0..layout.grid.rows {
        let row_hour = layout.grid.clock_minute(row * rd) / 60;
        let anchor = layout.dot_center(row, 0);

        // The sidebar column is revealed by the header scalar.
        if sidebar_width > 4.0 && row_hour != last_sidebar_hour {
            painter.text(
                Pos2::new(layout.content.left() + sidebar_width - 2.0, anchor.y),
                Align2::RIGHT_CENTER,
                format!("{row_hour:02}"),
                font.clone(),
                COLOR_TEXT.gamma_multiply(layout.anim.header),
            );
            last_sidebar_hour = row_hour;
        }

        // 30-minute rows have no interior boundaries to decorate.
        if rd == 30 {
            continue;
        }

        for col in 0..layout.grid.cols {
            let index = layout.grid.index_of(row, col);
            if !layout.grid.index_valid(index) {
                continue;
            }
            let minute = layout.grid.clock_minute(index);
            let center = layout.dot_center(row, col);
            let gap_width = if minute % 60 == 0 {
                GAP_WIDTH_WIDE * layout.expansion()
            } else if minute % 30 == 0 {
                GAP_WIDTH_NARROW * layout.expansion()
            } else {
                continue;
            };
            let boundary_x = center.x - radius - spacing / 2.0 - gap_width / 2.0;

            if minute % 60 == 0 {
                if col > 0 {
                    painter.text(
                        Pos2::new(boundary_x, center.y),
                        Align2::CENTER_CENTER,
                        format!("{:02}", minute / 60),
                        font.clone(),
                        text_color,
                    );
                }
            } else {
                painter.line_segment(
                    [
                        Pos2::new(boundary_x, center.y - radius),
                        Pos2::new(boundary_x, center.y + radius),
                    ],
                    Stroke::new(1.0, COLOR_TEXT.gamma_multiply(0.2 * hover)),
                );
            }
        }
    }
}

fn draw_dots(
    painter: &eframe::egui::Painter,
    state: &TrackerState,
    layout: &Layout,
    day: &DayRecord,
    is_today: bool,
    is_past: bool,
    now_minutes: f32,
) {
    let radius = layout.metrics.dot_radius;
    let interval = layout.grid.interval;

    for row in 0..layout.grid.rows {
        for col in 0..layout.grid.cols {
            let index = layout.grid.index_of(row, col);
            if !layout.grid.index_valid(index) {
                continue;
            }
            let center = layout.dot_center(row, col);
            let hovered = state.hovered_dot == Some(index);
            let dot_radius = if hovered { radius * HOVER_DOT_SCALE } else { radius };

            let mut color = if is_today {
                if (index as f32) < now_minutes {
                    if ((index + interval) as f32) > now_minutes {
                        COLOR_CURRENT
                    } else {
                        COLOR_ELAPSED
                    }
                } else {
                    COLOR_UPCOMING
                }
            } else if is_past {
                COLOR_ELAPSED
            } else {
                COLOR_UPCOMING
            };
            if hovered {
                color = lighten(color, 0.5);
            }
            painter.circle_filled(center, dot_radius, color);

            if let Some(note) = day.notes.get(&index) {
                painter.circle_filled(
                    center,
                    dot_radius * layout.metrics.note_dot_scale,
                    rgb(note.color),
                );
            }
        }
    }
}

fn draw_segments(
    painter: &eframe::egui::Painter,
    state: &TrackerState,
    layout: &Layout,
    is_today: bool,
    is_past: bool,
    now_minutes: f32,
) {
    for (i, segment) in layout.segments.iter().enumerate() {
        let is_preview = layout.is_preview(i);
        let hovered = !is_preview && state.hovered_segment == Some(segment.id);
        let thickness = if hovered || is_preview {
            SEGMENT_THICKNESS_ACTIVE
        } else {
            SEGMENT_THICKNESS
        };
        let color = rgb(segment.color);

        for line in layout.segment_lines(segment) {
            if is_preview {
                painter.line_segment(
                    [Pos2::new(line.x1, line.y), Pos2::new(line.x2, line.y)],
                    Stroke::new(thickness, color),
                );
                continue;
            }
            if hovered {
                // Highlight halo under the colored line.
                painter.line_segment(
                    [Pos2::new(line.x1, line.y), Pos2::new(line.x2, line.y)],
                    Stroke::new(thickness + 1.0, COLOR_TEXT.gamma_multiply(0.8)),
                );
            }
            draw_segment_line(painter, &line, color, thickness, is_today, is_past, now_minutes);
        }
    }
}

/// One row-clipped line, split into elapsed/remaining parts for today.
fn draw_segment_line(
    painter: &eframe::egui::Painter,
    line: &SegmentLine,
    color: Color32,
    thickness: f32,
    is_today: bool,
    is_past: bool,
    now_minutes: f32,
) {
    let full = [Pos2::new(line.x1, line.y), Pos2::new(line.x2, line.y)];
    if !is_today {
        let pen = if is_past { COLOR_ELAPSED_LINE } else { color };
        painter.line_segment(full, Stroke::new(thickness, pen));
        return;
    }

    if now_minutes >= line.clip_end as f32 {
        painter.line_segment(full, Stroke::new(thickness, COLOR_ELAPSED_LINE));
    } else if now_minutes <= line.clip_start as f32 {
        painter.line_segment(full, Stroke::new(thickness, color));
    } else {
        let span = (line.clip_end - line.clip_start) as f32;
        let ratio = ((now_minutes - line.clip_start as f32) / span).clamp(0.0, 1.0);
        let split_x = line.x1 + (line.x2 - line.x1) * ratio;
        painter.line_segment(
            [Pos2::new(line.x1, line.y), Pos2::new(split_x, line.y)],
            Stroke::new(thickness, COLOR_ELAPSED_LINE),
        );
        painter.line_segment(
            [Pos2::new(split_x, line.y), Pos2::new(line.x2, line.y)],
            Stroke::new(thickness, color),
        );
    }
}

fn draw_calendar(
    painter: &eframe::egui::Painter,
    state: &TrackerState,
    layout: &Layout,
    view_date: NaiveDate,
    today: NaiveDate,
    hover: f32,
) {
    let strip = layout.calendar_strip();
    let mid = strip.visible_count / 2;
    let cal_font = FontId::proportional(CAL_FONT_SIZE);

    for slot in 0..strip.visible_count {
        let date = strip.slot_date(view_date, slot);
        let center = strip.slot_center(slot);
        let is_viewing = date == view_date;
        let is_today = date == today;

        let mut dot_radius = 4.0;
        let mut color = if is_today {
            dot_radius = 5.0;
            COLOR_TODAY_MARK
        } else if date < today {
            COLOR_DATE_PAST
        } else {
            COLOR_DATE_FUTURE
        };
        if is_viewing {
            color = lighten(color, 0.5);
            dot_radius = 6.0;
        }
        if state.hovered_date == Some(date) {
            dot_radius *= HOVER_DOT_SCALE;
        }

        let weekday = date.weekday().num_days_from_monday() as usize;
        let weekend = weekday >= 5;
        if weekend {
            painter.circle_stroke(
                center,
                dot_radius,
                Stroke::new(1.5, COLOR_WEEKEND.gamma_multiply(hover)),
            );
        }
        painter.circle_filled(center, dot_radius, color.gamma_multiply(hover));

        let label_color = if weekend { COLOR_WEEKEND } else { COLOR_DATE_FUTURE };
        painter.text(
            Pos2::new(center.x, center.y - dot_radius - 8.0),
            Align2::CENTER_CENTER,
            WEEKDAYS[weekday],
            cal_font.clone(),
            label_color.gamma_multiply(hover),
        );

        let dist = (slot - mid).abs();
        if slot == mid || (dist > 0 && dist % 3 == 0) {
            painter.text(
                Pos2::new(center.x, center.y + dot_radius + 9.0),
                Align2::CENTER_CENTER,
                format!("{}/{}", date.month(), date.day()),
                cal_font.clone(),
                COLOR_DATE_FUTURE.gamma_multiply(hover),
            );
        }
    }

    for (side, rect) in layout.arrow_rects(view_date, today) {
        let hovered = state.hovered_arrow == Some(side);
        draw_arrow(painter, rect.center(), side, hovered, hover);
    }
}

fn draw_arrow(
    painter: &eframe::egui::Painter,
    center: Pos2,
    side: ArrowSide,
    hovered: bool,
    hover: f32,
) {
    let size = if hovered { 6.0 * HOVER_DOT_SCALE } else { 6.0 };
    let alpha = if hovered { 1.0 } else { 0.8 * hover };
    let stroke = Stroke::new(
        if hovered { 2.5 } else { 2.0 },
        COLOR_TODAY_MARK.gamma_multiply(alpha),
    );
    let tip = match side {
        ArrowSide::Left => -size / 2.0,
        ArrowSide::Right => size / 2.0,
    };
    let tail = -tip;
    painter.line_segment(
        [Pos2::new(center.x + tail, center.y - size), Pos2::new(center.x + tip, center.y)],
        stroke,
    );
    painter.line_segment(
        [Pos2::new(center.x + tip, center.y), Pos2::new(center.x + tail, center.y + size)],
        stroke,
    );
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Blend toward white, keeping alpha.
fn lighten(color: Color32, factor: f32) -> Color32 {
    let mix = |c: u8| c.saturating_add(((255 - c) as f32 * factor) as u8);
    Color32::from_rgba_unmultiplied(mix(color.r()), mix(color.g()), mix(color.b()), color.a())
}
