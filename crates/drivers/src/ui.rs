use std::path::PathBuf;
use std::time::{Duration, Instant};

use editopia_adapters::{
    present_export, present_export_failure, present_session, render_preview, PreviewCanvas,
};
use editopia_application::{
    AdjustExposureCommand, AdjustSaturationCommand, ApplicationError, ApplicationService,
    ApplyFilterCommand, ExportCommand, LoadImageCommand, ResetCommand, SessionSummaryQuery,
    UndoCommand,
};
use editopia_domain::{Adjustment, FilterKind, SessionSummary};
use font8x8::UnicodeFonts;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::AppConfig;

const WINDOW_WIDTH: usize = 1024;
const WINDOW_HEIGHT: usize = 768;
const CANVAS_MARGIN: usize = 24;
const HEADER_TOP: usize = 16;
const HEADER_HEIGHT: usize = 48;
const WORKAREA_TOP: usize = 80;
const WORKAREA_BOTTOM_MARGIN: usize = 24;
const SPLIT_GUTTER: usize = 20;
const CONTROL_PANEL_WIDTH: usize = 260;
const CONTROL_INSET: usize = 16;
const FILTER_LIST_OFFSET: usize = 40;
const FILTER_ROW_HEIGHT: usize = 24;
const SLIDER_HEIGHT: usize = 44;
const SLIDER_GAP: usize = 14;
const SETTLE_MS: u64 = 250;
const NEUTRAL_POSITION: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliderField {
    Exposure,
    Saturation,
}

impl SliderField {
    fn adjustment(self) -> Adjustment {
        match self {
            Self::Exposure => Adjustment::Exposure,
            Self::Saturation => Adjustment::Saturation,
        }
    }

    /// Slider positions are whole percents of the factor.
    fn bounds(self) -> (i32, i32) {
        match self {
            Self::Exposure => (11, 300),
            Self::Saturation => (0, 200),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Exposure => "EXPOSURE",
            Self::Saturation => "SATURATION",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SliderSpec {
    field: SliderField,
    top: usize,
    color: u32,
}

/// Holds a slider move back until the knob is released or stops moving.
struct DebouncedCommit {
    settle_ms: u64,
    pending: Option<(SliderField, i32)>,
    changed_at_ms: u64,
}

impl DebouncedCommit {
    fn new(settle_ms: u64) -> Self {
        Self {
            settle_ms,
            pending: None,
            changed_at_ms: 0,
        }
    }

    fn mark(&mut self, field: SliderField, position: i32, now_ms: u64) {
        self.pending = Some((field, position));
        self.changed_at_ms = now_ms;
    }

    fn take_ready(&mut self, now_ms: u64, still_dragging: bool) -> Option<(SliderField, i32)> {
        let settled = now_ms.saturating_sub(self.changed_at_ms) >= self.settle_ms;
        if still_dragging && !settled {
            return None;
        }
        self.pending.take()
    }
}

struct EditorState {
    exposure: i32,
    saturation: i32,
    committed_exposure: i32,
    committed_saturation: i32,
    notice: String,
    preview: Option<PreviewCanvas>,
}

impl EditorState {
    fn new() -> Self {
        Self {
            exposure: NEUTRAL_POSITION,
            saturation: NEUTRAL_POSITION,
            committed_exposure: NEUTRAL_POSITION,
            committed_saturation: NEUTRAL_POSITION,
            notice: "NO IMAGE LOADED".to_string(),
            preview: None,
        }
    }

    fn position(&self, field: SliderField) -> i32 {
        match field {
            SliderField::Exposure => self.exposure,
            SliderField::Saturation => self.saturation,
        }
    }

    fn slot(&mut self, field: SliderField) -> &mut i32 {
        match field {
            SliderField::Exposure => &mut self.exposure,
            SliderField::Saturation => &mut self.saturation,
        }
    }

    fn commit(&mut self, field: SliderField, position: i32) {
        match field {
            SliderField::Exposure => self.committed_exposure = position,
            SliderField::Saturation => self.committed_saturation = position,
        }
    }

    fn rollback(&mut self, field: SliderField) {
        match field {
            SliderField::Exposure => self.exposure = self.committed_exposure,
            SliderField::Saturation => self.saturation = self.committed_saturation,
        }
    }

    fn reset_sliders(&mut self) {
        self.exposure = NEUTRAL_POSITION;
        self.saturation = NEUTRAL_POSITION;
        self.committed_exposure = NEUTRAL_POSITION;
        self.committed_saturation = NEUTRAL_POSITION;
    }
}

pub fn launch_window(
    service: &mut ApplicationService,
    config: &AppConfig,
    image: Option<PathBuf>,
) -> Result<(), String> {
    let width = WINDOW_WIDTH;
    let height = WINDOW_HEIGHT;
    let sliders = slider_specs();

    let mut window = Window::new("Editopia", width, height, WindowOptions::default())
        .map_err(|error| format!("failed to start UI window: {error}"))?;
    window.limit_update_rate(Some(Duration::from_micros(16_000)));

    let mut buffer = vec![0x202020_u32; width * height];
    let start = Instant::now();
    let mut state = EditorState::new();
    let mut debounce = DebouncedCommit::new(SETTLE_MS);
    let mut active_drag: Option<SliderField> = None;
    let mut was_mouse_down = false;

    if let Some(path) = image {
        match service.load_image(LoadImageCommand { path: path.clone() }) {
            Ok(summary) => {
                state.notice = format!("LOADED {}", path.display());
                log::info!("{}", present_session(&summary));
            }
            Err(error) => {
                log::warn!("failed to load {}: {error}", path.display());
                state.notice = "FAILED TO LOAD IMAGE.".to_string();
            }
        }
        refresh_preview(service, config, &mut state, width, height);
    }

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if let Some(kind) = pressed_filter_key(&window) {
            select_filter(service, config, &mut state, kind, width, height);
        }
        if window.is_key_pressed(Key::U, KeyRepeat::No) {
            run_action(service, config, &mut state, width, height, |service| {
                service.undo(UndoCommand)
            });
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            state.reset_sliders();
            run_action(service, config, &mut state, width, height, |service| {
                service.reset(ResetCommand)
            });
        }
        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            save(service, config, &mut state);
        }

        let mouse_down = window.get_mouse_down(MouseButton::Left);
        let mouse_pos = window.get_mouse_pos(MouseMode::Clamp);
        let hovered_slider = mouse_pos
            .and_then(|(mouse_x, mouse_y)| slider_at_position(mouse_x, mouse_y, &sliders, width));
        let now_ms = start.elapsed().as_millis() as u64;

        if mouse_down {
            if let Some((mouse_x, mouse_y)) = mouse_pos {
                if !was_mouse_down {
                    active_drag = hovered_slider;
                    if let Some(kind) = filter_at_position(mouse_x, mouse_y, width) {
                        select_filter(service, config, &mut state, kind, width, height);
                    }
                }
                if let Some(field) = active_drag {
                    if update_position_from_mouse(&mut state, field, mouse_x, width) {
                        debounce.mark(field, state.position(field), now_ms);
                    }
                }
            }
        } else {
            active_drag = None;
        }
        was_mouse_down = mouse_down;

        if let Some((field, position)) = debounce.take_ready(now_ms, mouse_down) {
            commit_adjustment(service, config, &mut state, field, position, width, height);
        }

        let summary = service.session_summary(SessionSummaryQuery).ok();
        draw_background(&mut buffer, width, height);
        draw_header(&mut buffer, width, &state.notice);
        draw_preview_panel(&mut buffer, width, height, state.preview.as_ref());
        draw_control_panel(&mut buffer, width, height);
        draw_filter_list(&mut buffer, width, summary.map(|summary| summary.params.filter));
        draw_sliders(
            &mut buffer,
            width,
            &sliders,
            &state,
            active_drag.or(hovered_slider),
        );
        draw_help(&mut buffer, width, &sliders);

        window.set_title(&build_window_title(summary.as_ref()));
        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|error| format!("failed to update UI window: {error}"))?;
    }

    Ok(())
}

/// `None` resets the whole edit, so both sliders return to neutral with it.
fn select_filter(
    service: &mut ApplicationService,
    config: &AppConfig,
    state: &mut EditorState,
    kind: FilterKind,
    width: usize,
    height: usize,
) {
    let applied = run_action(service, config, state, width, height, |service| {
        service.apply_filter(ApplyFilterCommand { kind })
    });
    if applied && kind == FilterKind::None {
        state.reset_sliders();
    }
}

fn run_action(
    service: &mut ApplicationService,
    config: &AppConfig,
    state: &mut EditorState,
    width: usize,
    height: usize,
    action: impl FnOnce(&mut ApplicationService) -> Result<SessionSummary, ApplicationError>,
) -> bool {
    match action(service) {
        Ok(summary) => {
            state.notice = present_session(&summary).to_ascii_uppercase();
            refresh_preview(service, config, state, width, height);
            true
        }
        Err(ApplicationError::NoImageLoaded) => {
            state.notice = "NO IMAGE LOADED".to_string();
            false
        }
        Err(error) => {
            log::warn!("edit failed: {error}");
            state.notice = error.to_string().to_ascii_uppercase();
            false
        }
    }
}

fn commit_adjustment(
    service: &mut ApplicationService,
    config: &AppConfig,
    state: &mut EditorState,
    field: SliderField,
    position: i32,
    width: usize,
    height: usize,
) {
    let factor = position as f32 / 100.0;
    let result = match field.adjustment() {
        Adjustment::Exposure => service.adjust_exposure(AdjustExposureCommand { factor }),
        Adjustment::Saturation => service.adjust_saturation(AdjustSaturationCommand { factor }),
    };
    match result {
        Ok(summary) => {
            state.commit(field, position);
            state.notice = present_session(&summary).to_ascii_uppercase();
            refresh_preview(service, config, state, width, height);
        }
        Err(ApplicationError::NoImageLoaded) => {
            state.notice = "NO IMAGE LOADED".to_string();
        }
        Err(error) => {
            state.rollback(field);
            state.notice = error.to_string().to_ascii_uppercase();
        }
    }
}

fn save(service: &ApplicationService, config: &AppConfig, state: &mut EditorState) {
    match service.export(ExportCommand {
        output_dir: config.output_dir.clone(),
    }) {
        Ok(path) => state.notice = present_export(&path),
        Err(ApplicationError::NoImageLoaded) => state.notice = "NO IMAGE LOADED".to_string(),
        Err(error) => {
            log::error!("save failed: {error}");
            state.notice = present_export_failure().to_string();
        }
    }
}

fn refresh_preview(
    service: &ApplicationService,
    config: &AppConfig,
    state: &mut EditorState,
    width: usize,
    height: usize,
) {
    let (max_width, max_height) = preview_bounds(config, width, height);
    state.preview = service
        .edited_image()
        .and_then(|image| render_preview(image, max_width, max_height));
}

fn preview_bounds(config: &AppConfig, width: usize, height: usize) -> (usize, usize) {
    let stage_width = preview_panel_right(width).saturating_sub(preview_panel_left() + 26);
    let stage_height = preview_panel_bottom(height).saturating_sub(preview_panel_top() + 26);
    (
        stage_width.min(config.preview_width.max(1)),
        stage_height.min(config.preview_height.max(1)),
    )
}

fn pressed_filter_key(window: &Window) -> Option<FilterKind> {
    const KEYS: [Key; 6] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6];
    KEYS.iter()
        .position(|key| window.is_key_pressed(*key, KeyRepeat::No))
        .map(|index| FilterKind::ALL[index])
}

fn slider_specs() -> [SliderSpec; 2] {
    let start = filter_list_top() + FILTER_ROW_HEIGHT * FilterKind::ALL.len() + 30;
    [
        SliderSpec {
            field: SliderField::Exposure,
            top: start,
            color: 0xFF996C,
        },
        SliderSpec {
            field: SliderField::Saturation,
            top: start + SLIDER_HEIGHT + SLIDER_GAP,
            color: 0x8A95D8,
        },
    ]
}

fn draw_background(buffer: &mut [u32], width: usize, height: usize) {
    for y in 0..height {
        let color = lerp_color(0x2B2D31, 0x1B1C1F, y as f32 / height.max(1) as f32);
        buffer[y * width..(y + 1) * width].fill(color);
    }
}

fn draw_header(buffer: &mut [u32], width: usize, notice: &str) {
    let left = CANVAS_MARGIN;
    let band_width = width.saturating_sub(CANVAS_MARGIN * 2);
    fill_rect(buffer, width, left, HEADER_TOP, band_width, HEADER_HEIGHT, 0x33363C);
    draw_rect(buffer, width, left, HEADER_TOP, band_width, HEADER_HEIGHT, 0x4A4E57);
    fill_rect(buffer, width, left + 12, HEADER_TOP + 10, 104, HEADER_HEIGHT - 20, 0xF05C4B);
    draw_text(buffer, width, left + 24, HEADER_TOP + 20, "EDITOPIA", 0xFFFFFF);

    let max_chars = band_width.saturating_sub(150) / 8;
    let shown: String = notice.chars().take(max_chars).collect();
    draw_text(buffer, width, left + 136, HEADER_TOP + 20, &shown, 0xE6E1D8);
}

fn draw_preview_panel(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    preview: Option<&PreviewCanvas>,
) {
    let panel_left = preview_panel_left();
    let panel_top = preview_panel_top();
    let panel_width = preview_panel_right(width).saturating_sub(panel_left);
    let panel_height = preview_panel_bottom(height).saturating_sub(panel_top);
    fill_rect(buffer, width, panel_left, panel_top, panel_width, panel_height, 0x33363C);
    draw_rect(buffer, width, panel_left, panel_top, panel_width, panel_height, 0x4A4E57);

    let stage_left = panel_left + 12;
    let stage_top = panel_top + 12;
    let stage_width = panel_width.saturating_sub(24);
    let stage_height = panel_height.saturating_sub(24);
    fill_rect(buffer, width, stage_left, stage_top, stage_width, stage_height, 0x101010);

    let Some(preview) = preview else {
        draw_text(
            buffer,
            width,
            stage_left + stage_width / 2 - 60,
            stage_top + stage_height / 2,
            "NO IMAGE LOADED",
            0x8A8A8A,
        );
        return;
    };

    let content_width = stage_width.saturating_sub(2);
    let content_height = stage_height.saturating_sub(2);
    let draw_width = preview.width.min(content_width);
    let draw_height = preview.height.min(content_height);
    let start_x = stage_left + 1 + content_width.saturating_sub(draw_width) / 2;
    let start_y = stage_top + 1 + content_height.saturating_sub(draw_height) / 2;
    for y in 0..draw_height {
        for x in 0..draw_width {
            set_pixel(
                buffer,
                width,
                start_x + x,
                start_y + y,
                preview.pixels[y * preview.width + x],
            );
        }
    }
}

fn draw_control_panel(buffer: &mut [u32], width: usize, height: usize) {
    let left = control_panel_left(width);
    let top = control_panel_top();
    let panel_width = control_panel_right(width).saturating_sub(left);
    let panel_height = control_panel_bottom(height).saturating_sub(top);
    fill_rect(buffer, width, left, top, panel_width, panel_height, 0x33363C);
    draw_rect(buffer, width, left, top, panel_width, panel_height, 0x4A4E57);
    draw_text(buffer, width, left + CONTROL_INSET, top + 18, "FILTER", 0xE6E1D8);
}

fn draw_filter_list(buffer: &mut [u32], width: usize, active: Option<FilterKind>) {
    let left = slider_left(width);
    let row_width = slider_right(width).saturating_sub(left);
    for (index, kind) in FilterKind::ALL.iter().enumerate() {
        let top = filter_list_top() + index * FILTER_ROW_HEIGHT;
        let selected = active == Some(*kind);
        let fill = if selected { 0xF7AE3D } else { 0x26282C };
        let ink = if selected { 0x1B1C1F } else { 0xE6E1D8 };
        fill_rect(buffer, width, left, top + 2, row_width, FILTER_ROW_HEIGHT - 4, fill);
        let label = format!("{}  {}", index + 1, kind.label().to_ascii_uppercase());
        draw_text(buffer, width, left + 8, top + 8, &label, ink);
    }
}

fn draw_sliders(
    buffer: &mut [u32],
    width: usize,
    sliders: &[SliderSpec],
    state: &EditorState,
    focused: Option<SliderField>,
) {
    let left = slider_left(width);
    let shell_width = slider_right(width).saturating_sub(left) + 1;
    for slider in sliders {
        let border = if focused == Some(slider.field) {
            0xE6E1D8
        } else {
            0x4A4E57
        };
        fill_rect(buffer, width, left, slider.top, shell_width, SLIDER_HEIGHT, 0x26282C);
        draw_rect(buffer, width, left, slider.top, shell_width, SLIDER_HEIGHT, border);

        let position = state.position(slider.field);
        let knob_x = position_to_x(slider.field, position, width);
        let neutral_x = position_to_x(slider.field, NEUTRAL_POSITION, width);
        let center_y = slider.top + SLIDER_HEIGHT - 12;
        for y in center_y.saturating_sub(2)..=center_y + 2 {
            for x in left + 8..slider_right(width).saturating_sub(8) {
                set_pixel(buffer, width, x, y, 0x5A5E66);
            }
            for x in neutral_x.min(knob_x)..=neutral_x.max(knob_x) {
                set_pixel(buffer, width, x, y, slider.color);
            }
        }
        fill_rect(buffer, width, knob_x.saturating_sub(5), center_y - 7, 10, 15, slider.color);
        draw_rect(buffer, width, knob_x.saturating_sub(5), center_y - 7, 10, 15, 0xFFFFFF);

        let label = format!("{} {:.2}", slider.field.label(), position as f32 / 100.0);
        draw_text(buffer, width, left + 8, slider.top + 8, &label, 0xE6E1D8);
    }
}

fn draw_help(buffer: &mut [u32], width: usize, sliders: &[SliderSpec]) {
    let Some(last) = sliders.last() else {
        return;
    };
    let left = slider_left(width);
    let top = last.top + SLIDER_HEIGHT + 24;
    let lines = [
        "1-6  SELECT FILTER",
        "U    UNDO",
        "R    RESET ALL",
        "S    SAVE IMAGE",
        "ESC  QUIT",
    ];
    for (index, line) in lines.iter().enumerate() {
        draw_text(buffer, width, left, top + index * 14, line, 0x9A968F);
    }
}

fn fill_rect(
    buffer: &mut [u32],
    width: usize,
    left: usize,
    top: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    for y in top..top.saturating_add(h) {
        for x in left..left.saturating_add(w) {
            set_pixel(buffer, width, x, y, color);
        }
    }
}

fn draw_rect(
    buffer: &mut [u32],
    width: usize,
    left: usize,
    top: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    if w == 0 || h == 0 {
        return;
    }
    let right = left + w - 1;
    let bottom = top + h - 1;
    for x in left..=right {
        set_pixel(buffer, width, x, top, color);
        set_pixel(buffer, width, x, bottom, color);
    }
    for y in top..=bottom {
        set_pixel(buffer, width, left, y, color);
        set_pixel(buffer, width, right, y, color);
    }
}

fn lerp_color(start: u32, end: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let from = ((start >> shift) & 0xFF) as f32;
        let to = ((end >> shift) & 0xFF) as f32;
        ((from + (to - from) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

fn set_pixel(buffer: &mut [u32], width: usize, x: usize, y: usize, color: u32) {
    let height = buffer.len() / width;
    if x < width && y < height {
        buffer[y * width + x] = color;
    }
}

fn draw_text(buffer: &mut [u32], width: usize, x: usize, y: usize, text: &str, color: u32) {
    for (index, ch) in text.chars().enumerate() {
        let glyph = font8x8::BASIC_FONTS.get(ch).unwrap_or([0; 8]);
        let origin = x.saturating_add(index * 8);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                if (bits >> col) & 1 == 1 {
                    set_pixel(buffer, width, origin + col, y + row, color);
                }
            }
        }
    }
}

fn preview_panel_left() -> usize {
    CANVAS_MARGIN
}

fn preview_panel_top() -> usize {
    WORKAREA_TOP
}

fn preview_panel_right(width: usize) -> usize {
    width.saturating_sub(CANVAS_MARGIN + CONTROL_PANEL_WIDTH + SPLIT_GUTTER)
}

fn preview_panel_bottom(height: usize) -> usize {
    height.saturating_sub(WORKAREA_BOTTOM_MARGIN)
}

fn control_panel_left(width: usize) -> usize {
    preview_panel_right(width).saturating_add(SPLIT_GUTTER)
}

fn control_panel_right(width: usize) -> usize {
    width.saturating_sub(CANVAS_MARGIN)
}

fn control_panel_top() -> usize {
    WORKAREA_TOP
}

fn control_panel_bottom(height: usize) -> usize {
    height.saturating_sub(WORKAREA_BOTTOM_MARGIN)
}

fn filter_list_top() -> usize {
    control_panel_top() + FILTER_LIST_OFFSET
}

fn slider_left(width: usize) -> usize {
    control_panel_left(width).saturating_add(CONTROL_INSET)
}

fn slider_right(width: usize) -> usize {
    control_panel_right(width).saturating_sub(CONTROL_INSET)
}

fn filter_at_position(mouse_x: f32, mouse_y: f32, width: usize) -> Option<FilterKind> {
    let x = mouse_x.max(0.0) as usize;
    let y = mouse_y.max(0.0) as usize;
    if x < slider_left(width) || x > slider_right(width) || y < filter_list_top() {
        return None;
    }
    FilterKind::ALL
        .get((y - filter_list_top()) / FILTER_ROW_HEIGHT)
        .copied()
}

fn slider_at_position(
    mouse_x: f32,
    mouse_y: f32,
    sliders: &[SliderSpec],
    width: usize,
) -> Option<SliderField> {
    let x = mouse_x.max(0.0) as usize;
    let y = mouse_y.max(0.0) as usize;
    if x < slider_left(width) || x > slider_right(width) {
        return None;
    }
    sliders
        .iter()
        .find(|spec| y >= spec.top && y < spec.top + SLIDER_HEIGHT)
        .map(|spec| spec.field)
}

fn update_position_from_mouse(
    state: &mut EditorState,
    field: SliderField,
    mouse_x: f32,
    width: usize,
) -> bool {
    let updated = x_to_position(field, mouse_x, width);
    let slot = state.slot(field);
    if *slot == updated {
        return false;
    }
    *slot = updated;
    true
}

fn track_span(width: usize) -> (f32, f32) {
    (
        (slider_left(width) + 8) as f32,
        slider_right(width).saturating_sub(8) as f32,
    )
}

fn position_to_x(field: SliderField, position: i32, width: usize) -> usize {
    let (left, right) = track_span(width);
    let (min, max) = field.bounds();
    let t = (position.clamp(min, max) - min) as f32 / (max - min) as f32;
    (left + t * (right - left)).round() as usize
}

fn x_to_position(field: SliderField, x: f32, width: usize) -> i32 {
    let (left, right) = track_span(width);
    let (min, max) = field.bounds();
    let t = (x.clamp(left, right) - left) / (right - left);
    (min as f32 + t * (max - min) as f32).round() as i32
}

fn build_window_title(summary: Option<&SessionSummary>) -> String {
    match summary {
        Some(summary) => format!("Editopia | {}", present_session(summary)),
        None => "Editopia | no image loaded".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use editopia_adapters::{ImageCrateDecoder, JpegImageEncoder};
    use editopia_application::ImageEncoder;
    use editopia_domain::{ImageBuffer, Rgb};

    use super::*;

    fn loaded_service(dir: &std::path::Path) -> ApplicationService {
        let source = dir.join("scene.jpg");
        JpegImageEncoder::default()
            .encode(&ImageBuffer::from_pixel(6, 4, Rgb::new(120, 80, 40)), &source)
            .expect("write source");
        let mut service = ApplicationService::new(
            Box::new(ImageCrateDecoder),
            Box::new(JpegImageEncoder::default()),
        );
        service
            .load_image(LoadImageCommand { path: source })
            .expect("load");
        service
    }

    #[test]
    fn choosing_no_filter_returns_sliders_to_neutral() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut service = loaded_service(dir.path());
        let config = AppConfig::default();
        let mut state = EditorState::new();

        state.exposure = 150;
        commit_adjustment(
            &mut service,
            &config,
            &mut state,
            SliderField::Exposure,
            150,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        );
        assert_eq!(state.committed_exposure, 150);

        select_filter(
            &mut service,
            &config,
            &mut state,
            FilterKind::None,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        );
        let summary = service.session_summary(SessionSummaryQuery).expect("summary");
        assert_eq!(summary.params.exposure, 1.0);
        assert_eq!(state.exposure, NEUTRAL_POSITION);
        assert_eq!(state.committed_exposure, NEUTRAL_POSITION);
    }

    #[test]
    fn other_filters_keep_slider_positions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut service = loaded_service(dir.path());
        let config = AppConfig::default();
        let mut state = EditorState::new();

        state.saturation = 40;
        commit_adjustment(
            &mut service,
            &config,
            &mut state,
            SliderField::Saturation,
            40,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        );
        select_filter(
            &mut service,
            &config,
            &mut state,
            FilterKind::Sepia,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        );
        assert_eq!(state.saturation, 40);
        assert!(state.preview.is_some());
    }

    #[test]
    fn choosing_a_filter_without_image_leaves_sliders() {
        let mut service = ApplicationService::new(
            Box::new(ImageCrateDecoder),
            Box::new(JpegImageEncoder::default()),
        );
        let mut state = EditorState::new();
        state.exposure = 200;
        select_filter(
            &mut service,
            &AppConfig::default(),
            &mut state,
            FilterKind::None,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        );
        assert_eq!(state.exposure, 200);
        assert_eq!(state.notice, "NO IMAGE LOADED");
    }

    #[test]
    fn commit_waits_for_release_or_settle() {
        let mut debounce = DebouncedCommit::new(250);
        debounce.mark(SliderField::Exposure, 150, 1_000);
        assert_eq!(debounce.take_ready(1_100, true), None);
        assert_eq!(
            debounce.take_ready(1_250, true),
            Some((SliderField::Exposure, 150))
        );
        assert_eq!(debounce.take_ready(1_300, false), None);

        debounce.mark(SliderField::Saturation, 40, 2_000);
        assert_eq!(
            debounce.take_ready(2_010, false),
            Some((SliderField::Saturation, 40))
        );
    }

    #[test]
    fn slider_positions_stay_inside_valid_factors() {
        let width = WINDOW_WIDTH;
        for field in [SliderField::Exposure, SliderField::Saturation] {
            let low = x_to_position(field, 0.0, width);
            let high = x_to_position(field, width as f32, width);
            let adjustment = field.adjustment();
            assert!(adjustment.validate(low as f32 / 100.0).is_ok(), "{field:?} {low}");
            assert!(adjustment.validate(high as f32 / 100.0).is_ok(), "{field:?} {high}");
        }
    }

    #[test]
    fn x_and_position_mapping_roundtrip() {
        let width = WINDOW_WIDTH;
        let x = position_to_x(SliderField::Saturation, 150, width) as f32;
        let back = x_to_position(SliderField::Saturation, x, width);
        assert!((back - 150).abs() <= 1);
    }

    #[test]
    fn filter_rows_map_to_kinds() {
        let width = WINDOW_WIDTH;
        let x = (slider_left(width) + 10) as f32;
        let first = (filter_list_top() + 5) as f32;
        let last = (filter_list_top() + FILTER_ROW_HEIGHT * 5 + 5) as f32;
        assert_eq!(filter_at_position(x, first, width), Some(FilterKind::None));
        assert_eq!(
            filter_at_position(x, last, width),
            Some(FilterKind::BlackAndWhite)
        );
        assert_eq!(filter_at_position(5.0, first, width), None);
    }

    #[test]
    fn sliders_sit_below_filter_list() {
        let sliders = slider_specs();
        let list_bottom = filter_list_top() + FILTER_ROW_HEIGHT * FilterKind::ALL.len();
        assert!(sliders[0].top > list_bottom);
        let x = (slider_left(WINDOW_WIDTH) + 20) as f32;
        let y = (sliders[1].top + 4) as f32;
        assert_eq!(
            slider_at_position(x, y, &sliders, WINDOW_WIDTH),
            Some(SliderField::Saturation)
        );
    }

    #[test]
    fn mouse_update_changes_only_dragged_slider() {
        let mut state = EditorState::new();
        let mouse_x = slider_right(WINDOW_WIDTH) as f32;
        assert!(update_position_from_mouse(
            &mut state,
            SliderField::Exposure,
            mouse_x,
            WINDOW_WIDTH
        ));
        assert_eq!(state.exposure, 300);
        assert_eq!(state.saturation, NEUTRAL_POSITION);

        state.rollback(SliderField::Exposure);
        assert_eq!(state.exposure, NEUTRAL_POSITION);
    }

    #[test]
    fn title_reflects_session() {
        assert_eq!(build_window_title(None), "Editopia | no image loaded");
    }
}
