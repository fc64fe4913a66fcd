use nannou::prelude::*;
use std::sync::OnceLock;

use crate::config::{make_rng, FieldConfig};
use crate::driver::{Animation, CancelToken};
use crate::surface::{Bounds, DisplayList, DrawCommand, Surface};

// nannou の model 関数は引数を取れないため、起動時の設定をここに置く
// nannou's `model` is a plain fn pointer, so the startup config is parked here.
static CONFIG: OnceLock<FieldConfig> = OnceLock::new();

/// Entry point for the windowed animation.
///
/// Stores `config`, then starts nannou's event loop with the `model`,
/// `update` and `view` functions. Returns when the window closes.
pub fn run(config: FieldConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("app already configured, keeping the first configuration");
    }
    nannou::app(model).update(update).run();
}

struct Model {
    animation: Animation,
    display: DisplayList,
    cancel: CancelToken,
    background: Srgb<u8>,
}

fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();
    app.set_loop_mode(LoopMode::RefreshSync);
    app.set_exit_on_escape(false);

    app.new_window()
        .size(config.width, config.height)
        .title("Particle Field")
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .touch(touch)
        .resized(resized)
        .key_pressed(key_pressed)
        .build()
        .expect("failed to create the main window");

    // 実際のウィンドウサイズ（DPI等で指定値と異なることがある）
    // The actual window size may differ from the requested one.
    let rect = app.window_rect();
    let bounds = initial_bounds(rect.wh(), &config);
    let mut rng = make_rng(config.seed);

    Model {
        animation: Animation::new(&mut rng, bounds, &config),
        display: DisplayList::new(bounds),
        cancel: CancelToken::new(),
        background: config.background,
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    if model.cancel.is_cancelled() {
        log::info!("quit requested after {} frames", model.animation.frames());
        app.quit();
        return;
    }
    model.animation.tick(&mut model.display);
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let p = to_surface(pos, model.display.bounds());
    model.animation.pointer_moved(p);
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let p = to_surface(app.mouse.position(), model.display.bounds());
    model.animation.clicked(p);
}

// タップはクリックと同じ扱い / A tap counts as a click and a pointer move.
fn touch(_app: &App, model: &mut Model, event: TouchEvent) {
    if event.phase != TouchPhase::Started {
        return;
    }
    let p = to_surface(event.position, model.display.bounds());
    model.animation.pointer_moved(p);
    model.animation.clicked(p);
}

fn resized(_app: &App, model: &mut Model, size: Vec2) {
    log::debug!("resized to {}x{}", size.x, size.y);
    model.display.resize(Bounds::new(size.x, size.y));
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if matches!(key, Key::Escape | Key::Q) {
        model.cancel.cancel();
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let bounds = model.display.bounds();

    for command in model.display.commands() {
        match *command {
            DrawCommand::Clear => {
                draw.background().color(model.background);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                draw.ellipse()
                    .xy(to_window(center, bounds))
                    .radius(radius)
                    .color(color);
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                weight,
                color,
            } => {
                draw.ellipse()
                    .xy(to_window(center, bounds))
                    .radius(radius)
                    .no_fill()
                    .stroke_weight(weight)
                    .stroke(color);
            }
            DrawCommand::Line {
                from,
                to,
                weight,
                color,
            } => {
                draw.line()
                    .start(to_window(from, bounds))
                    .end(to_window(to, bounds))
                    .weight(weight)
                    .color(color);
            }
        }
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to render frame: {:?}", err);
    }
}

/// Window size at startup, or the configured size while the window still
/// reports zero area (some platforms size the window after the first event).
pub fn initial_bounds(window: Vec2, config: &FieldConfig) -> Bounds {
    let bounds = Bounds::new(window.x, window.y);
    if bounds.is_empty() {
        log::warn!(
            "window reported {}x{}, using configured {}x{}",
            window.x,
            window.y,
            config.width,
            config.height
        );
        return Bounds::new(config.width as f32, config.height as f32);
    }
    bounds
}

/// nannou 座標（中心原点・y 上向き）→ 描画面座標（左上原点・y 下向き）
/// Window coordinates (centre origin, y up) to surface coordinates (top-left origin, y down).
pub fn to_surface(p: Point2, bounds: Bounds) -> Point2 {
    pt2(p.x + bounds.width / 2.0, bounds.height / 2.0 - p.y)
}

/// Inverse of [`to_surface`].
pub fn to_window(p: Point2, bounds: Bounds) -> Point2 {
    pt2(p.x - bounds.width / 2.0, bounds.height / 2.0 - p.y)
}
