// src/main.rs
use log::{error, info};
use nannou::image::{DynamicImage, RgbaImage};
use nannou::prelude::*;
use rand::Rng;
use std::time::Instant;

use penora::{
    config::Config,
    controllers::{OscController, OscSender},
    models::TypingScript,
    pacing::{drop_last_grapheme, Quality},
    playback::RasterSurface,
    HandwritingSurface, RenderRequest,
};

struct Model {
    // Core components:
    surface: HandwritingSurface,
    request: RenderRequest,
    script: Option<TypingScript>,
    fonts: Vec<String>,

    // Comms components:
    osc_controller: OscController,
    osc_sender: OscSender,

    // Rendering components:
    texture: Option<wgpu::Texture>,
    random: rand::rngs::ThreadRng,

    // Clock
    started: Instant,
    script_started: Instant,
}

fn main() {
    env_logger::init();
    nannou::app(model).update(update).run();
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    error!("{}: {}", context, err);
    std::process::exit(1);
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().unwrap_or_else(|e| fail("Failed to load config file", e));

    let script = config.resolve_script_path().and_then(|path| {
        TypingScript::load(&path)
            .map_err(|e| error!("Failed to load typing script {}: {}", path.display(), e))
            .ok()
    });

    // Create OSC controller
    let osc_controller = OscController::new(config.osc.rx_port)
        .unwrap_or_else(|e| fail("Failed to create OSC Controller", e));
    let osc_sender = OscSender::new(config.osc.rx_port)
        .unwrap_or_else(|e| fail("Failed to create OSC Sender", e));

    // Create window
    let window = app
        .new_window()
        .title(format!("penora {}", env!("CARGO_PKG_VERSION")))
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build();
    if let Err(e) = window {
        fail("Failed to build window", format!("{:?}", e));
    }

    let mut request = config.render_request();
    if script.is_some() {
        request.text.clear();
    }
    info!("rendering with font {}", request.font_ref);
    let fonts = config.font_refs();

    Model {
        surface: HandwritingSurface::new(request.clone()),
        request,
        script,
        fonts,
        osc_controller,
        osc_sender,
        texture: None,
        random: rand::thread_rng(),
        started: Instant::now(),
        script_started: Instant::now(),
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::R => {
            model.script_started = Instant::now();
            model.osc_sender.send_replay();
        }
        Key::A => model.osc_sender.send_animate(!model.request.animate),
        Key::L => model.osc_sender.send_loop(!model.request.auto_replay),
        Key::S => {
            let seed = model.random.gen_range(0.0..10_000.0_f32).floor();
            model.osc_sender.send_seed(seed);
        }
        Key::Key1 => model.osc_sender.send_quality(Quality::Calm),
        Key::Key2 => model.osc_sender.send_quality(Quality::Balanced),
        Key::Key3 => model.osc_sender.send_quality(Quality::Snappy),
        Key::Up => model.osc_sender.send_speed((model.request.speed + 0.25) as f32),
        Key::Down => {
            let speed = (model.request.speed - 0.25).max(0.25);
            model.osc_sender.send_speed(speed as f32);
        }
        Key::Back => model.osc_sender.send_text(drop_last_grapheme(&model.request.text)),
        Key::Delete => model.osc_sender.send_text(""),
        Key::Return => model.osc_sender.send_append("\n"),
        Key::F => {
            let next = model
                .fonts
                .iter()
                .position(|font_ref| *font_ref == model.request.font_ref)
                .map_or(0, |index| (index + 1) % model.fonts.len());
            if let Some(font_ref) = model.fonts.get(next) {
                model.osc_sender.send_font(font_ref);
            }
        }
        _ => (),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = model.started.elapsed().as_secs_f64() * 1000.0;

    // Process OSC messages
    model.osc_controller.process_messages();
    for command in model.osc_controller.take_commands() {
        command.apply(&mut model.request);
    }

    // Replay the typing script until it runs out
    if let Some(script) = &model.script {
        let elapsed = model.script_started.elapsed().as_secs_f64() * 1000.0;
        model.request.text = script.text_at(elapsed);
        if script.is_finished(elapsed) {
            model.script = None;
        }
    }

    let changed = model.request != *model.surface.request();
    if changed {
        model.surface.update(model.request.clone(), now);
    }
    let animating = model.surface.frame(now);

    if changed || animating || model.texture.is_none() {
        upload_surface(app, model);
    }
}

fn upload_surface(app: &App, model: &mut Model) {
    let surface = model.surface.surface();
    let (width, height) = surface.size();
    let Some(image) = RgbaImage::from_raw(width, height, surface.to_rgba8()) else {
        return;
    };
    model.texture = Some(wgpu::Texture::from_image(
        app,
        &DynamicImage::ImageRgba8(image),
    ));
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.98, 0.97, 0.94));

    if let Some(texture) = &model.texture {
        let [width, height] = texture.size();
        draw.texture(texture).w_h(width as f32, height as f32);
    }

    draw.to_frame(app, &frame).ok();
}
