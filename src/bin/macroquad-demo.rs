use log::{error, info};
use macroquad::prelude::*;

use eddy::{worker, Command, Event, Frame, ParamUpdate, Preset, SimConfig};

// radius of the brush used to draw obstacles, in lattice cells
const BRUSH_RADIUS: f64 = 2.0;

// noise added to the flow on demand
const PERTURBATION: f64 = 0.05;

const VISCOSITY_RANGE: (f64, f64) = (0.005, 0.2);
const INLET_RANGE: (f64, f64) = (0.0, 0.2);
const CONTRAST_RANGE: (f64, f64) = (0.5, 50.0);

#[macroquad::main("LBM Simulator")]
async fn main() {
    env_logger::init();

    let config = SimConfig::default();
    let mut params = config.parameters();

    // the simulation lives on its own thread; we only ever see its frames
    let flow = worker::spawn();
    if flow.send(Command::Start(config.clone())).is_err() {
        error!("frame worker exited before starting");
        return;
    }

    let mut texture: Option<Texture2D> = None;
    let mut paused = false;
    let mut status = String::new();

    // event loop
    loop {
        // handle events
        let mut commands = Vec::new();
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
            commands.push(if paused { Command::Pause } else { Command::Resume });
        }
        if is_key_pressed(KeyCode::R) {
            commands.push(Command::Reset);
        }
        if is_key_pressed(KeyCode::P) {
            commands.push(Command::Perturb {
                amplitude: PERTURBATION,
            });
        }
        for (key, preset) in [
            (KeyCode::Key1, Preset::Circle),
            (KeyCode::Key2, Preset::Square),
            (KeyCode::Key3, Preset::Line),
            (KeyCode::Key0, Preset::Empty),
        ] {
            if is_key_pressed(key) {
                commands.push(Command::Barrier(preset));
            }
        }

        let mut update = ParamUpdate::default();
        if is_key_pressed(KeyCode::Up) {
            params.viscosity = (params.viscosity * 1.25).min(VISCOSITY_RANGE.1);
            update.viscosity = Some(params.viscosity);
        }
        if is_key_pressed(KeyCode::Down) {
            params.viscosity = (params.viscosity / 1.25).max(VISCOSITY_RANGE.0);
            update.viscosity = Some(params.viscosity);
        }
        if is_key_pressed(KeyCode::Right) {
            params.inlet_speed = (params.inlet_speed + 0.01).min(INLET_RANGE.1);
            update.inlet_speed = Some(params.inlet_speed);
        }
        if is_key_pressed(KeyCode::Left) {
            params.inlet_speed = (params.inlet_speed - 0.01).max(INLET_RANGE.0);
            update.inlet_speed = Some(params.inlet_speed);
        }
        if is_key_pressed(KeyCode::Equal) {
            params.contrast = (params.contrast * 1.5).min(CONTRAST_RANGE.1);
            update.contrast = Some(params.contrast);
        }
        if is_key_pressed(KeyCode::Minus) {
            params.contrast = (params.contrast / 1.5).max(CONTRAST_RANGE.0);
            update.contrast = Some(params.contrast);
        }
        if update != ParamUpdate::default() {
            info!(
                "viscosity {:.4}, inlet speed {:.2}, contrast {:.1}",
                params.viscosity, params.inlet_speed, params.contrast
            );
            commands.push(Command::Params(update));
        }

        if is_mouse_button_down(MouseButton::Left) {
            let (mx, my) = mouse_position();
            commands.push(Command::DrawBarrier {
                x: (mx / screen_width()) as f64 * config.width as f64,
                y: (my / screen_height()) as f64 * config.height as f64,
                radius: BRUSH_RADIUS,
            });
        }

        for command in commands {
            if flow.send(command).is_err() {
                error!("frame worker is gone");
                return;
            }
        }

        // take the latest frame and hand the buffer straight back
        while let Ok(event) = flow.try_recv() {
            match event {
                Event::Frame(frame) => {
                    let (width, height) = (frame.width(), frame.height());
                    let image = Image {
                        width: width as u16,
                        height: height as u16,
                        bytes: frame.into_pixels(),
                    };
                    match texture {
                        Some(t) if t.width() as usize == width && t.height() as usize == height => {
                            t.update(&image)
                        }
                        _ => {
                            let t = Texture2D::from_image(&image);
                            t.set_filter(FilterMode::Nearest);
                            texture = Some(t);
                        }
                    }
                    let buffer = Frame::from_pixels(width, height, image.bytes);
                    if flow.send(Command::Next(buffer)).is_err() {
                        error!("frame worker is gone");
                        return;
                    }
                }
                Event::Error(e) => {
                    error!("{}", e);
                    status = e.to_string();
                }
            }
        }

        //draw the state of the simulation
        clear_background(BLACK);
        if let Some(t) = texture {
            draw_texture_ex(
                t,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(screen_width(), screen_height())),
                    ..Default::default()
                },
            );
        }
        let hud = format!(
            "viscosity {:.4}  inlet {:.2}  contrast {:.1}{}  {}",
            params.viscosity,
            params.inlet_speed,
            params.contrast,
            if paused { "  [paused]" } else { "" },
            status
        );
        draw_text(&hud, 8.0, 20.0, 20.0, WHITE);

        // wait for the next render
        next_frame().await;
    }

    if flow.shutdown().is_err() {
        error!("frame worker panicked");
    }
}
