use globe_core::{FrameClock, FrameDriver, Globe, GlobeConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

mod keys;
mod render;

use keys::KeyAction;
use render::Renderer;

/// Pointer drag bookkeeping for the orbit controls.
#[derive(Default)]
struct PointerState {
    dragging: bool,
    last: Option<(f64, f64)>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("globe: {e:#}");
    }
}

fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Globe")
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let mut renderer = pollster::block_on(Renderer::new(&window))?;
    let mut globe = Globe::new(GlobeConfig::default())?;
    let size = window.inner_size();
    globe.orbit_mut().set_aspect(size.width, size.height);

    let mut driver = FrameDriver::default();
    let clock = FrameClock::default();
    let mut rng = StdRng::from_entropy();
    let mut pointer = PointerState::default();
    let mut shift = false;
    keys::log_help();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                globe.unmount();
                renderer.release();
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                globe.orbit_mut().set_aspect(size.width, size.height);
            }
            WindowEvent::ModifiersChanged(mods) => shift = mods.state().shift_key(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match keys::action_for_key(code, shift) {
                Some(KeyAction::Command(command)) => {
                    log::debug!("[keys] {:?} -> {:?}", code, command);
                    globe.apply(command, &mut rng);
                }
                Some(KeyAction::Help) => keys::log_help(),
                None => {}
            },
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                pointer.dragging = state == ElementState::Pressed;
                if !pointer.dragging {
                    pointer.last = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if pointer.dragging {
                    if let Some((x, y)) = pointer.last {
                        let height = renderer.window().inner_size().height as f32;
                        globe.orbit_mut().drag(
                            (position.x - x) as f32,
                            (position.y - y) as f32,
                            height,
                        );
                    }
                    pointer.last = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 50.0) as f32,
                };
                globe.orbit_mut().dolly(steps);
            }
            _ => {}
        },
        Event::AboutToWait => {
            driver.tick(&mut globe, clock.now_sec(), &mut renderer);
            match renderer.render() {
                Ok(_) => renderer.window().request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.resize(renderer.window().inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
