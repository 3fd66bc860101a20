use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::device::{FrameBlitter, Gpu};
use crate::input::{Key, MouseButton, RawInput};
use crate::paint::{PixelValue, WHITE_PIXEL};
use crate::render::{PixelBuffer, PresentTarget};

/// Window configuration, consumed once at [`PlatformWindow::open`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Pixel the surface is cleared to before each back-buffer copy.
    pub background_color: PixelValue,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "fresco".to_string(),
            x: 0,
            y: 0,
            width: 700,
            height: 700,
            background_color: WHITE_PIXEL,
        }
    }
}

#[self_referencing]
struct SurfaceEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// winit application state, driven in pump mode.
///
/// `resumed` performs window + surface creation; failures are parked in
/// `init_error` because the callback cannot return them.
struct PumpState {
    config: WindowConfig,
    entry: Option<SurfaceEntry>,
    init_error: Option<anyhow::Error>,
    pending: VecDeque<RawInput>,
    pointer: (i32, i32),
    closed: bool,
}

impl PumpState {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            entry: None,
            init_error: None,
            pending: VecDeque::new(),
            pointer: (0, 0),
            closed: false,
        }
    }
}

impl ApplicationHandler for PumpState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.init_error.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_position(LogicalPosition::new(
                self.config.x as f64,
                self.config.y as f64,
            ))
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ))
            .with_visible(false);

        let window = match event_loop
            .create_window(attrs)
            .context("failed to create native window")
        {
            Ok(window) => window,
            Err(err) => {
                self.init_error = Some(err);
                return;
            }
        };

        let entry = SurfaceEntryTryBuilder {
            window,
            gpu_builder: |window| pollster::block_on(Gpu::new(window)),
        }
        .try_build();

        match entry {
            Ok(entry) => self.entry = Some(entry),
            Err(err) => {
                self.init_error = Some(err.context("failed to initialize window surface"));
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Pump mode: the caller sleeps, not the event loop.
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => self.pending.push_back(RawInput::Expose),

            WindowEvent::CloseRequested => self.pending.push_back(RawInput::CloseRequested),

            WindowEvent::Destroyed => self.closed = true,

            WindowEvent::Resized(new_size) => entry.with_gpu_mut(|gpu| gpu.resize(new_size)),

            // The pointer position is tracked here because button events do
            // not carry coordinates; moves themselves are not classified.
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = entry.with_window(|window| to_logical_i32(window, position));
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let (x, y) = self.pointer;
                self.pending.push_back(RawInput::ButtonPressed {
                    button: map_mouse_button(button),
                    x,
                    y,
                });
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed =>
            {
                let (key, code) = map_key(event.physical_key);
                self.pending.push_back(RawInput::KeyPressed { key, code });
            }

            // Everything else is outside the selected event set.
            _ => {}
        }
    }
}

/// Owns the native display connection, the window, and the surface.
///
/// Construction failures are fatal (no retry, no degraded mode). The window
/// opens hidden; call [`show`](Self::show) to map it, mirroring the split in
/// the native lifecycle.
pub struct PlatformWindow {
    // `state` holds the surface entry and must drop before the event loop.
    state: PumpState,
    event_loop: EventLoop<()>,
    blitter: FrameBlitter,
}

impl PlatformWindow {
    pub fn open(config: WindowConfig) -> Result<Self> {
        let event_loop =
            EventLoop::new().context("failed to acquire the native display connection")?;

        let blitter = FrameBlitter::new(config.background_color);
        let mut this = Self {
            state: PumpState::new(config),
            event_loop,
            blitter,
        };

        // The first pump delivers `resumed`, which creates window + surface.
        this.pump();

        if let Some(err) = this.state.init_error.take() {
            return Err(err);
        }
        anyhow::ensure!(
            this.state.entry.is_some(),
            "event loop did not deliver window creation"
        );

        Ok(this)
    }

    /// Makes the window visible.
    pub fn show(&self) {
        if let Some(entry) = self.state.entry.as_ref() {
            entry.with_window(|window| window.set_visible(true));
        }
    }

    /// One non-blocking pass over the native queue; translated events land
    /// in the pending FIFO for [`drain_events`](Self::drain_events).
    pub fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);

        if let PumpStatus::Exit(_) = status {
            self.state.closed = true;
        }
    }

    /// Hands pending translated events to the classifier.
    pub fn drain_events(&mut self) -> impl Iterator<Item = RawInput> + '_ {
        self.state.pending.drain(..)
    }

    /// Whether the native window is still usable.
    pub fn should_run(&self) -> bool {
        !self.state.closed
    }

    /// Configured logical size, which is also the back-buffer size.
    pub fn size(&self) -> (u32, u32) {
        (self.state.config.width, self.state.config.height)
    }
}

impl PresentTarget for PlatformWindow {
    fn present_frame(&mut self, frame: &PixelBuffer) -> Result<()> {
        let Some(entry) = self.state.entry.as_mut() else {
            anyhow::bail!("window surface is gone");
        };

        let blitter = &mut self.blitter;
        entry.with_gpu_mut(|gpu| blitter.present(gpu, frame))
    }
}

fn to_logical_i32(window: &Window, pos: PhysicalPosition<f64>) -> (i32, i32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as i32, logical.y as i32)
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Space => Key::Space,
                KeyCode::Escape => Key::Escape,
                KeyCode::KeyA => Key::A,
                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,
                other => Key::Unknown(other as u32),
            };
            (key, code as u32)
        }

        // No stable numeric for unidentified platform keys.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}
