use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::input::{Event, EventPoller};
use crate::paint::{ColorResolver, TrueColorTable};
use crate::render::Canvas;
use crate::time::FrameGate;
use crate::window::{PlatformWindow, WindowConfig};

use super::object::SharedGameObject;

/// Idle sleep at the end of every tick; trades a little CPU for input
/// latency instead of blocking on the native queue.
const IDLE_SLEEP: Duration = Duration::from_millis(2);

/// Per-event callback observed during the drain phase.
pub type EventHandler = Box<dyn FnMut(Event, &mut Canvas)>;

/// Cooperative single-threaded game loop.
///
/// Everything runs on the caller's thread inside [`run`](Self::run): event
/// pumping, classification, object updates, and compositing cannot
/// interleave. The scene is only ever mutated from this thread, so no
/// synchronization exists. Driving the canvas from another thread is
/// unsupported.
pub struct Game {
    window: PlatformWindow,
    canvas: Canvas,
    events: EventPoller,
    objects: Vec<SharedGameObject>,
    event_handler: Option<EventHandler>,
    running: bool,
}

impl Game {
    /// Builds the window collaborator and a canvas sized to it.
    ///
    /// Construction failures (no display connection, no surface) propagate
    /// as hard errors; there is no degraded mode.
    pub fn new(config: WindowConfig) -> Result<Self> {
        let (width, height) = (config.width, config.height);
        let window = PlatformWindow::open(config)?;

        let resolver = ColorResolver::new(Box::new(TrueColorTable::new()));
        let canvas = Canvas::new(width, height, resolver);

        window.show();

        Ok(Self {
            window,
            canvas,
            events: EventPoller::new(),
            objects: Vec::new(),
            event_handler: None,
            running: true,
        })
    }

    /// Registers a game object. Update order is registration order; the
    /// driver never removes objects on its own.
    pub fn add_object(&mut self, object: SharedGameObject) {
        self.objects.push(object);
    }

    /// Installs a callback invoked for every classified event in the drain
    /// phase, with mutable canvas access.
    pub fn set_event_handler(&mut self, handler: impl FnMut(Event, &mut Canvas) + 'static) {
        self.event_handler = Some(Box::new(handler));
    }

    /// Mutable canvas access for setup drawing before [`run`](Self::run).
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Blocks until an exit event is classified or the window reports it
    /// should no longer run.
    ///
    /// Per tick: pump and drain every pending event (the drain always
    /// completes, even when an exit is seen mid-drain; the flag is honored
    /// at the top of the next tick); then, only if at least 16 ms have
    /// elapsed since the last fired gate, update every object and present.
    pub fn run(&mut self) -> Result<()> {
        let mut gate = FrameGate::new();

        while self.running && self.window.should_run() {
            self.window.pump();
            for raw in self.window.drain_events() {
                self.events.push(raw);
            }

            let canvas = &mut self.canvas;
            let handler = &mut self.event_handler;
            if drain(&mut self.events, |event| {
                if let Some(handler) = handler.as_mut() {
                    handler(event, canvas);
                }
            }) {
                self.running = false;
            }

            if let Some(dt) = gate.try_tick(Instant::now()) {
                for object in &self.objects {
                    object.borrow_mut().update(dt, &mut self.canvas);
                }
                self.canvas.present(&mut self.window)?;
            }

            thread::sleep(IDLE_SLEEP);
        }

        Ok(())
    }
}

/// Drains every pending classified event, reporting whether any requested
/// exit.
///
/// One full drain per tick is the load-bearing convention: polling once per
/// tick instead leaves a backlog that grows whenever events arrive faster
/// than ticks.
fn drain(events: &mut EventPoller, mut on_event: impl FnMut(Event)) -> bool {
    let mut exit = false;

    while events.poll() {
        let event = events.current();
        if event.kind.requests_exit() {
            exit = true;
        }
        on_event(event);
    }

    exit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EventKind, Key, MouseButton, RawInput};

    #[test]
    fn drain_consumes_the_backlog_and_latches_exit() {
        let mut events = EventPoller::new();
        events.push(RawInput::ButtonPressed {
            button: MouseButton::Left,
            x: 1,
            y: 2,
        });
        events.push(RawInput::CloseRequested);
        events.push(RawInput::KeyPressed {
            key: Key::Space,
            code: 0,
        });

        let mut seen = Vec::new();
        let exit = drain(&mut events, |event| seen.push(event.kind));

        // The exit in the middle does not cut the drain short.
        assert!(exit);
        assert_eq!(
            seen,
            [EventKind::LeftClick, EventKind::Exit, EventKind::KeySpace]
        );
        assert_eq!(events.pending(), 0);
    }

    #[test]
    fn escape_counts_as_an_exit_request() {
        let mut events = EventPoller::new();
        events.push(RawInput::KeyPressed {
            key: Key::Escape,
            code: 9,
        });

        assert!(drain(&mut events, |_| {}));
    }

    #[test]
    fn drain_without_exit_keeps_running() {
        let mut events = EventPoller::new();
        events.push(RawInput::Expose);
        events.push(RawInput::KeyPressed {
            key: Key::ArrowUp,
            code: 0,
        });

        assert!(!drain(&mut events, |_| {}));
        assert_eq!(events.pending(), 0);
    }

    #[test]
    fn unrecognized_event_ends_the_drain_for_this_tick() {
        let mut events = EventPoller::new();
        events.push(RawInput::KeyPressed {
            key: Key::Unknown(123),
            code: 123,
        });
        events.push(RawInput::CloseRequested);

        // The unknown key is consumed and stops the drain; the close request
        // stays queued for the next tick.
        assert!(!drain(&mut events, |_| {}));
        assert_eq!(events.pending(), 1);
        assert!(drain(&mut events, |_| {}));
    }
}
