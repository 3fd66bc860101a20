use std::collections::VecDeque;

use super::types::{Key, MouseButton, RawInput};

/// Classified event kinds; a closed set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventKind {
    None,
    Expose,
    Exit,
    LeftClick,
    RightClick,
    MiddleClick,
    KeyA,
    KeyEsc,
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    KeySpace,
}

impl EventKind {
    /// Kinds that ask the loop driver to terminate.
    #[inline]
    pub fn requests_exit(self) -> bool {
        matches!(self, EventKind::Exit | EventKind::KeyEsc)
    }
}

/// Transient per-poll record. Overwritten by each successful classification;
/// holds no history.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub x: i32,
    pub y: i32,
    pub keysym: u32,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            kind: EventKind::None,
            x: 0,
            y: 0,
            keysym: 0,
        }
    }
}

/// Non-blocking event classifier.
///
/// [`poll`](Self::poll) dequeues at most one raw event per call, so a caller
/// that wants an empty queue before acting must loop until it returns
/// `false` within the same tick. Checking once per tick leaves a backlog
/// that grows whenever events arrive faster than the tick rate.
///
/// A `false` return does not always mean the queue is empty: events whose
/// key symbol or button is outside the classification tables are consumed
/// and discarded with `false`. Callers must branch on the boolean, never on
/// a re-read of [`kind`](Self::kind): a stale kind is not a new event.
#[derive(Debug, Default)]
pub struct EventPoller {
    queue: VecDeque<RawInput>,
    current: Event,
}

impl EventPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a raw event from the window runtime.
    pub fn push(&mut self, raw: RawInput) {
        self.queue.push_back(raw);
    }

    /// Raw events still waiting to be classified.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dequeues and classifies one raw event.
    ///
    /// Returns `false` immediately when no event is pending, leaving the
    /// previous classification untouched. Otherwise the event is consumed
    /// exactly once; unrecognized keys and buttons are discarded, not
    /// re-queued.
    pub fn poll(&mut self) -> bool {
        let Some(raw) = self.queue.pop_front() else {
            return false;
        };

        self.current.kind = EventKind::None;

        match raw {
            RawInput::Expose => {
                self.current.kind = EventKind::Expose;
                true
            }

            RawInput::KeyPressed { key, code } => {
                self.current.keysym = code;
                let kind = match key {
                    Key::Space => EventKind::KeySpace,
                    Key::Escape => EventKind::KeyEsc,
                    Key::A => EventKind::KeyA,
                    Key::ArrowUp => EventKind::KeyUp,
                    Key::ArrowDown => EventKind::KeyDown,
                    Key::ArrowLeft => EventKind::KeyLeft,
                    Key::ArrowRight => EventKind::KeyRight,
                    Key::Unknown(_) => return false,
                };
                self.current.kind = kind;
                true
            }

            RawInput::ButtonPressed { button, x, y } => {
                self.current.x = x;
                self.current.y = y;
                let kind = match button {
                    MouseButton::Left => EventKind::LeftClick,
                    MouseButton::Middle => EventKind::MiddleClick,
                    MouseButton::Right => EventKind::RightClick,
                    _ => return false,
                };
                self.current.kind = kind;
                true
            }

            RawInput::CloseRequested => {
                self.current.kind = EventKind::Exit;
                true
            }
        }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.current.kind
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.current.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.current.y
    }

    #[inline]
    pub fn keysym(&self) -> u32 {
        self.current.keysym
    }

    /// Snapshot of the last successful classification.
    #[inline]
    pub fn current(&self) -> Event {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key) -> RawInput {
        RawInput::KeyPressed { key, code: 0 }
    }

    #[test]
    fn empty_queue_returns_false_and_keeps_prior_kind() {
        let mut poller = EventPoller::new();
        poller.push(RawInput::Expose);
        assert!(poller.poll());
        assert_eq!(poller.kind(), EventKind::Expose);

        assert!(!poller.poll());
        assert_eq!(poller.kind(), EventKind::Expose);
    }

    #[test]
    fn key_table_maps_every_recognized_symbol() {
        let table = [
            (Key::Space, EventKind::KeySpace),
            (Key::Escape, EventKind::KeyEsc),
            (Key::A, EventKind::KeyA),
            (Key::ArrowUp, EventKind::KeyUp),
            (Key::ArrowDown, EventKind::KeyDown),
            (Key::ArrowLeft, EventKind::KeyLeft),
            (Key::ArrowRight, EventKind::KeyRight),
        ];

        let mut poller = EventPoller::new();
        for (sym, expected) in table {
            poller.push(key(sym));
            assert!(poller.poll());
            assert_eq!(poller.kind(), expected);
        }
    }

    #[test]
    fn unknown_key_is_consumed_and_discarded() {
        let mut poller = EventPoller::new();
        poller.push(key(Key::Unknown(77)));
        poller.push(RawInput::CloseRequested);

        // The dequeue happens, the classification does not.
        assert!(!poller.poll());
        assert_eq!(poller.kind(), EventKind::None);
        assert_eq!(poller.pending(), 1);
    }

    #[test]
    fn button_press_records_coordinates_then_maps() {
        let mut poller = EventPoller::new();
        poller.push(RawInput::ButtonPressed {
            button: MouseButton::Left,
            x: 40,
            y: 50,
        });
        assert!(poller.poll());
        assert_eq!(poller.kind(), EventKind::LeftClick);
        assert_eq!((poller.x(), poller.y()), (40, 50));

        poller.push(RawInput::ButtonPressed {
            button: MouseButton::Middle,
            x: 1,
            y: 2,
        });
        assert!(poller.poll());
        assert_eq!(poller.kind(), EventKind::MiddleClick);

        poller.push(RawInput::ButtonPressed {
            button: MouseButton::Right,
            x: 3,
            y: 4,
        });
        assert!(poller.poll());
        assert_eq!(poller.kind(), EventKind::RightClick);
    }

    #[test]
    fn unmapped_button_is_discarded() {
        let mut poller = EventPoller::new();
        poller.push(RawInput::ButtonPressed {
            button: MouseButton::Back,
            x: 9,
            y: 9,
        });
        assert!(!poller.poll());
        assert_eq!(poller.kind(), EventKind::None);
        assert_eq!(poller.pending(), 0);
    }

    #[test]
    fn close_request_classifies_as_exit() {
        let mut poller = EventPoller::new();
        poller.push(RawInput::CloseRequested);
        assert!(poller.poll());
        assert!(poller.kind().requests_exit());
    }

    #[test]
    fn drain_consumes_the_queue_in_order() {
        let mut poller = EventPoller::new();
        poller.push(RawInput::Expose);
        poller.push(RawInput::CloseRequested);
        poller.push(key(Key::Space));

        let mut kinds = Vec::new();
        while poller.poll() {
            kinds.push(poller.kind());
        }

        assert_eq!(
            kinds,
            [EventKind::Expose, EventKind::Exit, EventKind::KeySpace]
        );
        assert_eq!(poller.pending(), 0);
    }
}
