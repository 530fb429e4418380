//! Event delivery from the host into a jump round
//!
//! The host wires its key, mouse and scroll callbacks to an
//! [`InputSender`]; the engine awaits the matching [`InputReceiver`]. Only
//! one wait is outstanding at a time and every event is consumed once.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::keycode::KeyEvent;

/// Represents a mouse click event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseClickEvent {
    pub is_left_click: bool,
    pub is_right_click: bool,
}

/// Everything a round can observe while waiting for the next key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// A mouse press on the surface keys are read from
    PointerPressed(MouseClickEvent),
    /// The surface scrolled
    Scroll,
}

/// Source of input events for the engine
#[async_trait]
pub trait InputSource: Send {
    /// Wait for the next event. `None` means the source is closed.
    async fn next_event(&mut self) -> Option<InputEvent>;
}

/// Create a connected sender/receiver pair
pub fn channel() -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InputSender { tx }, InputReceiver { rx })
}

/// Host side of the input channel, cheap to clone into callbacks
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl InputSender {
    /// Deliver an event. Returns false if the receiver is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        if self.tx.send(event).is_err() {
            log::trace!("input: receiver dropped, discarding {:?}", event);
            return false;
        }
        true
    }

    pub fn key(&self, event: KeyEvent) -> bool {
        self.send(InputEvent::Key(event))
    }

    pub fn pointer_pressed(&self, event: MouseClickEvent) -> bool {
        self.send(InputEvent::PointerPressed(event))
    }

    pub fn scroll(&self) -> bool {
        self.send(InputEvent::Scroll)
    }
}

/// Engine side of the input channel
#[derive(Debug)]
pub struct InputReceiver {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

#[async_trait]
impl InputSource for InputReceiver {
    async fn next_event(&mut self) -> Option<InputEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (sender, mut receiver) = channel();
        assert!(sender.key(KeyEvent::char('f')));
        assert!(sender.pointer_pressed(MouseClickEvent {
            is_left_click: true,
            is_right_click: false,
        }));
        assert!(sender.scroll());

        assert_eq!(receiver.next_event().await, Some(InputEvent::Key(KeyEvent::char('f'))));
        assert!(matches!(
            receiver.next_event().await,
            Some(InputEvent::PointerPressed(MouseClickEvent { is_left_click: true, .. }))
        ));
        assert_eq!(receiver.next_event().await, Some(InputEvent::Scroll));
    }

    #[tokio::test]
    async fn test_closed_channel() {
        let (sender, mut receiver) = channel();
        drop(sender);
        assert_eq!(receiver.next_event().await, None);

        let (sender, receiver) = channel();
        drop(receiver);
        assert!(!sender.scroll());
    }
}
