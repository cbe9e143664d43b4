//! Button input.
//!
//! Producers (GPIO tasks on the device, key events in the simulator) debounce
//! edges with [`ButtonState`] and push immutable [`ButtonEvent`]s into a
//! bounded queue. The menu and the game session are the only consumers and
//! read the queue through [`ButtonInput`]; they never touch pin state.

mod debounce;

pub use debounce::ButtonState;
use heapless::Deque;

/// Physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Moves the menu cursor (green button).
    Navigate,
    /// Starts the highlighted game (red button).
    Select,
}

/// A debounced press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub timestamp_ms: u64,
}

/// Consumer side of the button queue.
pub trait ButtonInput {
    /// Take the oldest pending press, if any. Never blocks.
    fn poll_event(&mut self) -> Option<ButtonEvent>;

    /// Drain the queue and report whether anything was pressed.
    fn any_pressed(&mut self) -> bool {
        let mut pressed = false;
        while self.poll_event().is_some() {
            pressed = true;
        }
        pressed
    }
}

impl<T: ButtonInput + ?Sized> ButtonInput for &mut T {
    fn poll_event(&mut self) -> Option<ButtonEvent> { (**self).poll_event() }
}

impl<const N: usize> ButtonInput for Deque<ButtonEvent, N> {
    fn poll_event(&mut self) -> Option<ButtonEvent> { self.pop_front() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(
        button: Button,
        timestamp_ms: u64,
    ) -> ButtonEvent {
        ButtonEvent { button, timestamp_ms }
    }

    #[test]
    fn test_deque_is_fifo() {
        let mut queue: Deque<ButtonEvent, 4> = Deque::new();
        queue.push_back(press(Button::Navigate, 10)).unwrap();
        queue.push_back(press(Button::Select, 20)).unwrap();
        assert_eq!(queue.poll_event(), Some(press(Button::Navigate, 10)));
        assert_eq!(queue.poll_event(), Some(press(Button::Select, 20)));
        assert_eq!(queue.poll_event(), None);
    }

    #[test]
    fn test_any_pressed_drains() {
        let mut queue: Deque<ButtonEvent, 4> = Deque::new();
        assert!(!queue.any_pressed());

        queue.push_back(press(Button::Navigate, 1)).unwrap();
        queue.push_back(press(Button::Navigate, 2)).unwrap();
        queue.push_back(press(Button::Select, 3)).unwrap();
        assert!(queue.any_pressed());
        assert!(queue.is_empty());
        assert!(!queue.any_pressed());
    }
}
