// Input translator - Debounce and auto-release for handheld buttons
//
// The host only reports "key active" notifications (possibly repeated while a
// key is held) and never a release. A notification for a released button is a
// press edge; a notification for a pressed button is ignored. A shared timer,
// rearmed on every press edge, releases everything once it expires.

use super::keymap::KeyMap;
use super::timer::ReleaseTimer;
use super::{Button, ButtonSink, BUTTON_COUNT};
use log::debug;
use std::time::{Duration, Instant};

/// Default delay before held buttons are released
pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_millis(100);

/// Converts host key notifications into leveled button events
pub struct InputTranslator {
    key_map: KeyMap,
    key_states: [bool; BUTTON_COUNT],
    release_delay: Duration,
    /// Created on the first press and rearmed afterwards
    release_timer: Option<ReleaseTimer>,
}

impl InputTranslator {
    /// Create a translator with the default key map and release delay
    pub fn new() -> Self {
        Self::with_key_map(KeyMap::handheld_default(), DEFAULT_RELEASE_DELAY)
    }

    /// Create a translator with a custom key map and release delay
    pub fn with_key_map(key_map: KeyMap, release_delay: Duration) -> Self {
        Self {
            key_map,
            key_states: [false; BUTTON_COUNT],
            release_delay,
            release_timer: None,
        }
    }

    /// Handle a host key notification
    ///
    /// # Arguments
    /// * `key` - Host key code
    /// * `now` - Time of the notification
    /// * `sink` - Receiver of button events
    ///
    /// # Returns
    /// `true` if a press event was emitted
    pub fn handle_key<S: ButtonSink + ?Sized>(&mut self, key: u32, now: Instant, sink: &mut S) -> bool {
        match self.key_map.button_for(key) {
            Some(button) => self.press(button, now, sink),
            None => false,
        }
    }

    /// Register a press notification for a button
    ///
    /// Emits a press event only on the released-to-pressed edge, and rearms
    /// the release timer only then.
    pub fn press<S: ButtonSink + ?Sized>(&mut self, button: Button, now: Instant, sink: &mut S) -> bool {
        let state = &mut self.key_states[button.index()];
        if *state {
            return false;
        }

        debug!("Button {:?} pressed", button);
        sink.button_event(button, true);
        *state = true;

        match &mut self.release_timer {
            Some(timer) => timer.reset(now),
            None => self.release_timer = Some(ReleaseTimer::armed(self.release_delay, now)),
        }

        true
    }

    /// Fire the release timer if it is due
    ///
    /// Every pressed button is released in index order.
    ///
    /// # Returns
    /// Number of release events emitted
    pub fn poll_release<S: ButtonSink + ?Sized>(&mut self, now: Instant, sink: &mut S) -> usize {
        let fired = self
            .release_timer
            .as_mut()
            .is_some_and(|timer| timer.fire_if_due(now));
        if !fired {
            return 0;
        }

        let mut released = 0;
        for button in Button::ALL {
            let state = &mut self.key_states[button.index()];
            if *state {
                debug!("Button {:?} released", button);
                sink.button_event(button, false);
                *state = false;
                released += 1;
            }
        }
        released
    }

    /// Deadline of the pending release, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.release_timer.as_ref().and_then(ReleaseTimer::deadline)
    }

    /// Whether a button is currently held
    pub fn is_pressed(&self, button: Button) -> bool {
        self.key_states[button.index()]
    }

    /// Current state of every button, in index order
    pub fn key_states(&self) -> [bool; BUTTON_COUNT] {
        self.key_states
    }

    /// Active key map
    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Delay between the last press edge and the forced release
    pub fn release_delay(&self) -> Duration {
        self.release_delay
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new()
    }
}
