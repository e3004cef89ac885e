//! Player input normalized to a per-tick steering intent
//!
//! Both input schemes are level-triggered: a control stays held until it is
//! explicitly released. The simulation only ever sees `InputIntent`.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Controls held during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub steer_left: bool,
    pub steer_right: bool,
    pub throttle: bool,
    pub brake: bool,
}

/// Anything that can report the current intent without blocking
pub trait InputSource {
    fn sample_intent(&self) -> InputIntent;
}

/// Sample a source, or coast when there is none
pub fn sample_or_idle(source: Option<&dyn InputSource>) -> InputIntent {
    source.map(|s| s.sample_intent()).unwrap_or_default()
}

/// One of the four driving controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Throttle,
    Brake,
}

/// What a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Drive(Control),
    Pause,
}

impl KeyBinding {
    /// Map a `KeyboardEvent.key` value to a binding
    pub fn from_key(key: &str) -> Option<Self> {
        let binding = match key {
            "ArrowLeft" | "a" | "A" => KeyBinding::Drive(Control::Left),
            "ArrowRight" | "d" | "D" => KeyBinding::Drive(Control::Right),
            "ArrowUp" | "w" | "W" => KeyBinding::Drive(Control::Throttle),
            "ArrowDown" | "s" | "S" => KeyBinding::Drive(Control::Brake),
            "Escape" | "p" | "P" => KeyBinding::Pause,
            _ => return None,
        };
        Some(binding)
    }
}

/// Held/released flags for the four controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ControlFlags(InputIntent);

impl ControlFlags {
    fn set(&mut self, control: Control, held: bool) {
        let flag = match control {
            Control::Left => &mut self.0.steer_left,
            Control::Right => &mut self.0.steer_right,
            Control::Throttle => &mut self.0.throttle,
            Control::Brake => &mut self.0.brake,
        };
        *flag = held;
    }
}

/// Keyboard input: arrows or WASD, Escape/P to pause
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    flags: ControlFlags,
    pause_requested: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press; returns true if the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        match KeyBinding::from_key(key) {
            Some(KeyBinding::Drive(control)) => {
                self.flags.set(control, true);
                true
            }
            Some(KeyBinding::Pause) => {
                self.pause_requested = true;
                true
            }
            None => false,
        }
    }

    /// Handle a key release; returns true if the key is bound
    pub fn key_up(&mut self, key: &str) -> bool {
        match KeyBinding::from_key(key) {
            Some(KeyBinding::Drive(control)) => {
                self.flags.set(control, false);
                true
            }
            Some(KeyBinding::Pause) => true,
            None => false,
        }
    }

    /// Consume a pending pause request
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    /// Drop every held key (e.g. on window blur, where key-ups are lost)
    pub fn release_all(&mut self) {
        self.flags = ControlFlags::default();
    }
}

impl InputSource for KeyboardInput {
    fn sample_intent(&self) -> InputIntent {
        self.flags.0
    }
}

/// On-screen touch zones, one per control
#[derive(Debug, Clone, Default)]
pub struct TouchInput {
    flags: ControlFlags,
}

impl TouchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, zone: Control) {
        self.flags.set(zone, true);
    }

    pub fn pointer_up(&mut self, zone: Control) {
        self.flags.set(zone, false);
    }

    /// Pointer dragged off a zone while held
    pub fn pointer_leave(&mut self, zone: Control) {
        self.flags.set(zone, false);
    }

    pub fn release_all(&mut self) {
        self.flags = ControlFlags::default();
    }
}

impl InputSource for TouchInput {
    fn sample_intent(&self) -> InputIntent {
        self.flags.0
    }
}

/// The one input source a session reads from
#[derive(Debug, Clone)]
pub enum ActiveInput {
    Keyboard(KeyboardInput),
    Touch(TouchInput),
}

impl ActiveInput {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Desktop => ActiveInput::Keyboard(KeyboardInput::new()),
            Platform::Mobile => ActiveInput::Touch(TouchInput::new()),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            ActiveInput::Keyboard(_) => Platform::Desktop,
            ActiveInput::Touch(_) => Platform::Mobile,
        }
    }

    pub fn release_all(&mut self) {
        match self {
            ActiveInput::Keyboard(k) => k.release_all(),
            ActiveInput::Touch(t) => t.release_all(),
        }
    }
}

impl InputSource for ActiveInput {
    fn sample_intent(&self) -> InputIntent {
        match self {
            ActiveInput::Keyboard(k) => k.sample_intent(),
            ActiveInput::Touch(t) => t.sample_intent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_level_triggered() {
        let mut keys = KeyboardInput::new();
        assert!(keys.key_down("ArrowUp"));
        assert!(keys.key_down("a"));

        // Held across samples until released
        for _ in 0..3 {
            let intent = keys.sample_intent();
            assert!(intent.throttle);
            assert!(intent.steer_left);
            assert!(!intent.brake);
        }

        keys.key_up("A");
        let intent = keys.sample_intent();
        assert!(intent.throttle);
        assert!(!intent.steer_left);
    }

    #[test]
    fn test_wasd_and_arrows_share_controls() {
        let mut keys = KeyboardInput::new();
        keys.key_down("D");
        keys.key_down("s");
        assert_eq!(
            keys.sample_intent(),
            InputIntent {
                steer_right: true,
                brake: true,
                ..Default::default()
            }
        );
        keys.key_up("ArrowRight");
        keys.key_up("ArrowDown");
        assert_eq!(keys.sample_intent(), InputIntent::default());
    }

    #[test]
    fn test_pause_is_a_side_signal() {
        let mut keys = KeyboardInput::new();
        assert!(keys.key_down("Escape"));
        assert_eq!(keys.sample_intent(), InputIntent::default());
        assert!(keys.take_pause_request());
        assert!(!keys.take_pause_request());
        keys.key_down("p");
        assert!(keys.take_pause_request());
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut keys = KeyboardInput::new();
        assert!(!keys.key_down("q"));
        assert!(!keys.key_up("Shift"));
        assert_eq!(keys.sample_intent(), InputIntent::default());
    }

    #[test]
    fn test_touch_leave_releases_zone() {
        let mut touch = TouchInput::new();
        touch.pointer_down(Control::Throttle);
        touch.pointer_down(Control::Right);
        assert!(touch.sample_intent().throttle);

        touch.pointer_leave(Control::Throttle);
        let intent = touch.sample_intent();
        assert!(!intent.throttle);
        assert!(intent.steer_right);

        touch.pointer_up(Control::Right);
        assert_eq!(touch.sample_intent(), InputIntent::default());
    }

    #[test]
    fn test_active_input_follows_platform() {
        let mut input = ActiveInput::for_platform(Platform::Mobile);
        assert_eq!(input.platform(), Platform::Mobile);
        if let ActiveInput::Touch(t) = &mut input {
            t.pointer_down(Control::Brake);
        }
        assert!(input.sample_intent().brake);
        input.release_all();
        assert_eq!(input.sample_intent(), InputIntent::default());

        let input = ActiveInput::for_platform(Platform::Desktop);
        assert!(matches!(input, ActiveInput::Keyboard(_)));
    }

    #[test]
    fn test_missing_source_coasts() {
        assert_eq!(sample_or_idle(None), InputIntent::default());
        let mut keys = KeyboardInput::new();
        keys.key_down("w");
        assert!(sample_or_idle(Some(&keys)).throttle);
    }
}
