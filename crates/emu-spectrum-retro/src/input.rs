//! Controller ports and per-frame input processing.
//!
//! Each port holds a [`Device`]. Joystick devices read a joypad: buttons
//! with a key mapping press that key, the rest drive the emulated
//! joystick, and SELECT opens the on-screen keyboard. Keyboard devices
//! read the host keyboard.

use bitflags::bitflags;
use serde::Serialize;

use crate::core::SpectrumCore;
use crate::host::{ControllerDescription, Host, InputDescriptor, InputQuery, JoypadButton};
use crate::keymap::{RetroKey, SpectrumKey, map_retro_key};
use crate::overlay::OverlayState;
use crate::settings::FrontendSettings;

/// Number of controller ports.
pub const MAX_PADS: usize = 3;

/// Joystick interfaces the emulation core provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoystickType {
    Cursor = 1,
    Kempston = 2,
    Sinclair1 = 3,
    Sinclair2 = 4,
    Timex1 = 5,
    Timex2 = 6,
    Fuller = 7,
}

impl JoystickType {
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cursor => "Cursor",
            Self::Kempston => "Kempston",
            Self::Sinclair1 => "Sinclair 1",
            Self::Sinclair2 => "Sinclair 2",
            Self::Timex1 => "Timex 1",
            Self::Timex2 => "Timex 2",
            Self::Fuller => "Fuller",
        }
    }
}

/// Device selectable in a controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Device {
    /// Leave the port as it is.
    Auto,
    Joystick(JoystickType),
    Keyboard,
}

impl Device {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "Core defined Input",
            Self::Joystick(JoystickType::Cursor) => "Cursor Joystick",
            Self::Joystick(JoystickType::Kempston) => "Kempston Joystick",
            Self::Joystick(JoystickType::Sinclair1) => "Sinclair 1 Joystick",
            Self::Joystick(JoystickType::Sinclair2) => "Sinclair 2 Joystick",
            Self::Joystick(JoystickType::Timex1) => "Timex 1 Joystick",
            Self::Joystick(JoystickType::Timex2) => "Timex 2 Joystick",
            Self::Joystick(JoystickType::Fuller) => "Fuller Joystick",
            Self::Keyboard => "Sinclair Keyboard",
        }
    }

    #[must_use]
    pub const fn joystick(self) -> Option<JoystickType> {
        match self {
            Self::Joystick(j) => Some(j),
            _ => None,
        }
    }
}

const fn controller(device: Device) -> ControllerDescription {
    ControllerDescription {
        name: device.name(),
        device,
    }
}

/// Devices offered in every port.
pub const CONTROLLERS: [ControllerDescription; 9] = [
    controller(Device::Auto),
    controller(Device::Joystick(JoystickType::Cursor)),
    controller(Device::Joystick(JoystickType::Kempston)),
    controller(Device::Joystick(JoystickType::Sinclair1)),
    controller(Device::Joystick(JoystickType::Sinclair2)),
    controller(Device::Joystick(JoystickType::Timex1)),
    controller(Device::Joystick(JoystickType::Timex2)),
    controller(Device::Joystick(JoystickType::Fuller)),
    controller(Device::Keyboard),
];

/// Devices in each port before the host says otherwise.
pub const DEFAULT_DEVICES: [Device; MAX_PADS] = [
    Device::Joystick(JoystickType::Cursor),
    Device::Joystick(JoystickType::Kempston),
    Device::Keyboard,
];

/// Joypad labels, identical for every port.
const BUTTON_LABELS: [(JoypadButton, &str); 11] = [
    (JoypadButton::Up, "Up"),
    (JoypadButton::Down, "Down"),
    (JoypadButton::Left, "Left"),
    (JoypadButton::Right, "Right"),
    (JoypadButton::A, "Fire"),
    (JoypadButton::B, "Up"),
    (JoypadButton::X, "Fire"),
    (JoypadButton::Y, "Fire"),
    (JoypadButton::Select, "Keyboard overlay"),
    (JoypadButton::L, "Enter"),
    (JoypadButton::R, "Space"),
];

/// Input descriptors for every port.
#[must_use]
pub fn input_descriptors() -> Vec<InputDescriptor> {
    (0..MAX_PADS)
        .flat_map(|port| {
            BUTTON_LABELS
                .iter()
                .map(move |&(button, description)| InputDescriptor {
                    port,
                    button,
                    description,
                })
        })
        .collect()
}

bitflags! {
    /// Emulated joystick lines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct JoystickState: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const FIRE = 1 << 4;
    }
}

/// Joystick line driven by an unmapped button.
const fn joystick_line(button: JoypadButton) -> JoystickState {
    match button {
        JoypadButton::Up | JoypadButton::B => JoystickState::UP,
        JoypadButton::Down => JoystickState::DOWN,
        JoypadButton::Left => JoystickState::LEFT,
        JoypadButton::Right => JoystickState::RIGHT,
        JoypadButton::A | JoypadButton::X | JoypadButton::Y => JoystickState::FIRE,
        _ => JoystickState::empty(),
    }
}

/// Key pressed by a button with no mapping of its own.
const fn default_key(button: JoypadButton) -> Option<SpectrumKey> {
    match button {
        JoypadButton::L => Some(SpectrumKey::Enter),
        JoypadButton::R => Some(SpectrumKey::Space),
        _ => None,
    }
}

/// A key typed from the overlay, waiting to be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypedKey {
    key: SpectrumKey,
    shift: Option<SpectrumKey>,
    release_at_us: u64,
}

/// Port assignments and the input state carried between frames.
#[derive(Debug, Clone)]
pub struct InputState {
    devices: [Device; MAX_PADS],
    joypad: [[bool; 16]; MAX_PADS],
    host_keys: Vec<RetroKey>,
    keyboard: Vec<bool>,
    pub overlay: OverlayState,
    shift_latch: Option<SpectrumKey>,
    typed: Option<TypedKey>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        let host_keys = RetroKey::all();
        let keyboard = vec![false; host_keys.len()];
        Self {
            devices: DEFAULT_DEVICES,
            joypad: [[false; 16]; MAX_PADS],
            host_keys,
            keyboard,
            overlay: OverlayState::default(),
            shift_latch: None,
            typed: None,
        }
    }

    /// Forget held buttons and keys and close the overlay. Port
    /// assignments are kept.
    pub fn clear(&mut self) {
        self.joypad = [[false; 16]; MAX_PADS];
        self.keyboard.fill(false);
        self.overlay = OverlayState::default();
        self.shift_latch = None;
        self.typed = None;
    }

    #[must_use]
    pub fn device(&self, port: usize) -> Option<Device> {
        self.devices.get(port).copied()
    }

    /// Assign a device to a port. `Auto` and out-of-range ports leave the
    /// assignments unchanged; returns whether anything was assigned.
    pub fn set_device(&mut self, port: usize, device: Device) -> bool {
        if device == Device::Auto {
            return false;
        }
        match self.devices.get_mut(port) {
            Some(slot) => {
                *slot = device;
                true
            }
            None => false,
        }
    }

    /// Read the host's controllers and drive the core for one frame.
    pub fn process<H: Host, C: SpectrumCore>(
        &mut self,
        host: &mut H,
        core: &mut C,
        settings: &FrontendSettings,
        now_us: u64,
    ) {
        if let Some(typed) = self.typed
            && now_us >= typed.release_at_us
        {
            self.release_typed(core);
        }

        let mut keyboard_done = false;
        for port in 0..MAX_PADS {
            match self.devices[port] {
                Device::Keyboard if !keyboard_done => {
                    self.process_keyboard(host, core, port);
                    keyboard_done = true;
                }
                Device::Keyboard | Device::Auto => {}
                Device::Joystick(_) => self.process_joypad(host, core, settings, port, now_us),
            }
        }
    }

    fn process_joypad<H: Host, C: SpectrumCore>(
        &mut self,
        host: &mut H,
        core: &mut C,
        settings: &FrontendSettings,
        port: usize,
        now_us: u64,
    ) {
        let mut now = [false; 16];
        for button in JoypadButton::ALL {
            now[button.id()] = host.input_state(port, InputQuery::Joypad(button)) != 0;
        }
        let before = self.joypad[port];
        let pressed = |b: JoypadButton| now[b.id()] && !before[b.id()];

        if pressed(JoypadButton::Select) {
            self.overlay.toggle();
            if self.overlay.active {
                release_mapped(core, settings, &before);
                if port < 2 {
                    core.set_joystick(port, JoystickState::empty());
                }
            }
        }

        if self.overlay.active {
            if pressed(JoypadButton::Up) {
                self.overlay.up();
            }
            if pressed(JoypadButton::Down) {
                self.overlay.down();
            }
            if pressed(JoypadButton::Left) {
                self.overlay.left();
            }
            if pressed(JoypadButton::Right) {
                self.overlay.right();
            }
            if pressed(JoypadButton::A) {
                let key = self.overlay.key();
                self.type_key(core, key, now_us + settings.key_hold_time_us);
            }
        } else {
            let mut joystick = JoystickState::empty();
            for button in JoypadButton::ALL {
                if button == JoypadButton::Select {
                    continue;
                }
                let id = button.id();
                match settings.mapped_key(button).or(default_key(button)) {
                    Some(key) if now[id] != before[id] => core.key(key, now[id]),
                    Some(_) => {}
                    None if now[id] => joystick |= joystick_line(button),
                    None => {}
                }
            }
            if port < 2 {
                core.set_joystick(port, joystick);
            }
        }

        self.joypad[port] = now;
    }

    fn process_keyboard<H: Host, C: SpectrumCore>(&mut self, host: &mut H, core: &mut C, port: usize) {
        for (i, &key) in self.host_keys.iter().enumerate() {
            let down = host.input_state(port, InputQuery::Key(key)) != 0;
            if down != self.keyboard[i] {
                for &k in map_retro_key(key) {
                    core.key(k, down);
                }
                self.keyboard[i] = down;
            }
        }
    }

    /// Press a key from the overlay. Shift keys latch instead, and apply to
    /// the next key typed.
    fn type_key<C: SpectrumCore>(&mut self, core: &mut C, key: SpectrumKey, release_at_us: u64) {
        if key.is_shift() {
            self.shift_latch = if self.shift_latch == Some(key) {
                None
            } else {
                Some(key)
            };
            return;
        }

        self.release_typed(core);
        let shift = self.shift_latch.take();
        if let Some(shift) = shift {
            core.key(shift, true);
        }
        core.key(key, true);
        self.typed = Some(TypedKey {
            key,
            shift,
            release_at_us,
        });
    }

    fn release_typed<C: SpectrumCore>(&mut self, core: &mut C) {
        if let Some(typed) = self.typed.take() {
            core.key(typed.key, false);
            if let Some(shift) = typed.shift {
                core.key(shift, false);
            }
        }
    }

    /// The latched shift key, if any.
    #[must_use]
    pub fn shift_latch(&self) -> Option<SpectrumKey> {
        self.shift_latch
    }
}

/// Release every key held through a joypad mapping.
fn release_mapped<C: SpectrumCore>(core: &mut C, settings: &FrontendSettings, held: &[bool; 16]) {
    for button in JoypadButton::ALL {
        if held[button.id()]
            && let Some(key) = settings.mapped_key(button).or(default_key(button))
        {
            core.key(key, false);
        }
    }
}
