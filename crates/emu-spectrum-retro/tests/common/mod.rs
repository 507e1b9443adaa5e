//! Scripted emulation core and recording host for driving a `Frontend`.

#![allow(dead_code)]

use emu_core::{BANK_SIZE, BankedMemory, Bus, SnapshotCodec, SnapshotFormat};
use emu_spectrum_retro::content::{ContentInfo, ContentType};
use emu_spectrum_retro::core::{SliceOutput, SpectrumCore};
use emu_spectrum_retro::geometry::hard_size;
use emu_spectrum_retro::host::{
    AvInfo, ControllerDescription, FrameView, GameGeometry, Host, InputDescriptor, InputQuery,
    JoypadButton, PixelFormat,
};
use emu_spectrum_retro::input::{JoystickState, JoystickType};
use emu_spectrum_retro::keymap::{RetroKey, SpectrumKey};
use emu_spectrum_retro::machine::{MACHINES, MachineDescriptor, MachineId};
use emu_spectrum_retro::memory_map::MemoryDescriptor;
use emu_spectrum_retro::options::{CoreOption, VariableSource, VariableStore};
use emu_spectrum_retro::palette::Palette;
use emu_spectrum_retro::settings::EmulatorSettings;

/// Colour of every framebuffer pixel the mock core draws.
pub const FRAME_PIXEL: u16 = 0x39E7;

/// Slices per frame; the last one completes a frame and produces audio.
pub const SLICES_PER_FRAME: usize = 3;

/// Samples produced per frame.
pub const SAMPLES_PER_FRAME: usize = 8;

const SNAPSHOT_MAGIC: &[u8; 4] = b"ZXST";

// ---------------------------------------------------------------------------
// Mock core
// ---------------------------------------------------------------------------

/// A 128K-style memory layout: ROM at $0000, banks 5, 2 and 0 paged in
/// above it. Eight RAM banks whatever the machine.
pub struct MockCore {
    pub rom: Vec<u8>,
    pub ram: Vec<Vec<u8>>,
    pub machine: Option<MachineId>,
    pub settings: Option<EmulatorSettings>,
    pub palette: Option<Palette>,
    pub framebuffer: Vec<u16>,
    pub init_calls: usize,
    pub shutdown_calls: usize,
    pub init_error: Option<String>,
    pub identify_as: Option<ContentType>,
    pub identified_names: Vec<Option<String>>,
    pub opened: Vec<(ContentInfo, usize, bool)>,
    pub open_error: Option<String>,
    pub pause_depth: i32,
    pub paused_during_open: bool,
    pub refreshes: usize,
    pub eighty_track: bool,
    pub drives_unprotected: bool,
    pub slices: usize,
    pub pending_audio: Vec<i16>,
    pub keys: Vec<(SpectrumKey, bool)>,
    pub joysticks: [JoystickState; 2],
    pub joystick_types: [Option<JoystickType>; 2],
    pub selected: Vec<MachineId>,
    pub encodes: usize,
    pub restored: Option<Vec<u8>>,
}

impl MockCore {
    pub fn new() -> Self {
        Self {
            rom: vec![0xF3; BANK_SIZE],
            ram: (0..8).map(|bank| vec![bank as u8; BANK_SIZE]).collect(),
            machine: None,
            settings: None,
            palette: None,
            framebuffer: Vec::new(),
            init_calls: 0,
            shutdown_calls: 0,
            init_error: None,
            identify_as: None,
            identified_names: Vec::new(),
            opened: Vec::new(),
            open_error: None,
            pause_depth: 0,
            paused_during_open: false,
            refreshes: 0,
            eighty_track: false,
            drives_unprotected: false,
            slices: 0,
            pending_audio: Vec::new(),
            keys: Vec::new(),
            joysticks: [JoystickState::empty(); 2],
            joystick_types: [None; 2],
            selected: Vec::new(),
            encodes: 0,
            restored: None,
        }
    }

    fn resize_framebuffer(&mut self, machine: &MachineDescriptor) {
        let (width, height) = hard_size(machine);
        self.framebuffer = vec![FRAME_PIXEL; width as usize * height as usize];
        self.machine = Some(machine.id);
    }

    /// Keys currently held, replaying the press/release log.
    pub fn held_keys(&self) -> Vec<SpectrumKey> {
        let mut held = Vec::new();
        for &(key, pressed) in &self.keys {
            if pressed {
                if !held.contains(&key) {
                    held.push(key);
                }
            } else {
                held.retain(|&k| k != key);
            }
        }
        held
    }

    fn page(&self, address: u16) -> Option<(usize, usize)> {
        let offset = usize::from(address) & (BANK_SIZE - 1);
        match address >> 14 {
            0 => None,
            1 => Some((5, offset)),
            2 => Some((2, offset)),
            _ => Some((0, offset)),
        }
    }
}

impl Bus for MockCore {
    fn read(&mut self, address: u16) -> u8 {
        match self.page(address) {
            Some((bank, offset)) => self.ram[bank][offset],
            None => self.rom[usize::from(address)],
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        if let Some((bank, offset)) = self.page(address) {
            self.ram[bank][offset] = value;
        }
    }
}

impl BankedMemory for MockCore {
    fn bank_count(&self) -> usize {
        self.ram.len()
    }

    fn bank(&self, bank: usize) -> Option<&[u8]> {
        self.ram.get(bank).map(Vec::as_slice)
    }

    fn bank_mut(&mut self, bank: usize) -> Option<&mut [u8]> {
        self.ram.get_mut(bank).map(Vec::as_mut_slice)
    }
}

impl SnapshotCodec for MockCore {
    /// Magic plus bank 0.
    fn encode_snapshot(&mut self, out: &mut Vec<u8>) -> Result<(), String> {
        self.encodes += 1;
        out.clear();
        out.extend_from_slice(SNAPSHOT_MAGIC);
        out.extend_from_slice(&self.ram[0]);
        Ok(())
    }

    fn decode_snapshot(&mut self, data: &[u8], format: SnapshotFormat) -> Result<(), String> {
        if format != SnapshotFormat::Szx {
            return Err(format!("unsupported format {format:?}"));
        }
        let body = data
            .strip_prefix(SNAPSHOT_MAGIC)
            .ok_or_else(|| "not a snapshot".to_string())?;
        let bank = body.get(..BANK_SIZE).ok_or_else(|| "truncated".to_string())?;
        self.ram[0].copy_from_slice(bank);
        self.restored = Some(data.to_vec());
        Ok(())
    }
}

impl SpectrumCore for MockCore {
    fn init(&mut self) -> Result<(), String> {
        self.init_calls += 1;
        if let Some(e) = &self.init_error {
            return Err(e.clone());
        }
        let start = self
            .settings
            .as_ref()
            .and_then(|s| s.start_machine)
            .and_then(|id| MACHINES.iter().find(|m| m.core_id == id))
            .unwrap_or(&MACHINES[0]);
        self.resize_framebuffer(start);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.shutdown_calls += 1;
    }

    fn select_machine(&mut self, machine: &MachineDescriptor) {
        self.selected.push(machine.id);
        self.resize_framebuffer(machine);
    }

    fn apply_settings(&mut self, settings: &EmulatorSettings) {
        self.settings = Some(settings.clone());
    }

    fn set_palette(&mut self, palette: &Palette) {
        self.palette = Some(*palette);
    }

    fn refresh_display(&mut self) {
        self.refreshes += 1;
    }

    fn pause(&mut self) {
        self.pause_depth += 1;
    }

    fn unpause(&mut self) {
        self.pause_depth -= 1;
    }

    fn identify(&mut self, name: Option<&str>, _data: &[u8]) -> Option<ContentType> {
        self.identified_names.push(name.map(str::to_string));
        self.identify_as
    }

    fn open(&mut self, content: &ContentInfo, data: &[u8], autoload: bool) -> Result<(), String> {
        self.paused_during_open = self.pause_depth > 0;
        self.opened.push((*content, data.len(), autoload));
        match &self.open_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn use_80_track_plus3_drive(&mut self) {
        self.eighty_track = true;
    }

    fn unprotect_drives(&mut self) {
        self.drives_unprotected = true;
    }

    fn run_slice(&mut self) -> SliceOutput {
        self.slices += 1;
        if self.slices % SLICES_PER_FRAME == 0 {
            self.pending_audio
                .extend((0..SAMPLES_PER_FRAME).map(|i| i as i16));
            SliceOutput {
                frame: true,
                audio: true,
            }
        } else {
            SliceOutput::default()
        }
    }

    fn framebuffer(&self) -> &[u16] {
        &self.framebuffer
    }

    fn drain_audio(&mut self, out: &mut Vec<i16>) {
        out.append(&mut self.pending_audio);
    }

    fn set_joystick_type(&mut self, port: usize, joystick: JoystickType) {
        self.joystick_types[port] = Some(joystick);
    }

    fn set_joystick(&mut self, port: usize, state: JoystickState) {
        self.joysticks[port] = state;
    }

    fn key(&mut self, key: SpectrumKey, pressed: bool) {
        self.keys.push((key, pressed));
    }

    fn memory_page(&self, page: usize) -> Option<&[u8]> {
        let start = (page % 4) * 0x1000;
        let bank = match page / 4 {
            0 => return self.rom.get(start..start + 0x1000),
            1 => 5,
            2 => 2,
            3 => 0,
            _ => return None,
        };
        self.ram[bank].get(start..start + 0x1000)
    }
}

// ---------------------------------------------------------------------------
// Mock host
// ---------------------------------------------------------------------------

/// A presented frame, visible pixels only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pitch: usize,
    pub rows: Vec<Vec<u16>>,
}

impl Frame {
    pub fn pixel(&self, x: usize, y: usize) -> u16 {
        self.rows[y][x]
    }
}

pub struct MockHost {
    pub store: VariableStore,
    pub accept_rgb565: bool,
    pub registered_options: Vec<&'static str>,
    pub controllers: Vec<&'static str>,
    pub ports: usize,
    pub descriptors: Vec<InputDescriptor>,
    pub geometries: Vec<GameGeometry>,
    pub av_infos: Vec<AvInfo>,
    pub memory_map: Vec<(usize, usize, Option<u8>)>,
    pub messages: Vec<String>,
    pub frames: Vec<Option<Frame>>,
    pub polls: usize,
    pub joypad: [[bool; 16]; 3],
    pub keys: Vec<RetroKey>,
    pub audio: Vec<i16>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            store: VariableStore::new(),
            accept_rgb565: true,
            registered_options: Vec::new(),
            controllers: Vec::new(),
            ports: 0,
            descriptors: Vec::new(),
            geometries: Vec::new(),
            av_infos: Vec::new(),
            memory_map: Vec::new(),
            messages: Vec::new(),
            frames: Vec::new(),
            polls: 0,
            joypad: [[false; 16]; 3],
            keys: Vec::new(),
            audio: Vec::new(),
        }
    }

    /// A host whose options start out as `pairs` instead of the defaults.
    pub fn with_options(pairs: &[(&str, &str)]) -> Self {
        let mut host = Self::new();
        for (key, value) in pairs {
            host.store.set(key, value);
        }
        host.store.take_updated();
        host
    }

    pub fn press(&mut self, port: usize, button: JoypadButton) {
        self.joypad[port][button.id()] = true;
    }

    pub fn release(&mut self, port: usize, button: JoypadButton) {
        self.joypad[port][button.id()] = false;
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last().and_then(Option::as_ref)
    }
}

impl VariableSource for MockHost {
    fn variable(&self, key: &str) -> Option<String> {
        self.store.variable(key)
    }
}

impl Host for MockHost {
    fn variables_updated(&mut self) -> bool {
        self.store.take_updated()
    }

    fn set_variables(&mut self, options: &[CoreOption]) {
        self.registered_options = options.iter().map(|o| o.key).collect();
    }

    fn set_controller_info(&mut self, devices: &[ControllerDescription], ports: usize) {
        self.controllers = devices.iter().map(|d| d.name).collect();
        self.ports = ports;
    }

    fn set_input_descriptors(&mut self, descriptors: &[InputDescriptor]) {
        self.descriptors = descriptors.to_vec();
    }

    fn set_pixel_format(&mut self, format: PixelFormat) -> bool {
        format == PixelFormat::Rgb565 && self.accept_rgb565
    }

    fn set_geometry(&mut self, geometry: &GameGeometry) {
        self.geometries.push(*geometry);
    }

    fn set_av_info(&mut self, info: &AvInfo) {
        self.av_infos.push(*info);
    }

    fn set_memory_map(&mut self, map: &[MemoryDescriptor<'_>]) {
        self.memory_map = map.iter()
            .map(|d| (d.start, d.len, d.page.map(|page| page[0])))
            .collect();
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn video_refresh(&mut self, frame: Option<FrameView<'_>>) {
        self.frames.push(frame.map(|view| Frame {
            width: view.width,
            height: view.height,
            pitch: view.pitch,
            rows: (0..view.height).map(|y| view.row(y).to_vec()).collect(),
        }));
    }

    fn poll_input(&mut self) {
        self.polls += 1;
    }

    fn input_state(&mut self, port: usize, query: InputQuery) -> i16 {
        let held = match query {
            InputQuery::Joypad(button) => self.joypad.get(port).is_some_and(|p| p[button.id()]),
            InputQuery::Key(key) => self.keys.contains(&key),
        };
        i16::from(held)
    }

    fn audio_batch(&mut self, samples: &[i16]) -> usize {
        self.audio.extend_from_slice(samples);
        samples.len() / 2
    }
}
