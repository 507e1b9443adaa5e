//! The frontend context: one emulation core, one host.
//!
//! [`Frontend`] owns every piece of state between host calls. A host
//! creates one, loads content, then calls [`Frontend::run_frame`] once per
//! video frame. Nothing is global, so several frontends can live side by
//! side.

use log::{debug, error, info};
use serde::Serialize;

use crate::cheats::{ApplyReport, CheatManager};
use crate::compositor::{Compositor, OverlayLayer};
use crate::content::{Content, ContentInfo, ContentType, autoload_for, needs_80_track_drive};
use crate::core::SpectrumCore;
use crate::error::{FrontendError, Result};
use crate::geometry::{Geometry, MAX_HEIGHT, MAX_WIDTH};
use crate::host::{AvInfo, GameGeometry, Host, PixelFormat, Region, SystemInfo, Timing};
use crate::input::{CONTROLLERS, DEFAULT_DEVICES, Device, InputState, MAX_PADS, input_descriptors};
use crate::machine::{MachineDescriptor, TS2068_INDEX};
use crate::memory_map::memory_map;
use crate::options::OPTIONS;
use crate::overlay::{OVERLAY_HEIGHT, OVERLAY_WIDTH, OverlayState, default_bitmap};
use crate::palette::palette;
use crate::settings::{EmulatorSettings, FrontendSettings};
use crate::snapshot::SnapshotPolicy;
use crate::sync::{ChangeFlags, ConfigSync};

/// Audio sample rate the core produces.
pub const SAMPLE_RATE: f64 = 44_100.0;

pub const LIBRARY_NAME: &str = "Fuse";
pub const VALID_EXTENSIONS: &str = "tzx|tap|z80|rzx|scl|trd|dsk|dck|sna|szx|zip";

#[must_use]
pub fn system_info() -> SystemInfo {
    SystemInfo {
        library_name: LIBRARY_NAME,
        library_version: env!("CARGO_PKG_VERSION"),
        valid_extensions: VALID_EXTENSIONS,
        need_fullpath: false,
        block_extract: false,
    }
}

/// Content kept for [`Frontend::reset`].
#[derive(Debug, Clone)]
struct LoadedContent {
    info: ContentInfo,
    data: Vec<u8>,
}

/// On-screen notifications still to show.
#[derive(Debug, Clone, Copy, Default)]
struct Announcements {
    joysticks: bool,
    speed: bool,
}

/// Resolved frontend state, for hosts that want to display or log it.
#[derive(Debug, Clone, Serialize)]
pub struct FrontendState<'a> {
    pub machine: Option<&'static MachineDescriptor>,
    pub geometry: Geometry,
    pub emulator: &'a EmulatorSettings,
    pub frontend: &'a FrontendSettings,
    pub devices: [Device; MAX_PADS],
    pub overlay: OverlayState,
    pub active_cheats: usize,
    pub cached_snapshot_len: usize,
    pub total_time_ms: f64,
}

/// A Spectrum emulation core running inside a host.
pub struct Frontend<C: SpectrumCore, H: Host> {
    core: C,
    host: H,
    sync: ConfigSync,
    input: InputState,
    compositor: Compositor,
    overlay_bitmap: Vec<u16>,
    snapshot: SnapshotPolicy,
    cheats: CheatManager,
    content: Option<LoadedContent>,
    audio: Vec<i16>,
    announce: Announcements,
    initialized: bool,
    clock_us: u64,
}

impl<C: SpectrumCore, H: Host> Frontend<C, H> {
    /// Register the option catalog and controllers with the host and set
    /// the default port devices.
    pub fn new(mut core: C, mut host: H) -> Self {
        host.set_variables(&OPTIONS);
        host.set_controller_info(&CONTROLLERS, MAX_PADS);
        for (port, device) in DEFAULT_DEVICES.iter().enumerate().take(2) {
            if let Some(joystick) = device.joystick() {
                core.set_joystick_type(port, joystick);
            }
        }

        Self {
            core,
            host,
            sync: ConfigSync::new(),
            input: InputState::new(),
            compositor: Compositor::new(),
            overlay_bitmap: default_bitmap(),
            snapshot: SnapshotPolicy::new(),
            cheats: CheatManager::new(),
            content: None,
            audio: Vec::new(),
            announce: Announcements {
                joysticks: false,
                speed: true,
            },
            initialized: false,
            clock_us: 0,
        }
    }

    #[must_use]
    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn machine(&self) -> Option<&'static MachineDescriptor> {
        self.sync.machine()
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        self.sync.geometry()
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Emulated time since the frontend was created.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_time_ms(&self) -> f64 {
        self.clock_us as f64 / 1000.0
    }

    /// Replace the keyboard overlay picture. Must be
    /// `OVERLAY_WIDTH × OVERLAY_HEIGHT` RGB565 pixels; anything else is
    /// ignored.
    pub fn set_overlay_bitmap(&mut self, bitmap: Vec<u16>) -> bool {
        if bitmap.len() != OVERLAY_WIDTH * OVERLAY_HEIGHT {
            return false;
        }
        self.overlay_bitmap = bitmap;
        true
    }

    // ---- load / unload ----

    /// Start the core and open `content`. Without content the machine
    /// boots to BASIC.
    pub fn load_game(&mut self, content: Option<Content<'_>>) -> Result<()> {
        if !self.host.set_pixel_format(PixelFormat::Rgb565) {
            error!("RGB565 is not supported");
            return Err(FrontendError::PixelFormat);
        }

        self.host.set_input_descriptors(&input_descriptors());
        self.input.clear();
        self.snapshot.clear();
        self.content = None;

        let dock = content.is_some_and(|c| c.is_dock_cartridge());
        self.sync.force_machine(dock.then_some(TS2068_INDEX));
        self.sync.reset_geometry();
        self.sync.sync(&self.host, true);
        self.sync.take_settings_change();
        self.sync.take_palette_change();
        self.announce_after_sync();

        if self.initialized {
            self.core.shutdown();
        }
        self.core.apply_settings(&self.sync.emulator);
        self.core.set_palette(palette(self.sync.frontend.palette));
        if let Err(e) = self.core.init() {
            error!("Core init failed: {e}");
            self.initialized = false;
            return Err(FrontendError::CoreInit(e));
        }
        self.initialized = true;
        let av_info = self.av_info();
        self.host.set_av_info(&av_info);

        if let Some(content) = content.filter(|c| !c.data.is_empty()) {
            let info = if dock {
                ContentInfo::new(ContentType::Dck)
            } else {
                self.core
                    .identify(content.path, content.data)
                    .map_or(ContentInfo::FALLBACK, ContentInfo::new)
            };
            let loaded = LoadedContent {
                info,
                data: content.data.to_vec(),
            };
            let auto_load = self.sync.emulator.auto_load;
            self.open(&loaded, auto_load)?;
            self.content = Some(loaded);
        }

        self.core.unprotect_drives();
        self.publish_memory_map();
        Ok(())
    }

    fn open(&mut self, content: &LoadedContent, auto_load: bool) -> Result<()> {
        let autoload = self
            .sync
            .machine()
            .is_some_and(|m| autoload_for(m, &content.info, auto_load));
        if needs_80_track_drive(&content.info, &content.data) {
            debug!("Switching +3 drive to 80 tracks");
            self.core.use_80_track_plus3_drive();
        }

        debug!("Opening {} (autoload {autoload})", content.info.kind.open_name());
        self.core.pause();
        let result = self.core.open(&content.info, &content.data, autoload);
        self.core.refresh_display();
        self.core.unpause();
        result.map_err(|e| {
            error!("Could not open {}: {e}", content.info.kind.open_name());
            FrontendError::Content(e)
        })
    }

    /// Re-open the loaded content with auto-load on.
    pub fn reset(&mut self) -> Result<()> {
        let content = self.content.take().ok_or(FrontendError::NoContent)?;
        let result = self.open(&content, true);
        self.content = Some(content);
        result
    }

    /// Undo cheats and drop everything tied to the loaded content.
    pub fn unload_game(&mut self) {
        self.cheats.reset(&mut self.core);
        self.snapshot.clear();
        self.content = None;
    }

    /// Undo cheats and stop the core.
    pub fn deinit(&mut self) {
        self.cheats.reset(&mut self.core);
        if self.initialized {
            self.initialized = false;
            self.core.shutdown();
        }
    }

    fn publish_memory_map(&mut self) {
        let map = memory_map(&self.core);
        self.host.set_memory_map(&map);
    }

    /// Publish the memory map again, e.g. after a paging change.
    pub fn refresh_memory_map(&mut self) {
        self.publish_memory_map();
    }

    // ---- frame loop ----

    /// Run the core until it has produced audio, then present a frame.
    pub fn run_frame(&mut self) {
        self.show_announcements();

        if self.host.variables_updated() {
            let flags = self.sync.sync(&self.host, false);
            self.announce_after_sync();
            self.apply_changes(flags);
        }

        self.clock_us += 1_000_000 / u64::from(self.sync.frame_rate());
        self.input
            .process(&mut self.host, &mut self.core, &self.sync.frontend, self.clock_us);

        let mut frame = false;
        loop {
            self.host.poll_input();
            let slice = self.core.run_slice();
            frame |= slice.frame;
            if slice.audio {
                break;
            }
        }

        self.audio.clear();
        self.core.drain_audio(&mut self.audio);
        if !self.audio.is_empty() {
            self.host.audio_batch(&self.audio);
        }

        let geometry = *self.sync.geometry();
        let is_timex = self.sync.machine().is_some_and(|m| m.is_timex);
        let overlay = OverlayLayer {
            state: &self.input.overlay,
            bitmap: &self.overlay_bitmap,
            transparent: self.sync.frontend.overlay_transparent,
        };
        let view = self.compositor.render(
            self.core.framebuffer(),
            frame,
            &geometry,
            is_timex,
            Some(overlay),
        );
        self.host.video_refresh(view);
    }

    fn apply_changes(&mut self, flags: ChangeFlags) {
        if self.sync.take_settings_change() {
            self.core.apply_settings(&self.sync.emulator);
        }
        if let Some(index) = self.sync.take_palette_change() {
            self.core.set_palette(palette(index));
            self.core.refresh_display();
        }

        if flags.contains(ChangeFlags::AV_INFO) {
            let av_info = self.av_info();
            self.host.set_av_info(&av_info);
        }
        if flags.contains(ChangeFlags::GEOMETRY) {
            let geometry = self.sync.geometry();
            self.host.set_geometry(&GameGeometry {
                base_width: geometry.soft_width,
                base_height: geometry.soft_height,
                max_width: MAX_WIDTH,
                max_height: MAX_HEIGHT,
                aspect_ratio: 0.0,
            });
        }
        if flags.contains(ChangeFlags::MACHINE)
            && let Some(machine) = self.sync.machine()
        {
            self.core.select_machine(machine);
        }
    }

    fn announce_after_sync(&mut self) {
        let enabled = self.sync.frontend.startup_info;
        self.announce.joysticks = enabled;
        self.announce.speed = enabled;
    }

    fn show_announcements(&mut self) {
        if std::mem::take(&mut self.announce.joysticks) {
            for port in 0..MAX_PADS {
                if let Some(joystick) = self.input.device(port).and_then(Device::joystick) {
                    let message = format!("Port {} configured as {} joystick", port + 1, joystick.name());
                    self.host.show_message(&message);
                }
            }
        }
        if std::mem::take(&mut self.announce.speed) {
            let message = format!(
                "Emulation speed configured to {}%",
                self.sync.emulator.emulation_speed
            );
            self.host.show_message(&message);
        }
    }

    // ---- controllers ----

    /// Plug `device` into `port`. `Auto` keeps the current device; on port
    /// 0 it re-announces the joystick types.
    pub fn set_controller_port_device(&mut self, port: usize, device: Device) {
        info!("port {port} device {}", device.name());
        if device == Device::Auto {
            if port == 0 {
                self.announce.joysticks = true;
            }
            return;
        }
        if self.input.set_device(port, device)
            && port < 2
            && let Some(joystick) = device.joystick()
        {
            self.core.set_joystick_type(port, joystick);
        }
    }

    // ---- save states ----

    /// Buffer size the host must provide to [`serialize`](Self::serialize).
    pub fn serialize_size(&mut self) -> usize {
        let auto_size = self.sync.frontend.auto_size_savestate;
        self.snapshot.size(&mut self.core, self.sync.machine(), auto_size)
    }

    pub fn serialize(&mut self, out: &mut [u8]) -> Result<()> {
        let auto_size = self.sync.frontend.auto_size_savestate;
        self.snapshot
            .serialize(&mut self.core, self.sync.machine(), auto_size, out)?;
        Ok(())
    }

    pub fn unserialize(&mut self, data: &[u8]) -> Result<()> {
        self.snapshot.restore(&mut self.core, data)?;
        Ok(())
    }

    // ---- cheats ----

    pub fn cheat_set(&mut self, index: u32, code: &str) -> ApplyReport {
        self.cheats.apply(index, code, &mut self.core)
    }

    pub fn cheat_reset(&mut self) {
        self.cheats.reset(&mut self.core);
    }

    #[must_use]
    pub fn cheats(&self) -> &CheatManager {
        &self.cheats
    }

    // ---- static info ----

    /// Hard frame size (so the host can show every border class without
    /// reallocating) and the machine's timing.
    #[must_use]
    pub fn av_info(&self) -> AvInfo {
        let geometry = self.sync.geometry();
        AvInfo {
            geometry: GameGeometry {
                base_width: geometry.hard_width,
                base_height: geometry.hard_height,
                max_width: MAX_WIDTH,
                max_height: MAX_HEIGHT,
                aspect_ratio: 0.0,
            },
            timing: Timing {
                fps: f64::from(self.sync.frame_rate()),
                sample_rate: SAMPLE_RATE,
            },
        }
    }

    #[must_use]
    pub fn region(&self) -> Region {
        if self.sync.machine().is_some_and(MachineDescriptor::is_ntsc) {
            Region::Ntsc
        } else {
            Region::Pal
        }
    }

    #[must_use]
    pub fn state(&self) -> FrontendState<'_> {
        let mut devices = DEFAULT_DEVICES;
        for (port, slot) in devices.iter_mut().enumerate() {
            if let Some(device) = self.input.device(port) {
                *slot = device;
            }
        }
        FrontendState {
            machine: self.sync.machine(),
            geometry: *self.sync.geometry(),
            emulator: &self.sync.emulator,
            frontend: &self.sync.frontend,
            devices,
            overlay: self.input.overlay,
            active_cheats: self.cheats.active().len(),
            cached_snapshot_len: self.snapshot.cached_len(),
            total_time_ms: self.total_time_ms(),
        }
    }

    /// [`state`](Self::state) as JSON.
    pub fn state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state())?)
    }
}
