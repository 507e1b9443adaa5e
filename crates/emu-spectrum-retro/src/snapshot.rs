//! Save-state sizing.
//!
//! Two policies, picked by the auto-size option:
//!
//! - **Auto**: the size query encodes the state and reports its exact
//!   length; the following serialize hands over that same encoding.
//! - **Fixed**: every state of a machine is padded with 0xFF to one bucket
//!   size, so hosts that need constant-size states (netplay, rewind) get
//!   them.
//!
//! States are always SZX; restoring leaves the padding to the decoder.

use emu_core::SnapshotFormat;
use log::warn;

use crate::core::SpectrumCore;
use crate::error::SnapshotError;
use crate::machine::MachineDescriptor;

/// Padding byte after the encoding in fixed-size states.
pub const PADDING: u8 = 0xFF;

/// Save-state policy and the encoding it keeps between calls.
#[derive(Debug, Clone, Default)]
pub struct SnapshotPolicy {
    cache: Vec<u8>,
}

impl SnapshotPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached encoding.
    pub fn clear(&mut self) {
        self.cache = Vec::new();
    }

    /// Length of the cached encoding.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Bytes the host must provide to serialize.
    ///
    /// In auto mode this encodes the state (with the core paused) and
    /// caches it. Returns 0 when encoding fails.
    pub fn size<C: SpectrumCore>(
        &mut self,
        core: &mut C,
        machine: Option<&MachineDescriptor>,
        auto_size: bool,
    ) -> usize {
        if !auto_size {
            return machine.map_or(0, MachineDescriptor::fixed_snapshot_size);
        }
        core.pause();
        let result = encode(core, &mut self.cache);
        core.unpause();
        match result {
            Ok(()) => self.cache.len(),
            Err(e) => {
                warn!("{e}");
                self.cache.clear();
                0
            }
        }
    }

    /// Write the state into `out`. `out` is untouched on failure.
    pub fn serialize<C: SpectrumCore>(
        &mut self,
        core: &mut C,
        machine: Option<&MachineDescriptor>,
        auto_size: bool,
        out: &mut [u8],
    ) -> Result<(), SnapshotError> {
        let result = self.write(core, machine, auto_size, out);
        if let Err(e) = &result {
            warn!("{e}");
        }
        result
    }

    fn write<C: SpectrumCore>(
        &mut self,
        core: &mut C,
        machine: Option<&MachineDescriptor>,
        auto_size: bool,
        out: &mut [u8],
    ) -> Result<(), SnapshotError> {
        if auto_size {
            // Hosts normally ask for the size first; encode now if they didn't.
            if self.cache.is_empty() {
                encode(core, &mut self.cache)?;
            }
            let needed = self.cache.len();
            let capacity = out.len();
            let dest = out
                .get_mut(..needed)
                .ok_or(SnapshotError::BufferTooSmall { needed, capacity })?;
            dest.copy_from_slice(&self.cache);
            return Ok(());
        }

        let bucket = machine
            .ok_or(SnapshotError::NoMachine)?
            .fixed_snapshot_size();
        encode(core, &mut self.cache)?;
        let encoded = self.cache.len();
        if encoded > bucket {
            return Err(SnapshotError::ExceedsFixedSize {
                encoded,
                capacity: bucket,
            });
        }
        let capacity = out.len();
        let dest = out.get_mut(..bucket).ok_or(SnapshotError::BufferTooSmall {
            needed: bucket,
            capacity,
        })?;
        let (state, padding) = dest.split_at_mut(encoded);
        state.copy_from_slice(&self.cache);
        padding.fill(PADDING);
        Ok(())
    }

    /// Restore a state produced by either policy.
    pub fn restore<C: SpectrumCore>(&mut self, core: &mut C, data: &[u8]) -> Result<(), SnapshotError> {
        core.decode_snapshot(data, SnapshotFormat::Szx).map_err(|e| {
            let e = SnapshotError::Decode(e);
            warn!("{e}");
            e
        })
    }
}

fn encode<C: SpectrumCore>(core: &mut C, cache: &mut Vec<u8>) -> Result<(), SnapshotError> {
    core.encode_snapshot(cache).map_err(SnapshotError::Encode)
}
