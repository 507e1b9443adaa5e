//! Core traits and types shared between emulation cores and host frontends.
//!
//! A frontend never reaches into an emulation core's internals. Memory is
//! reached through [`Bus`] (the CPU's view of the address space) and
//! [`BankedMemory`] (the physical RAM pages behind it), machine state
//! through [`SnapshotCodec`]. Every frontend in this workspace presents
//! 16-bit RGB565 frames, so the colour helpers live here too.

mod bus;
mod pixel;
mod snapshot;

pub use bus::{BANK_SIZE, BankedMemory, Bus};
pub use pixel::{rgb565, rgb565_from_rgb888, rgb565_to_rgb888};
pub use snapshot::{SnapshotCodec, SnapshotFormat};
