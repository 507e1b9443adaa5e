//! Machine state serialization.

/// Snapshot container formats an emulation core can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Spectaculator/Fuse `.szx`: the only format able to round-trip
    /// every peripheral, so frontends use it for save states.
    Szx,
    /// `.z80` snapshot (v1 to v3).
    Z80,
    /// `.sna` snapshot (48K and 128K variants).
    Sna,
}

/// Encodes and decodes the complete machine state.
///
/// The byte layout belongs to the core. Decoders must ignore trailing
/// bytes after the end of the encoded state: frontends may pad blobs to a
/// fixed length.
pub trait SnapshotCodec {
    /// Encode the current machine state, replacing the contents of `out`.
    fn encode_snapshot(&mut self, out: &mut Vec<u8>) -> Result<(), String>;

    /// Restore machine state from `data`.
    fn decode_snapshot(&mut self, data: &[u8], format: SnapshotFormat) -> Result<(), String>;
}
