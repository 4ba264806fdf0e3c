//! The VOXL binary container: a versioned region file holding up to 64
//! chunk payloads behind a fixed-size offset index.
//!
//! ## Binary layout (all multi-byte integers big-endian)
//!
//! Header (11 bytes):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Magic bytes `[0x56, 0x4F, 0x58, 0x4C]` ("VOXL") |
//! | 4 | 1 | Format version (`u8`, currently 5) |
//! | 5 | 3 | Chunk edge length (`u24`) |
//! | 8 | 3 | Chunk slot count (`u24`) |
//!
//! Index table: one 5-byte entry per slot in slot order — a 3-byte offset
//! into the payload area plus a 2-byte payload length. An absent chunk is
//! an explicit zero-length entry; presence is decided by `length != 0`,
//! never by the offset value, so offset 0 is an ordinary first-payload
//! offset.
//!
//! Chunk payload: a 12-byte chunk header, then L³ cell bytes, then the
//! 675 border-mask bytes.
//!
//! The index makes single-chunk reads possible without decoding the rest
//! of the file: [`read_index`] then [`read_chunk`].

use voxl_voxel::{
    BORDER_MASK_BYTES, BorderMask, CHUNK_EDGE, CHUNK_VOLUME, Chunk, ChunkKind, ChunkMeta,
};

use crate::error::RegionError;
use crate::region::{REGION_SLOTS, Region};

/// Magic bytes identifying the VOXL format.
const MAGIC: [u8; 4] = [0x56, 0x4F, 0x58, 0x4C];

/// Current format version.
pub const FORMAT_VERSION: u8 = 5;

/// Version byte inside each chunk payload header.
const CHUNK_HEADER_VERSION: u8 = 1;

/// File header length in bytes.
pub const HEADER_LEN: usize = 11;
/// Bytes per index entry.
pub const INDEX_ENTRY_LEN: usize = 5;
/// Bytes per chunk payload header.
const CHUNK_HEADER_LEN: usize = 12;
/// Bytes per present chunk payload.
pub const CHUNK_PAYLOAD_LEN: usize = CHUNK_HEADER_LEN + CHUNK_VOLUME + BORDER_MASK_BYTES;

/// Offset of the payload area from the start of the file.
const PAYLOAD_BASE: usize = HEADER_LEN + REGION_SLOTS * INDEX_ENTRY_LEN;

const MAX_OFFSET: u64 = 0xFF_FFFF;
const MAX_LENGTH: u64 = 0xFFFF;

fn write_u24_be(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes()[1..]);
}

fn read_u24_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// One slot's entry in the index table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    /// Offset from the start of the payload area.
    pub offset: u32,
    /// Payload length; 0 marks an absent chunk.
    pub length: u16,
}

impl IndexEntry {
    /// `true` if the slot holds a chunk.
    pub fn is_present(self) -> bool {
        self.length != 0
    }
}

/// Decoded index table, enough to read single chunks out of a region
/// file without touching the other payloads.
#[derive(Clone, Debug)]
pub struct RegionIndex {
    entries: Vec<IndexEntry>,
}

impl RegionIndex {
    /// Entry for a flat slot index.
    pub fn entry(&self, slot: usize) -> Result<IndexEntry, RegionError> {
        self.entries
            .get(slot)
            .copied()
            .ok_or(RegionError::SlotOutOfRange(slot))
    }

    /// Number of occupied slots.
    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_present()).count()
    }

    /// All entries in slot order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serializes a region to the VOXL binary format.
///
/// # Errors
///
/// Returns [`RegionError::FieldOverflow`] if a payload length or a
/// cumulative offset does not fit its wire field.
pub fn serialize(region: &Region) -> Result<Vec<u8>, RegionError> {
    let present = region.present_count();
    let mut buf = Vec::with_capacity(PAYLOAD_BASE + present * CHUNK_PAYLOAD_LEN);

    buf.extend_from_slice(&MAGIC);
    buf.push(FORMAT_VERSION);
    write_u24_be(&mut buf, CHUNK_EDGE as u32);
    write_u24_be(&mut buf, REGION_SLOTS as u32);

    // Index pass: offsets accumulate over present payloads; absent slots
    // record the running cursor with length 0.
    let mut cursor: u64 = 0;
    for slot in 0..REGION_SLOTS {
        let length = match region.slot(slot) {
            Some(_) => CHUNK_PAYLOAD_LEN as u64,
            None => 0,
        };
        check_index_fields(length, cursor)?;
        write_u24_be(&mut buf, cursor as u32);
        buf.extend_from_slice(&(length as u16).to_be_bytes());
        cursor += length;
    }

    // Payload pass, same slot order.
    for slot in 0..REGION_SLOTS {
        if let Some(chunk) = region.slot(slot) {
            encode_chunk(chunk, &mut buf);
        }
    }

    Ok(buf)
}

/// Rejects index fields that do not fit their wire encoding. At the
/// fixed payload size a full 64-slot region stays under both maxima,
/// so this only trips if the payload layout grows.
fn check_index_fields(length: u64, cursor: u64) -> Result<(), RegionError> {
    if length > MAX_LENGTH {
        return Err(RegionError::FieldOverflow {
            field: "chunk payload length",
            value: length,
            max: MAX_LENGTH,
        });
    }
    if cursor > MAX_OFFSET {
        return Err(RegionError::FieldOverflow {
            field: "chunk payload offset",
            value: cursor,
            max: MAX_OFFSET,
        });
    }
    Ok(())
}

fn encode_chunk(chunk: &Chunk, buf: &mut Vec<u8>) {
    let meta = chunk.meta();
    buf.push(CHUNK_HEADER_LEN as u8);
    buf.push(CHUNK_HEADER_VERSION);
    buf.push(chunk.kind().palette_id());
    buf.push(meta.medium);
    buf.push(chunk.kind().palette_id());
    buf.push(meta.flags);
    buf.extend_from_slice(&meta.water_level.to_be_bytes());
    buf.push(meta.temperature as u8);
    buf.push(meta.humidity as u8);
    buf.extend_from_slice(&[0u8, 0u8]);
    buf.extend_from_slice(chunk.cells());
    buf.extend_from_slice(chunk.border().as_bytes());
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Validates the file header and decodes the index table.
pub fn read_index(data: &[u8]) -> Result<RegionIndex, RegionError> {
    if data.len() < 4 {
        return Err(RegionError::InvalidMagic);
    }
    if data[0..4] != MAGIC {
        return Err(RegionError::InvalidMagic);
    }
    if data.len() < HEADER_LEN {
        return Err(RegionError::Truncated {
            expected: HEADER_LEN,
            actual: data.len(),
        });
    }

    let version = data[4];
    if version != FORMAT_VERSION {
        return Err(RegionError::UnsupportedVersion(version));
    }

    let edge = read_u24_be(&data[5..8]) as usize;
    if edge != CHUNK_EDGE {
        return Err(RegionError::EdgeMismatch {
            expected: CHUNK_EDGE,
            actual: edge,
        });
    }

    let slots = read_u24_be(&data[8..11]) as usize;
    if slots != REGION_SLOTS {
        return Err(RegionError::SlotCountMismatch {
            expected: REGION_SLOTS,
            actual: slots,
        });
    }

    if data.len() < PAYLOAD_BASE {
        return Err(RegionError::Truncated {
            expected: PAYLOAD_BASE,
            actual: data.len(),
        });
    }

    let mut entries = Vec::with_capacity(REGION_SLOTS);
    for slot in 0..REGION_SLOTS {
        let at = HEADER_LEN + slot * INDEX_ENTRY_LEN;
        entries.push(IndexEntry {
            offset: read_u24_be(&data[at..at + 3]),
            length: u16::from_be_bytes([data[at + 3], data[at + 4]]),
        });
    }

    Ok(RegionIndex { entries })
}

/// Reads a single chunk through the index without decoding the rest of
/// the file. Returns `Ok(None)` for absent slots.
pub fn read_chunk(
    data: &[u8],
    index: &RegionIndex,
    slot: usize,
) -> Result<Option<Chunk>, RegionError> {
    let entry = index.entry(slot)?;
    if !entry.is_present() {
        return Ok(None);
    }

    let start = PAYLOAD_BASE + entry.offset as usize;
    let end = start + entry.length as usize;
    if data.len() < end {
        return Err(RegionError::Truncated {
            expected: end,
            actual: data.len(),
        });
    }

    decode_chunk(&data[start..end]).map(Some)
}

/// Decodes a whole region.
pub fn deserialize(data: &[u8]) -> Result<Region, RegionError> {
    let index = read_index(data)?;
    let mut region = Region::new();
    for slot in 0..REGION_SLOTS {
        if let Some(chunk) = read_chunk(data, &index, slot)? {
            let (sx, sy, sz) = Region::slot_coords(slot);
            region.insert_chunk(sx, sy, sz, chunk);
        }
    }
    Ok(region)
}

fn decode_chunk(payload: &[u8]) -> Result<Chunk, RegionError> {
    if payload.len() != CHUNK_PAYLOAD_LEN {
        return Err(RegionError::Truncated {
            expected: CHUNK_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }
    if payload[0] as usize != CHUNK_HEADER_LEN {
        return Err(RegionError::BadChunkHeader("unexpected header length"));
    }
    if payload[1] != CHUNK_HEADER_VERSION {
        return Err(RegionError::BadChunkHeader("unknown chunk header version"));
    }
    let kind = ChunkKind::from_palette_id(payload[2])
        .ok_or(RegionError::BadChunkHeader("unknown chunk kind"))?;
    if payload[4] != kind.palette_id() {
        return Err(RegionError::BadChunkHeader("palette id mismatch"));
    }

    let meta = ChunkMeta {
        medium: payload[3],
        flags: payload[5],
        water_level: i16::from_be_bytes([payload[6], payload[7]]),
        temperature: payload[8] as i8,
        humidity: payload[9] as i8,
    };

    let cells_end = CHUNK_HEADER_LEN + CHUNK_VOLUME;
    let cells = payload[CHUNK_HEADER_LEN..cells_end].to_vec();

    let mut border_bytes = [0u8; BORDER_MASK_BYTES];
    border_bytes.copy_from_slice(&payload[cells_end..]);
    let border = BorderMask::from_bytes(border_bytes);

    Chunk::from_parts(kind, meta, cells, border)
        .map_err(|_| RegionError::BadChunkHeader("cell count mismatch"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
