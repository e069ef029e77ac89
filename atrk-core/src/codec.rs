//! Binary track file codec.
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! Header:    magic "ATRK" | version u32 | track_count u32
//! Per track: track_id u32
//!            name_len u32 | name utf-8
//!            type_len u32 | type utf-8       ("incoming" | "outgoing")
//!            aircraft_len u32 | aircraft utf-8
//!            start_time f64 | end_time f64 | lifetime f64
//!            position_count u32
//!            position_count x (timestamp, latitude, longitude,
//!                              altitude, speed, heading) f64
//! ```
//!
//! Strings carry no terminator or padding. Decoding is all-or-nothing: any
//! error aborts the whole buffer and no partial collection is returned.

use crate::types::{Position, Result, Track, TrackError, TrackType};

/// File signature.
pub const MAGIC: &[u8; 4] = b"ATRK";

/// Newest format version this reader understands and the one the writer emits.
pub const VERSION: u32 = 1;

/// Magic + version + track count.
pub const HEADER_LEN: usize = 12;

/// Six f64 fields per position.
pub const POSITION_LEN: usize = 6 * 8;

// track_id + three empty strings + three times + position count
const MIN_TRACK_LEN: usize = 4 + 3 * 4 + 3 * 8 + 4;

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Serialize a track collection into a single contiguous buffer.
///
/// Floating-point fields are written as raw bit patterns, so NaN payloads and
/// signed zeros survive a round trip unchanged.
pub fn encode(tracks: &[Track]) -> Result<Vec<u8>> {
    let body: usize = tracks.iter().map(encoded_len).sum();
    let mut buf = Vec::with_capacity(HEADER_LEN + body);

    buf.extend_from_slice(MAGIC);
    put_u32(&mut buf, VERSION);
    put_u32(&mut buf, count_u32(tracks.len(), "track count")?);

    for track in tracks {
        encode_track(&mut buf, track)?;
    }

    Ok(buf)
}

/// Exact number of bytes `track` occupies in the file.
pub fn encoded_len(track: &Track) -> usize {
    MIN_TRACK_LEN
        + track.track_name.len()
        + track.track_type.as_str().len()
        + track.aircraft_type.len()
        + track.positions.len() * POSITION_LEN
}

fn encode_track(buf: &mut Vec<u8>, track: &Track) -> Result<()> {
    put_u32(buf, track.track_id);
    put_str(buf, &track.track_name, "track name")?;
    put_str(buf, track.track_type.as_str(), "track type")?;
    put_str(buf, &track.aircraft_type, "aircraft type")?;
    put_f64(buf, track.start_time);
    put_f64(buf, track.end_time);
    put_f64(buf, track.lifetime);

    put_u32(buf, count_u32(track.positions.len(), "position count")?);
    for p in &track.positions {
        put_f64(buf, p.timestamp);
        put_f64(buf, p.latitude);
        put_f64(buf, p.longitude);
        put_f64(buf, p.altitude);
        put_f64(buf, p.speed);
        put_f64(buf, p.heading);
    }
    Ok(())
}

fn put_u32(buf: &mut Vec<u8>, val: u32) {
    buf.extend_from_slice(&val.to_le_bytes());
}

fn put_f64(buf: &mut Vec<u8>, val: f64) {
    buf.extend_from_slice(&val.to_bits().to_le_bytes());
}

fn put_str(buf: &mut Vec<u8>, s: &str, field: &str) -> Result<()> {
    let bytes = s.as_bytes();
    put_u32(buf, count_u32(bytes.len(), field)?);
    buf.extend_from_slice(bytes);
    Ok(())
}

fn count_u32(len: usize, field: &str) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| TrackError::Encoding(format!("{field} {len} exceeds u32 length prefix")))
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Parse a buffer produced by [`encode`] back into tracks, in file order.
///
/// Every decoded track is checked with [`Track::validate`]; a track whose
/// end time precedes its start time fails the whole decode.
pub fn decode(data: &[u8]) -> Result<Vec<Track>> {
    if data.len() < HEADER_LEN {
        return Err(TrackError::Format(format!(
            "buffer is {} bytes, header needs {HEADER_LEN}",
            data.len()
        )));
    }

    let mut r = Reader::new(data);
    let magic = r.take(4)?;
    if magic != MAGIC {
        return Err(TrackError::Format(format!(
            "bad magic {magic:02X?}, expected {MAGIC:02X?}"
        )));
    }

    let version = r.u32()?;
    if version == 0 || version > VERSION {
        return Err(TrackError::Format(format!(
            "unsupported version {version} (reader supports up to {VERSION})"
        )));
    }

    let count = r.u32()? as usize;
    // A corrupt count must not drive the allocation.
    let mut tracks = Vec::with_capacity(count.min(r.remaining() / MIN_TRACK_LEN));

    for _ in 0..count {
        let track = decode_track(&mut r)?;
        track.validate()?;
        log::debug!(
            "decoded track {} {:?}: {} positions",
            track.track_id,
            track.track_name,
            track.positions.len()
        );
        tracks.push(track);
    }

    if r.remaining() > 0 {
        log::warn!(
            "ignoring {} trailing bytes after {} tracks",
            r.remaining(),
            tracks.len()
        );
    }

    Ok(tracks)
}

fn decode_track(r: &mut Reader<'_>) -> Result<Track> {
    let track_id = r.u32()?;
    let track_name = r.string("track name")?;
    let track_type: TrackType = r.string("track type")?.parse()?;
    let aircraft_type = r.string("aircraft type")?;
    let start_time = r.f64()?;
    let end_time = r.f64()?;
    let lifetime = r.f64()?;

    let n = r.u32()? as usize;
    let needed = n.checked_mul(POSITION_LEN).ok_or(TrackError::Truncated {
        offset: r.pos,
        needed: usize::MAX,
        available: r.remaining(),
    })?;
    let raw = r.take(needed)?;

    let positions = raw
        .chunks_exact(POSITION_LEN)
        .map(|c| Position {
            timestamp: f64_at(c, 0),
            latitude: f64_at(c, 8),
            longitude: f64_at(c, 16),
            altitude: f64_at(c, 24),
            speed: f64_at(c, 32),
            heading: f64_at(c, 40),
        })
        .collect();

    Ok(Track {
        track_id,
        track_name,
        track_type,
        aircraft_type,
        start_time,
        end_time,
        lifetime,
        positions,
    })
}

fn f64_at(chunk: &[u8], at: usize) -> f64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&chunk[at..at + 8]);
    f64::from_bits(u64::from_le_bytes(b))
}

/// Bounds-checked cursor over the input buffer.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(TrackError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u32(&mut self) -> Result<u32> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(b))
    }

    fn f64(&mut self) -> Result<f64> {
        let mut b = [0u8; 8];
        b.copy_from_slice(self.take(8)?);
        Ok(f64::from_bits(u64::from_le_bytes(b)))
    }

    fn string(&mut self, field: &str) -> Result<String> {
        let len = self.u32()? as usize;
        let start = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            TrackError::Format(format!("{field} at offset {start} is not UTF-8: {e}"))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
