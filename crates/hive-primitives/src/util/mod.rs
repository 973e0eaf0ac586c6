//! Binary writer for the Hive consensus wire format.
//!
//! Fixed-width integers are little-endian. Counts and lengths use an
//! unsigned LEB128 varint (7 data bits per byte, high bit set on every
//! byte except the last). Strings are a varint byte length followed by
//! the raw UTF-8 bytes.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// Maximum encoded length of a 64-bit LEB128 varint.
pub const MAX_VARINT_LEN: usize = 10;

/// An unsigned LEB128 variable-length integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Return the encoded byte length of this varint.
    pub fn length(&self) -> usize {
        let mut v = self.0;
        let mut n = 1;
        while v >= 0x80 {
            v >>= 7;
            n += 1;
        }
        n
    }

    /// Encode the varint into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        let mut v = self.0;
        while v >= 0x80 {
            out.push((v as u8 & 0x7f) | 0x80);
            v >>= 7;
        }
        out.push(v as u8);
        out
    }

    /// Return the underlying value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// HiveWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for canonical Hive binary data.
#[derive(Debug, Default)]
pub struct HiveWriter {
    buf: Vec<u8>,
}

impl HiveWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        HiveWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        HiveWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian i16.
    pub fn write_i16_le(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian i64.
    pub fn write_i64_le(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append an unsigned LEB128 varint.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Append a varint length prefix followed by the string's UTF-8 bytes.
    pub fn write_string(&mut self, s: &str) {
        self.write_varint(VarInt::from(s.len()));
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Append a string array with a single-byte element count.
    ///
    /// The count is one byte, not a varint. Arrays of 256 or more elements
    /// are not representable and fail with `EncodeError` before anything
    /// is written.
    pub fn write_string_array(&mut self, items: &[String]) -> Result<(), PrimitivesError> {
        let count = u8::try_from(items.len()).map_err(|_| {
            PrimitivesError::EncodeError(format!(
                "string array of {} elements exceeds the one-byte count",
                items.len()
            ))
        })?;
        self.write_u8(count);
        for s in items {
            self.write_string(s);
        }
        Ok(())
    }

    /// Append a presence flag: 1 when `present`, 0 otherwise.
    pub fn write_presence(&mut self, present: bool) {
        self.write_u8(u8::from(present));
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (127, vec![0x7f]),
            (128, vec![0x80, 0x01]),
            (300, vec![0xac, 0x02]),
            (16384, vec![0x80, 0x80, 0x01]),
            (
                u64::MAX,
                vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01],
            ),
        ];
        for (value, expected) in cases {
            let vi = VarInt(value);
            assert_eq!(vi.to_bytes(), expected, "encoding mismatch for {}", value);
            assert_eq!(vi.length(), expected.len(), "length mismatch for {}", value);
        }
        assert_eq!(VarInt(u64::MAX).length(), MAX_VARINT_LEN);
    }

    #[test]
    fn test_write_string() {
        let mut w = HiveWriter::new();
        w.write_string("xeroc");
        assert_eq!(w.into_bytes(), vec![5, 120, 101, 114, 111, 99]);
    }

    #[test]
    fn test_write_long_string_uses_multibyte_prefix() {
        let s = "a".repeat(200);
        let mut w = HiveWriter::new();
        w.write_string(&s);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..2], &[0xc8, 0x01]);
        assert_eq!(bytes.len(), 202);
    }

    #[test]
    fn test_write_string_array() {
        let mut w = HiveWriter::new();
        w.write_string_array(&["xeroc".to_string(), "piston".to_string()])
            .unwrap();
        assert_eq!(
            w.into_bytes(),
            vec![2, 5, 120, 101, 114, 111, 99, 6, 112, 105, 115, 116, 111, 110]
        );
    }

    #[test]
    fn test_write_string_array_count_limit() {
        let mut w = HiveWriter::new();
        w.write_string_array(&vec!["a".to_string(); 255]).unwrap();
        assert_eq!(w.as_bytes()[0], 255);

        let mut w = HiveWriter::new();
        let result = w.write_string_array(&vec!["a".to_string(); 256]);
        assert!(matches!(result, Err(PrimitivesError::EncodeError(_))));
        assert!(w.is_empty());
    }

    #[test]
    fn test_write_fixed_width_integers() {
        let mut w = HiveWriter::with_capacity(16);
        w.write_u16_le(36029);
        w.write_u32_le(1164960351);
        w.write_i16_le(-1);
        w.write_i64_le(1000);
        assert_eq!(
            w.as_bytes(),
            &[189, 140, 95, 226, 111, 69, 0xff, 0xff, 232, 3, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(w.len(), 16);
    }

    #[test]
    fn test_write_presence() {
        let mut w = HiveWriter::new();
        assert!(w.is_empty());
        w.write_presence(true);
        w.write_presence(false);
        assert_eq!(w.into_bytes(), vec![1, 0]);
    }
}
