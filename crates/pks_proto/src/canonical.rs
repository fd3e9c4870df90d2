//! Byte-stable JSON serialisation for signed payloads.
//!
//! Chain signatures and prev-hashes are computed over these exact bytes,
//! so the emitter is pinned: minified JSON with a single space after `:`
//! and `,`, object keys in struct-field declaration order, integers
//! written as JSON numbers. Any byte drift breaks every signature in an
//! existing chain — change nothing here without golden-vector cover.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::ProtoError;

/// Compact JSON with `", "` and `": "` separators.
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialise `value` to canonical JSON bytes.
pub fn to_canonical_vec<T>(value: &T) -> Result<Vec<u8>, ProtoError>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// Serialise `value` to a canonical JSON string.
pub fn to_canonical_string<T>(value: &T) -> Result<String, ProtoError>
where
    T: ?Sized + Serialize,
{
    let bytes = to_canonical_vec(value)?;
    Ok(String::from_utf8(bytes).expect("serde_json emits valid UTF-8"))
}
