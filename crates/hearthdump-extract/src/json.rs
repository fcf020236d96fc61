//! Structure file output.
//!
//! Structure files are pretty-printed with a two-space indent. With
//! `ensure_ascii` every non-ASCII character is written as a `\uXXXX` escape,
//! using surrogate pairs outside the basic multilingual plane.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use crate::{Error, Result};

/// Pretty formatter that escapes everything outside ASCII.
#[derive(Debug)]
pub struct AsciiFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl Default for AsciiFormatter<'_> {
    fn default() -> Self {
        Self {
            pretty: PrettyFormatter::new(),
        }
    }
}

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}

/// Serialize `value` as a pretty-printed structure document.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(writer: W, value: &T, ensure_ascii: bool) -> Result<()> {
    if ensure_ascii {
        let mut serializer = Serializer::with_formatter(writer, AsciiFormatter::default());
        value.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer_pretty(writer, value)?;
    }
    Ok(())
}

/// Write a structure file, creating parent directories as needed.
pub fn write_struct<T: Serialize + ?Sized>(path: &Path, value: &T, ensure_ascii: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    let file = File::create(path).map_err(Error::io(path))?;
    let mut writer = BufWriter::new(file);
    to_writer(&mut writer, value, ensure_ascii)?;
    writer.flush().map_err(Error::io(path))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
