//! Stored (uncompressed) ZIP archive writer.
//!
//! Produces local file headers, a central directory and an end-of-central-
//! directory record. No compression, no ZIP64, no timestamps beyond the fixed
//! DOS epoch, so identical input always yields identical bytes.

use byteorder::{LittleEndian, WriteBytesExt};
use deck_core::{Error, Result};
use std::io;

const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

pub const LOCAL_FILE_HEADER_LEN: usize = 30;
pub const CENTRAL_DIRECTORY_RECORD_LEN: usize = 46;
pub const END_OF_CENTRAL_DIRECTORY_LEN: usize = 22;

const VERSION: u16 = 20;
const METHOD_STORED: u16 = 0;

/// DOS time 00:00:00 and date 1980-01-01.
const DOS_TIME: u16 = 0;
const DOS_DATE: u16 = 0x0021;

/// IEEE 802.3 CRC-32 lookup table (reflected polynomial 0xEDB88320).
static CRC32_TABLE: [u32; 256] = crc32_table();

const fn crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

/// Compute the CRC-32 of a byte slice, as zlib's `crc32` does.
pub fn crc32(data: &[u8]) -> u32 {
    !data.iter().fold(0xFFFF_FFFF, |crc, &byte| {
        CRC32_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8)
    })
}

/// Content of an archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryData {
    /// Written as UTF-8.
    Text(String),
    /// Written as-is.
    Binary(Vec<u8>),
}

impl EntryData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

impl From<String> for EntryData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for EntryData {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for EntryData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

/// A named file to place in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive-relative path, forward-slash separated.
    pub name: String,
    pub data: EntryData,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: impl Into<EntryData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// An entry with its checksum computed and its sizes validated.
#[derive(Debug)]
struct PreparedEntry<'a> {
    name: &'a [u8],
    data: &'a [u8],
    crc: u32,
}

impl<'a> PreparedEntry<'a> {
    fn new(entry: &'a ArchiveEntry) -> Result<Self> {
        let name = entry.name.as_bytes();
        let data = entry.data.as_bytes();

        if entry.name.contains('\\') {
            return Err(Error::ArchiveLimit(format!(
                "entry name '{}' contains a backslash",
                entry.name
            )));
        }
        if u16::try_from(name.len()).is_err() {
            return Err(Error::ArchiveLimit(format!(
                "entry name is {} bytes, limit is {}",
                name.len(),
                u16::MAX
            )));
        }
        if u32::try_from(data.len()).is_err() {
            return Err(Error::ArchiveLimit(format!(
                "entry '{}' is {} bytes, limit is {}",
                entry.name,
                data.len(),
                u32::MAX
            )));
        }

        Ok(Self {
            name,
            data,
            crc: crc32(data),
        })
    }

    fn name_len(&self) -> u16 {
        self.name.len() as u16
    }

    fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Bytes this entry occupies before the central directory.
    fn local_len(&self) -> u64 {
        (LOCAL_FILE_HEADER_LEN + self.name.len() + self.data.len()) as u64
    }

    fn write_local(&self, out: &mut Vec<u8>) -> io::Result<()> {
        out.write_u32::<LittleEndian>(LOCAL_FILE_HEADER_SIGNATURE)?;
        out.write_u16::<LittleEndian>(VERSION)?;
        out.write_u16::<LittleEndian>(0)?; // flags
        out.write_u16::<LittleEndian>(METHOD_STORED)?;
        out.write_u16::<LittleEndian>(DOS_TIME)?;
        out.write_u16::<LittleEndian>(DOS_DATE)?;
        out.write_u32::<LittleEndian>(self.crc)?;
        out.write_u32::<LittleEndian>(self.size())?; // compressed
        out.write_u32::<LittleEndian>(self.size())?; // uncompressed
        out.write_u16::<LittleEndian>(self.name_len())?;
        out.write_u16::<LittleEndian>(0)?; // extra field length
        out.extend_from_slice(self.name);
        out.extend_from_slice(self.data);
        Ok(())
    }

    fn write_central(&self, out: &mut Vec<u8>, offset: u32) -> io::Result<()> {
        out.write_u32::<LittleEndian>(CENTRAL_DIRECTORY_SIGNATURE)?;
        out.write_u16::<LittleEndian>(VERSION)?; // made by
        out.write_u16::<LittleEndian>(VERSION)?; // needed
        out.write_u16::<LittleEndian>(0)?; // flags
        out.write_u16::<LittleEndian>(METHOD_STORED)?;
        out.write_u16::<LittleEndian>(DOS_TIME)?;
        out.write_u16::<LittleEndian>(DOS_DATE)?;
        out.write_u32::<LittleEndian>(self.crc)?;
        out.write_u32::<LittleEndian>(self.size())?;
        out.write_u32::<LittleEndian>(self.size())?;
        out.write_u16::<LittleEndian>(self.name_len())?;
        out.write_u16::<LittleEndian>(0)?; // extra field length
        out.write_u16::<LittleEndian>(0)?; // comment length
        out.write_u16::<LittleEndian>(0)?; // disk number start
        out.write_u16::<LittleEndian>(0)?; // internal attributes
        out.write_u32::<LittleEndian>(0)?; // external attributes
        out.write_u32::<LittleEndian>(offset)?;
        out.extend_from_slice(self.name);
        Ok(())
    }
}

/// Running state of the archive fold.
#[derive(Debug, Default)]
struct Layout {
    local: Vec<u8>,
    central: Vec<u8>,
    offset: u64,
}

fn to_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::ArchiveLimit(format!("{} of {} bytes exceeds 32-bit offsets", what, value)))
}

/// Append one entry at the current offset and advance it.
fn place(mut layout: Layout, entry: &PreparedEntry<'_>) -> Result<Layout> {
    let offset = to_u32(layout.offset, "local header offset")?;
    log::trace!(
        "zip entry {} at offset {} ({} bytes, crc {:08x})",
        String::from_utf8_lossy(entry.name),
        offset,
        entry.data.len(),
        entry.crc
    );

    entry.write_local(&mut layout.local)?;
    entry.write_central(&mut layout.central, offset)?;
    layout.offset += entry.local_len();
    Ok(layout)
}

/// Serialize entries, in order, into a stored ZIP archive.
pub fn build_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let count = u16::try_from(entries.len()).map_err(|_| {
        Error::ArchiveLimit(format!("{} entries, limit is {}", entries.len(), u16::MAX))
    })?;

    // Checksums are independent per entry; placement below is strictly in order.
    let prepared = entries
        .iter()
        .map(PreparedEntry::new)
        .collect::<Result<Vec<_>>>()?;

    let Layout {
        mut local,
        central,
        offset,
    } = prepared.iter().try_fold(Layout::default(), place)?;

    let central_offset = to_u32(offset, "central directory offset")?;
    let central_size = to_u32(central.len() as u64, "central directory")?;

    local.reserve(central.len() + END_OF_CENTRAL_DIRECTORY_LEN);
    local.extend_from_slice(&central);
    local.write_u32::<LittleEndian>(END_OF_CENTRAL_DIRECTORY_SIGNATURE)?;
    local.write_u16::<LittleEndian>(0)?; // this disk
    local.write_u16::<LittleEndian>(0)?; // disk with central directory
    local.write_u16::<LittleEndian>(count)?; // entries on this disk
    local.write_u16::<LittleEndian>(count)?; // total entries
    local.write_u32::<LittleEndian>(central_size)?;
    local.write_u32::<LittleEndian>(central_offset)?;
    local.write_u16::<LittleEndian>(0)?; // comment length

    Ok(local)
}
