//! Persistence backends.
//!
//! The shallow backend is the primary one: the index prologue and the
//! gram-hash topology go into `<base>.idb`, the posting list payloads
//! into the `<base>.kdb` sidecar, addressed through an id-to-offset map
//! so lists can be deserialized one at a time on first access. The deep
//! backend writes everything into a single `<base>.fulldb` eagerly.
//!
//! All integers are big-endian. Strings travel as a `u32` code-unit
//! count followed by the 16-bit units.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::DictError;
use crate::gram::GramHash;
use crate::keylist::KeyList;
use crate::store::StringArray;
use crate::types::Key;

pub(crate) const SHALLOW_MAGIC: u16 = 0xFEEF;

pub(crate) const DEEP_MAGIC: u16 = 0xFFE2;

pub(crate) const VERSION: u16 = 0x0001;

const DB_EXTENSION: &str = ".idb";

const CONTAINER_EXTENSION: &str = ".kdb";

const FULL_DB_EXTENSION: &str = ".fulldb";

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

pub(crate) fn write_wire_string<W: Write>(out: &mut W, text: &str) -> Result<(), DictError> {
    let units: Vec<u16> = text.encode_utf16().collect();
    out.write_u32::<BigEndian>(units.len() as u32)?;
    for unit in units {
        out.write_u16::<BigEndian>(unit)?;
    }
    Ok(())
}

pub(crate) fn read_wire_string<R: Read>(input: &mut R) -> Result<String, DictError> {
    let count = input.read_u32::<BigEndian>()? as usize;
    let mut units = Vec::new();
    units.try_reserve_exact(count)?;
    units.resize(count, 0u16);
    input.read_u16_into::<BigEndian>(&mut units)?;
    Ok(String::from_utf16_lossy(&units))
}

///Resolves posting list ids to payloads in the sidecar file.
///
///Shared by every key list stub of a loaded dictionary. Each load opens
///the sidecar on its own, seeks to the recorded offset and reads one
///deep record; no state is kept between loads, so concurrent lazy loads
///of different lists do not serialize on a file handle.
pub struct ShallowBackend {
    sidecar: PathBuf,
    positions: HashMap<u32, u64>,
}

impl ShallowBackend {
    pub(crate) fn new(sidecar: PathBuf, positions: HashMap<u32, u64>) -> Self {
        ShallowBackend { sidecar, positions }
    }

    ///Reads the payload of the list with the given id.
    pub(crate) fn load_keys(&self, id: u32) -> Result<Vec<Key>, DictError> {
        let pos = *self.positions.get(&id).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("posting list {} has no recorded offset", id),
            )
        })?;
        let mut file = File::open(&self.sidecar)?;
        file.seek(SeekFrom::Start(pos))?;
        let mut input = BufReader::new(file);
        let (record_id, _size, keys) = KeyList::read_deep_record(&mut input)?;
        debug_assert_eq!(record_id, id);
        Ok(keys)
    }
}

///Borrowed view of a dictionary's serializable parts.
pub(crate) struct IndexView<'a> {
    pub gram_size: u32,
    pub encoded_entries: &'a StringArray,
    pub entries: &'a StringArray,
    pub bit_signatures: &'a [u64],
    pub gram_hash: &'a GramHash,
    pub debug: bool,
}

///A dictionary's parts as they come back from disk.
pub(crate) struct LoadedIndex {
    pub gram_size: u32,
    pub encoded_entries: StringArray,
    pub entries: StringArray,
    pub bit_signatures: Vec<u64>,
    pub gram_hash: GramHash,
}

fn save_prologue<W: Write>(out: &mut W, index: &IndexView) -> Result<(), DictError> {
    out.write_u32::<BigEndian>(index.gram_size)?;
    index.encoded_entries.save(out)?;
    index.entries.save(out)?;
    out.write_u32::<BigEndian>(index.bit_signatures.len() as u32)?;
    for &signature in index.bit_signatures {
        out.write_u64::<BigEndian>(signature)?;
    }
    Ok(())
}

fn load_prologue<R: Read>(
    input: &mut R,
) -> Result<(u32, StringArray, StringArray, Vec<u64>), DictError> {
    let gram_size = input.read_u32::<BigEndian>()?;
    let encoded_entries = StringArray::load(input)?;
    let entries = StringArray::load(input)?;
    let count = input.read_u32::<BigEndian>()? as usize;
    let mut bit_signatures = Vec::new();
    bit_signatures.try_reserve_exact(count)?;
    for _ in 0..count {
        bit_signatures.push(input.read_u64::<BigEndian>()?);
    }
    Ok((gram_size, encoded_entries, entries, bit_signatures))
}

fn check_format<R: Read>(input: &mut R, magic: u16) -> Result<(), DictError> {
    let found_magic = input.read_u16::<BigEndian>()?;
    if found_magic != magic {
        return Err(DictError::BadMagic(found_magic));
    }
    let found_version = input.read_u16::<BigEndian>()?;
    if found_version != VERSION {
        return Err(DictError::BadVersion(found_version));
    }
    Ok(())
}

///Writes the sidecar plus the primary index file.
///
///The sidecar goes first: writing the deep records is what produces the
///offsets the primary file's id map needs.
pub(crate) fn save_shallow(base: &Path, index: &IndexView) -> Result<(), DictError> {
    let mut positions: HashMap<u32, u64> = HashMap::new();
    {
        let file = File::create(with_suffix(base, CONTAINER_EXTENSION))?;
        let mut out = BufWriter::new(file);
        let mut pos: u64 = 0;
        for (_gram, node) in index.gram_hash.distinctive_iter() {
            for list in node.lists() {
                positions.insert(list.id(), pos);
                pos += list.save_deep(&mut out, index.debug)?;
            }
        }
        out.flush()?;
    }

    let file = File::create(with_suffix(base, DB_EXTENSION))?;
    let mut out = BufWriter::new(file);
    out.write_u16::<BigEndian>(SHALLOW_MAGIC)?;
    out.write_u16::<BigEndian>(VERSION)?;
    save_prologue(&mut out, index)?;
    index.gram_hash.save_shallow(&mut out)?;
    out.write_u32::<BigEndian>(positions.len() as u32)?;
    for (&id, &pos) in positions.iter() {
        out.write_u32::<BigEndian>(id)?;
        out.write_u64::<BigEndian>(pos)?;
    }
    out.flush()?;
    Ok(())
}

///Reads a shallow index. The gram hash comes back populated with
///unloaded stubs wired to the sidecar backend.
pub(crate) fn load_shallow(base: &Path, min_gram_size: u32) -> Result<LoadedIndex, DictError> {
    let file = File::open(with_suffix(base, DB_EXTENSION))?;
    let mut input = BufReader::new(file);
    check_format(&mut input, SHALLOW_MAGIC)?;
    let (gram_size, encoded_entries, entries, bit_signatures) = load_prologue(&mut input)?;

    // The shallow dump sits before the id map in the file, so it is
    // parsed into raw records first and only turned into a gram hash
    // once the backend can be constructed.
    let dump = GramHash::read_shallow_dump(&mut input)?;

    let count = input.read_u32::<BigEndian>()?;
    let mut positions = HashMap::new();
    for _ in 0..count {
        let id = input.read_u32::<BigEndian>()?;
        let pos = input.read_u64::<BigEndian>()?;
        positions.insert(id, pos);
    }

    let backend = Arc::new(ShallowBackend::new(
        with_suffix(base, CONTAINER_EXTENSION),
        positions,
    ));
    let gram_hash = GramHash::from_shallow_dump(dump, gram_size, min_gram_size, &backend);

    Ok(LoadedIndex {
        gram_size,
        encoded_entries,
        entries,
        bit_signatures,
        gram_hash,
    })
}

///Writes the whole dictionary, payloads included, into one file.
pub(crate) fn save_deep(base: &Path, index: &IndexView) -> Result<(), DictError> {
    let file = File::create(with_suffix(base, FULL_DB_EXTENSION))?;
    let mut out = BufWriter::new(file);
    out.write_u16::<BigEndian>(DEEP_MAGIC)?;
    out.write_u16::<BigEndian>(VERSION)?;
    save_prologue(&mut out, index)?;
    index.gram_hash.save_deep(&mut out, index.debug)?;
    out.flush()?;
    Ok(())
}

///Reads a deep index; everything is in memory afterwards, no lazy
///loading happens later.
pub(crate) fn load_deep(base: &Path, min_gram_size: u32) -> Result<LoadedIndex, DictError> {
    let file = File::open(with_suffix(base, FULL_DB_EXTENSION))?;
    let mut input = BufReader::new(file);
    check_format(&mut input, DEEP_MAGIC)?;
    let (gram_size, encoded_entries, entries, bit_signatures) = load_prologue(&mut input)?;
    let gram_hash = GramHash::load_deep(&mut input, gram_size, min_gram_size)?;

    Ok(LoadedIndex {
        gram_size,
        encoded_entries,
        entries,
        bit_signatures,
        gram_hash,
    })
}
