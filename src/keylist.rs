use std::io::{Read, Write};
use std::sync::Arc;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use parking_lot::RwLock;

use crate::db::ShallowBackend;
use crate::error::DictError;
use crate::searchinfo::SearchInfo;
use crate::types::{Key, KeyDistTuple};

///A posting list: entry indices that share one gram.
///
///Example, for this string store
///
///```text
///     0 "hello"
///     1 "world"
///     2 "earth"
///     3 "sun"
///```
///
///a possible key list is [0, 2, 3].
///
///A key list created by the builder carries its payload from the start.
///A key list created from a shallow index file is a stub that only
///knows its id and size; the payload is pulled from the sidecar file on
///the first [`KeyList::find`]. The state is guarded by the list's own
///reader/writer lock so concurrent searches may trigger the load race
///free.
pub struct KeyList {
    id: u32,
    state: RwLock<KeyListState>,
}

struct KeyListState {
    loaded: bool,
    ///Size from the shallow header; once loaded `keys.len()` rules
    size: u32,
    keys: Vec<Key>,
    backend: Option<Arc<ShallowBackend>>,
}

impl KeyList {
    ///A fresh, fully loaded, empty list as created by the index builder.
    pub fn new(id: u32) -> Self {
        KeyList {
            id,
            state: RwLock::new(KeyListState {
                loaded: true,
                size: 0,
                keys: Vec::new(),
                backend: None,
            }),
        }
    }

    ///An unloaded stub as created when reading a shallow index file.
    pub(crate) fn stub(id: u32, size: u32, backend: Arc<ShallowBackend>) -> Self {
        KeyList {
            id,
            state: RwLock::new(KeyListState {
                loaded: false,
                size,
                keys: Vec::new(),
                backend: Some(backend),
            }),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    ///Number of keys in the list. Before the lazy load this is the size
    ///recorded in the shallow header.
    pub fn size(&self) -> u32 {
        let state = self.state.read();
        if state.loaded {
            state.keys.len() as u32
        } else {
            state.size
        }
    }

    ///Appends a key. Only the builder grows lists.
    pub fn append(&self, key: Key) {
        let mut state = self.state.write();
        state.keys.push(key);
        state.size += 1;
    }

    ///Pulls the payload from the sidecar if it is not in memory yet.
    ///
    ///Double checked under the list's lock. A failing load leaves the
    ///list unloaded and empty, so the running query sees no candidates
    ///from it; the next query will retry.
    fn ensure_loaded(&self, debug: bool) {
        if self.state.read().loaded {
            return;
        }
        let mut state = self.state.write();
        if state.loaded {
            return;
        }
        let backend = match &state.backend {
            Some(backend) => Arc::clone(backend),
            None => {
                state.loaded = true;
                return;
            }
        };
        match backend.load_keys(self.id) {
            Ok(keys) => {
                state.size = keys.len() as u32;
                state.keys = keys;
                state.loaded = true;
            }
            Err(err) => {
                if debug {
                    eprintln!("fuzzydict: loading posting list {} failed: {}", self.id, err);
                }
                state.keys.clear();
            }
        }
    }

    ///Finds the best approximate match for the needle described by
    ///`info` among the entries of this list.
    pub fn find(&self, info: &SearchInfo) -> KeyDistTuple {
        self.ensure_loaded(info.debug());
        let state = self.state.read();

        let mut rv = KeyDistTuple::invalid();
        for &key in state.keys.iter() {
            let dist = info.calc_distance(key);
            if dist < rv.distance() {
                rv.set(key, dist);
            }
            if dist == 0 {
                break;
            }
        }
        rv
    }

    ///Writes id and size only.
    pub(crate) fn save_shallow<W: Write>(&self, out: &mut W) -> Result<(), DictError> {
        out.write_u32::<BigEndian>(self.id)?;
        out.write_u32::<BigEndian>(self.size())?;
        Ok(())
    }

    ///Writes the whole list and returns the number of bytes emitted, so
    ///the caller can keep a running offset for the id map. Forces the
    ///lazy load first, a stub must not be flushed back empty.
    pub(crate) fn save_deep<W: Write>(&self, out: &mut W, debug: bool) -> Result<u64, DictError> {
        self.ensure_loaded(debug);
        let state = self.state.read();
        out.write_u32::<BigEndian>(self.id)?;
        out.write_u32::<BigEndian>(state.keys.len() as u32)?;
        out.write_u32::<BigEndian>(state.keys.len() as u32)?;
        for &key in state.keys.iter() {
            out.write_u32::<BigEndian>(key)?;
        }
        Ok(12 + 4 * state.keys.len() as u64)
    }

    ///Reads one record written by `save_deep`.
    pub(crate) fn read_deep_record<R: Read>(
        input: &mut R,
    ) -> Result<(u32, u32, Vec<Key>), DictError> {
        let id = input.read_u32::<BigEndian>()?;
        let size = input.read_u32::<BigEndian>()?;
        let count = input.read_u32::<BigEndian>()? as usize;
        let mut keys = Vec::new();
        keys.try_reserve_exact(count)?;
        keys.resize(count, 0u32);
        input.read_u32_into::<BigEndian>(&mut keys)?;
        Ok((id, size, keys))
    }

    ///A fully loaded list restored from a deep record.
    pub(crate) fn from_deep_record(id: u32, keys: Vec<Key>) -> Self {
        KeyList {
            id,
            state: RwLock::new(KeyListState {
                loaded: true,
                size: keys.len() as u32,
                keys,
                backend: None,
            }),
        }
    }
}
