//! Fuzzydict is an approximate-match dictionary. Given a needle that
//! may contain typos it returns the best-matching entry of a fixed
//! reference corpus, or nothing if no entry lies within the permitted
//! typo budget.
//!
//! The corpus is indexed by n-grams of the encoded entries. A query is
//! cut into one gram more than its typo budget, so at least one gram
//! survives unedited in any reachable match; the candidate lists behind
//! the grams then run through a length filter, a character-set bit
//! filter and a budgeted edit distance. Indexes persist to disk with
//! lazily loaded posting lists, so large dictionaries answer their
//! first query without reading every list.
//!
//! ```no_run
//! use fuzzydict::Dictionary;
//!
//! let mut dict = Dictionary::new();
//! dict.build("artists.txt");
//! assert_eq!(dict.find("Lois Armstrong"), Some("Louis Armstrong".to_string()));
//! ```

extern crate byteorder;
extern crate parking_lot;
extern crate thiserror;

use std::path::{Path, PathBuf};

pub mod bktree;
pub mod debug;
pub mod distance;
pub mod encode;
pub mod error;
pub mod gram;
pub mod keylist;
pub mod searchinfo;
pub mod store;
pub mod test;
pub mod types;

mod builder;
mod db;
mod strategy;
mod threaded;

pub use crate::bktree::*;
pub use crate::debug::*;
pub use crate::distance::*;
pub use crate::encode::*;
pub use crate::error::*;
pub use crate::gram::*;
pub use crate::keylist::*;
pub use crate::searchinfo::*;
pub use crate::store::*;
pub use crate::types::*;

use crate::builder::Builder;
use crate::db::{IndexView, LoadedIndex};

///The dictionary: entry stores, signature table and gram index behind
///the public query and persistence surface.
pub struct Dictionary {
    pub(crate) params: DictionaryParams,

    ///Basename the index was built from or loaded under
    pub(crate) dict_path: Option<PathBuf>,

    ///All dictionary entries as supplied
    pub(crate) entries: StringArray,

    ///All dictionary entries in encoded form
    pub(crate) encoded_entries: StringArray,

    ///Bit signature of each encoded entry
    pub(crate) bit_signatures: BitpatternList,

    ///The gram index
    pub(crate) gram_hash: GramHash,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::with_params(DictionaryParams::default())
    }

    pub fn with_params(params: DictionaryParams) -> Self {
        let gram_hash = GramHash::new(params.gram_size, params.min_gram_size);
        Dictionary {
            params,
            dict_path: None,
            entries: StringArray::new(),
            encoded_entries: StringArray::new(),
            bit_signatures: Vec::new(),
            gram_hash,
        }
    }

    pub fn params(&self) -> &DictionaryParams {
        &self.params
    }

    ///Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///The original text of the entry at `key`.
    pub fn entry(&self, key: Key) -> Option<String> {
        ((key as usize) < self.entries.len()).then(|| self.entries.to_string(key as usize))
    }

    pub fn gram_hash(&self) -> &GramHash {
        &self.gram_hash
    }

    ///Normalizes a string the way entries and needles are normalized.
    pub fn encode(&self, text: &str) -> String {
        encode(text)
    }

    ///The typo budget a needle would be granted: one typo per
    ///`chars_per_error` encoded characters, capped at the gram size.
    pub fn calc_max_typos(&self, text: &str) -> u32 {
        let encoded = encode(text);
        self.gram_hash
            .max_gram_size()
            .min(code_units(&encoded).len() as u32 / self.params.chars_per_error.max(1))
    }

    ///The best match for a needle, or `None` if no entry lies within
    ///the needle's typo budget.
    pub fn find(&self, needle: &str) -> Option<String> {
        if self.params.single_thread {
            self.simple_search(needle, None)
        } else {
            self.threaded_search(needle, None)
        }
    }

    ///Like [`Dictionary::find`], but fills a trace with per-gram
    ///details along the way.
    pub fn find_verbose(&self, needle: &str, debug_info: &mut DebugInfo) -> Option<String> {
        debug_info.query = needle.to_string();
        if self.params.single_thread {
            self.simple_search(needle, Some(debug_info))
        } else {
            self.threaded_search(needle, Some(debug_info))
        }
    }

    ///Builds the dictionary from a UTF-8 corpus file, one entry per
    ///line. On failure the dictionary is left cleared.
    pub fn build<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match self.try_build(path.as_ref()) {
            Ok(()) => true,
            Err(err) => {
                if self.params.debug {
                    eprintln!("fuzzydict: building from corpus failed: {}", err);
                }
                self.clear();
                false
            }
        }
    }

    fn try_build(&mut self, path: &Path) -> Result<(), DictError> {
        self.clear_index();
        self.dict_path = Some(path.to_path_buf());
        Builder::new(self).build_from_path(path)
    }

    ///Builds the dictionary from lines already in memory.
    pub fn build_from_lines<I, S>(&mut self, lines: I) -> Result<(), DictError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear_index();
        let result = Builder::new(self).build_from_lines(lines);
        if result.is_err() {
            self.clear_index();
        }
        result
    }

    ///Loads a shallow index saved under `path`. If that fails the path
    ///is treated as a corpus file and the dictionary is rebuilt from
    ///it.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        self.dict_path = Some(path.to_path_buf());
        match db::load_shallow(path, self.params.min_gram_size) {
            Ok(index) => {
                self.install(index);
                true
            }
            Err(err) => {
                if self.params.debug {
                    eprintln!(
                        "fuzzydict: loading index failed ({}), rebuilding from corpus",
                        err
                    );
                }
                self.build(path)
            }
        }
    }

    ///Loads a deep (single-file) index saved under `path`.
    pub fn load_deep<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        match db::load_deep(path, self.params.min_gram_size) {
            Ok(index) => {
                self.dict_path = Some(path.to_path_buf());
                self.install(index);
                true
            }
            Err(err) => {
                if self.params.debug {
                    eprintln!("fuzzydict: loading deep index failed: {}", err);
                }
                false
            }
        }
    }

    ///Saves the shallow index (primary file plus sidecar) under the
    ///basename the dictionary was built from or loaded under.
    pub fn save(&self) -> bool {
        self.save_with(db::save_shallow)
    }

    ///Saves the deep single-file index.
    pub fn save_deep(&self) -> bool {
        self.save_with(db::save_deep)
    }

    fn save_with(&self, backend: fn(&Path, &IndexView) -> Result<(), DictError>) -> bool {
        let path = match &self.dict_path {
            Some(path) => path.clone(),
            None => return false,
        };
        match backend(&path, &self.index_view()) {
            Ok(()) => true,
            Err(err) => {
                if self.params.debug {
                    eprintln!("fuzzydict: saving index failed: {}", err);
                }
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.dict_path = None;
        self.clear_index();
    }

    fn clear_index(&mut self) {
        self.entries.clear();
        self.encoded_entries.clear();
        self.bit_signatures.clear();
        self.gram_hash.clear();
    }

    fn install(&mut self, index: LoadedIndex) {
        self.params.gram_size = index.gram_size;
        self.entries = index.entries;
        self.encoded_entries = index.encoded_entries;
        self.bit_signatures = index.bit_signatures;
        self.gram_hash = index.gram_hash;
    }

    fn index_view(&self) -> IndexView<'_> {
        IndexView {
            gram_size: self.gram_hash.max_gram_size(),
            encoded_entries: &self.encoded_entries,
            entries: &self.entries,
            bit_signatures: &self.bit_signatures,
            gram_hash: &self.gram_hash,
            debug: self.params.debug,
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary::new()
    }
}
