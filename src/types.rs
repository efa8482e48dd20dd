use std::cmp::Ordering;

///Index of an entry in the string store, carries no further meaning
pub type Key = u32;

///Reserved sentinel, no entry may ever be stored under this index
pub const KEY_MAX: Key = u32::MAX;

///An edit distance small enough for any sane typo budget
pub type Dist = u8;

///Marks a distance that exceeded the typo budget
pub const DIST_MAX: Dist = u8::MAX;

pub const DEFAULT_GRAM_SIZE: u32 = 4;

pub const DEFAULT_MIN_GRAM_SIZE: u32 = 2;

pub const DEFAULT_CHARS_PER_ERROR: u32 = 4;

pub const DEFAULT_SEARCH_THREADS: usize = 3;

///A (key, distance) pair as produced by scanning a posting list.
///
///All comparisons go by distance alone; the key only identifies the
///entry the distance was measured against. The invalid tuple compares
///greater than or equal to every real match.
#[derive(Clone, Copy, Debug)]
pub struct KeyDistTuple {
    key: Key,
    dist: Dist,
}

impl KeyDistTuple {
    pub fn invalid() -> Self {
        KeyDistTuple {
            key: KEY_MAX,
            dist: DIST_MAX,
        }
    }

    pub fn new(key: Key, dist: Dist) -> Self {
        KeyDistTuple { key, dist }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn distance(&self) -> Dist {
        self.dist
    }

    pub fn set(&mut self, key: Key, dist: Dist) {
        self.key = key;
        self.dist = dist;
    }

    pub fn key_is_valid(&self) -> bool {
        self.key != KEY_MAX
    }

    pub fn dist_is_valid(&self) -> bool {
        self.dist != DIST_MAX
    }
}

impl Default for KeyDistTuple {
    fn default() -> Self {
        KeyDistTuple::invalid()
    }
}

impl PartialEq for KeyDistTuple {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl Eq for KeyDistTuple {}

impl PartialOrd for KeyDistTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyDistTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.cmp(&other.dist)
    }
}

#[derive(Clone, Debug)]
pub struct DictionaryParams {
    /// Length of the grams the index is built from. This is also the upper
    /// bound for the typo budget of a single query.
    pub gram_size: u32,

    /// Shortest gram suffix that is still registered in the index. Grams are
    /// shared into every prefix down to this length so that shortened needle
    /// grams still resolve.
    pub min_gram_size: u32,

    /// One typo is permitted per this many characters of the encoded needle.
    pub chars_per_error: u32,

    /// Number of worker threads used by the threaded search strategy.
    pub search_threads: usize,

    /// Use the single-threaded search strategy instead of the worker pool
    /// (lowers resource use and performance).
    pub single_thread: bool,

    /// Print diagnostics to stderr while building and searching.
    pub debug: bool,
}

impl Default for DictionaryParams {
    fn default() -> Self {
        Self {
            gram_size: DEFAULT_GRAM_SIZE,
            min_gram_size: DEFAULT_MIN_GRAM_SIZE,
            chars_per_error: DEFAULT_CHARS_PER_ERROR,
            search_threads: DEFAULT_SEARCH_THREADS,
            single_thread: false,
            debug: false,
        }
    }
}

impl DictionaryParams {
    pub fn with_gram_size(mut self, gram_size: u32) -> Self {
        self.gram_size = gram_size;
        self
    }
    pub fn with_min_gram_size(mut self, min_gram_size: u32) -> Self {
        self.min_gram_size = min_gram_size;
        self
    }
    pub fn with_chars_per_error(mut self, chars_per_error: u32) -> Self {
        self.chars_per_error = chars_per_error;
        self
    }
    pub fn with_search_threads(mut self, search_threads: usize) -> Self {
        self.search_threads = search_threads;
        self
    }
    pub fn with_single_thread(mut self) -> Self {
        self.single_thread = true;
        self
    }
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}
