use crate::distance::{bounded_edit_distance, MatchType};
use crate::encode::min_bit_distance;
use crate::store::StringArray;
use crate::types::{Dist, Key, DIST_MAX};

///Read-only context for one query, shared by every posting list scan.
///
///Bundles the encoded needle, its bit signature, the typo budget and
///views of the entry store and signature table. Workers of the threaded
///strategy share a single instance by reference; nothing in here is
///ever written during a search.
pub struct SearchInfo<'a> {
    needle: &'a [u16],
    needle_bits: u64,
    wordlist: &'a StringArray,
    bitpattern_list: &'a [u64],
    max_typos: u32,
    debug: bool,
}

impl<'a> SearchInfo<'a> {
    pub fn new(
        needle: &'a [u16],
        needle_bits: u64,
        wordlist: &'a StringArray,
        bitpattern_list: &'a [u64],
        max_typos: u32,
        debug: bool,
    ) -> Self {
        SearchInfo {
            needle,
            needle_bits,
            wordlist,
            bitpattern_list,
            max_typos,
            debug,
        }
    }

    pub fn max_typos(&self) -> u32 {
        self.max_typos
    }

    pub(crate) fn debug(&self) -> bool {
        self.debug
    }

    ///First filter stage: entries whose length differs from the needle
    ///by more than the budget cannot match.
    fn size_differs_too_much(&self, key: Key) -> bool {
        self.needle.len().abs_diff(self.wordlist.size_of(key as usize)) > self.max_typos as usize
    }

    ///Second filter stage: the signature bound already proves more
    ///edits than the budget permits.
    fn bit_distance_too_large(&self, key: Key) -> bool {
        min_bit_distance(self.needle_bits, self.bitpattern_list[key as usize]) > self.max_typos
    }

    ///Distance of the needle to the entry at `key`, or [`DIST_MAX`]
    ///when a filter stage rejects it or the budget is exceeded.
    pub fn calc_distance(&self, key: Key) -> Dist {
        debug_assert!((key as usize) < self.wordlist.len());
        debug_assert!((key as usize) < self.bitpattern_list.len());

        if self.size_differs_too_much(key) {
            return DIST_MAX;
        }
        if self.bit_distance_too_large(key) {
            return DIST_MAX;
        }
        let dist = bounded_edit_distance(
            self.needle,
            self.wordlist.view(key as usize),
            self.max_typos,
            MatchType::SubstringMatch,
        );
        if dist <= self.max_typos {
            dist as Dist
        } else {
            DIST_MAX
        }
    }
}
