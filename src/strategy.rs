//! Gram planning and the single-threaded search strategy.
//!
//! The threaded strategy in [`crate::threaded`] reuses the planning and
//! the per-gram search from here; only the scheduling differs.

use crate::debug::{DebugInfo, GramInfo};
use crate::encode::{code_units, encode, BitPattern};
use crate::gram::GramHash;
use crate::searchinfo::SearchInfo;
use crate::store::StringArray;
use crate::types::KeyDistTuple;
use crate::Dictionary;

///Everything derived from the needle before any index access happens.
///
///The needle is cut into `gram_count` non-overlapping grams of
///`gram_len` units, one more than the typo budget. By the pigeonhole
///principle at least one of them appears unedited in any entry within
///the budget, so looking up the grams cannot lose a reachable match.
pub(crate) struct SearchPlan {
    ///Encoded needle
    pub encoded: String,
    ///Encoded needle as code units
    pub units: Vec<u16>,
    ///Bit signature of the encoded needle
    pub bits: u64,
    ///Typo budget for this query
    pub max_typos: u32,
    ///Units to jump forward in the needle for the next gram
    pub gram_jump: usize,
    ///Length of the grams
    pub gram_len: usize,
    ///Number of grams
    pub gram_count: usize,
}

impl SearchPlan {
    ///Derives the gram layout for a needle. Returns `None` when the
    ///needle encodes to nothing.
    pub fn calculate(
        needle: &str,
        max_gram_size: u32,
        chars_per_error: u32,
    ) -> Option<SearchPlan> {
        let encoded = encode(needle);
        let units = code_units(&encoded);
        if units.is_empty() {
            return None;
        }

        let bits = encoded.bitpattern();
        let max_typos = max_gram_size.min(units.len() as u32 / chars_per_error.max(1));
        let gram_jump = (units.len() / (max_typos as usize + 1)).max(1);
        let gram_len = gram_jump.min(max_gram_size as usize);
        let gram_count = units.len() / gram_len;

        Some(SearchPlan {
            encoded,
            units,
            bits,
            max_typos,
            gram_jump,
            gram_len,
            gram_count,
        })
    }

    pub fn search_info<'a>(
        &'a self,
        wordlist: &'a StringArray,
        bitpattern_list: &'a [u64],
        debug: bool,
    ) -> SearchInfo<'a> {
        SearchInfo::new(
            &self.units,
            self.bits,
            wordlist,
            bitpattern_list,
            self.max_typos,
            debug,
        )
    }

    ///The i-th gram of the plan.
    ///
    ///If units remain past the last jump the final gram is widened to
    ///`max_gram_size` from its own offset so the tail of the needle is
    ///still covered. The widened gram may overlap its predecessor,
    ///which only helps recall.
    pub fn gram(&self, i: usize, max_gram_size: usize) -> String {
        let start = i * self.gram_jump;
        if start >= self.units.len() {
            return String::new();
        }
        let mut len = self.gram_len;
        if i == self.gram_count - 1 && self.units.len() > self.gram_count * self.gram_jump {
            len = max_gram_size;
        }
        let end = (start + len).min(self.units.len());
        String::from_utf16_lossy(&self.units[start..end])
    }
}

///Best match for a single gram: folds [`crate::keylist::KeyList::find`]
///over the key lists of the gram's node, stopping at a perfect hit.
pub(crate) fn search_best_key(
    gram_hash: &GramHash,
    entries: &StringArray,
    info: &SearchInfo,
    gram: &str,
    trace: Option<&mut DebugInfo>,
) -> KeyDistTuple {
    let mut rv = KeyDistTuple::invalid();

    let node = match gram_hash.node(gram) {
        Some(node) => node,
        None => return rv,
    };
    for list in node.lists() {
        let best = list.find(info);
        if best < rv {
            rv = best;
        }
        if best.distance() == 0 {
            break;
        }
    }

    if let Some(trace) = trace {
        trace.grams.push(GramInfo {
            gram: gram.to_string(),
            entries: node.value_count(),
            best_match: if rv.key_is_valid() {
                entries.to_string(rv.key() as usize)
            } else {
                String::new()
            },
            edit_distance: rv.distance(),
        });
    }

    rv
}

impl Dictionary {
    ///Walks the grams in order on the calling thread, keeping the
    ///running minimum and stopping at distance zero.
    pub(crate) fn simple_search(
        &self,
        needle: &str,
        mut trace: Option<&mut DebugInfo>,
    ) -> Option<String> {
        let max_gram_size = self.gram_hash.max_gram_size();
        let plan = SearchPlan::calculate(needle, max_gram_size, self.params.chars_per_error)?;
        let info = plan.search_info(&self.encoded_entries, &self.bit_signatures, self.params.debug);

        let mut best = KeyDistTuple::invalid();
        for i in 0..plan.gram_count {
            let gram = plan.gram(i, max_gram_size as usize);
            let matched = search_best_key(
                &self.gram_hash,
                &self.entries,
                &info,
                &gram,
                trace.as_deref_mut(),
            );
            if matched < best {
                best = matched;
            }
            if matched.distance() == 0 {
                // Optimum found.
                break;
            }
        }

        self.finish_search(best, &plan, trace)
    }

    ///Resolves the winning tuple to the original entry text and fills
    ///the summary part of the trace.
    pub(crate) fn finish_search(
        &self,
        best: KeyDistTuple,
        plan: &SearchPlan,
        trace: Option<&mut DebugInfo>,
    ) -> Option<String> {
        if let Some(trace) = trace {
            trace.enc_query = plan.encoded.clone();
            trace.max_typos = plan.max_typos;
            if best.key_is_valid() {
                trace.result = self.entries.to_string(best.key() as usize);
                trace.edit_distance = best.distance();
            }
        }
        if best.key_is_valid() {
            Some(self.entries.to_string(best.key() as usize))
        } else {
            None
        }
    }
}
