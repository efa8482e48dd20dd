//! The threaded search strategy: a fixed pool of workers drains a
//! shared gram queue and publishes per-worker bests into a shared
//! match queue.

use std::collections::VecDeque;
use std::thread;

use parking_lot::RwLock;

use crate::debug::{DebugInfo, GramInfo};
use crate::searchinfo::SearchInfo;
use crate::strategy::{search_best_key, SearchPlan};
use crate::types::KeyDistTuple;
use crate::Dictionary;

///Data shared between the search workers of one query.
///
///Every shared mutable datum carries its own reader/writer lock; the
///needle and the typo budget are not here because they live in the
///immutable [`SearchInfo`] the workers only read.
pub(crate) struct SharedSearchState<'a> {
    gram_queue: RwLock<VecDeque<String>>,
    match_queue: RwLock<VecDeque<KeyDistTuple>>,
    best_match_found: RwLock<bool>,
    trace: Option<RwLock<&'a mut DebugInfo>>,
}

impl<'a> SharedSearchState<'a> {
    fn new(trace: Option<&'a mut DebugInfo>) -> Self {
        SharedSearchState {
            gram_queue: RwLock::new(VecDeque::new()),
            match_queue: RwLock::new(VecDeque::new()),
            best_match_found: RwLock::new(false),
            trace: trace.map(RwLock::new),
        }
    }

    fn enqueue_gram(&self, gram: String) {
        self.gram_queue.write().push_back(gram);
    }

    fn next_gram(&self) -> Option<String> {
        self.gram_queue.write().pop_front()
    }

    fn clear_gram_queue(&self) {
        self.gram_queue.write().clear();
    }

    fn best_match_found(&self) -> bool {
        *self.best_match_found.read()
    }

    fn set_best_match_found(&self) {
        *self.best_match_found.write() = true;
    }

    fn enqueue_match(&self, tuple: KeyDistTuple) {
        self.match_queue.write().push_back(tuple);
    }

    ///Minimum over everything the workers published. Stops early at a
    ///perfect match and drains the queue.
    fn best_match_from_queue(&self) -> KeyDistTuple {
        let mut queue = self.match_queue.write();
        let mut best = KeyDistTuple::invalid();
        while let Some(tuple) = queue.pop_front() {
            if tuple < best {
                best = tuple;
            }
            if tuple.distance() == 0 {
                // Optimal match found.
                break;
            }
        }
        queue.clear();
        best
    }

    fn trace_enabled(&self) -> bool {
        self.trace.is_some()
    }

    fn push_gram_info(&self, info: GramInfo) {
        if let Some(trace) = &self.trace {
            trace.write().grams.push(info);
        }
    }

    fn into_trace(self) -> Option<&'a mut DebugInfo> {
        self.trace.map(|lock| lock.into_inner())
    }
}

///One worker: drain the gram queue, bail out as soon as another worker
///reports a perfect match, publish the local best at the end.
fn search_worker(
    dict: &Dictionary,
    state: &SharedSearchState,
    strategy_lock: &RwLock<()>,
    info: &SearchInfo,
) {
    let mut best = KeyDistTuple::invalid();

    while let Some(gram) = state.next_gram() {
        if state.best_match_found() {
            // Best match already found by another worker.
            return;
        }

        let mut entry_count = None;
        let matched = {
            // Lock order: strategy lock first, then the key list locks
            // taken inside find(). Nothing else may nest.
            let _guard = strategy_lock.read();
            if state.trace_enabled() {
                entry_count = dict.gram_hash.node(&gram).map(|node| node.value_count());
            }
            search_best_key(&dict.gram_hash, &dict.entries, info, &gram, None)
        };
        if let Some(entries) = entry_count {
            state.push_gram_info(GramInfo {
                gram: gram.clone(),
                entries,
                best_match: if matched.key_is_valid() {
                    dict.entries.to_string(matched.key() as usize)
                } else {
                    String::new()
                },
                edit_distance: matched.distance(),
            });
        }

        if state.best_match_found() {
            // Another worker got there first; its zero-distance result
            // already dominates everything we could publish.
            return;
        }
        if matched < best {
            best = matched;
        }
        if matched.distance() == 0 {
            state.set_best_match_found();
            state.clear_gram_queue();
            break;
        }
    }

    if best.key_is_valid() {
        state.enqueue_match(best);
    }
}

impl Dictionary {
    ///Fans the grams of the needle out across the worker pool and
    ///reduces the published results to the minimum-distance entry.
    pub(crate) fn threaded_search(
        &self,
        needle: &str,
        trace: Option<&mut DebugInfo>,
    ) -> Option<String> {
        let max_gram_size = self.gram_hash.max_gram_size();
        let plan = SearchPlan::calculate(needle, max_gram_size, self.params.chars_per_error)?;
        let info = plan.search_info(&self.encoded_entries, &self.bit_signatures, self.params.debug);

        let state = SharedSearchState::new(trace);
        for i in 0..plan.gram_count {
            state.enqueue_gram(plan.gram(i, max_gram_size as usize));
        }

        let strategy_lock = RwLock::new(());
        thread::scope(|scope| {
            for _ in 0..self.params.search_threads.max(1) {
                scope.spawn(|| search_worker(self, &state, &strategy_lock, &info));
            }
        });

        let best = state.best_match_from_queue();
        let trace = state.into_trace();
        self.finish_search(best, &plan, trace)
    }
}
