use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::encode::{code_units, encode, BitPattern};
use crate::error::DictError;
use crate::types::{Key, KEY_MAX};
use crate::Dictionary;

///Builds the internal data structures of a dictionary from UTF-8 text,
///one entry per line.
///
///Lines that encode to nothing are skipped, duplicates (by encoded
///form) keep their first occurrence. Entries shorter than the minimum
///gram size are stored but not indexed.
pub(crate) struct Builder<'a> {
    dict: &'a mut Dictionary,
    seen: HashSet<String>,
}

impl<'a> Builder<'a> {
    pub fn new(dict: &'a mut Dictionary) -> Self {
        Builder {
            dict,
            seen: HashSet::new(),
        }
    }

    fn add_gram(&mut self, gram: &[u16], key: Key) -> Result<(), DictError> {
        self.dict.gram_hash.insert(gram, key)
    }

    ///Inserts one corpus line.
    fn process_line(&mut self, line: &str) -> Result<(), DictError> {
        if self.dict.encoded_entries.len() as u64 == KEY_MAX as u64 {
            return Err(DictError::TooManyEntries);
        }

        let encoded = encode(line);
        let units = code_units(&encoded);
        if units.is_empty() {
            return Ok(());
        }
        if self.seen.contains(&encoded) {
            return Ok(());
        }
        self.seen.insert(encoded.clone());

        self.dict.encoded_entries.append(&encoded)?;
        self.dict.entries.append(line)?;
        self.dict.bit_signatures.push(encoded.bitpattern());
        debug_assert_eq!(self.dict.encoded_entries.len(), self.dict.entries.len());

        let key = (self.dict.encoded_entries.len() - 1) as Key;
        let min_gram_size = self.dict.gram_hash.min_gram_size() as usize;
        let max_gram_size = self.dict.gram_hash.max_gram_size() as usize;

        if units.len() < min_gram_size {
            // Too small for the index, reachable by exact lookup only.
            return Ok(());
        }
        if units.len() <= max_gram_size {
            // Take the whole encoded entry as a gram.
            self.add_gram(&units, key)?;
        } else {
            // Every window, the trailing ones shrinking down to the
            // minimum gram size.
            for i in 0..=units.len() - min_gram_size {
                let end = (i + max_gram_size).min(units.len());
                self.add_gram(&units[i..end], key)?;
            }
        }
        Ok(())
    }

    pub fn build_from_path(&mut self, path: &Path) -> Result<(), DictError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut line_count: u64 = 0;
        for line in reader.lines() {
            let line = line?;
            self.process_line(&line)?;
            line_count += 1;
            if self.dict.params.debug && line_count % 10_000 == 0 {
                eprintln!("fuzzydict: lines processed: {}", line_count);
            }
        }
        self.dict.gram_hash.recount_all_nodes();
        Ok(())
    }

    pub fn build_from_lines<I, S>(&mut self, lines: I) -> Result<(), DictError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.process_line(line.as_ref())?;
        }
        self.dict.gram_hash.recount_all_nodes();
        Ok(())
    }
}
