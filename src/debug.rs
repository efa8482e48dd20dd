use std::fmt;

use crate::types::{Dist, DIST_MAX};

///Per-gram details collected while answering a query verbosely.
#[derive(Clone, Debug, Default)]
pub struct GramInfo {
    ///The gram that was looked up
    pub gram: String,

    ///Summed size of the key lists behind the gram
    pub entries: u32,

    ///Best matching entry for this gram, empty if none
    pub best_match: String,

    ///Distance of the best match, [`DIST_MAX`] if none
    pub edit_distance: Dist,
}

///Trace sink for a single query.
///
///Passed as an optional parameter into the verbose query entry point;
///the search strategies fill it while they work. Collecting it costs
///extra lookups, so the plain [`crate::Dictionary::find`] skips it
///entirely.
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    ///The needle as supplied by the caller
    pub query: String,

    ///The needle after encoding
    pub enc_query: String,

    ///The winning entry, empty if none
    pub result: String,

    ///Typo budget used for this query
    pub max_typos: u32,

    ///Distance of the winning entry, [`DIST_MAX`] if none
    pub edit_distance: Dist,

    ///One record per gram that was looked up and found
    pub grams: Vec<GramInfo>,
}

impl DebugInfo {
    pub fn new(query: &str) -> Self {
        DebugInfo {
            query: query.to_string(),
            edit_distance: DIST_MAX,
            ..DebugInfo::default()
        }
    }
}

impl fmt::Display for GramInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "****     gram: {}", self.gram)?;
        writeln!(f, "   valueCount: {}", self.entries)?;
        writeln!(f, "      bestKey: {}", self.best_match)?;
        writeln!(f, " editdistance: {}", self.edit_distance)
    }
}

impl fmt::Display for DebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*********************************************")?;
        writeln!(f, "QUERY:          {}", self.query)?;
        writeln!(f, "encoded query:  {}", self.enc_query)?;
        writeln!(f, "maxTypos:       {}", self.max_typos)?;
        for gram in &self.grams {
            write!(f, "{}", gram)?;
        }
        writeln!(f, "*********************************************")?;
        writeln!(f, "RESULT:         {}", self.result)?;
        writeln!(f, "editdistance:   {}", self.edit_distance)?;
        // in one line for grepping
        writeln!(
            f,
            "@@ QUERY:|{}| - ENCQUERY:|{}| - RESULT:|{}|",
            self.query, self.enc_query, self.result
        )?;
        writeln!(f, "*********************************************")
    }
}
