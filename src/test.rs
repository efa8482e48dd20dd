//! Shared fixtures for tests and benchmarks.

use crate::types::DictionaryParams;
use crate::Dictionary;

pub const TEST_CORPUS: &[&str] = &["Hello World", "Foo Bar", "Louis Armstrong", "Earth"];

pub fn units(text: &str) -> Vec<u16> {
    crate::encode::code_units(text)
}

pub fn test_dictionary() -> Dictionary {
    test_dictionary_with_params(DictionaryParams::default())
}

pub fn test_dictionary_with_params(params: DictionaryParams) -> Dictionary {
    let mut dict = Dictionary::with_params(params);
    dict.build_from_lines(TEST_CORPUS)
        .expect("building the test dictionary");
    dict
}
