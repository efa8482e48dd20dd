///Normalize a string for indexing and searching.
///
///Keeps letters, digits and spaces, lowercases the letters and drops
///every other scalar.
///
///Example: "Louis Armstrong!" --> "louis armstrong"
pub fn encode(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

///The UTF-16 code units of a string, the unit the whole index is
///measured in (gram offsets, entry lengths, edit distance columns).
pub fn code_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/*

  00000000011111111112222222222333333333
  12345678901234567890123456789012345678
  abcdefghijklmnopqrstuvwxyz 0123456789

*/
fn char_bit(c: char) -> u64 {
    match c {
        'a'..='z' => 1 << (c as u32 - 'a' as u32),
        ' ' => 1 << 26,
        '0'..='9' => 1 << (27 + c as u32 - '0' as u32),
        _ => 0,
    }
}

///Trait for objects that can be folded into a 64-bit character-set
///signature (string-like)
pub trait BitPattern {
    fn bitpattern(&self) -> u64;
}

impl BitPattern for str {
    ///Fold the string into a mask where each set bit flags the presence
    ///of one character of the encoded alphabet. Characters outside the
    ///alphabet contribute nothing.
    fn bitpattern(&self) -> u64 {
        self.chars().fold(0u64, |acc, c| acc | char_bit(c))
    }
}

///A guaranteed lower bound of the edit distance between the two strings
///the signatures were taken from.
///
///A single edit operation changes the symmetric difference of the two
///character sets by at most two positions, so half the popcount of the
///XOR can never overshoot the true distance. The bound is cheap and is
///evaluated before the edit distance proper.
///
///Example:
///
///```text
///                abcdefghijklmnopqrstuvwxyz
///    "beatles"   11001000000100010011000000
///    "bextles"   01001000000100010011000100
///        XOR     10000000000000000000000100  -> popcount 2 -> bound 1
///```
pub fn min_bit_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones() / 2
}

///Signatures of all dictionary entries, parallel to the string store
pub type BitpatternList = Vec<u64>;
