extern crate tempfile;

use std::io::Write;

use fuzzydict::test::*;
use fuzzydict::*;

///Every string over {a, b} up to the given length, the empty string
///included. Small enough to enumerate exhaustively, rich enough to
///exercise every branch of the distance kernels.
fn ab_strings(max_len: usize) -> Vec<String> {
    let mut rv = vec![String::new()];
    let mut last = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for s in &last {
            for c in ['a', 'b'] {
                let mut t = s.clone();
                t.push(c);
                next.push(t);
            }
        }
        rv.extend(next.iter().cloned());
        last = next;
    }
    rv
}

#[test]
fn test0001_encode() {
    let dict = Dictionary::new();
    assert_eq!(dict.encode("Louis Armstrong"), "louis armstrong");
    assert_eq!(dict.encode("Hello, World!"), "hello world");
    assert_eq!(dict.encode("B.B. King"), "bb king");
    assert_eq!(dict.encode("route 66"), "route 66");
    assert_eq!(dict.encode("!?%&"), "");
    assert_eq!(dict.encode(""), "");
}

#[test]
fn test0002_encode_idempotent() {
    let inputs = [
        "Louis Armstrong",
        "Hello, World!",
        "Café Ñandú 42",
        "  spaces  stay  ",
        "ALLCAPS",
        "!?%&",
    ];
    for input in inputs {
        let once = encode(input);
        assert_eq!(encode(&once), once, "encode must be idempotent for {:?}", input);
    }
}

#[test]
fn test0101_bitpattern_basic() {
    assert_eq!("a".bitpattern(), 1);
    assert_eq!("b".bitpattern(), 2);
    assert_eq!("ab".bitpattern(), 3);
    assert_eq!("ba".bitpattern(), 3);
    assert_eq!("aaaa".bitpattern(), 1);
    assert_eq!(" ".bitpattern(), 1 << 26);
    assert_eq!("0".bitpattern(), 1 << 27);
    assert_eq!("9".bitpattern(), 1 << 36);
    // Outside the encoded alphabet nothing contributes.
    assert_eq!("???".bitpattern(), 0);
}

#[test]
fn test0102_min_bit_distance() {
    let beatles = "beatles".bitpattern();
    let bextles = "bextles".bitpattern();
    assert_eq!(min_bit_distance(beatles, bextles), 1);
    assert_eq!(min_bit_distance(beatles, beatles), 0);
}

#[test]
fn test0103_bit_distance_is_lower_bound() {
    let strings = ab_strings(4);
    for a in &strings {
        for b in &strings {
            let bound = min_bit_distance(a.bitpattern(), b.bitpattern());
            let dist = edit_distance(&units(a), &units(b), MatchType::ExactMatch);
            assert!(
                bound <= dist,
                "bit bound {} exceeds edit distance {} for {:?} / {:?}",
                bound,
                dist,
                a,
                b
            );
        }
    }
    // Also with the full alphabet in play.
    let pairs = [("beatles", "bextles"), ("hello world", "hell word"), ("abc", "xyz")];
    for (a, b) in pairs {
        let bound = min_bit_distance(a.bitpattern(), b.bitpattern());
        let dist = edit_distance(&units(a), &units(b), MatchType::ExactMatch);
        assert!(bound <= dist);
    }
}

#[test]
fn test0201_edit_distance_exact() {
    let cases = [
        ("", "", 0),
        ("a", "", 1),
        ("", "abc", 3),
        ("kitten", "sitting", 3),
        ("flaw", "lawn", 2),
        ("abcde", "abcde", 0),
        ("abcde", "abcxe", 1),
        ("abcde", "abxye", 2),
    ];
    for (a, b, expected) in cases {
        assert_eq!(
            edit_distance(&units(a), &units(b), MatchType::ExactMatch),
            expected,
            "distance of {:?} / {:?}",
            a,
            b
        );
    }
}

#[test]
fn test0202_edit_distance_substring() {
    // The pattern may be surrounded by arbitrary text.
    assert_eq!(
        edit_distance(&units("bach"), &units("refbauchcfrte"), MatchType::SubstringMatch),
        1
    );
    assert_eq!(
        edit_distance(&units("CTGGGA"), &units("GAAGCTAGGATCGA"), MatchType::SubstringMatch),
        1
    );
    assert_eq!(
        edit_distance(&units("foo"), &units("a foo bar"), MatchType::SubstringMatch),
        0
    );
    assert_eq!(
        edit_distance(&units(""), &units("anything"), MatchType::SubstringMatch),
        0
    );
}

#[test]
fn test0203_bounded_matches_plain_within_budget() {
    let strings = ab_strings(4);
    for a in &strings {
        for b in &strings {
            for budget in 0..=3u32 {
                for mode in [MatchType::ExactMatch, MatchType::SubstringMatch] {
                    let plain = edit_distance(&units(a), &units(b), mode);
                    let bounded = bounded_edit_distance(&units(a), &units(b), budget, mode);
                    if bounded <= budget {
                        assert_eq!(
                            bounded, plain,
                            "bounded result must be exact within budget ({:?}/{:?}, T={}, {:?})",
                            a, b, budget, mode
                        );
                    } else {
                        assert!(
                            plain > budget,
                            "bounded rejected a reachable distance ({:?}/{:?}, T={}, {:?})",
                            a, b, budget, mode
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test0204_substring_never_exceeds_exact() {
    let strings = ab_strings(4);
    for a in &strings {
        for b in &strings {
            let substring = edit_distance(&units(a), &units(b), MatchType::SubstringMatch);
            let exact = edit_distance(&units(a), &units(b), MatchType::ExactMatch);
            assert!(substring <= exact, "substring > exact for {:?} / {:?}", a, b);
        }
    }
}

#[test]
fn test0205_bounded_known_values() {
    assert!(bounded_edit_distance(&units("TAAAAAC"), &units("GTCCCGTAAGAGA"), 2, MatchType::SubstringMatch) > 2);
    assert_eq!(
        bounded_edit_distance(&units("bach"), &units("refbauchcfrte"), 4, MatchType::SubstringMatch),
        1
    );
    assert_eq!(
        bounded_edit_distance(&units("kitten"), &units("sitting"), 3, MatchType::ExactMatch),
        3
    );
    assert!(bounded_edit_distance(&units("kitten"), &units("sitting"), 2, MatchType::ExactMatch) > 2);
    // Length difference alone already busts the budget.
    assert!(bounded_edit_distance(&units("ab"), &units("abcdefgh"), 3, MatchType::ExactMatch) > 3);
}

#[test]
fn test0301_key_dist_tuple_ordering() {
    let invalid = KeyDistTuple::invalid();
    assert!(!invalid.key_is_valid());
    assert!(!invalid.dist_is_valid());

    let near = KeyDistTuple::new(7, 1);
    let far = KeyDistTuple::new(3, 4);
    assert!(near < far);
    assert!(far < invalid);
    // Ordering and equality go by distance alone.
    assert_eq!(KeyDistTuple::new(1, 2), KeyDistTuple::new(9, 2));
}

#[test]
fn test0401_gram_hash_suffix_sharing() {
    let mut hash = GramHash::new(4, 2);
    hash.insert(&units("foob"), 11).unwrap();
    hash.recount_all_nodes();

    // The gram and every prefix down to the minimum size resolve.
    assert!(hash.contains("foob"));
    assert!(hash.contains("foo"));
    assert!(hash.contains("fo"));
    assert!(!hash.contains("f"));
    assert!(!hash.contains("oob"));

    // The prefixes share the owning list, no copies anywhere.
    let owner = &hash.node("foob").unwrap().lists()[0];
    for gram in ["foo", "fo"] {
        let lists = hash.node(gram).unwrap().lists();
        assert_eq!(lists.len(), 1);
        assert!(std::sync::Arc::ptr_eq(owner, &lists[0]));
    }
}

#[test]
fn test0402_gram_hash_shared_prefix_references_both_lists() {
    let mut hash = GramHash::new(4, 2);
    hash.insert(&units("foob"), 7).unwrap();
    hash.insert(&units("fooc"), 8).unwrap();
    hash.recount_all_nodes();

    assert_eq!(hash.node("foob").unwrap().lists().len(), 1);
    assert_eq!(hash.node("fooc").unwrap().lists().len(), 1);
    assert_eq!(hash.node("foo").unwrap().lists().len(), 2);
    assert_eq!(hash.node("fo").unwrap().lists().len(), 2);
    assert_eq!(hash.node("foo").unwrap().value_count(), 2);
    assert_eq!(hash.distinctive_count(), 2);
}

#[test]
fn test0403_gram_hash_appends_to_owning_list() {
    let mut hash = GramHash::new(4, 2);
    hash.insert(&units("foob"), 1).unwrap();
    hash.insert(&units("foob"), 2).unwrap();
    hash.insert(&units("foob"), 3).unwrap();
    hash.recount_all_nodes();

    let node = hash.node("foob").unwrap();
    assert_eq!(node.lists().len(), 1);
    assert_eq!(node.lists()[0].size(), 3);
    assert_eq!(node.value_count(), 3);
    assert_eq!(hash.node("fo").unwrap().value_count(), 3);
}

#[test]
fn test0404_value_count_consistency_after_recount() {
    let dict = test_dictionary();
    for (gram, node) in dict.gram_hash().iter() {
        let summed: u32 = node.lists().iter().map(|list| list.size()).sum();
        assert_eq!(
            node.value_count(),
            summed,
            "stale value count at gram {:?}",
            gram
        );
    }
}

#[test]
fn test0501_find_with_one_typo() {
    let dict = test_dictionary();
    assert_eq!(dict.find("Lois Armstrong"), Some("Louis Armstrong".to_string()));
}

#[test]
fn test0502_find_exact_after_encoding() {
    let dict = test_dictionary();
    assert_eq!(dict.find("hello world"), Some("Hello World".to_string()));
    assert_eq!(dict.find("Hello World"), Some("Hello World".to_string()));
}

#[test]
fn test0503_find_no_match() {
    let dict = test_dictionary();
    assert_eq!(dict.find("zzzzzz"), None);
    assert_eq!(dict.find(""), None);
    assert_eq!(dict.find("!?%&"), None);
}

#[test]
fn test0504_find_short_needle_has_no_budget() {
    let dict = test_dictionary();
    // "ooo" is granted no typo at all under the default one error per
    // four characters, so nothing matches.
    assert_eq!(dict.calc_max_typos("ooo"), 0);
    assert_eq!(dict.find("ooo"), None);
}

#[test]
fn test0505_find_respects_budget_boundary() {
    let mut dict = Dictionary::new();
    dict.build_from_lines(["abcde"]).unwrap();

    assert_eq!(dict.calc_max_typos("abcXe"), 1);
    assert_eq!(dict.find("abcXe"), Some("abcde".to_string()));
    // Two substitutions against a budget of one.
    assert_eq!(dict.find("abXYe"), None);
}

#[test]
fn test0506_calc_max_typos() {
    let dict = test_dictionary();
    assert_eq!(dict.calc_max_typos(""), 0);
    assert_eq!(dict.calc_max_typos("abc"), 0);
    assert_eq!(dict.calc_max_typos("abcd"), 1);
    assert_eq!(dict.calc_max_typos("abcdefgh"), 2);
    // Capped at the gram size however long the needle gets.
    assert_eq!(dict.calc_max_typos(&"a".repeat(100)), 4);
    // Encoding happens first, punctuation does not buy typos.
    assert_eq!(dict.calc_max_typos("a-b-c-d-!!!"), 1);
}

#[test]
fn test0507_duplicate_lines_are_deduplicated() {
    let mut dict = Dictionary::new();
    dict.build_from_lines(["Hello World", "Hello World!", "hello world", "Earth"])
        .unwrap();
    // All three variants encode identically, the first one wins.
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.find("hello world"), Some("Hello World".to_string()));
}

#[test]
fn test0508_blank_lines_are_skipped() {
    let mut dict = Dictionary::new();
    dict.build_from_lines(["", "   ", "!?!?", "Earth"]).unwrap();
    assert_eq!(dict.len(), 2); // "   " encodes to spaces, "Earth" stays
    assert_eq!(dict.find("earth"), Some("Earth".to_string()));
}

#[test]
fn test0509_find_verbose_fills_trace() {
    let dict = test_dictionary_with_params(DictionaryParams::default().with_single_thread());
    let mut debug_info = DebugInfo::new("Lois Armstrong");
    let result = dict.find_verbose("Lois Armstrong", &mut debug_info);

    assert_eq!(result, Some("Louis Armstrong".to_string()));
    assert_eq!(debug_info.enc_query, "lois armstrong");
    assert_eq!(debug_info.result, "Louis Armstrong");
    assert_eq!(debug_info.edit_distance, 1);
    assert!(debug_info.max_typos >= 1);
    assert!(!debug_info.grams.is_empty());
    let printed = format!("{}", debug_info);
    assert!(printed.contains("ENCQUERY:|lois armstrong|"));
}

#[test]
fn test0510_threaded_and_simple_agree() {
    let corpus = [
        "Hello World",
        "Foo Bar",
        "Louis Armstrong",
        "Earth",
        "Ludwig van Beethoven",
        "Wolfgang Amadeus Mozart",
        "Johann Sebastian Bach",
        "Miles Davis",
        "Ella Fitzgerald",
    ];
    let mut threaded = Dictionary::new();
    threaded.build_from_lines(corpus).unwrap();
    let mut simple = Dictionary::with_params(DictionaryParams::default().with_single_thread());
    simple.build_from_lines(corpus).unwrap();

    let queries = [
        "Lois Armstrong",
        "Johann Sebastien Bach",
        "Ludwig von Beethoven",
        "Miles Davies",
        "ella fizgerald",
        "hello world",
        "zzzzzz",
        "Wolfgang Amadeus Mozart",
        "earht",
    ];
    for query in queries {
        let mut threaded_info = DebugInfo::new(query);
        let mut simple_info = DebugInfo::new(query);
        let _ = threaded.find_verbose(query, &mut threaded_info);
        let _ = simple.find_verbose(query, &mut simple_info);
        // Entry indices may differ on ties, the distances must not.
        assert_eq!(
            threaded_info.edit_distance, simple_info.edit_distance,
            "strategies disagree on {:?}",
            query
        );
    }
}

#[test]
fn test0511_pigeonhole_recall() {
    let corpus = [
        "Hello World",
        "Louis Armstrong",
        "Wolfgang Amadeus Mozart",
        "Johann Sebastian Bach",
        "Ella Fitzgerald",
    ];
    let mut dict = Dictionary::new();
    dict.build_from_lines(corpus).unwrap();

    for entry in corpus {
        let encoded = encode(entry);
        // Substitute every fifth character, staying within the budget
        // the mutated needle will be granted.
        let budget = dict.calc_max_typos(&encoded) as usize;
        let mut mutated: Vec<char> = encoded.chars().collect();
        let mut typos = 0;
        for i in (0..mutated.len()).step_by(5) {
            if typos == budget {
                break;
            }
            if mutated[i] != 'q' && mutated[i] != ' ' {
                mutated[i] = 'q';
                typos += 1;
            }
        }
        let needle: String = mutated.into_iter().collect();
        assert!(typos <= dict.calc_max_typos(&needle) as usize);
        assert_eq!(
            dict.find(&needle),
            Some(entry.to_string()),
            "no recall for {:?} mutated to {:?}",
            entry,
            needle
        );
    }
}

#[test]
fn test0601_string_array() {
    let mut array = StringArray::new();
    array.append("Hello World").unwrap();
    array.append("").unwrap();
    array.append("Früh").unwrap();

    assert_eq!(array.len(), 3);
    assert_eq!(array.size_of(0), 11);
    assert_eq!(array.size_of(1), 0);
    assert_eq!(array.to_string(0), "Hello World");
    assert_eq!(array.to_string(2), "Früh");
    assert!(array.is_equal("Hello World", 0));
    assert!(!array.is_equal("Hello", 0));
    assert!(!array.is_equal("Hello World!", 0));
    assert!(array.is_equal("", 1));

    array.clear();
    assert!(array.is_empty());
}

#[test]
fn test0602_string_array_round_trip() {
    let mut array = StringArray::new();
    for text in ["one", "", "two words", "ärger", "42"] {
        array.append(text).unwrap();
    }
    let mut buffer = Vec::new();
    array.save(&mut buffer).unwrap();
    let loaded = StringArray::load(&mut buffer.as_slice()).unwrap();
    assert_eq!(loaded.len(), array.len());
    for i in 0..array.len() {
        assert_eq!(loaded.to_string(i), array.to_string(i));
    }
}

fn write_corpus(dir: &std::path::Path, entries: &[&str]) -> std::path::PathBuf {
    let corpus_path = dir.join("corpus.txt");
    let mut corpus_file = std::fs::File::create(&corpus_path).unwrap();
    for entry in entries {
        writeln!(corpus_file, "{}", entry).unwrap();
    }
    corpus_path
}

#[test]
fn test0701_shallow_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = write_corpus(dir.path(), TEST_CORPUS);

    // Built in memory there is no basename to save under.
    let unsaved = test_dictionary();
    assert!(!unsaved.save(), "saving without a basename must fail");

    let mut dict = Dictionary::new();
    assert!(dict.build(&corpus_path));
    assert!(dict.save());

    let mut loaded = Dictionary::new();
    assert!(loaded.load(&corpus_path));
    assert_eq!(loaded.len(), dict.len());

    for query in ["Lois Armstrong", "hello world", "zzzzzz", "Foo Bar", "earth"] {
        assert_eq!(loaded.find(query), dict.find(query), "diverges on {:?}", query);
    }
}

#[test]
fn test0702_shallow_load_is_lazy() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = write_corpus(dir.path(), TEST_CORPUS);

    let mut dict = Dictionary::new();
    assert!(dict.build(&corpus_path));
    assert!(dict.save());

    let mut loaded = Dictionary::new();
    assert!(loaded.load(&corpus_path));

    // Nothing is loaded before the first query touches a list.
    assert!(loaded
        .gram_hash()
        .iter()
        .all(|(_, node)| node.lists().iter().all(|list| !list.is_loaded())));
    // Sizes still answer from the shallow headers.
    assert!(loaded.gram_hash().iter().all(|(_, node)| node.value_count() > 0));

    assert_eq!(loaded.find("Lois Armstrong"), Some("Louis Armstrong".to_string()));
    assert!(loaded
        .gram_hash()
        .iter()
        .any(|(_, node)| node.lists().iter().any(|list| list.is_loaded())));
}

#[test]
fn test0703_deep_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = write_corpus(dir.path(), TEST_CORPUS);

    let mut dict = Dictionary::new();
    assert!(dict.build(&corpus_path));
    assert!(dict.save_deep());

    let mut loaded = Dictionary::new();
    assert!(loaded.load_deep(&corpus_path));
    assert_eq!(loaded.len(), dict.len());
    for query in ["Lois Armstrong", "hello world", "zzzzzz", "Foo Bar"] {
        assert_eq!(loaded.find(query), dict.find(query), "diverges on {:?}", query);
    }
}

#[test]
fn test0704_load_deep_rejects_bad_magic() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("broken");
    std::fs::write(dir.path().join("broken.fulldb"), b"not an index at all").unwrap();

    let mut dict = Dictionary::new();
    assert!(!dict.load_deep(&base));
    assert!(dict.is_empty());
}

#[test]
fn test0705_load_falls_back_to_corpus_build() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = write_corpus(dir.path(), TEST_CORPUS);

    // No index files exist, load() must rebuild from the corpus text.
    let mut dict = Dictionary::new();
    assert!(dict.load(&corpus_path));
    assert_eq!(dict.len(), TEST_CORPUS.len());
    assert_eq!(dict.find("Lois Armstrong"), Some("Louis Armstrong".to_string()));
}

#[test]
fn test0706_every_entry_finds_itself_after_reload() {
    let firsts = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        "juliett",
    ];
    let seconds = [
        "red", "orange", "yellow", "green", "blue", "indigo", "violet", "umber", "ochre", "teal",
    ];
    let mut corpus = Vec::new();
    for first in firsts {
        for second in seconds {
            corpus.push(format!("{} {}", first, second));
        }
    }
    assert_eq!(corpus.len(), 100);

    let dir = tempfile::tempdir().unwrap();
    let refs: Vec<&str> = corpus.iter().map(|entry| entry.as_str()).collect();
    let corpus_path = write_corpus(dir.path(), &refs);

    let mut dict = Dictionary::new();
    assert!(dict.build(&corpus_path));
    assert!(dict.save());

    let mut loaded = Dictionary::new();
    assert!(loaded.load(&corpus_path));
    assert_eq!(loaded.len(), 100);
    for entry in &corpus {
        assert_eq!(
            loaded.find(entry).as_deref(),
            Some(entry.as_str()),
            "entry {:?} does not find itself",
            entry
        );
    }
}

#[test]
fn test0206_bounded_equals_plain_for_word_pairs() {
    let words = [
        "louis armstrong",
        "luis armstrong",
        "lois armstrong",
        "wolfgang",
        "wolfgang amadeus",
        "hello world",
        "helo wrld",
    ];
    for a in words {
        for b in words {
            let plain = edit_distance(&units(a), &units(b), MatchType::ExactMatch);
            let bounded = bounded_edit_distance(&units(a), &units(b), 4, MatchType::ExactMatch);
            if plain <= 4 {
                assert_eq!(bounded, plain, "{:?} / {:?}", a, b);
            } else {
                assert!(bounded > 4, "{:?} / {:?}", a, b);
            }
        }
    }
}

#[test]
fn test0405_value_count_consistent_after_reload_and_query() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = write_corpus(dir.path(), TEST_CORPUS);

    let mut dict = Dictionary::new();
    assert!(dict.build(&corpus_path));
    assert!(dict.save());

    let mut loaded = Dictionary::new();
    assert!(loaded.load(&corpus_path));
    // Trigger a few lazy loads, counts must not drift.
    let _ = loaded.find("Lois Armstrong");
    let _ = loaded.find("foo bar");
    for (gram, node) in loaded.gram_hash().iter() {
        let summed: u32 = node.lists().iter().map(|list| list.size()).sum();
        assert_eq!(node.value_count(), summed, "count drifted at gram {:?}", gram);
    }
}

#[test]
fn test0410_search_info_filter_pipeline() {
    let mut wordlist = StringArray::new();
    let mut signatures = Vec::new();
    for entry in ["hello", "hellooooooo", "stuvw"] {
        wordlist.append(entry).unwrap();
        signatures.push(entry.bitpattern());
    }

    let needle = units("helo");
    let info = SearchInfo::new(&needle, "helo".bitpattern(), &wordlist, &signatures, 1, false);

    // Within budget: one deletion.
    assert_eq!(info.calc_distance(0), 1);
    // Length filter: seven units longer than the needle.
    assert_eq!(info.calc_distance(1), DIST_MAX);
    // Bit filter: disjoint character sets.
    assert_eq!(info.calc_distance(2), DIST_MAX);
}

#[test]
fn test0411_key_list_find_returns_best() {
    let mut wordlist = StringArray::new();
    let mut signatures = Vec::new();
    for entry in ["hello world", "hello word", "hello wordl"] {
        wordlist.append(entry).unwrap();
        signatures.push(entry.bitpattern());
    }

    let list = KeyList::new(1);
    list.append(0);
    list.append(1);
    list.append(2);
    assert!(list.is_loaded());
    assert_eq!(list.size(), 3);

    let needle = units("hello world");
    let info = SearchInfo::new(
        &needle,
        "hello world".bitpattern(),
        &wordlist,
        &signatures,
        2,
        false,
    );
    let best = list.find(&info);
    assert_eq!(best.key(), 0);
    assert_eq!(best.distance(), 0);
}

#[test]
fn test0512_exact_hit_in_large_corpus() {
    let mut corpus = Vec::new();
    for i in 0..26 {
        for j in 0..26 {
            let first = (b'a' + i) as char;
            let second = (b'a' + j) as char;
            corpus.push(format!("word {}{} entry", first, second));
        }
    }
    let mut dict = Dictionary::new();
    dict.build_from_lines(&corpus).unwrap();
    assert_eq!(dict.len(), 676);

    // A perfect hit must come back from every strategy run, the
    // early-exit cancellation may skip grams but never the result.
    for needle in ["word aa entry", "word mz entry", "word zz entry"] {
        assert_eq!(dict.find(needle), Some(needle.to_string()));
    }
    assert_eq!(dict.find("word mz entryy"), Some("word mz entry".to_string()));
}

#[test]
fn test0707_index_files_start_with_magic_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = write_corpus(dir.path(), TEST_CORPUS);

    let mut dict = Dictionary::new();
    assert!(dict.build(&corpus_path));
    assert!(dict.save());
    assert!(dict.save_deep());

    let mut idb = corpus_path.clone().into_os_string();
    idb.push(".idb");
    let bytes = std::fs::read(&idb).unwrap();
    assert_eq!(&bytes[..4], &[0xfe, 0xef, 0x00, 0x01]);

    let mut kdb = corpus_path.clone().into_os_string();
    kdb.push(".kdb");
    assert!(std::fs::metadata(&kdb).unwrap().len() > 0);

    let mut fulldb = corpus_path.clone().into_os_string();
    fulldb.push(".fulldb");
    let bytes = std::fs::read(&fulldb).unwrap();
    assert_eq!(&bytes[..4], &[0xff, 0xe2, 0x00, 0x01]);
}

#[test]
fn test0801_bktree_find() {
    let wordlist: Vec<String> = ["hello", "help", "hell", "world", "word", "sword"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let mut tree = BkTree::new(&wordlist);
    for key in 0..wordlist.len() {
        tree.insert(key as Key);
    }
    assert_eq!(tree.len(), wordlist.len());

    let (key, dist) = tree.find("hello", 0).unwrap();
    assert_eq!((key, dist), (0, 0));

    let (key, dist) = tree.find("helo", 1).unwrap();
    assert_eq!(dist, 1);
    assert!(["hello", "help", "hell"].contains(&wordlist[key as usize].as_str()));

    assert_eq!(tree.find("xyzzy", 1), None);

    let (key, dist) = tree.find("sord", 1).unwrap();
    assert_eq!(dist, 1);
    assert!(["word", "sword"].contains(&wordlist[key as usize].as_str()));
}

#[test]
fn test0802_bktree_empty() {
    let wordlist: Vec<String> = Vec::new();
    let tree = BkTree::new(&wordlist);
    assert!(tree.is_empty());
    assert_eq!(tree.find("anything", 3), None);
}
