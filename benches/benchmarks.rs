use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fuzzydict::test::*;
use fuzzydict::*;

fn large_corpus() -> Vec<String> {
    let firsts = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        "juliett",
    ];
    let seconds = [
        "red", "orange", "yellow", "green", "blue", "indigo", "violet", "umber", "ochre", "teal",
    ];
    let thirds = ["falcon", "heron", "ibis", "kite", "lark", "owl", "raven", "swift", "tern", "wren"];
    let mut corpus = Vec::new();
    for first in firsts {
        for second in seconds {
            for third in thirds {
                corpus.push(format!("{} {} {}", first, second, third));
            }
        }
    }
    corpus
}

pub fn benchmarks(c: &mut Criterion) {
    let inputs: &[&str] = &[
        "a",
        "rat",
        "houses",
        "benchmarking",
        "the lazy dog jumped over the quick brown fox",
    ];

    let mut group = c.benchmark_group("encode_benchmark");
    for input in inputs {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("encode", format!("input {} chars", input.chars().count())),
            &input,
            |b, input| b.iter(|| encode(black_box(input))),
        );
        group.bench_with_input(
            BenchmarkId::new("bitpattern", format!("input {} chars", input.chars().count())),
            &input,
            |b, input| b.iter(|| black_box(input).bitpattern()),
        );
    }
    group.finish();

    let mut group = c.benchmark_group("edit_distance");
    let pattern = units("louis armstrong");
    let close = units("luis armstrang");
    let far = units("wolfgang amadeus mozart");
    for (name, text) in [("close", &close), ("far", &far)] {
        group.bench_with_input(BenchmarkId::new("plain_exact", name), text, |b, text| {
            b.iter(|| edit_distance(black_box(&pattern), black_box(text), MatchType::ExactMatch))
        });
        group.bench_with_input(BenchmarkId::new("bounded_exact", name), text, |b, text| {
            b.iter(|| {
                bounded_edit_distance(
                    black_box(&pattern),
                    black_box(text),
                    4,
                    MatchType::ExactMatch,
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("bounded_substring", name), text, |b, text| {
            b.iter(|| {
                bounded_edit_distance(
                    black_box(&pattern),
                    black_box(text),
                    4,
                    MatchType::SubstringMatch,
                )
            })
        });
    }
    group.finish();

    let corpus = large_corpus();
    let mut threaded = Dictionary::new();
    threaded.build_from_lines(&corpus).expect("building benchmark dictionary");
    let mut simple = Dictionary::with_params(DictionaryParams::default().with_single_thread());
    simple.build_from_lines(&corpus).expect("building benchmark dictionary");

    let queries: &[(&str, &str)] = &[
        ("exact", "alpha red falcon"),
        ("one_typo", "alpha red falcom"),
        ("two_typos", "alpa red falcom"),
        ("miss", "zzz zzz zzz"),
    ];

    let mut group = c.benchmark_group("dictionary_find");
    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::new("threaded", name), query, |b, query| {
            b.iter(|| threaded.find(black_box(query)))
        });
        group.bench_with_input(BenchmarkId::new("simple", name), query, |b, query| {
            b.iter(|| simple.find(black_box(query)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
