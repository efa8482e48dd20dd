extern crate clap;
extern crate rayon;

use std::io::{self, BufRead};
use std::process::exit;

use clap::{App, Arg, ArgMatches, SubCommand};
use rayon::prelude::*;

use fuzzydict::{DebugInfo, Dictionary, DictionaryParams};

fn params_from_matches(matches: &ArgMatches) -> DictionaryParams {
    let mut params = DictionaryParams::default();
    if let Some(gram_size) = matches.value_of("gram-size") {
        params.gram_size = gram_size
            .parse()
            .expect("gram size should be a positive integer");
    }
    if let Some(threads) = matches.value_of("threads") {
        params.search_threads = threads
            .parse()
            .expect("thread count should be a positive integer");
    }
    if matches.is_present("single-thread") {
        params.single_thread = true;
    }
    if matches.is_present("debug") {
        params.debug = true;
    }
    params
}

fn build(matches: &ArgMatches) -> i32 {
    let corpus = matches.value_of("corpus").expect("corpus is required");
    let mut dict = Dictionary::with_params(params_from_matches(matches));

    if !dict.build(corpus) {
        eprintln!("Unable to build an index from {}", corpus);
        return 1;
    }
    eprintln!("Indexed {} entries", dict.len());

    let saved = if matches.is_present("deep") {
        dict.save_deep()
    } else {
        dict.save()
    };
    if !saved {
        eprintln!("Unable to save the index for {}", corpus);
        return 1;
    }
    0
}

fn query(matches: &ArgMatches) -> i32 {
    let index = matches.value_of("index").expect("index is required");
    let mut dict = Dictionary::with_params(params_from_matches(matches));

    let loaded = if matches.is_present("deep") {
        dict.load_deep(index)
    } else {
        dict.load(index)
    };
    if !loaded {
        eprintln!("Unable to load an index under {}", index);
        return 1;
    }

    let needles: Vec<String> = match matches.values_of("needle") {
        Some(needles) => needles.map(|needle| needle.to_string()).collect(),
        None => io::stdin()
            .lock()
            .lines()
            .map(|line| line.expect("reading a needle from standard input"))
            .collect(),
    };

    if matches.is_present("verbose") {
        for needle in needles.iter() {
            let mut debug_info = DebugInfo::new(needle);
            let _ = dict.find_verbose(needle, &mut debug_info);
            print!("{}", debug_info);
        }
    } else {
        // One lookup per needle, fanned out over all cores.
        let results: Vec<(String, Option<String>)> = needles
            .into_par_iter()
            .map(|needle| {
                let result = dict.find(&needle);
                (needle, result)
            })
            .collect();
        for (needle, result) in results {
            println!("{}\t{}", needle, result.unwrap_or_default());
        }
    }
    0
}

fn main() {
    let matches = App::new("fuzzydict")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Walter Planitzer")
        .about("Approximate-match dictionary: finds the closest corpus entry for a needle that may contain typos")
        .subcommand(
            SubCommand::with_name("build")
                .about("Builds an index from a corpus file (one entry per line) and saves it next to the corpus")
                .arg(
                    Arg::with_name("corpus")
                        .help("UTF-8 corpus file, one dictionary entry per line")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("gram-size")
                        .long("gram-size")
                        .takes_value(true)
                        .help("Gram length the index is built from (default: 4)"),
                )
                .arg(
                    Arg::with_name("deep")
                        .long("deep")
                        .help("Write the eager single-file index instead of the lazy one"),
                )
                .arg(
                    Arg::with_name("debug")
                        .long("debug")
                        .short("d")
                        .help("Print diagnostics to stderr"),
                ),
        )
        .subcommand(
            SubCommand::with_name("query")
                .about("Queries an index; needles come from the command line or stdin, one per line")
                .arg(
                    Arg::with_name("index")
                        .help("Basename the index was saved under")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("needle")
                        .help("Needles to look up (stdin is read when absent)")
                        .multiple(true)
                        .index(2),
                )
                .arg(
                    Arg::with_name("deep")
                        .long("deep")
                        .help("Load the eager single-file index instead of the lazy one"),
                )
                .arg(
                    Arg::with_name("verbose")
                        .long("verbose")
                        .short("v")
                        .help("Print a per-gram trace for every needle"),
                )
                .arg(
                    Arg::with_name("single-thread")
                        .long("single-thread")
                        .help("Answer each query on a single thread"),
                )
                .arg(
                    Arg::with_name("threads")
                        .long("threads")
                        .takes_value(true)
                        .help("Worker threads per query (default: 3)"),
                )
                .arg(
                    Arg::with_name("debug")
                        .long("debug")
                        .short("d")
                        .help("Print diagnostics to stderr"),
                ),
        )
        .get_matches();

    let status = match matches.subcommand() {
        ("build", Some(submatches)) => build(submatches),
        ("query", Some(submatches)) => query(submatches),
        _ => {
            eprintln!("No command given, try --help");
            1
        }
    };
    exit(status);
}
