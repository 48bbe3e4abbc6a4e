use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};

use ukkonen_suffix_tree::SuffixTree;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Query {
    /// String depth of the deepest internal node
    Depth,
    /// Distinct substrings, sentinel included, plus the empty string
    Count,
    /// Distinct substrings that do not contain the sentinel, plus the empty string
    TextCount,
    /// Longest substring occurring at least twice
    Longest,
}

/// Build a suffix tree over one line of text and answer a single query.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to index (first line of stdin when omitted)
    text: Option<String>,

    #[arg(long, value_enum, default_value_t = Query::Depth)]
    query: Query,

    /// Terminal symbol appended to the text; must not occur in it
    #[arg(long, default_value_t = '$')]
    sentinel: char,

    /// Print the tree before the answer
    #[arg(long)]
    dump: bool,

    /// Verbose/info output
    #[arg(long, short = 'v')]
    verbose: bool,

    #[arg(long)]
    debug: bool,

    #[arg(long)]
    trace: bool,
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Error reading input")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.trace {
        LevelFilter::Trace
    } else if args.debug {
        LevelFilter::Debug
    } else if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let text = match args.text {
        Some(text) => text,
        None => read_line()?,
    };
    debug!("indexing {} symbols", text.chars().count() + 1);
    let tree = SuffixTree::with_sentinel(&text, args.sentinel)
        .with_context(|| format!("cannot build suffix tree for {text:?}"))?;

    if args.dump {
        tree.pretty_print();
    }
    match args.query {
        Query::Depth => println!("{}", tree.deepest_internal_node_depth()),
        Query::Count => println!("{}", tree.count_distinct_substrings()),
        Query::TextCount => println!("{}", tree.count_distinct_text_substrings()),
        Query::Longest => {
            let longest: String = tree
                .longest_repeated_substring()
                .iter()
                .filter_map(|&ch| u32::try_from(ch).ok().and_then(char::from_u32))
                .collect();
            println!("{longest}");
        }
    }
    Ok(())
}
