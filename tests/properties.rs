use std::collections::HashSet;

use proptest::prelude::*;
use ukkonen_suffix_tree::SuffixTree;

/// Sequences over a small alphabet, so repeats and deep internal nodes are common,
/// terminated by a sentinel outside the alphabet.
fn terminated_sequence() -> impl Strategy<Value = Vec<u64>> {
    (1u64..5, 0usize..60).prop_flat_map(|(alphabet, len)| {
        prop::collection::vec(0..alphabet, len).prop_map(move |mut s| {
            s.push(alphabet);
            s
        })
    })
}

fn distinct_substrings(s: &[u64]) -> HashSet<&[u64]> {
    let mut seen = HashSet::new();
    for i in 0..s.len() {
        for j in (i + 1)..=s.len() {
            seen.insert(&s[i..j]);
        }
    }
    seen
}

proptest! {
    #[test]
    fn leaves_spell_exactly_the_suffixes(s in terminated_sequence()) {
        let tree = SuffixTree::new(s.clone()).unwrap();
        let mut paths = tree.suffixes();
        paths.sort();
        let mut expected: Vec<Vec<u64>> = (0..s.len()).map(|i| s[i..].to_vec()).collect();
        expected.sort();
        prop_assert_eq!(paths, expected);
    }

    #[test]
    fn count_matches_brute_force(s in terminated_sequence()) {
        let tree = SuffixTree::new(s.clone()).unwrap();
        prop_assert_eq!(tree.count_distinct_substrings(), distinct_substrings(&s).len() + 1);
        prop_assert_eq!(
            tree.count_distinct_text_substrings(),
            distinct_substrings(&s[..s.len() - 1]).len() + 1
        );
    }

    #[test]
    fn deepest_internal_node_is_longest_repeat(s in terminated_sequence()) {
        let tree = SuffixTree::new(s.clone()).unwrap();
        let repeat = tree.longest_repeated_substring();
        prop_assert_eq!(repeat.len(), tree.deepest_internal_node_depth());
        let occurrences = s.windows(repeat.len().max(1)).filter(|w| *w == repeat).count();
        if !repeat.is_empty() {
            prop_assert!(occurrences >= 2);
        }
        // Nothing longer repeats.
        let longer = repeat.len() + 1;
        if longer < s.len() {
            let mut seen = HashSet::new();
            prop_assert!(s.windows(longer).all(|w| seen.insert(w)));
        }
    }

    #[test]
    fn substring_queries_agree_with_slices(s in terminated_sequence(), i in 0usize..60, j in 0usize..60) {
        let tree = SuffixTree::new(s.clone()).unwrap();
        let (i, j) = (i.min(s.len()), j.min(s.len()));
        let (start, end) = (i.min(j), i.max(j));
        prop_assert!(tree.is_substr(&s[start..end]));
        prop_assert!(tree.is_suffix(&s[start..]));
        let body = &s[..s.len() - 1];
        prop_assert!(tree.is_suffix(&body[start.min(body.len())..]));
    }

    #[test]
    fn construction_work_is_linear(s in terminated_sequence()) {
        let tree = SuffixTree::new(s.clone()).unwrap();
        let stats = tree.stats();
        prop_assert_eq!(stats.phases, s.len());
        prop_assert_eq!(stats.leaves, s.len());
        prop_assert!(stats.extensions <= 2 * s.len());
        prop_assert!(tree.node_count() <= 2 * s.len());
    }

    #[test]
    fn construction_is_repeatable(s in terminated_sequence()) {
        let first = SuffixTree::new(s.clone()).unwrap();
        let second = SuffixTree::new(s).unwrap();
        prop_assert_eq!(first.render(), second.render());
    }
}
