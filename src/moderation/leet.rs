// Leetspeak expansion — generating look-alike variants of banned roots.
//
// Each base letter maps to itself plus the homoglyphs, digits and symbols
// people substitute to slip past filters ("sh1t", "f*ck" style). Expansion
// is a cartesian product over substitutable positions, which is exponential
// in theory but bounded in practice: roots are short (≤10 chars) and
// classes small (≤6).

use std::collections::BTreeSet;

/// Look-alike classes. Letters without an entry are never substituted.
/// Includes Cyrillic/Greek homoglyphs alongside the classic digit swaps.
const LOOK_ALIKE_CLASSES: &[(char, &[char])] = &[
    ('a', &['a', '@', '4', 'α', 'д', 'а']),
    ('e', &['e', '3', 'є', 'е', 'ё']),
    ('i', &['i', '1', '!', 'í', 'і', 'ї']),
    ('o', &['o', '0', 'о', 'θ', 'ө']),
    ('s', &['s', '5', '$', 'ѕ', 'с']),
    ('t', &['t', '7', '+', 'т']),
    ('u', &['u', 'υ', 'ц', 'μ']),
    ('x', &['x', '×', 'х']),
    ('y', &['y', 'ү', 'у', 'γ']),
];

fn substitutions_for(c: char) -> Option<&'static [char]> {
    LOOK_ALIKE_CLASSES
        .iter()
        .find(|(base, _)| *base == c)
        .map(|(_, subs)| *subs)
}

/// Expand a lowercase root word into every string reachable by replacing
/// each character with a member of its look-alike class.
///
/// The output always contains the root itself, is deduplicated, and is
/// sorted (BTreeSet) so lexicon construction is deterministic.
pub fn expand_variants(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut variants: BTreeSet<Vec<char>> = BTreeSet::new();
    variants.insert(chars.clone());

    for (i, c) in chars.iter().enumerate() {
        let Some(subs) = substitutions_for(*c) else {
            continue;
        };
        let existing: Vec<Vec<char>> = variants.iter().cloned().collect();
        for variant in existing {
            for &sub in subs {
                let mut next = variant.clone();
                next[i] = sub;
                variants.insert(next);
            }
        }
    }

    variants.into_iter().map(String::from_iter).collect()
}
