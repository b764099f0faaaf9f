// Banned lexicon — obfuscation-resistant banned-word matching.
//
// The curated root list is expanded through the leetspeak classes once at
// startup into a flat lookup set. Matching is substring containment over
// the lower-cased, whitespace-stripped input, so "s h 1 t" and "sh1t" hit
// the same variant. Word pairs catch phrases whose halves are too common
// to ban individually.

use std::collections::HashSet;

use super::leet::expand_variants;

/// Curated banned roots. Kept lowercase; common misspellings are listed
/// explicitly because the expander only varies characters in place.
const BANNED_ROOTS: &[&str] = &[
    // Profanity
    "fuck", "fuk", "fck", "stfu", "shit", "sh1t", "shyt", "ass", "arse", "bitch", "b1tch",
    "bytch", "dick", "d1ck", "dik", "dck", "pussy", "puss", "cock", "cok", "c0ck", "whore",
    "hoe", "slut", "bastard", "cunt",
    // Slurs
    "nigger", "nigga", "negro", "chink", "faggot", "fag", "retard", "tard",
    // Sexual terms
    "anal", "cum", "suck", "sucker", "sucking", "blow", "blowing", "penis", "vagina", "sex",
    "porn",
    // Common run-together combinations
    "suckmy", "suckit", "blowme", "fuckme", "fucku", "fuku",
];

/// Word pairs flagged when both halves appear adjacent, in either order,
/// with a single space or no separator.
const BANNED_PAIRS: &[(&str, &str)] = &[
    ("suck", "dick"),
    ("suck", "cock"),
    ("blow", "job"),
    ("fuck", "you"),
    ("fuck", "off"),
    ("go", "fuck"),
];

/// The expanded banned lexicon. Built once during process initialization
/// and shared read-only across all requests — construct it explicitly and
/// pass it by reference, there is no ambient global.
pub struct Lexicon {
    variants: HashSet<String>,
    pairs: &'static [(&'static str, &'static str)],
}

impl Lexicon {
    /// Expand every root through the leetspeak classes and flatten into
    /// one lookup set.
    pub fn build() -> Self {
        let mut variants = HashSet::new();
        for root in BANNED_ROOTS {
            for variant in expand_variants(root) {
                variants.insert(variant);
            }
        }
        Self {
            variants,
            pairs: BANNED_PAIRS,
        }
    }

    /// Number of expanded variants (startup log line).
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// True if the text contains any banned variant or adjacent banned
    /// pair. Case-insensitive; single-word matches are also insensitive
    /// to whitespace. Never errors.
    pub fn contains_banned(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        let stripped: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();

        if self
            .variants
            .iter()
            .any(|variant| stripped.contains(variant.as_str()))
        {
            return true;
        }

        self.pairs.iter().any(|(first, second)| {
            lowered.contains(&format!("{first} {second}"))
                || lowered.contains(&format!("{second} {first}"))
                || stripped.contains(&format!("{first}{second}"))
                || stripped.contains(&format!("{second}{first}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_expands_all_roots() {
        let lexicon = Lexicon::build();
        assert!(lexicon.variant_count() > BANNED_ROOTS.len());
    }

    #[test]
    fn clean_text_passes() {
        let lexicon = Lexicon::build();
        assert!(!lexicon.contains_banned("good things are coming"));
    }

    #[test]
    fn spacing_does_not_evade_single_words() {
        let lexicon = Lexicon::build();
        assert!(lexicon.contains_banned("s h 1 t happens"));
    }

    #[test]
    fn pairs_match_both_orders_and_spacings() {
        let lexicon = Lexicon::build();
        assert!(lexicon.contains_banned("blow job"));
        assert!(lexicon.contains_banned("blowjob"));
        assert!(lexicon.contains_banned("job blow"));
        assert!(lexicon.contains_banned("jobblow"));
    }
}
