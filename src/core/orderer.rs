// src/core/orderer.rs
use crate::core::types::{OrderMode, WordEntry};
use icu::collator::options::{CollatorOptions, Strength};
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::{locale, Locale};
use log::warn;
use rand::Rng;
use std::cmp::Ordering;

/// Source-language collation at primary strength: base letters only, so
/// case and accents never split entries ("Apple" = "apple" = "Äpple").
pub struct SourceCollation {
    collator: CollatorBorrowed<'static>,
}

impl SourceCollation {
    /// Builds a collator for a BCP 47 tag such as `en-US`. Unknown or
    /// malformed tags fall back to English.
    pub fn for_language(tag: &str) -> Self {
        let lang: Locale = tag.parse().unwrap_or_else(|_| {
            warn!("unparseable language tag {:?}, collating as en", tag);
            locale!("en")
        });
        let collator = Collator::try_new(lang.into(), primary())
            .or_else(|_| Collator::try_new(locale!("en").into(), primary()))
            .expect("compiled collation data includes the root locale");
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl Default for SourceCollation {
    fn default() -> Self {
        Self::for_language("en")
    }
}

fn primary() -> CollatorOptions {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Primary);
    options
}

/// Produces the presentation sequence for a filtered set.
/// The input is never mutated; only `Randomized` consumes randomness.
pub fn order<T, R>(entries: &[T], mode: OrderMode, collation: &SourceCollation, rng: &mut R) -> Vec<T>
where
    T: AsRef<WordEntry> + Clone,
    R: Rng + ?Sized,
{
    match mode {
        OrderMode::Alphabetical => alphabetical(entries, collation),
        OrderMode::Randomized => shuffled(entries, rng),
    }
}

/// Stable sort on the source text under the source-language collation.
/// Entries that compare equal keep their relative order.
pub fn alphabetical<T>(entries: &[T], collation: &SourceCollation) -> Vec<T>
where
    T: AsRef<WordEntry> + Clone,
{
    let mut sorted = entries.to_vec();
    // `sort_by` is stable.
    sorted.sort_by(|a, b| collation.compare(&a.as_ref().source_text, &b.as_ref().source_text));
    sorted
}

/// Fisher–Yates on a copy: walk from the last index down, swapping each slot
/// with a uniformly chosen index in `[0, i]`.
pub fn shuffled<T, R>(entries: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut arr = entries.to_vec();
    for i in (1..arr.len()).rev() {
        let j = rng.gen_range(0..=i);
        arr.swap(i, j);
    }
    arr
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn en() -> SourceCollation {
        SourceCollation::for_language("en-US")
    }

    fn sources(entries: &[WordEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.source_text.as_str()).collect()
    }

    #[test]
    fn alphabetical_sorts_by_source() {
        let entries = vec![WordEntry::new(1, "zebra", "zebra"), WordEntry::new(2, "apple", "apel")];
        assert_eq!(sources(&alphabetical(&entries, &en())), vec!["apple", "zebra"]);
    }

    #[test]
    fn alphabetical_is_case_insensitive_and_stable() {
        let entries = vec![
            WordEntry::new(1, "banana", "pisang"),
            WordEntry::new(2, "Apple", "apel"),
            WordEntry::new(3, "apple", "apel hijau"),
            WordEntry::new(4, "Äpple", "apel merah"),
        ];
        let ids: Vec<u32> = alphabetical(&entries, &en()).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn letters_without_decomposition_collate_in_place() {
        let entries = vec![
            WordEntry::new(1, "zebra", ""),
            WordEntry::new(2, "æon", ""),
            WordEntry::new(3, "aft", ""),
            WordEntry::new(4, "øre", ""),
            WordEntry::new(5, "ox", ""),
        ];
        assert_eq!(sources(&alphabetical(&entries, &en())), vec!["æon", "aft", "øre", "ox", "zebra"]);
    }

    #[test]
    fn expansions_and_stroked_letters_sort_with_their_base() {
        let entries = vec![
            WordEntry::new(1, "zoo", ""),
            WordEntry::new(2, "łodz", ""),
            WordEntry::new(3, "straße", ""),
            WordEntry::new(4, "œuvre", ""),
            WordEntry::new(5, "đuro", ""),
            WordEntry::new(6, "mango", ""),
        ];
        // œ sorts as "oe", ß as "ss", ł as l, đ as d.
        assert_eq!(
            sources(&alphabetical(&entries, &en())),
            vec!["đuro", "łodz", "mango", "œuvre", "straße", "zoo"]
        );
    }

    #[test]
    fn unknown_language_tag_falls_back_to_english() {
        let entries = vec![WordEntry::new(1, "b", ""), WordEntry::new(2, "A", "")];
        let sorted = alphabetical(&entries, &SourceCollation::for_language("not a tag!"));
        assert_eq!(sorted[0].id, 2);
    }

    #[test]
    fn alphabetical_works_on_borrowed_entries() {
        let entries = vec![WordEntry::new(1, "b", "b"), WordEntry::new(2, "a", "a")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let sorted = alphabetical(&refs, &en());
        assert_eq!(sorted[0].id, 2);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: Vec<WordEntry> = vec![];
        assert!(shuffled(&empty, &mut rng).is_empty());
        let one = vec![WordEntry::new(1, "a", "b")];
        assert_eq!(shuffled(&one, &mut rng), one);
    }

    #[test]
    fn shuffle_does_not_touch_input() {
        let mut rng = StdRng::seed_from_u64(9);
        let entries: Vec<WordEntry> = (0..20).map(|i| WordEntry::new(i, format!("w{i}"), "x")).collect();
        let before = entries.clone();
        let _ = order(&entries, OrderMode::Randomized, &en(), &mut rng);
        assert_eq!(entries, before);
    }

    #[test]
    fn shuffle_reaches_every_permutation_of_three() {
        let mut rng = StdRng::seed_from_u64(42);
        let entries: Vec<WordEntry> = (0..3).map(|i| WordEntry::new(i, i.to_string(), "")).collect();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let ids: Vec<u32> = shuffled(&entries, &mut rng).iter().map(|e| e.id).collect();
            seen.insert(ids);
        }
        assert_eq!(seen.len(), 6);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(seed in any::<u64>(), len in 0usize..40) {
            let mut rng = StdRng::seed_from_u64(seed);
            let entries: Vec<WordEntry> = (0..len as u32).map(|i| WordEntry::new(i, "w", "x")).collect();
            let mut ids: Vec<u32> = shuffled(&entries, &mut rng).iter().map(|e| e.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..len as u32).collect::<Vec<_>>());
        }

        #[test]
        fn alphabetical_is_reproducible(words in proptest::collection::vec("[a-cA-C]{0,3}", 0..20)) {
            let entries: Vec<WordEntry> = words.iter().enumerate()
                .map(|(i, w)| WordEntry::new(i as u32, w.as_str(), ""))
                .collect();
            let collation = en();
            let first = alphabetical(&entries, &collation);
            prop_assert_eq!(&first, &alphabetical(&entries, &collation));
            // Equal keys keep ascending ids.
            for pair in first.windows(2) {
                if collation.compare(&pair[0].source_text, &pair[1].source_text) == Ordering::Equal {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
