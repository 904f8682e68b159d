use crate::catalog::CatalogStreet;
use crate::random::{pick_index, shuffle, RandomSource};
use itertools::Itertools;

/// Number of options presented in a multiple-choice round, target included.
pub const CHOICE_OPTION_COUNT: usize = 4;

/// Uniform pick of the next target. `None` signals "no more rounds",
/// which the session turns into game over.
pub fn pick_target<'a>(
    pool: &'a [CatalogStreet],
    rng: &mut dyn RandomSource,
) -> Option<&'a CatalogStreet> {
    if pool.is_empty() {
        return None;
    }
    Some(&pool[pick_index(rng, pool.len())])
}

/// One multiple-choice question: the street to highlight and the
/// shuffled name options to offer.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoiceRound {
    pub street: CatalogStreet,
    pub options: Vec<String>,
}

/// Pick a correct street, then up to three decoys with distinct names
/// sampled without replacement from the rest of the pool. Fewer than four
/// distinct names degrades to however many exist.
pub fn multiple_choice_round(
    pool: &[CatalogStreet],
    rng: &mut dyn RandomSource,
) -> Option<MultipleChoiceRound> {
    let target = pick_target(pool, rng)?.clone();

    let mut decoys: Vec<String> = pool
        .iter()
        .filter(|s| !s.name.eq_ignore_ascii_case(&target.name))
        .unique_by(|s| s.name_key())
        .map(|s| s.name.clone())
        .collect();
    shuffle(rng, &mut decoys);
    decoys.truncate(CHOICE_OPTION_COUNT - 1);

    let mut options = vec![target.name.clone()];
    options.extend(decoys);
    shuffle(rng, &mut options);

    Some(MultipleChoiceRound {
        street: target,
        options,
    })
}
