use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::ProblemTable;
use crate::problem::{compare_tiers, Problem};

/// How many problems to draw from each tier, in draw order. Each tier
/// appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct Quota {
    entries: Vec<(String, usize)>,
}

impl Quota {
    /// The classic set: fourteen problems from 300 to 900 points.
    pub fn standard() -> Self {
        [
            ("300", 1),
            ("400", 1),
            ("500", 1),
            ("550", 2),
            ("600", 3),
            ("700", 3),
            ("800", 2),
            ("900", 1),
        ]
        .into_iter()
        .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(tier, count)| (tier.as_str(), *count))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Repeated tiers are merged into the first occurrence, adding up counts.
impl<S: Into<String>> FromIterator<(S, usize)> for Quota {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        for (tier, count) in iter {
            let tier = tier.into();
            match entries.iter_mut().find(|(seen, _)| *seen == tier) {
                Some((_, total)) => *total += count,
                None => entries.push((tier, count)),
            }
        }
        Self { entries }
    }
}

/// Map keys lose their order, so tiers are drawn `?` first and then by points.
impl From<BTreeMap<String, usize>> for Quota {
    fn from(map: BTreeMap<String, usize>) -> Self {
        let mut entries: Vec<_> = map.into_iter().collect();
        entries.sort_by(|a, b| compare_tiers(&a.0, &b.0));
        Self { entries }
    }
}

impl From<Quota> for BTreeMap<String, usize> {
    fn from(quota: Quota) -> Self {
        quota.entries.into_iter().collect()
    }
}

/// Draws `count` distinct problems from every tier of `quota`, tier by tier.
///
/// Fails if a tier has fewer problems than requested; nothing is returned in
/// that case. Tiers with a zero count are never looked up.
pub fn sample_problem_set<R: Rng + ?Sized>(
    problems: &ProblemTable,
    quota: &Quota,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<Problem>> {
    let mut set = Vec::with_capacity(quota.total());
    for (tier, count) in quota.iter() {
        if count == 0 {
            continue;
        }
        let bucket = problems.get(tier);
        if bucket.len() < count {
            return Err(Error::InsufficientPopulation {
                tier: tier.to_string(),
                requested: count,
                available: bucket.len(),
            });
        }
        debug!("drawing {} of {} problems from tier {}", count, bucket.len(), tier);
        set.extend(bucket.choose_multiple(&mut *rng, count).cloned());
    }

    if shuffle {
        set.shuffle(&mut *rng);
    }
    Ok(set)
}
