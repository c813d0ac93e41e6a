use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Difficulty tiers the archive can show, in display order.
pub const KNOWN_TIERS: [&str; 18] = [
    "?", "100", "150", "200", "250", "300", "350", "400", "450", "500", "550", "600", "700",
    "800", "900", "1000", "1100", "1200+",
];

/// Shown in the solved column for problems that are not on the judge yet.
pub const UNPUBLISHED: &str = "(未収録)";

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"2[0-9]{3}").unwrap());

/// Where a problem comes from, e.g. `JAG模擬国内予選2015A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub contest_type: String,
    pub contest_name: String,
    pub year: u32,
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub difficulty: String,
    pub judge_id: Option<String>,
    pub title: String,
    pub source: Source,
    pub solved: u32,
}

impl Source {
    /// Splits a compact source string into its parts.
    ///
    /// The task id is assumed to be exactly the last character: `ICPC2012A2`
    /// would yield task `2` and contest name `ICPC2012A`.
    pub fn parse(source_str: &str) -> Result<Self> {
        let year = YEAR.find(source_str).ok_or_else(|| Error::MissingYear {
            source_str: source_str.to_string(),
        })?;

        let mut chars = source_str.chars();
        let task_id = chars.next_back().map(String::from).unwrap_or_default();

        Ok(Self {
            contest_type: source_str[..year.start()].to_string(),
            contest_name: chars.as_str().to_string(),
            // four ascii digits always fit
            year: year.as_str().parse().unwrap_or_default(),
            task_id,
        })
    }
}

impl Problem {
    /// Builds a problem from the text fields of one table row.
    pub fn new(
        difficulty: String,
        judge_id: Option<String>,
        title: String,
        source_str: &str,
        solved_str: &str,
    ) -> Result<Self> {
        let solved = if solved_str == UNPUBLISHED {
            0
        } else {
            solved_str
                .parse()
                .map_err(|_| Error::InvalidSolvedCount {
                    value: solved_str.to_string(),
                })?
        };

        Ok(Self {
            difficulty,
            judge_id,
            title,
            source: Source::parse(source_str)?,
            solved,
        })
    }

    /// Whether the problem can be submitted on the online judge.
    pub fn has_judge(&self) -> bool {
        self.judge_id.is_some()
    }
}

/// Orders tier labels the way the archive does: `?` first, then by points,
/// with `1200+` after `1200`. Unknown labels sort last, alphabetically.
pub fn compare_tiers(a: &str, b: &str) -> Ordering {
    tier_rank(a).cmp(&tier_rank(b)).then_with(|| a.cmp(b))
}

fn tier_rank(label: &str) -> u64 {
    let points = |s: &str| s.parse::<u32>().ok().map(u64::from);
    match label {
        "?" => 0,
        _ => match label.strip_suffix('+') {
            Some(base) => points(base).map_or(u64::MAX, |p| p * 2 + 2),
            None => points(label).map_or(u64::MAX, |p| p * 2 + 1),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_should_split_jag_string() {
        let source = Source::parse("JAG模擬国内予選2015A").unwrap();
        assert_eq!(source.contest_type, "JAG模擬国内予選");
        assert_eq!(source.contest_name, "JAG模擬国内予選2015");
        assert_eq!(source.year, 2015);
        assert_eq!(source.task_id, "A");
    }

    #[test]
    fn source_should_recover_year_and_task() {
        for (input, year, task) in [("ICPC2012A", 2012, "A"), ("JAG2099Z", 2099, "Z")] {
            let source = Source::parse(input).unwrap();
            assert_eq!(source.year, year);
            assert_eq!(source.task_id, task);
            assert_eq!(source.contest_name, &input[..input.len() - 1]);
        }
    }

    #[test]
    fn source_should_use_first_year() {
        let source = Source::parse("Asia2019-2020C").unwrap();
        assert_eq!(source.contest_type, "Asia");
        assert_eq!(source.year, 2019);
    }

    #[test]
    fn source_without_year_should_fail() {
        let err = Source::parse("ICPC国内予選A").unwrap_err();
        assert!(matches!(err, Error::MissingYear { ref source_str } if source_str == "ICPC国内予選A"));
    }

    #[test]
    fn problem_should_map_unpublished_to_zero() {
        let problem = Problem::new(
            "300".into(),
            None,
            "Title".into(),
            "ICPC2012A",
            UNPUBLISHED,
        )
        .unwrap();
        assert_eq!(problem.solved, 0);
        assert!(!problem.has_judge());
    }

    #[test]
    fn problem_with_garbage_solved_count_should_fail() {
        let err = Problem::new("300".into(), None, "T".into(), "ICPC2012A", "many").unwrap_err();
        assert!(matches!(err, Error::InvalidSolvedCount { .. }));
    }

    #[test]
    fn tiers_should_sort_naturally() {
        let mut tiers = vec!["1200+", "1000", "?", "150", "100", "1100"];
        tiers.sort_by(|a, b| compare_tiers(a, b));
        assert_eq!(tiers, ["?", "100", "150", "1000", "1100", "1200+"]);

        let mut known = KNOWN_TIERS.to_vec();
        known.reverse();
        known.sort_by(|a, b| compare_tiers(a, b));
        assert_eq!(known, KNOWN_TIERS);
    }
}
