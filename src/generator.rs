use derive_builder::Builder;
use rand::Rng;

use crate::error::Result;
use crate::fetch::fetch_page;
use crate::parser::parse_problem_table;
use crate::problem::Problem;
use crate::query::Query;
use crate::sampler::{sample_problem_set, Quota};

/// Fetches the archive page for `query` and draws a set according to `quota`.
#[derive(Debug, Default, Builder)]
#[builder(default)]
pub struct ProblemSetGenerator {
    quota: Quota,
    query: Query,
}

impl ProblemSetGenerator {
    pub fn new(quota: Quota, query: Query) -> Self {
        Self { quota, query }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub async fn generate(&self, shuffle: bool) -> Result<Vec<Problem>> {
        let html = fetch_page(&self.query.url()?).await?;
        self.generate_from_html(&html, shuffle, &mut rand::thread_rng())
    }

    /// Same as [`generate`](Self::generate) on an already downloaded page.
    pub fn generate_from_html<R: Rng + ?Sized>(
        &self,
        html: &str,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Vec<Problem>> {
        let problems = parse_problem_table(html)?;
        sample_problem_set(&problems, &self.quota, shuffle, rng)
    }
}
