use derive_builder::Builder;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

pub const BASE_URL: &str = "http://aoj-icpc.ichyo.jp/";

/// Search filters sent to the archive. Problems solved by any of `rivals`
/// come back marked and are dropped by the parser.
///
/// Bounds are not checked against each other.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct Query {
    #[builder(setter(into, each(name = "rival", into)))]
    pub rivals: Vec<String>,
    /// Empty means unbounded.
    #[builder(setter(custom))]
    #[serde(deserialize_with = "year_bound")]
    pub year_min: String,
    #[builder(setter(custom))]
    #[serde(deserialize_with = "year_bound")]
    pub year_max: String,
    pub diff_min: u32,
    pub diff_max: u32,
    pub include_domestic: bool,
    pub include_regional: bool,
    pub include_jag_domestic: bool,
    pub include_jag_other: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            rivals: vec![],
            year_min: String::new(),
            year_max: String::new(),
            diff_min: 100,
            diff_max: 1200,
            include_domestic: true,
            include_regional: true,
            include_jag_domestic: true,
            include_jag_other: true,
        }
    }
}

impl QueryBuilder {
    /// Accepts a year number or a string; `""` clears the bound.
    pub fn year_min(&mut self, year: impl ToString) -> &mut Self {
        self.year_min = Some(year.to_string());
        self
    }

    pub fn year_max(&mut self, year: impl ToString) -> &mut Self {
        self.year_max = Some(year.to_string());
        self
    }
}

impl Query {
    /// Query parameters under the names the archive expects.
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        let flag = |on: bool| u8::from(on).to_string();
        vec![
            ("aoj_rivals", self.rivals.join(" ")),
            ("year_min", self.year_min.clone()),
            ("year_max", self.year_max.clone()),
            ("aoj_username", String::new()),
            ("point_min", self.diff_min.to_string()),
            ("point_max", self.diff_max.to_string()),
            ("sort1_by", "point".to_string()),
            ("sort1_order", "asc".to_string()),
            ("sort2_by", "rivals_diff".to_string()),
            ("sort2_order", "desc".to_string()),
            ("source1", flag(self.include_domestic)),
            ("source2", flag(self.include_regional)),
            ("source3", flag(self.include_jag_domestic)),
            ("source4", flag(self.include_jag_other)),
        ]
    }

    pub fn url(&self) -> Result<Url> {
        Url::parse_with_params(BASE_URL, self.parameters())
            .map_err(|err| Error::InvalidUrl(err.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearBound {
    Year(u32),
    Text(String),
}

fn year_bound<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match YearBound::deserialize(deserializer)? {
        YearBound::Year(year) => year.to_string(),
        YearBound::Text(text) => text,
    })
}
