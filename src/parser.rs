use std::collections::BTreeMap;
use std::mem;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::problem::{compare_tiers, Problem, KNOWN_TIERS};

const PROBLEM_TABLE_CLASS: &str = "problem-table";
const RIVALS_ONLY_CLASS: &str = "rivals-only";

static JUDGE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"id=([0-9]+)").unwrap());
static FAVORITE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(☆+\)\s*").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A markup event fed to [`TableParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

/// Problems found on the page, bucketed by difficulty tier.
///
/// Every tier in [`KNOWN_TIERS`] is present from the start, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemTable {
    buckets: BTreeMap<String, Vec<Problem>>,
}

/// Walks markup events and rebuilds one [`Problem`] per row of the
/// `problem-table` body.
#[derive(Debug, Default)]
pub struct TableParser {
    state: ParserState,
    problems: ProblemTable,
}

#[derive(Debug, Default)]
enum ParserState {
    #[default]
    Outside,
    InTable,
    InBody,
    InRow(Vec<Field>),
}

#[derive(Debug, PartialEq, Eq)]
enum Field {
    Text(String),
    Link(Option<String>),
}

/// Parses a full archive page into a [`ProblemTable`].
pub fn parse_problem_table(html: &str) -> Result<ProblemTable> {
    let sink = EventSink {
        parser: TableParser::new(),
        text: String::new(),
        raw: false,
        error: None,
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));
    match tokenizer.feed(&mut input) {
        TokenizerResult::Done => {}
        // only returned when the sink asks to run a script, which it never does
        TokenizerResult::Script(()) => debug!("tokenizer paused on a script, ignoring"),
    }
    tokenizer.end();

    let sink = tokenizer.sink;
    if let Some(err) = sink.error {
        return Err(err);
    }
    let problems = sink.parser.finish();
    info!(
        "parsed {} judged problems in {} tiers",
        problems.len(),
        problems.non_empty().count()
    );
    Ok(problems)
}

impl TableParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the state machine by one event. Only a row that cannot be
    /// turned into a problem (e.g. a source without a year) fails.
    pub fn handle(&mut self, event: MarkupEvent) -> Result<()> {
        let state = mem::take(&mut self.state);
        match event {
            MarkupEvent::Start { name, attrs } => self.state = state.start_tag(&name, &attrs),
            MarkupEvent::End { name } => {
                let (next, row) = state.end_tag(&name);
                self.state = next;
                if let Some(fields) = row {
                    self.close_row(fields)?;
                }
            }
            MarkupEvent::Text(text) => self.state = state.text(&text),
        }
        Ok(())
    }

    pub fn finish(self) -> ProblemTable {
        self.problems
    }

    fn close_row(&mut self, fields: Vec<Field>) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        match build_problem(fields)? {
            Some(problem) if problem.has_judge() => self.problems.push(problem),
            Some(problem) => warn!("skipping `{}`: not on the judge", problem.title),
            None => {}
        }
        Ok(())
    }
}

impl ParserState {
    fn start_tag(self, name: &str, attrs: &[(String, String)]) -> Self {
        use ParserState::*;
        match (self, name) {
            (Outside, "table") if has_class(attrs, PROBLEM_TABLE_CLASS) => InTable,
            (InTable, "tbody") => InBody,
            (InBody, "tr") if has_class(attrs, RIVALS_ONLY_CLASS) => InBody,
            (InBody, "tr") => InRow(Vec::new()),
            (InRow(mut fields), "a") if fields.len() == 1 => {
                fields.push(Field::Link(judge_id(attrs)));
                InRow(fields)
            }
            (state, _) => state,
        }
    }

    /// Returns the next state and, when a row just closed, its fields.
    fn end_tag(self, name: &str) -> (Self, Option<Vec<Field>>) {
        use ParserState::*;
        match (self, name) {
            (InTable | InBody | InRow(_), "table") => (Outside, None),
            (InBody | InRow(_), "tbody") => (InTable, None),
            (InRow(fields), "tr") => (InBody, Some(fields)),
            (state, _) => (state, None),
        }
    }

    fn text(self, data: &str) -> Self {
        match self {
            ParserState::InRow(mut fields) => {
                let text = normalize_text(data);
                if !text.is_empty() {
                    fields.push(Field::Text(text));
                }
                ParserState::InRow(fields)
            }
            state => state,
        }
    }
}

impl ProblemTable {
    pub fn new() -> Self {
        let buckets = KNOWN_TIERS
            .iter()
            .map(|tier| (tier.to_string(), Vec::new()))
            .collect();
        Self { buckets }
    }

    pub fn push(&mut self, problem: Problem) {
        self.buckets
            .entry(problem.difficulty.clone())
            .or_default()
            .push(problem);
    }

    /// Problems of one tier in page order; empty for unknown tiers.
    pub fn get(&self, tier: &str) -> &[Problem] {
        self.buckets.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All tiers, `?` first and then by points.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Problem])> {
        let mut tiers: Vec<_> = self
            .buckets
            .iter()
            .map(|(tier, problems)| (tier.as_str(), problems.as_slice()))
            .collect();
        tiers.sort_by(|a, b| compare_tiers(a.0, b.0));
        tiers.into_iter()
    }

    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &[Problem])> {
        self.iter().filter(|(_, problems)| !problems.is_empty())
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProblemTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips `(☆☆)` favorite marks and collapses whitespace.
pub fn normalize_text(data: &str) -> String {
    let stripped = FAVORITE.replace_all(data, "");
    SPACES.replace_all(stripped.trim(), " ").into_owned()
}

fn has_class(attrs: &[(String, String)], class: &str) -> bool {
    attrs.iter().any(|(name, value)| name == "class" && value == class)
}

fn judge_id(attrs: &[(String, String)]) -> Option<String> {
    attrs
        .iter()
        .filter(|(name, _)| name == "href")
        .find_map(|(_, href)| JUDGE_ID.captures(href))
        .map(|caps| caps[1].to_string())
}

/// Row layout: difficulty, judge link, title, source, solved count.
/// Anything after the fifth field (vote links) is ignored.
fn build_problem(fields: Vec<Field>) -> Result<Option<Problem>> {
    let mut fields = fields.into_iter();
    let row = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    );
    match row {
        (
            Some(Field::Text(difficulty)),
            Some(Field::Link(judge_id)),
            Some(Field::Text(title)),
            Some(Field::Text(source)),
            Some(Field::Text(solved)),
        ) => Problem::new(difficulty, judge_id, title, &source, &solved).map(Some),
        row => {
            debug!("dropping incomplete row: {:?}", row);
            Ok(None)
        }
    }
}

/// Turns html5ever tokens into [`MarkupEvent`]s, merging adjacent text.
/// Contents of `script` and `style` elements are dropped.
struct EventSink {
    parser: TableParser,
    text: String,
    raw: bool,
    error: Option<Error>,
}

impl EventSink {
    fn dispatch(&mut self, event: MarkupEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.parser.handle(event) {
            self.error = Some(err);
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.dispatch(MarkupEvent::Text(text));
        }
    }

    fn tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name = tag.name.to_string();
        match tag.kind {
            TagKind::StartTag => {
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                self.dispatch(MarkupEvent::Start {
                    name: name.clone(),
                    attrs,
                });
                if tag.self_closing {
                    self.dispatch(MarkupEvent::End { name });
                    return TokenSinkResult::Continue;
                }
                let kind = match name.as_str() {
                    "script" => RawKind::ScriptData,
                    "style" => RawKind::Rawtext,
                    _ => return TokenSinkResult::Continue,
                };
                self.raw = true;
                TokenSinkResult::RawData(kind)
            }
            TagKind::EndTag => {
                self.raw = false;
                self.dispatch(MarkupEvent::End { name });
                TokenSinkResult::Continue
            }
        }
    }
}

impl TokenSink for EventSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) if !self.raw => self.text.push_str(&text),
            Token::CharacterTokens(_) => {}
            Token::NullCharacterToken | Token::ParseError(_) => {}
            Token::TagToken(tag) => {
                self.flush_text();
                return self.tag(tag);
            }
            _ => self.flush_text(),
        }
        TokenSinkResult::Continue
    }
}
