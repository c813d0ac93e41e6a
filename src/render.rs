use askama::Template;

use crate::error::Result;
use crate::problem::Problem;

#[derive(Debug, Default, Template)]
#[template(path = "problem_set.txt.j2", escape = "none")]
pub struct ProblemSetView {
    pub entries: Vec<Entry>,
    pub details: bool,
}

#[derive(Debug)]
pub struct Entry {
    pub label: String,
    pub judge_id: String,
    pub difficulty: String,
    pub title: String,
    pub contest: String,
    pub task_id: String,
}

impl ProblemSetView {
    pub fn new(problems: &[Problem], details: bool) -> Self {
        let entries = problems
            .iter()
            .enumerate()
            .map(|(idx, problem)| Entry {
                label: label(idx),
                judge_id: problem.judge_id.clone().unwrap_or_else(|| "-".to_string()),
                difficulty: problem.difficulty.clone(),
                title: problem.title.clone(),
                contest: problem.source.contest_name.clone(),
                task_id: problem.source.task_id.clone(),
            })
            .collect();
        Self { entries, details }
    }

    pub fn generate(&self) -> Result<String> {
        Ok(self.render()?)
    }
}

/// Contest-style task label: `A`..`Z`, then `AA`, `AB`, ...
pub fn label(mut idx: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Source;

    fn problem(tier: &str, id: &str, title: &str, source: &str) -> Problem {
        Problem {
            difficulty: tier.to_string(),
            judge_id: Some(id.to_string()),
            title: title.to_string(),
            source: Source::parse(source).unwrap(),
            solved: 0,
        }
    }

    #[test]
    fn label_should_work() {
        assert_eq!(label(0), "A");
        assert_eq!(label(25), "Z");
        assert_eq!(label(26), "AA");
        assert_eq!(label(27), "AB");
        assert_eq!(label(26 * 27), "AAA");
    }

    #[test]
    fn render_problem_set_should_work() {
        let problems = [
            problem("500", "42", "Easy Problem", "ICPC2012A"),
            problem("900", "2425", "Hard & Long", "JAG模擬国内予選2015F"),
        ];

        let plain = ProblemSetView::new(&problems, false).generate().unwrap();
        insta::assert_snapshot!(plain, @r###"
        A. 42
        B. 2425
        "###);

        let detailed = ProblemSetView::new(&problems, true).generate().unwrap();
        insta::assert_snapshot!(detailed, @r###"
        A. 42  [500] Easy Problem (ICPC2012 A)
        B. 2425  [900] Hard & Long (JAG模擬国内予選2015 F)
        "###);
    }

    #[test]
    fn titles_should_print_verbatim() {
        let problems = [problem("300", "7", "a < b && \"c\" > 'd'", "ICPC2013C")];
        let detailed = ProblemSetView::new(&problems, true).generate().unwrap();
        assert_eq!(
            detailed.trim_end(),
            "A. 7  [300] a < b && \"c\" > 'd' (ICPC2013 C)"
        );
    }
}
