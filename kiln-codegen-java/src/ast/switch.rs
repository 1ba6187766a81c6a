//! Java `switch` statement with single statement cases.

use kiln_codegen::builder::{CodeFragment, Renderable};

/// One case: its labels and the statement they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub labels: Vec<String>,
    pub statement: String,
}

impl Case {
    pub fn new(label: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            labels: vec![label.into()],
            statement: statement.into(),
        }
    }

    /// Add a label falling through to this case, rendered first.
    pub fn alias(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(0, label.into());
        self
    }
}

/// A `switch` over string labels. Cases stay at the indentation of the
/// `switch` keyword.
#[derive(Debug, Clone)]
pub struct Switch {
    selector: String,
    cases: Vec<Case>,
    default: String,
}

impl Switch {
    pub fn new(selector: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            cases: Vec::new(),
            default: default.into(),
        }
    }

    pub fn case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    pub fn cases(mut self, cases: impl IntoIterator<Item = Case>) -> Self {
        self.cases.extend(cases);
        self
    }
}

impl Renderable for Switch {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut lines = vec![CodeFragment::Line(format!("switch ({}) {{", self.selector))];
        for case in &self.cases {
            if let Some((last, fallthrough)) = case.labels.split_last() {
                for label in fallthrough {
                    lines.push(CodeFragment::Line(format!("case \"{}\":", label)));
                }
                lines.push(CodeFragment::Line(format!(
                    "case \"{}\": {}",
                    last, case.statement
                )));
            }
        }
        lines.push(CodeFragment::Line(format!("default: {}", self.default)));
        lines.push(CodeFragment::line("}"));
        vec![CodeFragment::Sequence(lines)]
    }
}
