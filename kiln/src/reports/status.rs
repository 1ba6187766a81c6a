//! Status command report data structures.

use kiln_codegen::incremental::Staleness;

use super::output::{Output, Report};

/// Staleness verdict of every enabled goal.
#[derive(Debug)]
pub struct StatusReport {
    pub project: String,
    pub goals: Vec<(&'static str, Option<Staleness>)>,
}

impl StatusReport {
    pub fn stale_count(&self) -> usize {
        self.goals
            .iter()
            .filter(|(_, s)| !s.as_ref().is_some_and(Staleness::is_up_to_date))
            .count()
    }
}

impl Report for StatusReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.project);
        for (kind, staleness) in &self.goals {
            let verdict = match staleness {
                Some(staleness) => staleness.to_string(),
                None => "untracked".to_string(),
            };
            out.row(kind, &verdict);
        }
        out.newline();
        match self.stale_count() {
            0 => out.preformatted("all goals up to date"),
            n => out.preformatted(&format!("{} of {} goals would run", n, self.goals.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_status() {
        let report = StatusReport {
            project: "org.acme:camel-foo:1.0.0".to_string(),
            goals: vec![
                ("component", Some(Staleness::UpToDate)),
                (
                    "bean",
                    Some(Staleness::StaleInputs(vec![PathBuf::from("src/Foo.java")])),
                ),
            ],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.text(),
            "org.acme:camel-foo:1.0.0\n\
             \x20 component    up to date\n\
             \x20 bean         stale input detected: src/Foo.java\n\
             \n\
             1 of 2 goals would run"
        );
    }
}
