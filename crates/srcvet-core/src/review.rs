use crate::report::ReviewLog;
use crate::ReviewError;
use srcvet_schema::{Category, Checklist, ChecklistItem, Verdict};
use tracing::debug;

/// Pull-based source of reviewer responses.
///
/// Backed by the terminal in production and by a scripted sequence in tests,
/// which keeps the state machine free of any direct I/O. Returns `None` at
/// end of input.
pub trait PromptSource {
    fn next_response(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

/// How a review session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every group was walked to completion and the notes section appended.
    Completed,
    /// End of input arrived mid-group; the log so far stands as a partial
    /// report.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Must,
    Should,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Verdict(Verdict),
    Back,
}

fn parse_answer(input: &str) -> Option<Answer> {
    if input.trim().eq_ignore_ascii_case("back") {
        return Some(Answer::Back);
    }
    Verdict::parse(input).map(Answer::Verdict)
}

fn marker(category: Category) -> &'static str {
    match category {
        Category::Must => "MUST",
        Category::Should => "SHOULD",
    }
}

/// Interactive checklist walker.
///
/// Owns the review log for the session's lifetime and appends one rendered
/// line per answered item. Within the current group the cursor always equals
/// the number of item lines appended, so backward navigation can drop the
/// trailing line and step the cursor together.
///
/// Back-navigation policy: single-step — `back` removes exactly one trailing
/// item line and moves the cursor back by exactly one, clamped at the group
/// start (group headers and earlier groups are never touched).
pub struct ReviewSession {
    must: Vec<ChecklistItem>,
    should: Vec<ChecklistItem>,
    group: Group,
    cursor: usize,
    log: ReviewLog,
}

impl ReviewSession {
    pub fn new(checklist: Checklist, initial: ReviewLog) -> Self {
        Self {
            must: checklist.must,
            should: checklist.should,
            group: Group::Must,
            cursor: 0,
            log: initial,
        }
    }

    /// Drive the session until Done or end of input, returning the log.
    ///
    /// No step is fatal on its own: unrecognized responses re-prompt
    /// indefinitely, and only an I/O failure on the prompt channel itself
    /// surfaces as an error.
    pub fn run(
        mut self,
        prompts: &mut dyn PromptSource,
    ) -> Result<(ReviewLog, SessionEnd), ReviewError> {
        self.enter_group();
        while self.group != Group::Done {
            let (category, text) = {
                let item = &self.items()[self.cursor];
                (item.category, item.text.clone())
            };
            let prompt = format!("{}: {text} [ok/fail/note/na/ne/back] ", marker(category));

            let Some(response) = prompts.next_response(&prompt)? else {
                debug!("end of input, aborting review mid-group");
                return Ok((self.log, SessionEnd::Aborted));
            };

            match parse_answer(&response) {
                None => debug!("unrecognized response '{}', asking again", response.trim()),
                Some(Answer::Back) => self.step_back(),
                Some(Answer::Verdict(verdict)) => self.record(verdict, &text),
            }
        }
        self.append_notes();
        Ok((self.log, SessionEnd::Completed))
    }

    fn items(&self) -> &[ChecklistItem] {
        match self.group {
            Group::Must => &self.must,
            Group::Should => &self.should,
            Group::Done => &[],
        }
    }

    fn record(&mut self, verdict: Verdict, text: &str) {
        self.log.push(format!("{} {text}", verdict.indicator()));
        self.cursor += 1;
        if self.cursor == self.items().len() {
            self.group = self.next_group();
            self.cursor = 0;
            self.enter_group();
        }
    }

    fn step_back(&mut self) {
        if self.cursor > 0 {
            self.log.pop_last();
            self.cursor -= 1;
        }
        // At the group start, back re-prompts the same item.
    }

    fn next_group(&self) -> Group {
        match self.group {
            Group::Must => Group::Should,
            _ => Group::Done,
        }
    }

    /// Skip empty groups, then emit the header pair for the group about to
    /// be prompted. Empty groups are skipped without a header.
    fn enter_group(&mut self) {
        while self.group != Group::Done && self.items().is_empty() {
            self.group = self.next_group();
        }
        let title = match self.group {
            Group::Must => "MUST items",
            Group::Should => "SHOULD items",
            Group::Done => return,
        };
        self.log.push(String::new());
        self.log.push(format!("=== {title} ==="));
    }

    fn append_notes(&mut self) {
        self.log.push(String::new());
        self.log.push("=== Notes ===".to_owned());
        self.log.push(String::new());
    }
}
