use crate::api::Answer;

/// Where the current (or most recent) request stands. Exactly one value
/// at a time; terminal payloads live inside their variant so clearing
/// them is a single assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Failed(String),
    Succeeded(Answer),
}

/// A dispatched submission: the raw inquiry text plus the generation
/// token its settle must present.
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub inquiry: String,
}

/// Everything the page owns, kept out of the widget layer so the request
/// lifecycle can be driven and inspected without a UI.
#[derive(Debug)]
pub struct QueryState {
    query: String,
    phase: Phase,
    generation: u64,
}

impl QueryState {
    pub fn new() -> Self {
        QueryState {
            query: String::new(),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Keystroke edits; no validation here.
    pub fn set_query(&mut self, text: String) {
        self.query = text;
    }

    /// Starts a submission. Whitespace-only queries are ignored outright:
    /// no transition, no request. Otherwise any prior error or result is
    /// dropped and the phase moves to `Loading`. The inquiry is forwarded
    /// untrimmed.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.query.trim().is_empty() {
            return None;
        }
        self.generation += 1;
        self.phase = Phase::Loading;
        Some(Submission {
            generation: self.generation,
            inquiry: self.query.clone(),
        })
    }

    /// Applies a finished request. An outcome from a superseded generation
    /// is discarded, so a slow earlier request can never overwrite a newer
    /// one. Returns whether the outcome was applied.
    pub fn settle(&mut self, generation: u64, outcome: Result<Answer, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = match outcome {
            Ok(answer) => Phase::Succeeded(answer),
            Err(message) => Phase::Failed(message),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Answer {
        Answer::Plain(text.to_string())
    }

    #[test]
    fn empty_query_never_submits() {
        let mut state = QueryState::new();
        assert!(state.begin_submit().is_none());

        state.set_query("   \t  ".to_string());
        assert!(state.begin_submit().is_none());

        assert_eq!(*state.phase(), Phase::Idle);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn submission_forwards_the_untrimmed_inquiry() {
        let mut state = QueryState::new();
        state.set_query("  what happens if I steal?  ".to_string());

        let submission = state.begin_submit().unwrap();
        assert_eq!(submission.inquiry, "  what happens if I steal?  ");
        assert!(state.is_loading());
    }

    #[test]
    fn each_generation_leaves_loading_exactly_once() {
        let mut state = QueryState::new();
        state.set_query("q".to_string());

        let submission = state.begin_submit().unwrap();
        assert!(state.is_loading());

        assert!(state.settle(submission.generation, Ok(plain("a"))));
        assert_eq!(*state.phase(), Phase::Succeeded(plain("a")));
    }

    #[test]
    fn failure_fills_the_error_slot() {
        let mut state = QueryState::new();
        state.set_query("q".to_string());

        let submission = state.begin_submit().unwrap();
        state.settle(submission.generation, Err("Network down".to_string()));
        assert_eq!(*state.phase(), Phase::Failed("Network down".to_string()));
    }

    #[test]
    fn resubmission_clears_the_previous_terminal_state() {
        let mut state = QueryState::new();
        state.set_query("first".to_string());
        let first = state.begin_submit().unwrap();
        state.settle(first.generation, Err("boom".to_string()));

        state.set_query("second".to_string());
        let second = state.begin_submit().unwrap();
        assert!(state.is_loading());

        state.settle(second.generation, Ok(plain("done")));
        assert_eq!(*state.phase(), Phase::Succeeded(plain("done")));
    }

    #[test]
    fn stale_settles_are_discarded() {
        let mut state = QueryState::new();
        state.set_query("q".to_string());

        let first = state.begin_submit().unwrap();
        let second = state.begin_submit().unwrap();
        assert_ne!(first.generation, second.generation);

        // The older request resolves after the newer one was dispatched.
        assert!(!state.settle(first.generation, Ok(plain("stale"))));
        assert!(state.is_loading());

        assert!(state.settle(second.generation, Ok(plain("fresh"))));
        assert_eq!(*state.phase(), Phase::Succeeded(plain("fresh")));

        // Even later, the stale outcome still loses.
        assert!(!state.settle(first.generation, Err("late".to_string())));
        assert_eq!(*state.phase(), Phase::Succeeded(plain("fresh")));
    }

    #[test]
    fn query_text_survives_submission() {
        let mut state = QueryState::new();
        state.set_query("keep me".to_string());
        let submission = state.begin_submit().unwrap();
        state.settle(submission.generation, Ok(plain("a")));

        assert_eq!(state.query(), "keep me");
    }
}
