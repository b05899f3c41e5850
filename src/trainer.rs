use log::debug;

use crate::error::TypingError;
use crate::session::{Keystroke, TypingSession};
use crate::stats::SessionStats;

/// Accepted length range, in characters, for a template adopted on refresh.
pub const TEMPLATE_MIN_CHARS: usize = 5;
pub const TEMPLATE_MAX_CHARS: usize = 199;

/// Wires one [`TypingSession`] to one [`SessionStats`].
///
/// The trainer owns the per-session lifecycle: it starts the stats clock on
/// the first correct keystroke, forwards every counter change, freezes the
/// metrics when the last character resolves, and rebuilds both parts on
/// refresh. Sessions are re-created, never mutated, when the text changes.
#[derive(Debug, Clone)]
pub struct Trainer {
    template: String,
    session: TypingSession,
    stats: SessionStats,
}

impl Trainer {
    pub fn new(text: &str) -> Result<Self, TypingError> {
        Ok(Self {
            template: text.to_string(),
            session: TypingSession::new(text)?,
            stats: SessionStats::new(),
        })
    }

    /// Submit one keystroke and keep the stats in step with the session.
    pub fn handle_key(&mut self, c: char) -> Result<Keystroke, TypingError> {
        let outcome = self.session.submit(c)?;

        match outcome {
            Keystroke::Advance { finished, .. } => {
                if !self.stats.has_started() {
                    // First resolved character starts the clock.
                    self.stats.on_session_start();
                }
                self.stats
                    .on_progress(self.session.cursor(), self.session.mistakes());
                if finished {
                    // One last refresh so the metrics carry their completion
                    // values, then freeze them.
                    self.stats.tick();
                    self.stats.on_session_stop();
                    debug!(
                        "finished: {} chars, {} mistakes",
                        self.session.target_len(),
                        self.session.mistakes()
                    );
                }
            }
            Keystroke::Miss { .. } => {
                self.stats
                    .on_progress(self.session.cursor(), self.session.mistakes());
            }
        }

        Ok(outcome)
    }

    /// Refresh elapsed time and speed; driven by the external ticker.
    pub fn tick(&mut self) {
        self.stats.tick();
    }

    /// Halt metric refreshes without finishing the text.
    pub fn stop(&mut self) {
        self.stats.on_session_stop();
    }

    /// Rebuild the session and stats, optionally adopting a new template.
    ///
    /// A new template must be `TEMPLATE_MIN_CHARS..=TEMPLATE_MAX_CHARS`
    /// characters; on a length violation nothing changes. Passing `None`
    /// re-runs the current template from the top.
    pub fn refresh(&mut self, template: Option<String>) -> Result<(), TypingError> {
        if let Some(text) = template {
            let len = text.chars().count();
            if !(TEMPLATE_MIN_CHARS..=TEMPLATE_MAX_CHARS).contains(&len) {
                return Err(TypingError::TemplateLength {
                    len,
                    min: TEMPLATE_MIN_CHARS,
                    max: TEMPLATE_MAX_CHARS,
                });
            }
            self.template = text;
        }

        self.session = TypingSession::new(&self.template)?;
        self.stats = SessionStats::new();
        debug!("refreshed over {} chars", self.session.target_len());
        Ok(())
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_perfect_run_reaches_100_percent() {
        let mut trainer = Trainer::new("hello").unwrap();

        for c in "hello".chars() {
            trainer.handle_key(c).unwrap();
        }

        assert!(trainer.session().is_finished());
        assert_eq!(trainer.session().mistakes(), 0);
        assert_eq!(trainer.stats().accuracy(), 100.0);
        assert!(trainer.stats().has_started());
        assert!(!trainer.stats().is_running());
    }

    #[test]
    fn test_clock_starts_on_first_correct_keystroke() {
        let mut trainer = Trainer::new("abc").unwrap();

        trainer.handle_key('x').unwrap();
        assert!(!trainer.stats().has_started());

        trainer.handle_key('a').unwrap();
        assert!(trainer.stats().has_started());
        assert!(trainer.stats().is_running());
    }

    #[test]
    fn test_miss_counters_reach_the_stats() {
        let mut trainer = Trainer::new("ab").unwrap();

        trainer.handle_key('a').unwrap();
        assert_eq!(trainer.stats().accuracy(), 100.0);

        trainer.handle_key('x').unwrap();
        // One mistake over one resolved character.
        assert_eq!(trainer.stats().accuracy(), 0.0);
        assert_eq!(trainer.stats().mistakes(), 1);
    }

    #[test]
    fn test_single_miss_scores_two_thirds() {
        let mut trainer = Trainer::new("abc").unwrap();

        trainer.handle_key('a').unwrap();
        trainer.handle_key('x').unwrap();
        trainer.handle_key('b').unwrap();
        trainer.handle_key('c').unwrap();

        assert!(trainer.session().is_finished());
        assert_eq!(trainer.session().mistakes(), 1);
        assert_eq!(trainer.stats().accuracy(), 66.67);
    }

    #[test]
    fn test_finish_freezes_the_metrics() {
        let mut trainer = Trainer::new("hi").unwrap();

        trainer.handle_key('h').unwrap();
        trainer.handle_key('i').unwrap();

        let elapsed = trainer.stats().elapsed();
        let samples = trainer.stats().samples().len();

        std::thread::sleep(std::time::Duration::from_millis(10));
        trainer.tick();

        assert_eq!(trainer.stats().elapsed(), elapsed);
        assert_eq!(trainer.stats().samples().len(), samples);
    }

    #[test]
    fn test_key_after_finish_errors() {
        let mut trainer = Trainer::new("hi").unwrap();
        trainer.handle_key('h').unwrap();
        trainer.handle_key('i').unwrap();

        assert_matches!(trainer.handle_key('!'), Err(TypingError::SessionFinished));
    }

    #[test]
    fn test_refresh_reruns_the_current_template() {
        let mut trainer = Trainer::new("hello").unwrap();
        trainer.handle_key('h').unwrap();
        trainer.handle_key('x').unwrap();

        trainer.refresh(None).unwrap();

        assert_eq!(trainer.session().cursor(), 0);
        assert_eq!(trainer.session().mistakes(), 0);
        assert_eq!(trainer.stats().accuracy(), 100.0);
        assert!(!trainer.stats().has_started());
        assert_eq!(trainer.template(), "hello");
    }

    #[test]
    fn test_refresh_adopts_a_valid_template() {
        let mut trainer = Trainer::new("hello").unwrap();

        trainer.refresh(Some("fresh words".into())).unwrap();

        assert_eq!(trainer.template(), "fresh words");
        assert_eq!(trainer.session().target_len(), 11);
    }

    #[test]
    fn test_refresh_rejects_out_of_bounds_templates() {
        let mut trainer = Trainer::new("hello").unwrap();
        trainer.handle_key('h').unwrap();

        assert_matches!(
            trainer.refresh(Some("abcd".into())),
            Err(TypingError::TemplateLength { len: 4, .. })
        );
        let long = "x".repeat(200);
        assert_matches!(
            trainer.refresh(Some(long)),
            Err(TypingError::TemplateLength { len: 200, .. })
        );

        // Nothing changed on the failed refreshes.
        assert_eq!(trainer.template(), "hello");
        assert_eq!(trainer.session().cursor(), 1);
    }

    #[test]
    fn test_refresh_accepts_boundary_lengths() {
        let mut trainer = Trainer::new("hello").unwrap();

        trainer.refresh(Some("x".repeat(5))).unwrap();
        assert_eq!(trainer.session().target_len(), 5);

        trainer.refresh(Some("x".repeat(199))).unwrap();
        assert_eq!(trainer.session().target_len(), 199);
    }

    #[test]
    fn test_initial_text_skips_the_template_bounds() {
        // Construction only requires a non-empty text; the bounds apply to
        // templates adopted later.
        let long = "y".repeat(400);
        let trainer = Trainer::new(&long).unwrap();
        assert_eq!(trainer.session().target_len(), 400);

        assert_matches!(Trainer::new(""), Err(TypingError::EmptyTarget));
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut trainer = Trainer::new("abcdef").unwrap();
        trainer.handle_key('a').unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        trainer.tick();
        let elapsed = trainer.stats().elapsed();

        trainer.stop();
        std::thread::sleep(std::time::Duration::from_millis(5));
        trainer.tick();

        assert_eq!(trainer.stats().elapsed(), elapsed);
    }
}
