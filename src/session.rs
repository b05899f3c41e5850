use crate::error::TypingError;
use crate::slide::SlideTracker;
use log::debug;

/// State of one character position, index-aligned with the target text.
///
/// The render layer maps these to visual styles; the state machine only
/// guarantees the ordering invariant: everything left of the cursor is
/// `Correct` or `Missed`, the cursor itself is `Current` or `CurrentMissed`,
/// everything right of it is `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CharState {
    /// Not reached yet.
    Pending,
    /// The position the next keystroke is evaluated against.
    Current,
    /// Current position with a recorded miss; stays until the position resolves.
    CurrentMissed,
    /// Resolved correctly on the first attempt.
    Correct,
    /// Resolved after one or more misses.
    Missed,
}

/// Outcome of one submitted keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    /// The expected character was typed: the cursor moved exactly one
    /// position and the visible text slides left by `columns` display
    /// columns. `finished` is set on the keystroke that resolved the last
    /// character.
    Advance { columns: usize, finished: bool },
    /// A different character was typed and the cursor stayed put. `counted`
    /// is false when the position already carried a miss; repeated wrong
    /// keystrokes never inflate the mistake counter.
    Miss { counted: bool },
}

/// Character-by-character evaluation of one practice text.
///
/// Strictly instance-scoped state; create a fresh session to change the
/// target. All operations are synchronous and deterministic.
#[derive(Debug, Clone)]
pub struct TypingSession {
    target: Vec<char>,
    states: Vec<CharState>,
    cursor: usize,
    mistakes: usize,
    clean_entry: bool,
    slide: SlideTracker,
}

impl TypingSession {
    /// Build a session over `target`, with position 0 already current.
    pub fn new(target: &str) -> Result<Self, TypingError> {
        let target: Vec<char> = target.chars().collect();
        if target.is_empty() {
            return Err(TypingError::EmptyTarget);
        }

        let mut states = vec![CharState::Pending; target.len()];
        states[0] = CharState::Current;

        Ok(Self {
            target,
            states,
            cursor: 0,
            mistakes: 0,
            clean_entry: true,
            slide: SlideTracker::new(),
        })
    }

    /// Evaluate one keystroke against the current position.
    ///
    /// Submitting after the last character has resolved returns
    /// [`TypingError::SessionFinished`] and leaves every counter and state
    /// untouched; this session never writes past the end of the text.
    pub fn submit(&mut self, input: char) -> Result<Keystroke, TypingError> {
        if self.is_finished() {
            return Err(TypingError::SessionFinished);
        }

        let expected = self.target[self.cursor];
        if input == expected {
            self.states[self.cursor] = if self.clean_entry {
                CharState::Correct
            } else {
                CharState::Missed
            };
            self.clean_entry = true;

            if self.cursor + 1 < self.target.len() {
                self.states[self.cursor + 1] = CharState::Current;
            }

            let columns = self.slide.advance(expected);
            self.cursor += 1;
            let finished = self.is_finished();
            debug!(
                "advance {}/{} (+{columns} cols)",
                self.cursor,
                self.target.len()
            );
            Ok(Keystroke::Advance { columns, finished })
        } else {
            let counted = self.clean_entry;
            if self.clean_entry {
                self.mistakes += 1;
                self.clean_entry = false;
            }
            self.states[self.cursor] = CharState::CurrentMissed;
            debug!(
                "miss at {} (expected {expected:?}, got {input:?})",
                self.cursor
            );
            Ok(Keystroke::Miss { counted })
        }
    }

    pub fn state_at(&self, index: usize) -> Option<CharState> {
        self.states.get(index).copied()
    }

    pub fn states(&self) -> &[CharState] {
        &self.states
    }

    /// Resolved character count; also the index the next keystroke is
    /// evaluated against while unfinished.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Positions that have cost a mistake so far. At most one per position.
    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.target.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    /// Total display columns the text has slid left so far.
    pub fn slide_columns(&self) -> usize {
        self.slide.columns()
    }

    /// Character the render layer should draw at `index`.
    ///
    /// A space with a recorded miss shows as an underscore so the miss has a
    /// visible glyph; the underscore persists after the position resolves,
    /// keeping the miss visible in the already-typed text.
    pub fn display_char(&self, index: usize) -> Option<char> {
        let c = *self.target.get(index)?;
        let missed = matches!(
            self.states[index],
            CharState::CurrentMissed | CharState::Missed
        );
        Some(if c == ' ' && missed { '_' } else { c })
    }

    /// Positions carrying a miss, resolved or not, in target order.
    pub fn missed_positions(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, CharState::CurrentMissed | CharState::Missed))
            .map(|(i, _)| i)
            .collect()
    }

    /// Target characters at missed positions, for per-character summaries.
    pub fn missed_chars(&self) -> Vec<char> {
        self.missed_positions()
            .into_iter()
            .map(|i| self.target[i])
            .collect()
    }
}
