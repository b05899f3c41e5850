use chrono::Local;
use itertools::Itertools;

use crate::session::TypingSession;
use crate::trainer::Trainer;
use crate::util;

/// Plain-text summary of a session, one labelled line per metric.
pub fn session_report(trainer: &Trainer) -> String {
    let session = trainer.session();
    let stats = trainer.stats();

    let mut lines = Vec::new();
    lines.push(format!(
        "slyde session  {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!(
        "text         {} ({} chars)",
        util::preview(trainer.template(), 40),
        session.target_len()
    ));
    let progress = if session.is_finished() {
        format!("{}/{} (finished)", session.cursor(), session.target_len())
    } else {
        format!("{}/{}", session.cursor(), session.target_len())
    };
    lines.push(format!("progress     {}", progress));
    lines.push(format!("elapsed      {:.1}s", stats.elapsed().as_secs_f64()));
    lines.push(format!(
        "speed        {:.2} cps / {:.2} wpm",
        stats.cps(),
        stats.wpm()
    ));
    lines.push(format!("accuracy     {:.2}%", stats.accuracy()));
    match stats.consistency() {
        Some(sd) => lines.push(format!("consistency  {:.2} sd", sd)),
        None => lines.push("consistency  n/a".to_string()),
    }
    let missed = missed_line(session);
    if !missed.is_empty() {
        lines.push(format!("missed       {}", missed));
    }

    lines.join("\n")
}

/// The most-missed target characters, worst first, at most five entries.
fn missed_line(session: &TypingSession) -> String {
    session
        .missed_chars()
        .into_iter()
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .take(5)
        .map(|(c, n)| format!("{:?}x{}", c, n))
        .join(", ")
}

/// Per-position dump of display characters and their states.
pub fn char_dump(session: &TypingSession) -> String {
    session
        .states()
        .iter()
        .enumerate()
        .map(|(i, state)| {
            let c = session.display_char(i).unwrap_or(' ');
            format!("{:>4}  {}  {}", i, c, state)
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_trainer(target: &str, typed: &str) -> Trainer {
        let mut trainer = Trainer::new(target).unwrap();
        for c in typed.chars() {
            let _ = trainer.handle_key(c);
        }
        trainer
    }

    #[test]
    fn test_report_for_a_perfect_run() {
        let trainer = finished_trainer("hello", "hello");
        let report = session_report(&trainer);

        assert!(report.contains("5/5 (finished)"));
        assert!(report.contains("accuracy     100.00%"));
        assert!(report.contains("hello (5 chars)"));
        assert!(!report.contains("missed"));
    }

    #[test]
    fn test_report_lists_missed_characters() {
        let trainer = finished_trainer("abc", "axbc");
        let report = session_report(&trainer);

        assert!(report.contains("accuracy     66.67%"));
        assert!(report.contains("missed       'b'x1"));
    }

    #[test]
    fn test_report_on_an_unfinished_session() {
        let mut trainer = Trainer::new("hello").unwrap();
        trainer.handle_key('h').unwrap();
        let report = session_report(&trainer);

        assert!(report.contains("progress     1/5"));
        assert!(!report.contains("(finished)"));
    }

    #[test]
    fn test_missed_line_orders_by_count() {
        let mut session = TypingSession::new("aba").unwrap();
        session.submit('x').unwrap();
        session.submit('a').unwrap();
        session.submit('x').unwrap();
        session.submit('b').unwrap();
        session.submit('x').unwrap();
        session.submit('a').unwrap();

        assert_eq!(missed_line(&session), "'a'x2, 'b'x1");
    }

    #[test]
    fn test_char_dump_shows_states_and_display_chars() {
        let mut session = TypingSession::new("a b").unwrap();
        session.submit('a').unwrap();
        session.submit('x').unwrap();
        session.submit(' ').unwrap();

        let dump = char_dump(&session);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("correct"));
        assert!(lines[1].contains('_'));
        assert!(lines[1].contains("missed"));
        assert!(lines[2].contains("current"));
    }

    #[test]
    fn test_long_text_is_previewed() {
        let long = "x".repeat(300);
        let trainer = Trainer::new(&long).unwrap();
        let report = session_report(&trainer);

        assert!(report.contains('…'));
        assert!(report.contains("(300 chars)"));
    }
}
