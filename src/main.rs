use clap::{error::ErrorKind, CommandFactory, Parser};
use log::debug;
use std::{error::Error, time::Duration};

use slyde::{
    config::{Config, ConfigStore, FileConfigStore},
    drills,
    error::TypingError,
    report,
    runtime::{FixedTicker, Runner, ScriptedKeys, TrainerEvent},
    session::Keystroke,
    trainer::Trainer,
};

/// headless sliding-text typing trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A headless sliding-text typing trainer: replays a keystroke script against a practice text, tracks every character, and prints live-session metrics as a plain-text report."
)]
pub struct Cli {
    /// practice text to type
    #[clap(short = 't', long)]
    text: Option<String>,

    /// bundled drill to practice
    #[clap(short = 'd', long)]
    drill: Option<String>,

    /// pick a random bundled drill
    #[clap(long)]
    random_drill: bool,

    /// list bundled drills and exit
    #[clap(long)]
    list_drills: bool,

    /// keystrokes to replay against the text (defaults to the text itself)
    #[clap(short = 'i', long)]
    input: Option<String>,

    /// delay between replayed keystrokes in milliseconds
    #[clap(long)]
    key_delay_ms: Option<u64>,

    /// interval between metric refreshes in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// append a per-character state dump to the report
    #[clap(long)]
    chars: bool,
}

/// Practice text resolution order: explicit text, named drill, random
/// drill, configured drill, bundled fallback.
fn resolve_text(cli: &Cli, config: &Config) -> Result<String, TypingError> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(name) = &cli.drill {
        return Ok(drills::load(name)?.text);
    }
    if cli.random_drill {
        return Ok(drills::random().text);
    }
    if let Some(name) = &config.drill {
        return Ok(drills::load(name)?.text);
    }
    Ok(drills::fallback().text)
}

/// Drive one session to completion: keys feed the trainer, ticks refresh
/// the metrics, and the loop ends on the finishing keystroke or a Stop.
fn run_session(
    trainer: &mut Trainer,
    script: &str,
    key_delay: Duration,
    tick: Duration,
) -> Result<(), Box<dyn Error>> {
    let events = ScriptedKeys::new(script, key_delay);
    let ticker = FixedTicker::new(tick);
    let runner = Runner::new(events, ticker);

    loop {
        match runner.step() {
            TrainerEvent::Key(c) => {
                if let Keystroke::Advance { finished: true, .. } = trainer.handle_key(c)? {
                    break;
                }
            }
            TrainerEvent::Tick => trainer.tick(),
            TrainerEvent::Stop => {
                trainer.stop();
                break;
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_drills {
        for name in drills::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = FileConfigStore::new().load();
    debug!("config: {:?}", config);

    let text = match resolve_text(&cli, &config) {
        Ok(text) => text,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };
    let key_delay = Duration::from_millis(cli.key_delay_ms.unwrap_or(config.key_delay_ms));
    let tick = Duration::from_millis(cli.tick_ms.unwrap_or(config.tick_ms));
    let script = cli.input.clone().unwrap_or_else(|| text.clone());

    let mut trainer = Trainer::new(&text)?;
    debug!("replaying {} keys over {} chars", script.chars().count(), text.chars().count());
    run_session(&mut trainer, &script, key_delay, tick)?;

    println!("{}", report::session_report(&trainer));
    if cli.chars {
        println!();
        println!("{}", report::char_dump(trainer.session()));
    }

    Ok(())
}
