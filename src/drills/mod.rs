use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;

use crate::error::TypingError;

static DRILL_DIR: Dir = include_dir!("src/drills");

/// Drill name used when the caller picks nothing.
pub const FALLBACK: &str = "lorem";

/// A bundled practice text.
#[derive(Deserialize, Clone, Debug)]
pub struct Drill {
    pub name: String,
    pub title: String,
    pub text: String,
}

/// Load a bundled drill by name.
pub fn load(name: &str) -> Result<Drill, TypingError> {
    let file = DRILL_DIR
        .get_file(format!("{}.json", name))
        .ok_or_else(|| TypingError::UnknownDrill(name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret drill file as a string");

    let drill = from_str(file_as_str).expect("Unable to deserialize drill json");

    Ok(drill)
}

/// Names of all bundled drills, sorted.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = DRILL_DIR
        .files()
        .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|f| f.path().file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Pick one bundled drill at random.
pub fn random() -> Drill {
    let names = names();
    let name = names
        .choose(&mut rand::thread_rng())
        .expect("No drills bundled");
    load(name).expect("Bundled drill failed to load")
}

/// The drill used when neither a text nor a drill is given.
pub fn fallback() -> Drill {
    load(FALLBACK).expect("Fallback drill missing from bundle")
}
