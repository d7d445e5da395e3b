//! Level definitions for BASTION.
//!
//! JSON level files with character-row layouts, plus deterministic
//! generated layouts used when a file is missing or malformed. Level
//! loading never fails: configuration errors degrade to the generated
//! default.

pub use bastion_core as core;

pub mod builtin;
pub mod format;

pub use format::LevelDef;

/// Load a level by number. Tries `levels/level{n}.json` relative to the
/// working directory; any IO or parse failure falls back to the generated
/// layout for that number.
pub fn load_level(number: u32) -> LevelDef {
    let path = format!("levels/level{number}.json");
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str::<LevelDef>(&text) {
            Ok(def) => def,
            Err(err) => {
                log::warn!("{path}: malformed level file ({err}); using generated layout");
                builtin::generate(number)
            }
        },
        Err(_) => builtin::generate(number),
    }
}
