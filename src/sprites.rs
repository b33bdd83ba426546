//! ASCII sprite frames for encountered creatures.
//!
//! Frames resolve per `(species, shiny)` key: an on-disk override directory
//! is checked first (`<dir>/{normal|shiny}/<name>.txt`, frames separated by
//! a `---` line), then a built-in frame set keyed by rarity class.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// One renderable frame: multi-line ASCII art.
pub type Frame = String;

/// Errors from frame resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    NotFound(String),
    Corrupt(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound(key) => write!(f, "no frames found for {key}"),
            AssetError::Corrupt(key) => write!(f, "unreadable frames for {key}"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Resolves an ordered frame sequence for a species + variant.
pub trait FrameSource {
    fn load(&self, species: &str, rarity: &str, is_shiny: bool) -> Result<Vec<Frame>, AssetError>;
}

// ── Built-in frame sets, two frames per rarity archetype ─────────────

const FRAMES_COMMON: [&str; 2] = [
    r"  (\_/)
  ( o.o)
  / > >",
    r"  (\_/)
  ( o.o)
   < < \",
];

const FRAMES_UNCOMMON: [&str; 2] = [
    r"   /\ /\
  ( =o.o= )
   (  ^  )
    v   v",
    r"   /\ /\
  ( =-.-= )
   (  ^  )
   v     v",
];

const FRAMES_RARE: [&str; 2] = [
    r"    /\\
   ( @ @ )
  --( ~ )--
    /| |\",
    r"    /\\
   ( @ @ )
  ~~( - )~~
    \| |/",
];

const FRAMES_LEGENDARY: [&str; 2] = [
    r"  \\  ^  //
   ( O.O )
  <(  W  )>
    d   b",
    r"  //  ^  \\
   ( O.O )
  >(  W  )<
    q   p",
];

fn builtin_frames(rarity: &str) -> &'static [&'static str; 2] {
    match rarity {
        "uncommon" => &FRAMES_UNCOMMON,
        "rare" => &FRAMES_RARE,
        "legendary" | "mythic" => &FRAMES_LEGENDARY,
        _ => &FRAMES_COMMON,
    }
}

/// Sparkle overlay lines framing the shiny variant.
const SHINY_TOP: &str = " * .  *  . *";
const SHINY_BOTTOM: &str = " . *  .  * .";

/// Default frame source: disk overrides with a built-in fallback.
pub struct SpriteLibrary {
    override_dir: Option<PathBuf>,
}

impl SpriteLibrary {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    fn load_override(
        &self,
        species: &str,
        is_shiny: bool,
    ) -> Option<Result<Vec<Frame>, AssetError>> {
        let dir = self.override_dir.as_ref()?;
        let variant = if is_shiny { "shiny" } else { "normal" };
        let path = dir.join(variant).join(format!("{species}.txt"));

        match fs::read_to_string(&path) {
            Ok(text) => {
                let frames: Vec<Frame> = text
                    .split("\n---\n")
                    .map(|f| f.trim_end().to_string())
                    .filter(|f| !f.is_empty())
                    .collect();
                if frames.is_empty() {
                    Some(Err(AssetError::Corrupt(species.to_string())))
                } else {
                    Some(Ok(frames))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(_) => Some(Err(AssetError::Corrupt(species.to_string()))),
        }
    }
}

impl FrameSource for SpriteLibrary {
    fn load(&self, species: &str, rarity: &str, is_shiny: bool) -> Result<Vec<Frame>, AssetError> {
        if let Some(result) = self.load_override(species, is_shiny) {
            return result;
        }

        let base = builtin_frames(rarity);
        let frames = base
            .iter()
            .map(|art| {
                if is_shiny {
                    format!("{SHINY_TOP}\n{art}\n{SHINY_BOTTOM}")
                } else {
                    (*art).to_string()
                }
            })
            .collect();
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_frames_for_unknown_rarity_fall_back_to_common() {
        let library = SpriteLibrary::new(None);
        let frames = library.load("Ratling", "weird-tag", false).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], FRAMES_COMMON[0]);
    }

    #[test]
    fn test_shiny_variant_gets_sparkle_overlay() {
        let library = SpriteLibrary::new(None);
        let frames = library.load("Ratling", "common", true).unwrap();
        assert!(frames[0].starts_with(SHINY_TOP));
        assert!(frames[0].ends_with(SHINY_BOTTOM));
    }

    #[test]
    fn test_override_file_splits_frames_on_separator() {
        let dir = tempfile::tempdir().unwrap();
        let normal = dir.path().join("normal");
        fs::create_dir_all(&normal).unwrap();
        fs::write(normal.join("Ratling.txt"), "frame one\n---\nframe two\n").unwrap();

        let library = SpriteLibrary::new(Some(dir.path().to_path_buf()));
        let frames = library.load("Ratling", "common", false).unwrap();
        assert_eq!(frames, vec!["frame one".to_string(), "frame two".to_string()]);
    }

    #[test]
    fn test_empty_override_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let shiny = dir.path().join("shiny");
        fs::create_dir_all(&shiny).unwrap();
        fs::write(shiny.join("Ratling.txt"), "").unwrap();

        let library = SpriteLibrary::new(Some(dir.path().to_path_buf()));
        let result = library.load("Ratling", "common", true);
        assert_eq!(result, Err(AssetError::Corrupt("Ratling".to_string())));
    }

    #[test]
    fn test_missing_override_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let library = SpriteLibrary::new(Some(dir.path().to_path_buf()));
        let frames = library.load("Ratling", "rare", false).unwrap();
        assert_eq!(frames[0], FRAMES_RARE[0]);
    }
}
