use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Built-in vocabulary file layout
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(name: &str) -> Result<Self, Box<dyn Error>> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| format!("unknown language: {name}"))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| format!("language file {name} is not utf-8"))?;
        Ok(serde_json::from_str(contents)?)
    }

    /// Names of every embedded vocabulary
    pub fn available() -> Vec<String> {
        let mut names: Vec<String> = LANG_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|e| e == "json"))
            .filter_map(|f| f.path().file_stem()?.to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Read-only vocabulary the spawners draw from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordSource {
    words: Vec<String>,
}

impl WordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn from_language(name: &str) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(Language::load(name)?.words))
    }

    /// Load a user word file: either a JSON array of strings or one word per line
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path.as_ref())?;
        let source = if text.trim_start().starts_with('[') {
            Self::new(serde_json::from_str::<Vec<String>>(&text)?)
        } else {
            Self::new(text.lines())
        };
        log::info!(
            "loaded {} words from {}",
            source.len(),
            path.as_ref().display()
        );
        Ok(source)
    }

    /// Uniformly random entry; `None` when the source is empty
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }

    /// `n` distinct entries in random order (fewer if the source is smaller)
    pub fn shuffled<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<String> {
        self.words.choose_multiple(rng, n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
