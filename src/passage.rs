use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static PASSAGE_DIR: Dir = include_dir!("src/passages");

/// An immutable reference text a participant reproduces during a round.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Passage {
    pub title: String,
    pub text: String,
}

/// Fixed, ordered catalog of candidate passages, embedded at compile time.
#[derive(Deserialize, Clone, Debug)]
pub struct PassageCatalog {
    passages: Vec<Passage>,
}

impl PassageCatalog {
    pub fn embedded() -> Self {
        read_catalog_from_file("catalog.json").unwrap()
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Passage at `index`; an out-of-range index falls back to the first entry.
    pub fn get(&self, index: usize) -> &Passage {
        self.passages.get(index).unwrap_or(&self.passages[0])
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.passages.iter().map(|p| p.title.as_str())
    }
}

fn read_catalog_from_file(file_name: &str) -> Result<PassageCatalog, Box<dyn Error>> {
    let file = PASSAGE_DIR
        .get_file(file_name)
        .expect("Passage catalog not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let catalog = from_str(file_as_str).expect("Unable to deserialize passage catalog");

    Ok(catalog)
}
