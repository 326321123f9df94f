use serde::{Deserialize, Serialize};

/// Glyphs offered for placement, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    glyphs: Vec<String>,
}

impl From<Vec<String>> for Palette {
    fn from(glyphs: Vec<String>) -> Self {
        Self::new(glyphs)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.glyphs
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(["⭐", "❤️", "😎", "🎉", "🦷", "🌈", "🔥", "👍"])
    }
}

impl Palette {
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            glyphs: glyphs
                .into_iter()
                .map(Into::into)
                .filter(|g: &String| !g.trim().is_empty())
                .collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.glyphs.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
