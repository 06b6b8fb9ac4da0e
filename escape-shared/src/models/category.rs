use serde::{Deserialize, Serialize};

/// The closed set of experience categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Adventure,
    Food,
    Art,
    Music,
    Workshop,
    Wellness,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Adventure => "Adventure",
            Category::Food => "Food",
            Category::Art => "Art",
            Category::Music => "Music",
            Category::Workshop => "Workshop",
            Category::Wellness => "Wellness",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
