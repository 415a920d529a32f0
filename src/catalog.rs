// Data model: a book record as the catalog returns it, the nine fixed
// shelf categories and the collection that maps one to the other.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::LibraryError;

/// One book as returned by the catalog. Every field is kept verbatim so a
/// saved collection round-trips whatever the API sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Author references (`/authors/OL..A`) in the order the catalog lists
    /// them. Entries without a string `key` are skipped.
    pub fn author_keys(&self) -> Vec<&str> {
        let Some(authors) = self.0.get("authors").and_then(Value::as_array) else {
            return Vec::new();
        };
        authors
            .iter()
            .filter_map(|author| {
                let key = author.get("key").and_then(Value::as_str);
                if key.is_none() {
                    warn!(title = ?self.title(), "Failed to find author key");
                }
                key
            })
            .collect()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for Record {
    type Error = LibraryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Record(fields)),
            other => Err(LibraryError::InvalidArgument(format!(
                "a book record must be a JSON object, got {other}"
            ))),
        }
    }
}

/// A simplified Dewey Decimal class. The table is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    GeneralWorks,
    PhilosophyPsychology,
    Religion,
    SocialSciences,
    Language,
    Science,
    Technology,
    Arts,
    Literature,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::GeneralWorks,
        Category::PhilosophyPsychology,
        Category::Religion,
        Category::SocialSciences,
        Category::Language,
        Category::Science,
        Category::Technology,
        Category::Arts,
        Category::Literature,
    ];

    /// Single-digit identifier used in prompts and as the JSON key.
    pub fn id(self) -> &'static str {
        match self {
            Category::GeneralWorks => "0",
            Category::PhilosophyPsychology => "1",
            Category::Religion => "2",
            Category::SocialSciences => "3",
            Category::Language => "4",
            Category::Science => "5",
            Category::Technology => "6",
            Category::Arts => "7",
            Category::Literature => "8",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::GeneralWorks => "Computer science, information and general works",
            Category::PhilosophyPsychology => "Philosophy and psychology",
            Category::Religion => "Religion",
            Category::SocialSciences => "Social sciences",
            Category::Language => "Language",
            Category::Science => "Science",
            Category::Technology => "Technology",
            Category::Arts => "Arts and recreation",
            Category::Literature => "Literature",
        }
    }

    /// The multiple-choice block shown to the operator, one `id) label`
    /// line per class.
    pub fn options() -> String {
        Category::ALL
            .iter()
            .map(|category| format!("{}) {}\n", category.id(), category.label()))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}", self.id(), self.label())
    }
}

impl FromStr for Category {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| LibraryError::NotFound(format!("Could not find category '{s}'")))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryVisitor;

        impl Visitor<'_> for CategoryVisitor {
            type Value = Category;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a category id between \"0\" and \"8\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Category, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(CategoryVisitor)
    }
}

/// Books shelved by category. Categories missing from a loaded file read as
/// empty shelves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    shelves: BTreeMap<Category, Vec<Record>>,
}

impl Collection {
    /// A collection with all nine shelves present and empty.
    pub fn new() -> Self {
        Collection {
            shelves: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, category: Category, record: Record) {
        self.shelves.entry(category).or_default().push(record);
    }

    pub fn records(&self, category: Category) -> &[Record] {
        self.shelves.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with a shelf entry, present even when empty.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.shelves.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Record])> {
        self.shelves
            .iter()
            .map(|(category, records)| (*category, records.as_slice()))
    }

    /// Total number of books across every shelf.
    pub fn len(&self) -> usize {
        self.shelves.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
