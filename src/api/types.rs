use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// A single post entry: a display label and a navigation target.
///
/// Posts have no identity beyond their position in the category's sequence
/// and are never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    /// Display label shown in the posts pane.
    pub title: String,
    /// Navigation target. May carry incidental surrounding whitespace;
    /// trimmed at navigation time, not here.
    pub url: String,
}

/// The backend's grouping of posts by named category.
///
/// Iteration order is the JSON document's key order. `serde_json` maps
/// would re-sort keys, so deserialization goes through a visitor that
/// appends entries as they appear. Key uniqueness is a backend guarantee
/// this client does not enforce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, Vec<Post>)>,
}

impl CategoryMap {
    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Posts for `name`, or an empty slice when the category is absent.
    ///
    /// Tolerant of stale selections: a committed category that no longer
    /// exists in a re-fetched map yields an empty list, not an error.
    pub fn posts(&self, name: &str) -> &[Post] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, posts)| posts.as_slice())
            .unwrap_or(&[])
    }
}

impl FromIterator<(String, Vec<Post>)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Post>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to post arrays")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, posts)) = access.next_entry::<String, Vec<Post>>()? {
                    entries.push((name, posts));
                }
                Ok(CategoryMap { entries })
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
