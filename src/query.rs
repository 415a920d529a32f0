// Read-only queries over a saved collection: text search and random
// recommendations.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::api::Catalog;
use crate::catalog::{Category, Collection, Record};
use crate::error::{LibraryError, Result};

/// Case-insensitive substring search over titles and author names.
///
/// Author names are looked up through `catalog`, once per distinct author
/// key for the duration of the call. A record is appended once for every
/// author whose name matches and once more if its title matches, so a book
/// can appear several times. Failed lookups are logged and count as no
/// match.
pub fn search<C: Catalog + ?Sized>(collection: &Collection, query: &str, catalog: &C) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    let mut names: HashMap<String, Option<String>> = HashMap::new();
    let mut results = Vec::new();

    for (category, records) in collection.iter() {
        for record in records {
            for key in record.author_keys() {
                let name = names.entry(key.to_string()).or_insert_with(|| {
                    catalog
                        .author_name(key)
                        .map_err(|error| warn!(author = key, %error, "Failed to resolve author"))
                        .ok()
                });
                if name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
                {
                    debug!(category = category.id(), author = key, "Author matched");
                    results.push(record.clone());
                }
            }

            match record.title() {
                Some(title) if title.to_lowercase().contains(&needle) => {
                    debug!(category = category.id(), title, "Title matched");
                    results.push(record.clone());
                }
                Some(_) => {}
                None => warn!(category = category.id(), "Failed to find title"),
            }
        }
    }

    results
}

/// Draw `count` distinct books at random from one shelf.
///
/// # Errors
///
/// - [`LibraryError::NotFound`] when `category_id` is not one of the nine ids
/// - [`LibraryError::EmptyCategory`] when that shelf has no books
/// - [`LibraryError::InvalidArgument`] when `count` is zero or larger than the shelf
pub fn recommend<R: Rng + ?Sized>(
    collection: &Collection,
    category_id: &str,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Record>> {
    let category: Category = category_id.parse()?;
    let shelf = shelf(collection, category)?;
    check_count(shelf, count)?;
    Ok(shelf.choose_multiple(rng, count).cloned().collect())
}

/// The books on a shelf, or an error if there are none to pick from.
pub fn shelf(collection: &Collection, category: Category) -> Result<&[Record]> {
    let records = collection.records(category);
    if records.is_empty() {
        return Err(LibraryError::EmptyCategory(category));
    }
    Ok(records)
}

/// Validate a requested recommendation count against a shelf.
pub fn check_count(shelf: &[Record], count: usize) -> Result<()> {
    if count < 1 {
        return Err(LibraryError::InvalidArgument(
            "Please ask for 1 or more books".to_string(),
        ));
    }
    if count > shelf.len() {
        return Err(LibraryError::InvalidArgument(format!(
            "There are not that many books in this category (asked for {count}, have {})",
            shelf.len()
        )));
    }
    Ok(())
}
