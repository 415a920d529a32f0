// Operator-driven shelving of freshly collected books.

use tracing::debug;

use crate::catalog::{Category, Collection, Record};
use crate::error::Result;
use crate::prompt::Prompter;

/// Title shown for a record the catalog sent without one.
const UNTITLED: &str = "(untitled)";

/// Ask the operator to place each record on one of the nine shelves.
///
/// Records are handled in order and each one is asked about until a valid
/// category id comes back; there is no retry limit. The returned collection
/// always carries all nine shelves.
///
/// # Errors
///
/// Only fails when the prompter does, e.g. when input is closed mid-session.
pub fn classify<P: Prompter + ?Sized>(records: Vec<Record>, prompter: &mut P) -> Result<Collection> {
    let options = Category::options();
    let mut collection = Collection::new();

    for record in records {
        let category = loop {
            let title = record.title().unwrap_or(UNTITLED);
            prompter.say(&format!("Where should \"{title}\" go?\n{options}"));
            let answer = prompter.ask("Category")?;
            match answer.parse::<Category>() {
                Ok(category) => break category,
                Err(_) => prompter.say("Invalid answer\n"),
            }
        };
        debug!(title = ?record.title(), category = category.id(), "Shelved book");
        collection.push(category, record);
    }

    Ok(collection)
}
