// UI layer: the three interactive sessions (sort, find, recommend). Each
// one talks to the operator through a `Prompter` and shows progress with
// `indicatif` while the network is busy.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

use crate::api::Catalog;
use crate::catalog::{Category, Collection, Record};
use crate::classifier::classify;
use crate::collector::collect_with_progress;
use crate::error::{LibraryError, Result};
use crate::prompt::Prompter;
use crate::query::{check_count, recommend, search, shelf};
use crate::store::save_collection;

/// Fetch `count` random books, have the operator shelve them and save the
/// result to `output`.
pub fn sort_session<C, P>(catalog: &C, count: usize, output: &Path, prompter: &mut P) -> Result<Collection>
where
    C: Catalog + ?Sized,
    P: Prompter + ?Sized,
{
    let bar = ProgressBar::new(count as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} fetching books {pos}/{len} {wide_bar}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    let records = collect_with_progress(catalog, count, || bar.inc(1));
    bar.finish_and_clear();
    let records = records?;

    if records.len() < count {
        prompter.say(&format!(
            "Only {} of {} books could be fetched",
            records.len(),
            count
        ));
    }

    let collection = classify(records, prompter)?;
    save_collection(output, &collection)?;
    prompter.say(&format!("{} saved", output.display()));
    Ok(collection)
}

/// Ask for a search term and look it up in `collection`.
pub fn find_session<C, P>(collection: &Collection, catalog: &C, prompter: &mut P) -> Result<Vec<Record>>
where
    C: Catalog + ?Sized,
    P: Prompter + ?Sized,
{
    let query = ask_non_empty(prompter, "Enter an author's name or book title")?;

    // Author names are resolved over the network, one call per author.
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Searching...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    let results = search(collection, &query, catalog);
    spinner.finish_and_clear();

    Ok(results)
}

/// Ask for a category and a number of books, then pick that many at random.
///
/// An unknown or empty category ends the session. A bad count is asked
/// again.
pub fn recommend_session<P, R>(collection: &Collection, prompter: &mut P, rng: &mut R) -> Result<Vec<Record>>
where
    P: Prompter + ?Sized,
    R: Rng + ?Sized,
{
    prompter.say(&format!("What kind of book would you like?\n{}", Category::options()));
    let answer = ask_non_empty(prompter, "Category")?;
    let category: Category = answer.parse()?;
    let books = shelf(collection, category)?;

    let range = if books.len() > 1 {
        format!("1-{}", books.len())
    } else {
        "1".to_string()
    };

    let count = loop {
        let answer = prompter.ask(&format!("How many books would you like? [{range}]"))?;
        let Ok(count) = answer.parse::<i64>() else {
            continue;
        };
        if count < 1 {
            prompter.say("Please ask for 1 or more books");
            continue;
        }
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        if check_count(books, count).is_err() {
            prompter.say("There are not that many books in this category");
            continue;
        }
        break count;
    };

    recommend(collection, category.id(), count, rng)
}

/// Print records to stdout as a pretty JSON array.
pub fn print_records(records: &[Record]) -> Result<()> {
    println!("{}", records_json(records)?);
    Ok(())
}

fn records_json(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|source| LibraryError::Encode {
        target: "stdout".to_string(),
        source,
    })
}

fn ask_non_empty<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<String> {
    loop {
        let answer = prompter.ask(prompt)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use crate::store::load_collection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct ShelfCatalog {
        served: AtomicUsize,
    }

    impl Catalog for ShelfCatalog {
        fn fetch_random_record(&self) -> Result<Option<Record>> {
            let n = self.served.fetch_add(1, Ordering::SeqCst);
            Ok(Some(
                Record::try_from(json!({
                    "title": format!("Volume {n}"),
                    "authors": [{"key": "/authors/OL9A"}]
                }))
                .unwrap(),
            ))
        }

        fn author_name(&self, _author_key: &str) -> Result<String> {
            Ok("Ursula K. Le Guin".to_string())
        }
    }

    fn catalog() -> ShelfCatalog {
        ShelfCatalog {
            served: AtomicUsize::new(0),
        }
    }

    fn three_literature_books() -> Collection {
        serde_json::from_value(json!({
            "0": [],
            "8": [
                {"title": "A Wizard of Earthsea", "authors": []},
                {"title": "The Lathe of Heaven", "authors": []},
                {"title": "The Dispossessed", "authors": []}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_sort_session_saves_classified_books() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("inventory.json");
        let mut prompter = ScriptedPrompter::new(["8", "x", "7", "8"]);

        let collection = sort_session(&catalog(), 3, &output, &mut prompter).unwrap();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.records(Category::Literature).len(), 2);
        assert_eq!(collection.records(Category::Arts).len(), 1);
        assert_eq!(load_collection(&output).unwrap(), collection);
        assert!(prompter.transcript().iter().any(|line| line.ends_with("inventory.json saved")));
    }

    #[test]
    fn test_sort_session_rejects_zero_books() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let result = sort_session(&catalog(), 0, &dir.path().join("x.json"), &mut prompter);
        assert!(matches!(result, Err(LibraryError::InvalidArgument(_))));
        assert!(!dir.path().join("x.json").exists());
    }

    #[test]
    fn test_find_session_reasks_on_empty_query() {
        let mut prompter = ScriptedPrompter::new(["", "  ", "le guin"]);
        let results = find_session(&three_literature_books(), &catalog(), &mut prompter).unwrap();
        // none of the fixture books carry authors
        assert!(results.is_empty());
        assert_eq!(prompter.remaining(), 0);

        let mut prompter = ScriptedPrompter::new(["HEAVEN"]);
        let results = find_session(&three_literature_books(), &catalog(), &mut prompter).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title(), Some("The Lathe of Heaven"));
    }

    #[test]
    fn test_recommend_session_reasks_until_count_fits() {
        let mut prompter = ScriptedPrompter::new(["", "8", "many", "0", "4", "2"]);
        let mut rng = StdRng::seed_from_u64(3);

        let picked = recommend_session(&three_literature_books(), &mut prompter, &mut rng).unwrap();

        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
        let transcript = prompter.transcript();
        assert!(transcript.iter().any(|line| line == "How many books would you like? [1-3]"));
        assert!(transcript.iter().any(|line| line == "Please ask for 1 or more books"));
        assert!(transcript
            .iter()
            .any(|line| line == "There are not that many books in this category"));
    }

    #[test]
    fn test_recommend_session_single_book_range() {
        let collection: Collection =
            serde_json::from_value(json!({"0": [{"title": "Intro to CS", "authors": []}]})).unwrap();
        let mut prompter = ScriptedPrompter::new(["0", "1"]);
        let mut rng = StdRng::seed_from_u64(0);

        let picked = recommend_session(&collection, &mut prompter, &mut rng).unwrap();

        assert_eq!(picked[0].title(), Some("Intro to CS"));
        assert!(prompter
            .transcript()
            .iter()
            .any(|line| line == "How many books would you like? [1]"));
    }

    #[test]
    fn test_records_json_is_a_pretty_array() {
        let books = three_literature_books();
        let text = records_json(books.records(Category::Literature)).unwrap();
        assert!(text.starts_with("[\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[1]["title"], json!("The Lathe of Heaven"));
    }

    #[test]
    fn test_recommend_session_fails_on_empty_or_unknown_category() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut prompter = ScriptedPrompter::new(["0"]);
        let result = recommend_session(&three_literature_books(), &mut prompter, &mut rng);
        assert!(matches!(result, Err(LibraryError::EmptyCategory(Category::GeneralWorks))));

        let mut prompter = ScriptedPrompter::new(["fiction"]);
        let result = recommend_session(&three_literature_books(), &mut prompter, &mut rng);
        assert!(matches!(result, Err(LibraryError::NotFound(_))));
    }
}
