// Library root
// ------------
// This crate exposes the library surface behind the `dewey-shelf` CLI.
// The binary (`main.rs`) parses arguments and hands off to `ui`.
//
// Module responsibilities:
// - `catalog`: the data model (book records, the nine Dewey classes and
//   the shelved collection).
// - `api`: HTTP interactions with the Open Library catalog.
// - `collector`: fetches a batch of random books concurrently.
// - `classifier`: asks the operator to shelve each fetched book.
// - `query`: search and random recommendations over a saved collection.
// - `store`: reads and writes the collection file.
// - `prompt`: operator input, from a terminal, a pipe or a script.
// - `ui`: the sort, find and recommend sessions tying it all together.
pub mod api;
pub mod catalog;
pub mod classifier;
pub mod collector;
pub mod error;
pub mod prompt;
pub mod query;
pub mod store;
pub mod ui;

pub use api::{Catalog, CatalogClient};
pub use catalog::{Category, Collection, Record};
pub use error::LibraryError;
