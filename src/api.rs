// API client module: a small blocking HTTP client for the Open Library
// catalog. One client is built per session and shared by reference across
// the collector's worker threads, so connections are pooled.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::Record;
use crate::error::{LibraryError, Result};

/// Catalog used when `OPEN_LIBRARY_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";

/// `/random` redirects to `/books/<edition id>/<slug>`.
static EDITION_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/books/(\w+)").expect("edition path pattern is valid"));

/// What the collector and the search need from a catalog. `CatalogClient`
/// is the real implementation; tests substitute their own.
pub trait Catalog: Sync {
    /// Fetch one random book. `Ok(None)` means the redirect did not point at
    /// a book edition, which is a miss rather than a failure.
    fn fetch_random_record(&self) -> Result<Option<Record>>;

    /// Resolve an author reference such as `/authors/OL26320A` to a display
    /// name.
    fn author_name(&self, author_key: &str) -> Result<String>;
}

/// Blocking client bound to one catalog host.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct AuthorDocument {
    name: Option<String>,
}

impl CatalogClient {
    /// Create a client configured from the environment variable
    /// `OPEN_LIBRARY_URL`, falling back to the public Open Library host.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OPEN_LIBRARY_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.into());
        Self::new(&base_url)
    }

    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(CatalogClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Catalog for CatalogClient {
    fn fetch_random_record(&self) -> Result<Option<Record>> {
        let url = format!("{}/random", self.base_url);
        let res = self.client.get(&url).send()?;

        let Some(edition) = edition_id(res.url().path()) else {
            debug!(landed = %res.url(), "Random redirect did not land on a book edition");
            return Ok(None);
        };

        let url = format!("{}/books/{}.json", self.base_url, edition);
        info!("GET {url}");
        let record: Record = self.client.get(&url).send()?.error_for_status()?.json()?;
        Ok(Some(record))
    }

    fn author_name(&self, author_key: &str) -> Result<String> {
        let url = format!("{}{}.json", self.base_url, author_key);
        debug!("GET {url}");
        let author: AuthorDocument = self.client.get(&url).send()?.error_for_status()?.json()?;
        author
            .name
            .ok_or(LibraryError::MissingField { field: "name", url })
    }
}

/// Pull the edition id out of a `/books/<id>/...` path.
pub fn edition_id(path: &str) -> Option<&str> {
    EDITION_PATH
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_id_from_redirect_path() {
        assert_eq!(edition_id("/books/OL7353617M/Fantastic_Mr._Fox"), Some("OL7353617M"));
        assert_eq!(edition_id("/books/OL7353617M"), Some("OL7353617M"));
    }

    #[test]
    fn test_edition_id_misses_other_paths() {
        assert_eq!(edition_id("/random"), None);
        assert_eq!(edition_id("/works/OL45804W/Fantastic_Mr_Fox"), None);
        assert_eq!(edition_id("/authors/OL34184A"), None);
        assert_eq!(edition_id("/books/"), None);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = CatalogClient::new("http://localhost:9000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }
}
