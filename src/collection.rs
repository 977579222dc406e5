// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env::current_dir;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use tangocho_core::error::Fallible;
use tangocho_core::error::fail;
use tangocho_core::parser::Parser;
use tangocho_core::review::parse_review_document;
use tangocho_core::types::document::VocabularyDocument;
use tangocho_core::types::domain::DomainKind;

use crate::config::Config;

/// A directory holding the vocabulary books, and the files derived from
/// them.
pub struct Collection {
    directory: PathBuf,
    config: Config,
}

impl Collection {
    /// Open the collection in the given directory, or in the current
    /// working directory.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        Ok(Self { directory, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document_path(&self, kind: DomainKind) -> PathBuf {
        self.directory.join(self.config.document_file(kind))
    }

    pub fn review_path(&self) -> PathBuf {
        self.directory.join(&self.config.files.review)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.directory.join(&self.config.files.results_dir)
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.directory.join(&self.config.audio.dir)
    }

    /// Read and parse the book of the given kind. A book that cannot be
    /// read is treated as empty.
    pub fn read_document(&self, kind: DomainKind) -> VocabularyDocument {
        let path = self.document_path(kind);
        let document = match read_text(&path) {
            Some(text) => Parser::new(kind).parse(&text),
            None => VocabularyDocument::empty(kind),
        };
        log::debug!(
            "{}: {} records in {} categories, {} rows skipped",
            path.display(),
            document.record_count(),
            document.categories().len(),
            document.skipped_rows()
        );
        document
    }

    /// Read the consolidated review document. Missing means empty.
    pub fn read_review_document(&self) -> VocabularyDocument {
        match read_text(&self.review_path()) {
            Some(text) => parse_review_document(&text),
            None => VocabularyDocument::empty(DomainKind::Kanji),
        }
    }
}

fn read_text(path: &Path) -> Option<String> {
    match read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Skipping missing file {}", path.display());
            None
        }
        Err(e) => {
            log::warn!("Could not read {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;
    use crate::helper::path_string;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_read_documents() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        let collection = Collection::new(Some(path_string(&dir)))?;
        let hiragana = collection.read_document(DomainKind::Hiragana);
        assert_eq!(hiragana.kind(), DomainKind::Hiragana);
        assert_eq!(hiragana.record_count(), 4);
        assert_eq!(hiragana.categories().len(), 2);
        let kanji = collection.read_document(DomainKind::Kanji);
        assert_eq!(kanji.record_count(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_document_is_empty() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        let collection = Collection::new(Some(path_string(&dir)))?;
        let katakana = collection.read_document(DomainKind::Katakana);
        assert!(katakana.is_empty());
        assert_eq!(katakana.kind(), DomainKind::Katakana);
        Ok(())
    }

    #[test]
    fn test_unreadable_document_is_empty() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        // A directory where the file should be cannot be read as text.
        std::fs::create_dir(dir.path().join("카타카나.md"))?;
        let collection = Collection::new(Some(path_string(&dir)))?;
        assert!(collection.read_document(DomainKind::Katakana).is_empty());
        Ok(())
    }

    #[test]
    fn test_configured_paths() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        std::fs::write(
            dir.path().join("tangocho.toml"),
            "[files]\nreview = \"review.md\"\nresults_dir = \"results\"\n",
        )?;
        let collection = Collection::new(Some(path_string(&dir)))?;
        assert!(collection.review_path().ends_with("review.md"));
        assert!(collection.results_dir().ends_with("results"));
        assert!(collection.audio_dir().ends_with("audio"));
        Ok(())
    }
}
