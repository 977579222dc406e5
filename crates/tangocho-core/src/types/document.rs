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

use crate::types::domain::DomainKind;
use crate::types::record::Category;
use crate::types::record::WordRecord;

/// A parsed vocabulary book.
#[derive(Clone, PartialEq, Debug)]
pub struct VocabularyDocument {
    kind: DomainKind,
    categories: Vec<Category>,
    /// Table rows that were dropped for having too few fields or blank text.
    skipped_rows: usize,
}

impl VocabularyDocument {
    /// A document with no categories. Missing files are read as this.
    pub fn empty(kind: DomainKind) -> Self {
        Self {
            kind,
            categories: Vec::new(),
            skipped_rows: 0,
        }
    }

    pub fn new(kind: DomainKind, categories: Vec<Category>, skipped_rows: usize) -> Self {
        Self {
            kind,
            categories,
            skipped_rows,
        }
    }

    pub fn kind(&self) -> DomainKind {
        self.kind
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// All records, category by category, in file order.
    pub fn records(&self) -> impl Iterator<Item = &WordRecord> {
        self.categories.iter().flat_map(|c| c.records().iter())
    }

    pub fn record_count(&self) -> usize {
        self.categories.iter().map(|c| c.records().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Pool every record, dropping the category boundaries.
    pub fn into_records(self) -> Vec<WordRecord> {
        self.categories
            .into_iter()
            .flat_map(Category::into_records)
            .collect()
    }
}
