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

/// One row of a vocabulary table.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct WordRecord {
    korean: String,
    japanese: String,
    auxiliary: Option<String>,
    review: bool,
}

impl WordRecord {
    /// Build a record. Returns `None` when the Korean or Japanese text is
    /// blank, since such rows carry nothing to study.
    pub fn new(
        korean: &str,
        japanese: &str,
        auxiliary: Option<&str>,
        review: bool,
    ) -> Option<Self> {
        let korean = korean.trim();
        let japanese = japanese.trim();
        if korean.is_empty() || japanese.is_empty() {
            return None;
        }
        let auxiliary = auxiliary
            .map(str::trim)
            .filter(|aux| !aux.is_empty())
            .map(str::to_string);
        Some(Self {
            korean: korean.to_string(),
            japanese: japanese.to_string(),
            auxiliary,
            review,
        })
    }

    pub fn korean(&self) -> &str {
        &self.korean
    }

    pub fn japanese(&self) -> &str {
        &self.japanese
    }

    /// The kanji spelling, for records from the kanji book.
    pub fn auxiliary(&self) -> Option<&str> {
        self.auxiliary.as_deref()
    }

    /// Whether the review column flags this record.
    pub fn review(&self) -> bool {
        self.review
    }
}

/// A named group of records, introduced by a `### ` header.
#[derive(Clone, PartialEq, Debug)]
pub struct Category {
    name: String,
    records: Vec<WordRecord>,
}

impl Category {
    pub fn with_records(name: impl Into<String>, records: Vec<WordRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<WordRecord> {
        self.records
    }

    pub fn push(&mut self, record: WordRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
