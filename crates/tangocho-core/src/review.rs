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

use crate::parser::Parser;
use crate::types::document::VocabularyDocument;
use crate::types::domain::DomainKind;
use crate::types::record::Category;
use crate::types::record::WordRecord;

/// The category records of the consolidated review document are read into.
/// That document has no category headers of its own.
pub const REVIEW_CATEGORY: &str = "복습";

/// The flagged records of one vocabulary book.
#[derive(Clone, PartialEq, Debug)]
pub struct DomainReview {
    kind: DomainKind,
    categories: Vec<Category>,
}

impl DomainReview {
    /// Keep only the records whose review marker is set. Categories left
    /// with no records are dropped.
    pub fn from_document(document: &VocabularyDocument) -> Self {
        let categories = document
            .categories()
            .iter()
            .map(|category| {
                let flagged: Vec<WordRecord> = category
                    .records()
                    .iter()
                    .filter(|r| r.review())
                    .cloned()
                    .collect();
                Category::with_records(category.name(), flagged)
            })
            .filter(|category| !category.is_empty())
            .collect();
        Self {
            kind: document.kind(),
            categories,
        }
    }

    pub fn kind(&self) -> DomainKind {
        self.kind
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn count(&self) -> usize {
        self.categories.iter().map(|c| c.records().len()).sum()
    }

    pub fn records(&self) -> impl Iterator<Item = &WordRecord> {
        self.categories.iter().flat_map(|c| c.records().iter())
    }
}

/// Flagged records from every book, grouped by the book they came from.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewSet {
    domains: Vec<DomainReview>,
}

impl ReviewSet {
    /// Filter each document. Domains keep the order the documents are given
    /// in, which is the order they are written out.
    pub fn collect<'a>(documents: impl IntoIterator<Item = &'a VocabularyDocument>) -> Self {
        let domains = documents
            .into_iter()
            .map(DomainReview::from_document)
            .collect();
        Self { domains }
    }

    pub fn domains(&self) -> &[DomainReview] {
        &self.domains
    }

    /// Number of flagged records from books of the given kind.
    pub fn count(&self, kind: DomainKind) -> usize {
        self.domains
            .iter()
            .filter(|d| d.kind() == kind)
            .map(DomainReview::count)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.domains.iter().map(DomainReview::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Records in domain order, then category order, then file order.
    pub fn records(&self) -> impl Iterator<Item = &WordRecord> {
        self.domains.iter().flat_map(DomainReview::records)
    }
}

/// Parse a consolidated review document back into records. The document
/// holds a single table, so only its first line is a header.
pub fn parse_review_document(text: &str) -> VocabularyDocument {
    Parser::new(DomainKind::Kanji)
        .with_implicit_category(REVIEW_CATEGORY)
        .with_single_header()
        .parse(text)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::markdown::render_review_document;
    use crate::parser::parse_document;

    const HIRAGANA: &str = "\
### 인사
| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 안녕 | こんにちは | 1 |
| 감사 | ありがとう |  |
### 동물
| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 개 | いぬ |  |
### 숫자
| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 열 | じゅう | 10 |
";

    const KATAKANA: &str = "\
### 음료
| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 커피 | コーヒー | 1 |
| 주스 | ジュース | 1 |
";

    const KANJI: &str = "\
### 학교
| 한국어 | 일본어 | 한자 | 복습 |
|--------|--------|------|------|
| 학생 | がくせい | 学生 | 1 |
| 선생님 | せんせい | 先生 |  |
";

    fn documents() -> Vec<VocabularyDocument> {
        vec![
            parse_document(DomainKind::Hiragana, HIRAGANA),
            parse_document(DomainKind::Katakana, KATAKANA),
            parse_document(DomainKind::Kanji, KANJI),
        ]
    }

    type Triple = (String, String, Option<String>);

    fn triples<'a>(records: impl Iterator<Item = &'a WordRecord>) -> HashSet<Triple> {
        records
            .map(|r| {
                (
                    r.korean().to_string(),
                    r.japanese().to_string(),
                    r.auxiliary().map(str::to_string),
                )
            })
            .collect()
    }

    #[test]
    fn test_counts() {
        let documents = documents();
        let set = ReviewSet::collect(&documents);
        assert_eq!(set.count(DomainKind::Hiragana), 2);
        assert_eq!(set.count(DomainKind::Katakana), 2);
        assert_eq!(set.count(DomainKind::Kanji), 1);
        assert_eq!(set.total(), 5);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_unflagged_categories_are_dropped() {
        let documents = documents();
        let set = ReviewSet::collect(&documents);
        let hiragana = &set.domains()[0];
        let names: Vec<&str> = hiragana.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["인사", "숫자"]);
    }

    #[test]
    fn test_record_order() {
        let documents = documents();
        let set = ReviewSet::collect(&documents);
        let korean: Vec<&str> = set.records().map(|r| r.korean()).collect();
        assert_eq!(korean, vec!["안녕", "열", "커피", "주스", "학생"]);
    }

    #[test]
    fn test_empty_documents() {
        let documents: Vec<VocabularyDocument> = DomainKind::ALL
            .into_iter()
            .map(VocabularyDocument::empty)
            .collect();
        let set = ReviewSet::collect(&documents);
        assert!(set.is_empty());
        assert_eq!(set.total(), 0);
    }

    #[test]
    fn test_round_trip_of_flagged_subset() {
        let documents = documents();
        let set = ReviewSet::collect(&documents);
        let written = render_review_document(&set);
        let reparsed = parse_review_document(&written);
        assert_eq!(triples(reparsed.records()), triples(set.records()));
        assert_eq!(reparsed.record_count(), set.total());
        assert!(reparsed.records().all(WordRecord::review));
    }

    #[test]
    fn test_round_trip_of_header_lookalike_record() {
        let document = parse_document(
            DomainKind::Kanji,
            "### 용어\n| 한국어 | 일본어 | 한자 | 복습 |\n|---|---|---|---|\n|한국어|일본어|漢|1|\n",
        );
        let set = ReviewSet::collect([&document]);
        assert_eq!(set.total(), 1);
        let reparsed = parse_review_document(&render_review_document(&set));
        assert_eq!(triples(reparsed.records()), triples(set.records()));
    }

    #[test]
    fn test_round_trip_of_empty_set() {
        let set = ReviewSet::collect(&[VocabularyDocument::empty(DomainKind::Hiragana)]);
        let reparsed = parse_review_document(&render_review_document(&set));
        assert!(reparsed.is_empty());
    }
}
