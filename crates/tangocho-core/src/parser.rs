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

//! Reads the Markdown tables of a vocabulary book.
//!
//! A book is ordinary Markdown: prose, a `### ` header per category, and a
//! pipe table under each header. Only the tables matter here. Anything the
//! parser does not recognise is passed over, and a row that cannot be read
//! is dropped and counted rather than reported.

use crate::error::Fallible;
use crate::types::document::VocabularyDocument;
use crate::types::domain::DomainKind;
use crate::types::domain::TableSchema;
use crate::types::record::Category;
use crate::types::record::WordRecord;

const CATEGORY_PREFIX: &str = "### ";
const KOREAN_LABEL: &str = "| 한국어 |";
const JAPANESE_LABEL: &str = "| 일본어 |";
const SEPARATOR_PREFIX: &str = "|---";
const BACK_TO_TOP: &str = "[↑ 맨 위로]";
const RULE_PREFIX: &str = "---";

/// A marker cell flags its row when it contains this character anywhere,
/// so `10` and `21` flag the row as well as `1`.
const REVIEW_MARK: char = '1';

/// Parse the text of a vocabulary book of the given kind.
pub fn parse_document(kind: DomainKind, text: &str) -> VocabularyDocument {
    Parser::new(kind).parse(text)
}

pub struct Parser {
    kind: DomainKind,
    schema: TableSchema,
    /// Category for tables that appear before any category header.
    implicit_category: Option<String>,
    /// Whether a header line inside an open table is read as a row.
    single_header: bool,
}

enum Line<'a> {
    /// A line like `### <name>`.
    CategoryHeader(&'a str),
    /// The header row of a table, naming the Korean and Japanese columns.
    TableHeader(&'a str),
    /// A line like `|---|---|` or `| :--- | --- |`.
    Separator,
    /// A "back to top" link or a horizontal rule.
    SectionEnd,
    /// Any other line that starts with a pipe.
    Row(&'a str),
    /// Any other line.
    Text,
}

impl<'a> Line<'a> {
    fn read(line: &'a str) -> Self {
        if let Some(name) = line.strip_prefix(CATEGORY_PREFIX) {
            Line::CategoryHeader(name.trim())
        } else if is_table_header(line) {
            Line::TableHeader(line)
        } else if is_separator(line) {
            Line::Separator
        } else if is_section_end(line) {
            Line::SectionEnd
        } else if line.starts_with('|') {
            Line::Row(line)
        } else {
            Line::Text
        }
    }
}

fn is_table_header(line: &str) -> bool {
    line.contains(KOREAN_LABEL) && line.contains(JAPANESE_LABEL)
}

fn is_separator(line: &str) -> bool {
    if line.starts_with(SEPARATOR_PREFIX) {
        return true;
    }
    line.starts_with('|')
        && line.contains('-')
        && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn is_section_end(line: &str) -> bool {
    line.starts_with(BACK_TO_TOP) || line.starts_with(RULE_PREFIX)
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Mode {
    OutsideTable,
    InTable,
}

struct State {
    mode: Mode,
    category: Option<String>,
}

/// What a single line contributed to the document.
#[derive(Debug, PartialEq)]
enum Outcome {
    /// A table row that yielded a record.
    Record(WordRecord),
    /// A table row that was too short or had blank Korean or Japanese text.
    Skipped,
    /// Headers, separators, prose, and rows outside of a table.
    Structural,
}

/// Accumulates records into categories as the lines are folded.
#[derive(Default)]
struct Builder {
    categories: Vec<Category>,
    skipped: usize,
}

impl Builder {
    fn accept(&mut self, category: Option<&str>, outcome: Outcome) {
        match (outcome, category) {
            (Outcome::Record(record), Some(name)) => {
                // A repeated header continues the category it names.
                match self.categories.iter_mut().find(|c| c.name() == name) {
                    Some(existing) => existing.push(record),
                    None => self
                        .categories
                        .push(Category::with_records(name, vec![record])),
                }
            }
            (Outcome::Skipped, _) => self.skipped += 1,
            _ => {}
        }
    }
}

impl Parser {
    pub fn new(kind: DomainKind) -> Self {
        Parser {
            kind,
            schema: kind.schema(),
            implicit_category: None,
            single_header: false,
        }
    }

    /// Use a custom column layout. The schema is checked here, once, so
    /// rows can be indexed without further bounds checks.
    pub fn with_schema(kind: DomainKind, schema: TableSchema) -> Fallible<Self> {
        schema.validate()?;
        Ok(Parser {
            kind,
            schema,
            implicit_category: None,
            single_header: false,
        })
    }

    /// Read tables that precede any category header into a category with
    /// the given name, instead of ignoring them. Documents without headers,
    /// like the consolidated review document, need this.
    pub fn with_implicit_category(mut self, name: impl Into<String>) -> Self {
        self.implicit_category = Some(name.into());
        self
    }

    /// Treat only the line that opens a table as its header. Later lines
    /// that look like a header are read as rows, so a record whose cells
    /// are the column labels survives being written out and read back.
    pub fn with_single_header(mut self) -> Self {
        self.single_header = true;
        self
    }

    /// Parse all the records in the given text.
    pub fn parse(&self, text: &str) -> VocabularyDocument {
        let initial = State {
            mode: Mode::OutsideTable,
            category: self.implicit_category.clone(),
        };
        let (_, builder) = text.lines().fold(
            (initial, Builder::default()),
            |(state, mut builder), line| {
                let (state, outcome) = self.parse_line(state, Line::read(line.trim()));
                builder.accept(state.category.as_deref(), outcome);
                (state, builder)
            },
        );
        VocabularyDocument::new(self.kind, builder.categories, builder.skipped)
    }

    fn parse_line(&self, state: State, line: Line<'_>) -> (State, Outcome) {
        match line {
            Line::CategoryHeader(name) => (
                State {
                    mode: Mode::OutsideTable,
                    category: Some(name.to_string()),
                },
                Outcome::Structural,
            ),
            Line::TableHeader(text) if self.single_header && state.mode == Mode::InTable => {
                self.parse_line(state, Line::Row(text))
            }
            Line::TableHeader(_) => (
                State {
                    mode: Mode::InTable,
                    ..state
                },
                Outcome::Structural,
            ),
            Line::SectionEnd => (
                State {
                    mode: Mode::OutsideTable,
                    ..state
                },
                Outcome::Structural,
            ),
            Line::Row(text) if state.mode == Mode::InTable && state.category.is_some() => {
                let outcome = match self.read_row(text) {
                    Some(record) => Outcome::Record(record),
                    None => Outcome::Skipped,
                };
                (state, outcome)
            }
            Line::Separator | Line::Row(_) | Line::Text => (state, Outcome::Structural),
        }
    }

    fn read_row(&self, text: &str) -> Option<WordRecord> {
        let fields: Vec<&str> = text.split('|').map(str::trim).collect();
        if fields.len() < self.schema.min_fields {
            return None;
        }
        let marker = fields[fields.len() - 2];
        let auxiliary = self.schema.auxiliary.map(|index| fields[index]);
        WordRecord::new(
            fields[self.schema.korean],
            fields[self.schema.japanese],
            auxiliary,
            marker.contains(REVIEW_MARK),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETINGS: &str = "\
# 히라가나 단어장

자주 쓰는 인사말입니다.

### Greetings

| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 안녕 | こんにちは | 1 |
| 감사 | ありがとう |  |

[↑ 맨 위로](#top)
";

    fn make_test_parser() -> Parser {
        Parser::new(DomainKind::Hiragana)
    }

    fn words(document: &VocabularyDocument) -> Vec<(&str, &str, Option<&str>, bool)> {
        document
            .records()
            .map(|r| (r.korean(), r.japanese(), r.auxiliary(), r.review()))
            .collect()
    }

    #[test]
    fn test_empty_string() {
        let document = make_test_parser().parse("");
        assert!(document.is_empty());
        assert!(document.categories().is_empty());
        assert_eq!(document.skipped_rows(), 0);
    }

    #[test]
    fn test_greetings() {
        let document = make_test_parser().parse(GREETINGS);
        assert_eq!(document.kind(), DomainKind::Hiragana);
        assert_eq!(document.categories().len(), 1);
        let category = &document.categories()[0];
        assert_eq!(category.name(), "Greetings");
        assert_eq!(category.records().len(), 2);
        assert_eq!(
            words(&document),
            vec![
                ("안녕", "こんにちは", None, true),
                ("감사", "ありがとう", None, false),
            ]
        );
    }

    #[test]
    fn test_review_marker_is_a_substring_test() {
        let input = "\
### 숫자
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 하나 | いち | 10 |
| 둘 | に | 21 |
| 셋 | さん | 0 |
| 넷 | よん | x |
";
        let document = make_test_parser().parse(input);
        let flags: Vec<bool> = document.records().map(|r| r.review()).collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn test_kanji_rows() {
        let input = "\
### 학교
| 한국어 | 일본어 | 한자 | 복습 |
|--------|--------|------|------|
| 학생 | がくせい | 学生 | 1 |
| 선생님 | せんせい | 先生 |  |
| 교실 | きょうしつ |
";
        let document = Parser::new(DomainKind::Kanji).parse(input);
        assert_eq!(
            words(&document),
            vec![
                ("학생", "がくせい", Some("学生"), true),
                ("선생님", "せんせい", Some("先生"), false),
            ]
        );
        // The last row is too short for the kanji layout.
        assert_eq!(document.skipped_rows(), 1);
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let input = "\
### 빈칸
| 한국어 | 일본어 | 복습 |
|---|---|---|
|  | いぬ | 1 |
| 고양이 |  | 1 |
| 새 | とり | 1 |
";
        let document = make_test_parser().parse(input);
        assert_eq!(words(&document), vec![("새", "とり", None, true)]);
        assert_eq!(document.skipped_rows(), 2);
    }

    #[test]
    fn test_rows_without_category_are_ignored() {
        let input = "\
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 안녕 | こんにちは | 1 |
";
        let document = make_test_parser().parse(input);
        assert!(document.is_empty());
        assert_eq!(document.skipped_rows(), 0);
    }

    #[test]
    fn test_rows_outside_table_are_ignored() {
        let input = "\
### 동물
| 개 | いぬ | 1 |
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 고양이 | ねこ |  |
---
| 새 | とり | 1 |
";
        let document = make_test_parser().parse(input);
        assert_eq!(words(&document), vec![("고양이", "ねこ", None, false)]);
    }

    #[test]
    fn test_category_header_leaves_table() {
        let input = "\
### 하나
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 물 | みず |  |
### 둘
| 불 | ひ | 1 |
";
        let document = make_test_parser().parse(input);
        assert_eq!(words(&document), vec![("물", "みず", None, false)]);
        assert!(document.category("둘").is_none());
    }

    #[test]
    fn test_prose_inside_table_keeps_table_open() {
        let input = "\
### 음식
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 밥 | ごはん |  |
참고: 아래는 음료입니다.
| 물 | みず | 1 |
";
        let document = make_test_parser().parse(input);
        assert_eq!(document.record_count(), 2);
    }

    #[test]
    fn test_repeated_category_is_merged() {
        let input = "\
### 색
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 빨강 | あか |  |
### 숫자
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 하나 | いち |  |
### 색
| 한국어 | 일본어 | 복습 |
|---|---|---|
| 파랑 | あお | 1 |
";
        let document = make_test_parser().parse(input);
        let names: Vec<&str> = document.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["색", "숫자"]);
        let colours: Vec<&str> = document
            .category("색")
            .unwrap()
            .records()
            .iter()
            .map(|r| r.korean())
            .collect();
        assert_eq!(colours, vec!["빨강", "파랑"]);
    }

    #[test]
    fn test_indented_lines_are_trimmed() {
        let input =
            "   ### 날씨  \n  | 한국어 | 일본어 | 복습 |\n  |---|---|---|\n  | 비 | あめ | 1 |  \n";
        let document = make_test_parser().parse(input);
        assert_eq!(document.categories()[0].name(), "날씨");
        assert_eq!(words(&document), vec![("비", "あめ", None, true)]);
    }

    #[test]
    fn test_implicit_category() {
        let input = "\
# 복습 단어장

| 한국어 | 일본어 | 한자 | 복습 |
|--------|--------|------|------|
| 안녕 | こんにちは |  | 1 |
| 학생 | がくせい | 学生 | 1 |
";
        let document = Parser::new(DomainKind::Kanji)
            .with_implicit_category("복습")
            .parse(input);
        assert_eq!(document.categories().len(), 1);
        assert_eq!(document.categories()[0].name(), "복습");
        assert_eq!(
            words(&document),
            vec![
                ("안녕", "こんにちは", None, true),
                ("학생", "がくせい", Some("学生"), true),
            ]
        );
    }

    #[test]
    fn test_custom_schema_is_validated() {
        let schema = TableSchema {
            min_fields: 4,
            korean: 1,
            japanese: 3,
            auxiliary: None,
        };
        assert!(Parser::with_schema(DomainKind::Hiragana, schema).is_err());
    }

    #[test]
    fn test_custom_schema_swaps_columns() -> Fallible<()> {
        let schema = TableSchema {
            min_fields: 4,
            korean: 2,
            japanese: 1,
            auxiliary: None,
        };
        let parser = Parser::with_schema(DomainKind::Hiragana, schema)?;
        let document = parser.parse("### x\n| 일본어 | 한국어 | 복습 |\n| いぬ | 개 | 1 |\n");
        // The header contains both labels in any order.
        assert_eq!(words(&document), vec![("개", "いぬ", None, true)]);
        Ok(())
    }

    #[test]
    fn test_zero_width_schema_is_rejected() {
        let schema = TableSchema {
            min_fields: 0,
            korean: 1,
            japanese: 2,
            auxiliary: None,
        };
        assert!(Parser::with_schema(DomainKind::Hiragana, schema).is_err());
    }

    #[test]
    fn test_spaced_separator() {
        let input = "\
### 동물
| 한국어 | 일본어 | 복습 |
| --- | --- | --- |
| 개 | いぬ | 1 |
";
        let document = make_test_parser().parse(input);
        assert_eq!(words(&document), vec![("개", "いぬ", None, true)]);
        assert_eq!(document.skipped_rows(), 0);
    }

    #[test]
    fn test_aligned_separator() {
        let input = "\
### 동물
| 한국어 | 일본어 | 복습 |
|:-------|-------:|:----:|
| 개 | いぬ |  |
";
        let document = make_test_parser().parse(input);
        assert_eq!(words(&document), vec![("개", "いぬ", None, false)]);
    }

    #[test]
    fn test_dash_cells_with_marker_are_a_row() {
        let input = "\
### 기호
| 한국어 | 일본어 | 복습 |
|---|---|---|
| --- | --- | 1 |
";
        let document = make_test_parser().parse(input);
        assert_eq!(words(&document), vec![("---", "---", None, true)]);
    }

    #[test]
    fn test_header_lookalike_row() {
        let input = "\
| 한국어 | 일본어 | 한자 | 복습 |
|---|---|---|---|
| 한국어 | 일본어 | 漢 | 1 |
";
        let single = Parser::new(DomainKind::Kanji)
            .with_implicit_category("복습")
            .with_single_header()
            .parse(input);
        assert_eq!(words(&single), vec![("한국어", "일본어", Some("漢"), true)]);

        let default = Parser::new(DomainKind::Kanji)
            .with_implicit_category("복습")
            .parse(input);
        assert!(default.is_empty());
    }

    #[test]
    fn test_header_after_section_end_opens_table() {
        let input = "\
| 한국어 | 일본어 | 한자 | 복습 |
|---|---|---|---|
| 물 | みず | 水 |  |
---
| 한국어 | 일본어 | 한자 | 복습 |
|---|---|---|---|
| 불 | ひ | 火 | 1 |
";
        let document = Parser::new(DomainKind::Kanji)
            .with_implicit_category("c")
            .with_single_header()
            .parse(input);
        assert_eq!(document.record_count(), 2);
    }

    #[test]
    fn test_parse_line_outcomes() {
        let parser = make_test_parser();
        let state = State {
            mode: Mode::InTable,
            category: Some("c".to_string()),
        };
        let (state, outcome) = parser.parse_line(state, Line::read("| 개 | いぬ |  |"));
        assert!(matches!(outcome, Outcome::Record(_)));
        let (state, outcome) = parser.parse_line(state, Line::read("| 개 |"));
        assert_eq!(outcome, Outcome::Skipped);
        let (state, outcome) = parser.parse_line(state, Line::read("|---|---|"));
        assert_eq!(outcome, Outcome::Structural);
        assert_eq!(state.mode, Mode::InTable);
        let (state, outcome) = parser.parse_line(state, Line::read("[↑ 맨 위로](#top)"));
        assert_eq!(outcome, Outcome::Structural);
        assert_eq!(state.mode, Mode::OutsideTable);
    }
}
