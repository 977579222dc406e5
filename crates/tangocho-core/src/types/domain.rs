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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::Fallible;
use crate::error::fail;

/// The three vocabulary books. Each has its own table shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DomainKind {
    /// Words written in hiragana: Korean, Japanese, review.
    Hiragana,
    /// Words written in katakana: Korean, Japanese, review.
    Katakana,
    /// Kanji compounds: Korean, Japanese reading, kanji, review.
    Kanji,
}

impl DomainKind {
    /// Every kind, in the order the consolidated review document lists them.
    pub const ALL: [DomainKind; 3] = [
        DomainKind::Hiragana,
        DomainKind::Katakana,
        DomainKind::Kanji,
    ];

    /// The label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            DomainKind::Hiragana => "히라가나",
            DomainKind::Katakana => "카타카나",
            DomainKind::Kanji => "한자",
        }
    }

    /// The conventional file name of the document for this kind.
    pub fn default_file_name(self) -> &'static str {
        match self {
            DomainKind::Hiragana => "히라가나.md",
            DomainKind::Katakana => "카타카나.md",
            DomainKind::Kanji => "한자.md",
        }
    }

    pub fn schema(self) -> TableSchema {
        match self {
            DomainKind::Hiragana | DomainKind::Katakana => TableSchema::SIMPLE,
            DomainKind::Kanji => TableSchema::COMPOUND,
        }
    }
}

impl Display for DomainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where each field of a table row lives.
///
/// Indices refer to the raw fields produced by splitting a row on `|`, so
/// index 0 is the empty field before the leading pipe. The review marker is
/// always the second-to-last raw field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TableSchema {
    /// Minimum number of raw fields a row needs to be read.
    pub min_fields: usize,
    pub korean: usize,
    pub japanese: usize,
    pub auxiliary: Option<usize>,
}

impl TableSchema {
    /// `| 한국어 | 일본어 | 복습 |`
    pub const SIMPLE: TableSchema = TableSchema {
        min_fields: 4,
        korean: 1,
        japanese: 2,
        auxiliary: None,
    };

    /// `| 한국어 | 일본어 | 한자 | 복습 |`
    pub const COMPOUND: TableSchema = TableSchema {
        min_fields: 5,
        korean: 1,
        japanese: 2,
        auxiliary: Some(3),
    };

    /// Check that every data column fits inside the minimum row width.
    pub fn validate(&self) -> Fallible<()> {
        // The leading boundary field, two data columns and the marker.
        if self.min_fields < 4 {
            return fail(format!(
                "a row of {} fields cannot hold the data columns and the marker",
                self.min_fields
            ));
        }
        let columns = [Some(self.korean), Some(self.japanese), self.auxiliary];
        for index in columns.into_iter().flatten() {
            if index == 0 || index >= self.min_fields - 1 {
                return fail(format!(
                    "column {index} does not fit in a row of {} fields",
                    self.min_fields
                ));
            }
        }
        if self.korean == self.japanese {
            return fail("Korean and Japanese columns must differ");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas_are_valid() -> Fallible<()> {
        for kind in DomainKind::ALL {
            kind.schema().validate()?;
        }
        Ok(())
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(DomainKind::Hiragana.schema().min_fields, 4);
        assert_eq!(DomainKind::Katakana.schema().min_fields, 4);
        assert_eq!(DomainKind::Kanji.schema().min_fields, 5);
        assert_eq!(DomainKind::Kanji.schema().auxiliary, Some(3));
    }

    #[test]
    fn test_schema_rejects_column_past_marker() {
        let schema = TableSchema {
            min_fields: 4,
            korean: 1,
            japanese: 2,
            auxiliary: Some(3),
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_schema_rejects_zero_width() {
        let schema = TableSchema {
            min_fields: 0,
            korean: 1,
            japanese: 2,
            auxiliary: None,
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_schema_rejects_row_without_data_columns() {
        for min_fields in 1..4 {
            let schema = TableSchema {
                min_fields,
                korean: 1,
                japanese: 2,
                auxiliary: None,
            };
            assert!(schema.validate().is_err());
        }
    }

    #[test]
    fn test_schema_rejects_boundary_column() {
        let schema = TableSchema {
            min_fields: 4,
            korean: 0,
            japanese: 2,
            auxiliary: None,
        };
        assert!(schema.validate().is_err());
    }
}
