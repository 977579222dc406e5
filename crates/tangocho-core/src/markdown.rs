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

//! Writes the documents this program produces: the consolidated review
//! document, and the blocks and rows of the daily result log. Both use the
//! same table markup the parser reads.

use crate::review::ReviewSet;
use crate::session::Direction;
use crate::types::record::WordRecord;
use crate::types::timestamp::Timestamp;

const REVIEW_TITLE: &str = "# 복습 단어장";
const REVIEW_INTRO: &str = "복습이 필요한 단어들만 모아놓았습니다.";
const REVIEW_HEADER: &str = "| 한국어 | 일본어 | 한자 | 복습 |";
const REVIEW_SEPARATOR: &str = "|--------|--------|------|------|";
const NOTHING_TO_REVIEW: &str = "복습이 필요한 단어가 없습니다.";
const HOW_TO_FLAG: &str = "단어장에서 복습 열에 1을 입력하면 해당 단어가 여기에 표시됩니다.";

const RESULT_HEADER: &str = "| 한국어 | 일본어 | 복습 |";
const RESULT_SEPARATOR: &str = "|--------|--------|------|";

/// Render the consolidated review document, or the placeholder when there
/// is nothing to review.
pub fn render_review_document(set: &ReviewSet) -> String {
    if set.is_empty() {
        render_review_placeholder()
    } else {
        render_review_table(set)
    }
}

/// One table holding every flagged record. Every row is marked `1`, and
/// the kanji column is blank for records that have none.
pub fn render_review_table(set: &ReviewSet) -> String {
    let mut out = String::new();
    out.push_str(&format!("{REVIEW_TITLE}\n\n"));
    out.push_str(&format!("{REVIEW_INTRO}\n\n"));
    out.push_str(&format!("{REVIEW_HEADER}\n"));
    out.push_str(&format!("{REVIEW_SEPARATOR}\n"));
    for record in set.records() {
        out.push_str(&format!(
            "| {} | {} | {} | 1 |\n",
            record.korean(),
            record.japanese(),
            record.auxiliary().unwrap_or("")
        ));
    }
    out.push('\n');
    out
}

pub fn render_review_placeholder() -> String {
    format!("{REVIEW_TITLE}\n\n{NOTHING_TO_REVIEW}\n\n{HOW_TO_FLAG}\n")
}

/// The block that opens a quiz session in the result log.
pub fn render_result_header(source: &str, direction: Direction, started_at: Timestamp) -> String {
    format!(
        "\n## {source} - {} (테스트 시간: {})\n\n{RESULT_HEADER}\n{RESULT_SEPARATOR}\n",
        direction.label(),
        started_at.to_minute_string()
    )
}

/// A missed record. The review column is left for the learner to fill in.
pub fn render_result_row(record: &WordRecord) -> String {
    format!("| {} | {} |  |\n", record.korean(), record.japanese())
}
