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

//! The quiz. A session pools every record of a book, fixes a random order
//! once, and walks it record by record. Each miss goes to a [`MissLog`] the
//! moment it is answered, so an abandoned session keeps what it recorded.

use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::types::record::WordRecord;

/// Which side of the record is shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Show the Korean, recall the Japanese.
    KoreanToJapanese,
    /// Show the Japanese, recall the Korean.
    JapaneseToKorean,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::KoreanToJapanese => "한국어 → 일본어",
            Direction::JapaneseToKorean => "일본어 → 한국어",
        }
    }

    /// Read the menu choice: `1` or `2`.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Direction::KoreanToJapanese),
            "2" => Some(Direction::JapaneseToKorean),
            _ => None,
        }
    }

    fn question(self, record: &WordRecord) -> &str {
        match self {
            Direction::KoreanToJapanese => record.korean(),
            Direction::JapaneseToKorean => record.japanese(),
        }
    }

    fn answer(self, record: &WordRecord) -> &str {
        match self {
            Direction::KoreanToJapanese => record.japanese(),
            Direction::JapaneseToKorean => record.korean(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Response {
    /// `0`
    Known,
    /// `1`
    Unknown,
}

impl Response {
    /// Anything other than `0` or `1` is not a response.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "0" => Some(Response::Known),
            "1" => Some(Response::Unknown),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    /// Waiting for a direction.
    SelectMode,
    /// Waiting for a response to the record at this index.
    InProgress(usize),
    Done,
}

/// Where missed records are written.
pub trait MissLog {
    fn append(&mut self, record: &WordRecord) -> Fallible<()>;
}

impl MissLog for Vec<WordRecord> {
    fn append(&mut self, record: &WordRecord) -> Fallible<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// What to show for the current record.
#[derive(Debug, PartialEq)]
pub struct Prompt<'a> {
    /// One-based position in the session.
    pub position: usize,
    pub total: usize,
    pub question: &'a str,
    pub answer: &'a str,
}

pub struct Session {
    records: Vec<WordRecord>,
    direction: Option<Direction>,
    state: SessionState,
    misses: usize,
}

impl Session {
    /// A session over the records in the order given.
    pub fn new(records: Vec<WordRecord>) -> Self {
        Self {
            records,
            direction: None,
            state: SessionState::SelectMode,
            misses: 0,
        }
    }

    /// A session over the records in a random order.
    pub fn shuffled(records: Vec<WordRecord>, rng: &mut TinyRng) -> Self {
        Self::new(shuffle(records, rng))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// The records in presentation order.
    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn select_mode(&mut self, direction: Direction) -> Fallible<()> {
        if self.state != SessionState::SelectMode {
            return fail("The direction has already been chosen.");
        }
        self.direction = Some(direction);
        self.state = self.state_at(0);
        Ok(())
    }

    pub fn prompt(&self) -> Option<Prompt<'_>> {
        match (self.state, self.direction) {
            (SessionState::InProgress(index), Some(direction)) => {
                let record = &self.records[index];
                Some(Prompt {
                    position: index + 1,
                    total: self.records.len(),
                    question: direction.question(record),
                    answer: direction.answer(record),
                })
            }
            _ => None,
        }
    }

    /// Record the response to the current record and move to the next one.
    /// A miss is appended to the log before the session advances.
    pub fn answer(&mut self, response: Response, log: &mut dyn MissLog) -> Fallible<()> {
        let index = match self.state {
            SessionState::InProgress(index) => index,
            SessionState::SelectMode => return fail("Choose a direction before answering."),
            SessionState::Done => return fail("The session is already over."),
        };
        if response == Response::Unknown {
            log.append(&self.records[index])?;
            self.misses += 1;
        }
        self.state = self.state_at(index + 1);
        Ok(())
    }

    fn state_at(&self, index: usize) -> SessionState {
        if index < self.records.len() {
            SessionState::InProgress(index)
        } else {
            SessionState::Done
        }
    }
}
