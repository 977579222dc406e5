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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;

use clap::ValueEnum;
use tangocho_core::error::Fallible;
use tangocho_core::rng::TinyRng;
use tangocho_core::session::Direction;
use tangocho_core::session::Response;
use tangocho_core::session::Session;
use tangocho_core::types::document::VocabularyDocument;
use tangocho_core::types::domain::DomainKind;
use tangocho_core::types::timestamp::Timestamp;

use crate::cmd::quiz::result_log::ResultLog;
use crate::collection::Collection;
use crate::utils::clock_seed;
use crate::utils::prompt_until;

/// Which document to quiz on.
#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum QuizFile {
    Hiragana,
    Katakana,
    Kanji,
    /// The consolidated review document.
    Review,
}

impl QuizFile {
    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(QuizFile::Hiragana),
            "2" => Some(QuizFile::Katakana),
            "3" => Some(QuizFile::Kanji),
            _ => None,
        }
    }

    fn domain(self) -> Option<DomainKind> {
        match self {
            QuizFile::Hiragana => Some(DomainKind::Hiragana),
            QuizFile::Katakana => Some(DomainKind::Katakana),
            QuizFile::Kanji => Some(DomainKind::Kanji),
            QuizFile::Review => None,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum QuizDirection {
    /// Show the Korean, recall the Japanese.
    KoJa,
    /// Show the Japanese, recall the Korean.
    JaKo,
}

impl From<QuizDirection> for Direction {
    fn from(value: QuizDirection) -> Self {
        match value {
            QuizDirection::KoJa => Direction::KoreanToJapanese,
            QuizDirection::JaKo => Direction::JapaneseToKorean,
        }
    }
}

pub struct QuizConfig {
    pub directory: Option<String>,
    /// Asked for when not given.
    pub file: Option<QuizFile>,
    /// Asked for when not given.
    pub direction: Option<Direction>,
    /// Stamped on the result log. When not given, the clock is read as the
    /// log is opened, after the menus have been answered.
    pub session_started_at: Option<Timestamp>,
    pub shuffle: bool,
}

/// How a quiz ended.
#[derive(Debug, PartialEq)]
pub struct QuizSummary {
    pub total: usize,
    pub misses: usize,
    /// `None` when there was nothing to quiz on.
    pub log_path: Option<PathBuf>,
}

/// Run a quiz on the terminal.
pub fn start_quiz(config: QuizConfig) -> Fallible<()> {
    let mut input = stdin().lock();
    let mut output = stdout().lock();
    run_quiz(config, &mut input, &mut output)?;
    Ok(())
}

pub fn run_quiz<R: BufRead, W: Write>(
    config: QuizConfig,
    input: &mut R,
    output: &mut W,
) -> Fallible<QuizSummary> {
    let collection = Collection::new(config.directory)?;

    let file = match config.file {
        Some(file) => file,
        None => select_file(&collection, input, output)?,
    };
    let (source, document) = load(&collection, file);
    let records = document.into_records();
    if records.is_empty() {
        writeln!(output, "단어를 찾을 수 없습니다.")?;
        return Ok(QuizSummary {
            total: 0,
            misses: 0,
            log_path: None,
        });
    }
    writeln!(output, "\n{}개의 단어를 찾았습니다.", records.len())?;

    let mut session = if config.shuffle {
        let mut rng = TinyRng::from_seed(clock_seed());
        Session::shuffled(records, &mut rng)
    } else {
        Session::new(records)
    };

    let direction = match config.direction {
        Some(direction) => direction,
        None => select_direction(input, output)?,
    };
    session.select_mode(direction)?;

    let started_at = config.session_started_at.unwrap_or_else(Timestamp::now);
    let mut result_log =
        ResultLog::begin(&collection.results_dir(), &source, direction, started_at)?;

    writeln!(output, "\n=== 테스트 시작 (총 {}개 단어) ===", session.total())?;
    writeln!(output, "0: 알고 있음 | 1: 모르겠음")?;
    writeln!(output, "{}", "-".repeat(50))?;
    while let Some(prompt) = session.prompt() {
        writeln!(
            output,
            "\n[{}/{}] {}{}정답: {}",
            prompt.position,
            prompt.total,
            prompt.question,
            "=".repeat(30),
            prompt.answer
        )?;
        let response = prompt_until(
            input,
            output,
            "0(알고있음) / 1(모름): ",
            "0 또는 1을 입력하세요.",
            Response::parse,
        )?;
        session.answer(response, &mut result_log)?;
    }

    writeln!(output, "\n=== 테스트 완료 ===")?;
    if session.misses() == 0 {
        writeln!(output, "모든 단어를 알고 계십니다! 🎉")?;
    } else {
        writeln!(output, "틀린 단어: {}개", session.misses())?;
        writeln!(output, "결과 저장: {}", result_log.path().display())?;
    }
    log::info!(
        "{source}: {} of {} words missed",
        session.misses(),
        session.total()
    );
    Ok(QuizSummary {
        total: session.total(),
        misses: session.misses(),
        log_path: Some(result_log.path().to_path_buf()),
    })
}

/// The file name shown in the result log, and the parsed document.
fn load(collection: &Collection, file: QuizFile) -> (String, VocabularyDocument) {
    match file.domain() {
        Some(kind) => (
            collection.config().document_file(kind).to_string(),
            collection.read_document(kind),
        ),
        None => (
            collection.config().files.review.clone(),
            collection.read_review_document(),
        ),
    }
}

fn select_file<R: BufRead, W: Write>(
    collection: &Collection,
    input: &mut R,
    output: &mut W,
) -> Fallible<QuizFile> {
    writeln!(output, "\n=== 일본어 단어 테스트 ===")?;
    for (index, kind) in DomainKind::ALL.into_iter().enumerate() {
        writeln!(
            output,
            "{}. {}",
            index + 1,
            collection.config().document_file(kind)
        )?;
    }
    prompt_until(
        input,
        output,
        "\n파일을 선택하세요 (1-3): ",
        "잘못된 입력입니다. 1-3 중 선택하세요.",
        QuizFile::from_choice,
    )
}

fn select_direction<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Fallible<Direction> {
    writeln!(output, "\n=== 테스트 모드 선택 ===")?;
    writeln!(output, "1. 한국어 → 일본어 (한국어를 보고 일본어 떠올리기)")?;
    writeln!(output, "2. 일본어 → 한국어 (일본어를 보고 한국어 떠올리기)")?;
    prompt_until(
        input,
        output,
        "\n모드를 선택하세요 (1-2): ",
        "잘못된 입력입니다. 1 또는 2를 선택하세요.",
        Direction::from_choice,
    )
}
