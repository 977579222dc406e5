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

//! Naming and bookkeeping for pronunciation audio. Synthesis itself is an
//! external service; this module decides which texts need audio, what the
//! files are called, and how a synthesis attempt is reported.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;

use serde::Serialize;

use crate::error::Fallible;
use crate::types::record::WordRecord;

const AUDIO_EXTENSION: &str = "mp3";

/// Characters that cannot appear in a file name on common filesystems.
const FORBIDDEN: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Separates alternative spellings in a Japanese cell, as in `きる / 切る`.
const VARIANT_SEPARATOR: &str = " / ";

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Language {
    Japanese,
    Korean,
}

impl Language {
    /// The language tag passed to the speech service.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::Korean => "ko",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Replace every forbidden character with `_` and trim the result.
pub fn sanitize_filename(text: &str) -> String {
    text.chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// The audio file name for a text.
pub fn audio_file_name(text: &str) -> String {
    format!("{}.{AUDIO_EXTENSION}", sanitize_filename(text))
}

/// Strip a leading part-of-speech tag such as `[명사]` from a Korean gloss.
pub fn clean_korean(text: &str) -> String {
    let text = text.trim_start();
    let untagged = match text.strip_prefix('[') {
        Some(rest) => match rest.find(']') {
            Some(end) => &rest[end + 1..],
            None => text,
        },
        None => text,
    };
    untagged.trim().to_string()
}

/// Split a Japanese cell into its alternative spellings.
pub fn japanese_variants(text: &str) -> Vec<String> {
    text.split(VARIANT_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// The distinct texts that need audio, sorted.
#[derive(Default, Debug, PartialEq)]
pub struct AudioTexts {
    pub japanese: BTreeSet<String>,
    pub korean: BTreeSet<String>,
}

impl AudioTexts {
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a WordRecord>) -> Self {
        let mut texts = AudioTexts::default();
        for record in records {
            texts.japanese.extend(japanese_variants(record.japanese()));
            let korean = clean_korean(record.korean());
            if !korean.is_empty() {
                texts.korean.insert(korean);
            }
        }
        texts
    }

    pub fn get(&self, language: Language) -> &BTreeSet<String> {
        match language {
            Language::Japanese => &self.japanese,
            Language::Korean => &self.korean,
        }
    }
}

/// Maps each text to its audio file name, per language. Serialized as
/// `{"ja": {...}, "ko": {...}}`.
#[derive(Serialize, Default, Debug, PartialEq)]
pub struct Manifest {
    pub ja: BTreeMap<String, String>,
    pub ko: BTreeMap<String, String>,
}

impl Manifest {
    pub fn build(texts: &AudioTexts) -> Self {
        let entries = |set: &BTreeSet<String>| -> BTreeMap<String, String> {
            set.iter()
                .map(|text| (text.clone(), audio_file_name(text)))
                .collect()
        };
        Manifest {
            ja: entries(&texts.japanese),
            ko: entries(&texts.korean),
        }
    }

    pub fn to_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// How often a failed synthesis is retried.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    /// Wait between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            delay: Duration::from_secs(1),
        }
    }
}

/// The result of trying to produce one audio file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SynthesisOutcome {
    /// The file already existed and was left alone.
    Skipped,
    Generated { attempts: u32 },
    /// Every attempt failed. Carries the last error.
    Failed { attempts: u32, message: String },
}
