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

use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tangocho_core::audio::RetryPolicy;
use tangocho_core::error::Fallible;
use tangocho_core::types::domain::DomainKind;

/// Name of the optional configuration file at the collection root.
pub const CONFIG_FILE_NAME: &str = "tangocho.toml";

/// Settings read from `tangocho.toml`. Every key is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub files: FilesConfig,
    pub audio: AudioConfig,
}

/// File names, relative to the collection directory.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    pub hiragana: String,
    pub katakana: String,
    pub kanji: String,
    /// The consolidated review document.
    pub review: String,
    /// Where the daily quiz result logs go.
    pub results_dir: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            hiragana: DomainKind::Hiragana.default_file_name().to_string(),
            katakana: DomainKind::Katakana.default_file_name().to_string(),
            kanji: DomainKind::Kanji.default_file_name().to_string(),
            review: "복습.md".to_string(),
            results_dir: "복습".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Output directory, relative to the collection directory.
    pub dir: String,
    /// The speech command, called as `<command> <text> --lang <tag> --output <file>`.
    pub command: String,
    pub retries: u32,
    pub retry_delay_ms: u64,
    /// Pause after this many items to stay under the service's rate limit.
    /// Zero disables pausing.
    pub pause_every: usize,
    pub pause_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            dir: "audio".to_string(),
            command: "gtts-cli".to_string(),
            retries: 2,
            retry_delay_ms: 1000,
            pause_every: 50,
            pause_ms: 500,
        }
    }
}

impl AudioConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

impl Config {
    /// Read the configuration of the given collection directory. A missing
    /// file means the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        log::debug!("Reading configuration from {}", path.display());
        let text = read_to_string(&path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn document_file(&self, kind: DomainKind) -> &str {
        match kind {
            DomainKind::Hiragana => &self.files.hiragana,
            DomainKind::Katakana => &self.files.katakana,
            DomainKind::Kanji => &self.files.kanji,
        }
    }
}
