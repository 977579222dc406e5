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

use clap::Parser;
use tangocho_core::error::Fallible;

use crate::cmd::audio::generate_audio;
use crate::cmd::extract::extract_review;
use crate::cmd::quiz::runner::QuizConfig;
use crate::cmd::quiz::runner::QuizDirection;
use crate::cmd::quiz::runner::QuizFile;
use crate::cmd::quiz::runner::start_quiz;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Collect every word marked for review into the review document.
    Extract {
        /// Path to the vocabulary directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Quiz yourself on a vocabulary book in the terminal.
    Test {
        /// Path to the vocabulary directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which book to quiz on. Asked for when not given.
        #[arg(long)]
        file: Option<QuizFile>,
        /// Which way to quiz. Asked for when not given.
        #[arg(long)]
        direction: Option<QuizDirection>,
        /// Whether to shuffle the words. Default is true.
        #[arg(long)]
        shuffle: Option<bool>,
    },
    /// Generate pronunciation audio for every word.
    Audio {
        /// Path to the vocabulary directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Speech command to run. Overrides the configured one.
        #[arg(long)]
        command: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Extract { directory } => extract_review(directory),
        Command::Test {
            directory,
            file,
            direction,
            shuffle,
        } => {
            let config = QuizConfig {
                directory,
                file,
                direction: direction.map(Into::into),
                session_started_at: None,
                shuffle: shuffle.unwrap_or(true),
            };
            start_quiz(config)
        }
        Command::Audio { directory, command } => generate_audio(directory, command),
    }
}
