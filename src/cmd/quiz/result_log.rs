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

use std::fs::OpenOptions;
use std::fs::create_dir_all;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tangocho_core::error::Fallible;
use tangocho_core::markdown::render_result_header;
use tangocho_core::markdown::render_result_row;
use tangocho_core::session::Direction;
use tangocho_core::session::MissLog;
use tangocho_core::types::date::Date;
use tangocho_core::types::record::WordRecord;
use tangocho_core::types::timestamp::Timestamp;

/// The day's quiz results. Each session adds a block; nothing is ever
/// truncated. The file is opened for each write and closed again, so every
/// miss is on disk before the next prompt.
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    /// The log file for a given day.
    pub fn path_for(results_dir: &Path, date: Date) -> PathBuf {
        results_dir.join(format!("test결과_{}.md", date.yymmdd()))
    }

    /// Open the log for the day the session started on and write the
    /// session's header block.
    pub fn begin(
        results_dir: &Path,
        source: &str,
        direction: Direction,
        started_at: Timestamp,
    ) -> Fallible<Self> {
        create_dir_all(results_dir)?;
        let result_log = ResultLog {
            path: Self::path_for(results_dir, started_at.date()),
        };
        result_log.append_text(&render_result_header(source, direction, started_at))?;
        log::debug!("Recording misses in {}", result_log.path.display());
        Ok(result_log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_text(&self, text: &str) -> Fallible<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

impl MissLog for ResultLog {
    fn append(&mut self, record: &WordRecord) -> Fallible<()> {
        self.append_text(&render_result_row(record))
    }
}
