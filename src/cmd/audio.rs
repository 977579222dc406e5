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

use std::collections::BTreeSet;
use std::fs::create_dir_all;
use std::fs::write;
use std::path::Path;
use std::process::Command;
use std::thread::sleep;
use std::time::Duration;

use tangocho_core::audio::AudioTexts;
use tangocho_core::audio::Language;
use tangocho_core::audio::Manifest;
use tangocho_core::audio::RetryPolicy;
use tangocho_core::audio::SynthesisOutcome;
use tangocho_core::audio::audio_file_name;
use tangocho_core::error::ErrorReport;
use tangocho_core::error::Fallible;
use tangocho_core::error::fail;
use tangocho_core::types::domain::DomainKind;
use walkdir::WalkDir;

use crate::collection::Collection;

const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Turns text into a spoken audio file.
pub trait Synthesizer {
    fn synthesize(&self, text: &str, language: Language, output: &Path) -> Fallible<()>;
}

/// Runs an external speech command, such as `gtts-cli`, once per file.
pub struct CommandSynthesizer {
    program: String,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Synthesizer for CommandSynthesizer {
    fn synthesize(&self, text: &str, language: Language, output: &Path) -> Fallible<()> {
        let result = Command::new(&self.program)
            .arg(text)
            .arg("--lang")
            .arg(language.tag())
            .arg("--output")
            .arg(output)
            .output()
            .map_err(|e| ErrorReport::new(format!("failed to run '{}': {e}", self.program)))?;
        if result.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&result.stderr);
            fail(format!(
                "'{}' exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            ))
        }
    }
}

/// Try to synthesize one text, waiting between failed attempts.
pub fn synthesize_with_retry(
    synthesizer: &dyn Synthesizer,
    text: &str,
    language: Language,
    output: &Path,
    policy: RetryPolicy,
) -> SynthesisOutcome {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match synthesizer.synthesize(text, language, output) {
            Ok(()) => return SynthesisOutcome::Generated { attempts },
            Err(e) if attempts < policy.attempts() => {
                log::debug!("Attempt {attempts} for '{text}' ({language}) failed: {e}");
                sleep(policy.delay);
            }
            Err(e) => {
                return SynthesisOutcome::Failed {
                    attempts,
                    message: e.message().to_string(),
                };
            }
        }
    }
}

pub struct BatchSettings {
    pub policy: RetryPolicy,
    /// Pause after this many items. Zero never pauses.
    pub pause_every: usize,
    pub pause: Duration,
}

#[derive(Debug, Default, PartialEq)]
pub struct BatchReport {
    pub generated: usize,
    /// Files that already existed.
    pub skipped: usize,
    /// Texts for which every attempt failed.
    pub failed: Vec<String>,
}

/// Produce an audio file for every text that does not have one yet. A text
/// that cannot be synthesized is recorded and the batch moves on.
pub fn generate_batch(
    synthesizer: &dyn Synthesizer,
    texts: &BTreeSet<String>,
    language: Language,
    directory: &Path,
    settings: &BatchSettings,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, text) in texts.iter().enumerate() {
        let path = directory.join(audio_file_name(text));
        let outcome = if path.exists() {
            SynthesisOutcome::Skipped
        } else {
            synthesize_with_retry(synthesizer, text, language, &path, settings.policy)
        };
        match outcome {
            SynthesisOutcome::Skipped => report.skipped += 1,
            SynthesisOutcome::Generated { .. } => report.generated += 1,
            SynthesisOutcome::Failed { attempts, message } => {
                log::warn!("Giving up on '{text}' after {attempts} attempts");
                println!("    FAIL: {text} -> {message}");
                report.failed.push(text.clone());
            }
        }
        if settings.pause_every > 0 && (index + 1) % settings.pause_every == 0 {
            println!("    {}/{}...", index + 1, texts.len());
            sleep(settings.pause);
        }
    }
    report
}

pub fn generate_audio(directory: Option<String>, command: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let audio = &collection.config().audio;
    let program = command.unwrap_or_else(|| audio.command.clone());
    let synthesizer = CommandSynthesizer::new(program);
    let settings = BatchSettings {
        policy: audio.retry_policy(),
        pause_every: audio.pause_every,
        pause: audio.pause(),
    };
    println!("=== MP3 Audio Generator ===\n");
    let reports = build_audio(&collection, &synthesizer, &settings)?;
    let failed: usize = reports.iter().map(|r| r.failed.len()).sum();
    if failed > 0 {
        println!("{failed} texts could not be synthesized; run again to retry them.");
    }
    println!("Done!");
    Ok(())
}

/// Collect the texts of every book, synthesize the missing files, and
/// write the manifest. Returns the Japanese and Korean batch reports.
pub fn build_audio(
    collection: &Collection,
    synthesizer: &dyn Synthesizer,
    settings: &BatchSettings,
) -> Fallible<[BatchReport; 2]> {
    println!("[1/4] Collecting words...");
    let mut documents = Vec::new();
    for kind in DomainKind::ALL {
        let file = collection.config().document_file(kind);
        if !collection.document_path(kind).exists() {
            println!("  SKIP: {file} not found");
            continue;
        }
        let document = collection.read_document(kind);
        println!("  {file}: {} words", document.record_count());
        documents.push(document);
    }
    let texts = AudioTexts::collect(documents.iter().flat_map(|d| d.records()));
    println!("  Japanese: {} unique words", texts.japanese.len());
    println!("  Korean: {} unique meanings\n", texts.korean.len());

    let audio_dir = collection.audio_dir();
    let mut reports = Vec::new();
    let steps = [("[2/4]", Language::Japanese), ("[3/4]", Language::Korean)];
    for (step, language) in steps {
        let set = texts.get(language);
        let directory = audio_dir.join(language.tag());
        create_dir_all(&directory)?;
        println!("{step} Generating {language} MP3s ({})...", set.len());
        let report = generate_batch(synthesizer, set, language, &directory, settings);
        println!(
            "  Done: {} generated, {} skipped (already exist)\n",
            report.generated, report.skipped
        );
        reports.push(report);
    }

    let manifest_path = audio_dir.join(MANIFEST_FILE_NAME);
    write(&manifest_path, Manifest::build(&texts).to_json()?)?;
    println!("[4/4] Manifest saved: {}", manifest_path.display());

    let size = directory_size(&audio_dir)?;
    println!("\nTotal size: {:.1} MB", size as f64 / 1024.0 / 1024.0);

    let korean = reports.pop().unwrap_or_default();
    let japanese = reports.pop().unwrap_or_default();
    Ok([japanese, korean])
}

/// Total size in bytes of the files under a directory.
fn directory_size(directory: &Path) -> Fallible<u64> {
    let mut total = 0;
    for entry in WalkDir::new(directory) {
        let entry = entry.map_err(|e| {
            ErrorReport::new(format!("Failed to walk {}: {e}", directory.display()))
        })?;
        if entry.file_type().is_file() {
            let metadata = entry.metadata().map_err(|e| {
                ErrorReport::new(format!("Failed to stat {}: {e}", entry.path().display()))
            })?;
            total += metadata.len();
        }
    }
    Ok(total)
}
