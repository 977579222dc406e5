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

use std::fs::write;
use std::path::PathBuf;

use tangocho_core::error::Fallible;
use tangocho_core::markdown::render_review_document;
use tangocho_core::review::ReviewSet;
use tangocho_core::types::domain::DomainKind;

use crate::collection::Collection;

/// What an extraction produced.
pub struct ExtractReport {
    /// Flagged records per book, in [`DomainKind::ALL`] order.
    pub counts: Vec<(DomainKind, usize)>,
    pub total: usize,
    pub output: PathBuf,
}

pub fn extract_review(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let report = write_review_document(&collection)?;
    println!("\n복습 단어 통계:");
    for (kind, count) in &report.counts {
        println!("  {}: {count}개", kind.label());
    }
    println!("  총합: {}개", report.total);
    if report.total == 0 {
        println!("\n복습이 필요한 단어가 없습니다.");
        println!(
            "단어장에서 복습 열에 1을 입력하면 해당 단어가 {}에 추가됩니다.",
            collection.config().files.review
        );
    } else {
        println!("\n{} 생성 완료!", report.output.display());
    }
    Ok(())
}

/// Collect the flagged records of every book and write the consolidated
/// review document, replacing any previous one.
pub fn write_review_document(collection: &Collection) -> Fallible<ExtractReport> {
    let mut documents = Vec::new();
    for kind in DomainKind::ALL {
        println!("{} 단어 추출 중...", kind.label());
        documents.push(collection.read_document(kind));
    }
    let set = ReviewSet::collect(&documents);
    let counts: Vec<(DomainKind, usize)> = DomainKind::ALL
        .into_iter()
        .map(|kind| (kind, set.count(kind)))
        .collect();
    for (kind, count) in &counts {
        log::info!("{kind}: {count} words to review");
    }
    let output = collection.review_path();
    write(&output, render_review_document(&set))?;
    log::info!("Wrote {} words to {}", set.total(), output.display());
    Ok(ExtractReport {
        counts,
        total: set.total(),
        output,
    })
}
