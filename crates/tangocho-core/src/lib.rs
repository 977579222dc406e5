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

//! tangocho-core: the filesystem-free core of tangocho.
//!
//! This library provides:
//! - Parsing the Markdown tables of Korean/Japanese vocabulary books
//! - Extracting the words flagged for review and writing them back out
//! - The quiz session state machine
//! - Naming and bookkeeping for pronunciation audio

pub mod audio;
pub mod error;
pub mod markdown;
pub mod parser;
pub mod review;
pub mod rng;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use parser::{Parser, parse_document};
pub use review::{ReviewSet, parse_review_document};
pub use session::{Direction, MissLog, Response, Session, SessionState};
pub use types::date::Date;
pub use types::document::VocabularyDocument;
pub use types::domain::{DomainKind, TableSchema};
pub use types::record::{Category, WordRecord};
pub use types::timestamp::Timestamp;
