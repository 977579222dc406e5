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

use tangocho_core::error::Fallible;
use tempfile::TempDir;
use tempfile::tempdir;

pub const HIRAGANA: &str = "\
# 히라가나 단어장

### 인사

| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 안녕 | こんにちは | 1 |
| 감사 | ありがとう |  |

[↑ 맨 위로](#top)

### 동물

| 한국어 | 일본어 | 복습 |
|--------|--------|------|
| 개 | いぬ |  |
| 고양이 | ねこ | 1 |
";

pub const KANJI: &str = "\
### 학교

| 한국어 | 일본어 | 한자 | 복습 |
|--------|--------|------|------|
| 학생 | がくせい | 学生 | 1 |
| 선생님 | せんせい | 先生 |  |
";

/// A temporary directory, removed when the returned guard is dropped.
pub fn create_tmp_directory() -> Fallible<TempDir> {
    Ok(tempdir()?)
}

/// A collection with a hiragana and a kanji book, and no katakana book.
pub fn create_tmp_collection() -> Fallible<TempDir> {
    let dir = create_tmp_directory()?;
    write(dir.path().join("히라가나.md"), HIRAGANA)?;
    write(dir.path().join("한자.md"), KANJI)?;
    Ok(dir)
}

pub fn path_string(dir: &TempDir) -> String {
    dir.path().display().to_string()
}
