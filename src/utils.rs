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
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use tangocho_core::error::Fallible;
use tangocho_core::error::fail;

/// Ask until the answer parses. Input that does not parse prints `retry`
/// and asks again; end of input is an error.
pub fn prompt_until<R, W, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    retry: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Fallible<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return fail("Input ended before an answer was given.");
        }
        match parse(line.trim()) {
            Some(value) => return Ok(value),
            None => writeln!(output, "{retry}")?,
        }
    }
}

/// A seed for the shuffle, taken from the clock.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn parse_digit(s: &str) -> Option<u32> {
        s.parse().ok().filter(|n| *n < 3)
    }

    #[test]
    fn test_prompt_until_accepts_first_valid() -> Fallible<()> {
        let mut input = Cursor::new("x\n7\n 2 \n1\n");
        let mut output: Vec<u8> = Vec::new();
        let value = prompt_until(&mut input, &mut output, "> ", "again", parse_digit)?;
        assert_eq!(value, 2);
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed, "> again\n> again\n> ");
        Ok(())
    }

    #[test]
    fn test_prompt_until_end_of_input() {
        let mut input = Cursor::new("x\n");
        let mut output: Vec<u8> = Vec::new();
        let result = prompt_until(&mut input, &mut output, "> ", "again", parse_digit);
        assert!(result.is_err());
    }
}
