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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::NaiveDateTime;
#[cfg(feature = "clock")]
use chrono::SubsecRound;

use crate::error::ErrorReport;
use crate::types::date::Date;

/// A timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// The date component of this timestamp.
    pub fn date(self) -> Date {
        Date::new(self.0.date())
    }

    /// `YYYY-MM-DD HH:MM`, as stamped on each quiz session block.
    pub fn to_minute_string(self) -> String {
        self.0.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.3f")
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp(ndt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_timestamp_to_string() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123".to_string())?;
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123");
        Ok(())
    }

    #[test]
    fn test_minute_string() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T09:05:59.999".to_string())?;
        assert_eq!(ts.to_minute_string(), "2023-10-05 09:05");
        Ok(())
    }

    #[test]
    fn test_date() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T23:59:00.000".to_string())?;
        assert_eq!(ts.date().yymmdd(), "231005");
        Ok(())
    }
}
