//! Custom serde helpers.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes a `NaiveTime` as `HH:MM` and accepts `HH:MM` or `HH:MM:SS`.
pub mod hhmm {
    use super::*;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map_err(|_| format!("'{}' is not a valid time (expected HH:MM)", s))
    }
}

/// Deserializes an optional string, treating empty strings as `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "hhmm")]
        at: NaiveTime,
    }

    #[test]
    fn test_hhmm_serialize() {
        let w = Wrapper {
            at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        };
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"at":"09:00"}"#);
    }

    #[test]
    fn test_hhmm_accepts_seconds() {
        let w: Wrapper = serde_json::from_str(r#"{"at":"13:00:00"}"#).unwrap();
        assert_eq!(w.at, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
    }

    #[test]
    fn test_hhmm_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":"noon"}"#).is_err());
    }
}
