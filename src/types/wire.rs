// src/types/wire.rs
//! Serde adapters for the API's stringly-typed fields.
//!
//! The server stores multi-valued fields as comma-joined strings and the AI
//! feedback as a JSON document inside a string. In memory both are typed;
//! these adapters are the only place the wire shapes exist.

/// `Vec<String>` <-> `"a, b, c"`. `null` and `""` read as an empty list.
pub mod comma_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(items: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&join(items))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(split).unwrap_or_default())
    }

    pub fn split(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn join(items: &[String]) -> String {
        items.join(", ")
    }
}

/// `Option<T>` <-> JSON text in a string field. Unparseable text reads as
/// `None`; the blob is advisory and never blocks loading a profile.
pub mod json_blob {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => {
                let text = serde_json::to_string(inner).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| serde_json::from_str(&s).ok()))
    }
}

/// Ids that some endpoints send as numbers and others as numeric strings.
pub mod lenient_id {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = i64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer id or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
                Ok(v)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
                i64::try_from(v).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
                v.trim().parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Percentages sent as integers or floats. Out-of-range values are clamped
/// to `0..=100`.
pub mod score {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScoreVisitor;

        impl<'de> Visitor<'de> for ScoreVisitor {
            type Value = f64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a numeric score")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
                Ok(clamp(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
                Ok(clamp(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
                if v.is_finite() {
                    Ok(clamp(v))
                } else {
                    Err(E::custom("score is not a finite number"))
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
                Ok(0.0)
            }
        }

        deserializer.deserialize_any(ScoreVisitor)
    }

    pub fn clamp(value: f64) -> f64 {
        value.clamp(0.0, 100.0)
    }
}

/// Case-insensitive de-duplication that keeps the first spelling and order.
pub fn dedupe_case_insensitive<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

/// Parse a free-text skills field the way the profile form does.
pub fn parse_skills(raw: &str) -> Vec<String> {
    dedupe_case_insensitive(comma_list::split(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Feedback {
        score: u8,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "comma_list", default)]
        tags: Vec<String>,
        #[serde(with = "json_blob", default)]
        feedback: Option<Feedback>,
    }

    #[test]
    fn test_skills_dedupe_keeps_first_spelling() {
        assert_eq!(parse_skills("Java, java, SQL"), vec!["Java", "SQL"]);
        assert_eq!(parse_skills(" Rust ,, rust,Go , GO "), vec!["Rust", "Go"]);
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn test_comma_list_wire_shape() {
        let holder = Holder {
            tags: vec!["Remote".to_string(), "Hybrid".to_string()],
            feedback: None,
        };
        let json = serde_json::to_value(&holder).unwrap();
        assert_eq!(json["tags"], "Remote, Hybrid");
        assert_eq!(json["feedback"], "");
    }

    #[test]
    fn test_lenient_id_accepts_strings() {
        #[derive(Deserialize)]
        struct WithId {
            #[serde(deserialize_with = "lenient_id::deserialize")]
            id: i64,
        }
        let a: WithId = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let b: WithId = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
        assert_eq!(a.id, b.id);
        assert!(serde_json::from_str::<WithId>(r#"{"id": "seven"}"#).is_err());
    }

    #[test]
    fn test_score_accepts_integers_and_fractions() {
        #[derive(Deserialize)]
        struct Scored {
            #[serde(deserialize_with = "score::deserialize")]
            value: f64,
        }
        let read = |raw: &str| serde_json::from_str::<Scored>(raw).unwrap().value;
        assert_eq!(read(r#"{"value": 72}"#), 72.0);
        assert_eq!(read(r#"{"value": 72.5}"#), 72.5);
        assert_eq!(read(r#"{"value": 140}"#), 100.0);
        assert_eq!(read(r#"{"value": -3.2}"#), 0.0);
        assert_eq!(read(r#"{"value": null}"#), 0.0);
        assert!(serde_json::from_str::<Scored>(r#"{"value": "high"}"#).is_err());
    }

    #[test]
    fn test_null_and_garbage_read_as_empty() {
        let holder: Holder =
            serde_json::from_str(r#"{"tags": null, "feedback": "not json"}"#).unwrap();
        assert!(holder.tags.is_empty());
        assert!(holder.feedback.is_none());

        let holder: Holder =
            serde_json::from_str(r#"{"tags": "a,b", "feedback": "{\"score\":7}"}"#).unwrap();
        assert_eq!(holder.tags, vec!["a", "b"]);
        assert_eq!(holder.feedback, Some(Feedback { score: 7 }));
    }
}
