use serde::Serialize;
use serde_json::Value as JsonValue;

/// Decoded response of a successful dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: JsonValue,
}

/// A single identifier or keyword, or a list of them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.into_iter().map(str::to_owned).collect())
    }
}

/// Engine list in `{engine}_{locale}` form, e.g. `google_en-us`.
///
/// Always serialized as a list; a single engine becomes a one-element list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Engines(pub Vec<String>);

impl From<&str> for Engines {
    fn from(value: &str) -> Self {
        Self(vec![value.to_owned()])
    }
}

impl From<String> for Engines {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for Engines {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for Engines {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Engines {
    fn from(values: [&str; N]) -> Self {
        Self(values.into_iter().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Engines, OneOrMany};

    #[test]
    fn one_or_many_serializes_untagged() {
        let one: OneOrMany = "shoes".into();
        let many: OneOrMany = ["shoes", "boots"].into();
        assert_eq!(serde_json::to_value(one).expect("must serialize"), json!("shoes"));
        assert_eq!(
            serde_json::to_value(many).expect("must serialize"),
            json!(["shoes", "boots"])
        );
    }

    #[test]
    fn single_engine_becomes_list() {
        let engines: Engines = "google_en-us".into();
        assert_eq!(
            serde_json::to_value(engines).expect("must serialize"),
            json!(["google_en-us"])
        );
    }
}
