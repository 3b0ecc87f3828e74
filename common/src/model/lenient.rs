//! Number decoding for fields the analysis server sends either as JSON numbers
//! or as preformatted strings (`"missingPercentage": "20.0"`).

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn parse<E: Error>(value: NumberOrText) -> Result<Option<f64>, E> {
    match value {
        NumberOrText::Number(n) => Ok(Some(n)),
        NumberOrText::Text(text) => {
            let text = text.trim().trim_end_matches('%');
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, found {:?}", text)))
        }
    }
}

pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    parse(NumberOrText::deserialize(deserializer)?).map(|n| n.unwrap_or(0.0))
}

pub fn option_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(value) => parse(value),
        None => Ok(None),
    }
}
