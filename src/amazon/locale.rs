//! Product Advertising API locales and their endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path every catalog operation is sent to.
pub const REQUEST_PATH: &str = "/onca/xml";

/// Supported API locales. Each one selects the host requests are signed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Us,
}

impl Locale {
    /// Returns the API host for this locale.
    pub fn host(&self) -> &'static str {
        match self {
            Locale::Us => "ecs.amazonaws.com",
        }
    }

    /// Returns the endpoint URL requests are sent to.
    pub fn endpoint(&self) -> String {
        format!("https://{}{}", self.host(), REQUEST_PATH)
    }

    /// Returns all supported locales.
    pub fn all() -> &'static [Locale] {
        &[Locale::Us]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Locale::Us => "us",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us" | "usa" | "com" => Ok(Locale::Us),
            _ => Err(format!(
                "Unknown locale: {}. Supported: {}",
                s,
                Locale::all().iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
            )),
        }
    }
}
