use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Yarn weight category, thinnest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YarnWeight {
    Lace,
    SuperFine,
    Fine,
    Light,
    Medium,
    Bulky,
    SuperBulky,
    Jumbo,
}

impl YarnWeight {
    pub const ALL: [YarnWeight; 8] = [
        YarnWeight::Lace,
        YarnWeight::SuperFine,
        YarnWeight::Fine,
        YarnWeight::Light,
        YarnWeight::Medium,
        YarnWeight::Bulky,
        YarnWeight::SuperBulky,
        YarnWeight::Jumbo,
    ];

    /// Name as stored in the `yarns.weight` column
    pub fn as_str(&self) -> &'static str {
        match self {
            YarnWeight::Lace => "Lace",
            YarnWeight::SuperFine => "SuperFine",
            YarnWeight::Fine => "Fine",
            YarnWeight::Light => "Light",
            YarnWeight::Medium => "Medium",
            YarnWeight::Bulky => "Bulky",
            YarnWeight::SuperBulky => "SuperBulky",
            YarnWeight::Jumbo => "Jumbo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YarnWeight::SuperFine => "Super Fine",
            YarnWeight::SuperBulky => "Super Bulky",
            other => other.as_str(),
        }
    }

    /// Standard weight number, 0 (lace) through 7 (jumbo)
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for YarnWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YarnWeight {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "lace" => Ok(YarnWeight::Lace),
            "superfine" => Ok(YarnWeight::SuperFine),
            "fine" => Ok(YarnWeight::Fine),
            "light" => Ok(YarnWeight::Light),
            "medium" => Ok(YarnWeight::Medium),
            "bulky" => Ok(YarnWeight::Bulky),
            "superbulky" => Ok(YarnWeight::SuperBulky),
            "jumbo" => Ok(YarnWeight::Jumbo),
            _ => Err(ModelError::UnknownWeight(s.to_string())),
        }
    }
}
