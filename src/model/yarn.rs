use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::YarnWeight;

pub type YarnId = i64;

/// Longest value accepted for the short text columns
pub const MAX_SHORT_TEXT: usize = 64;

/// A stored yarn record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Yarn {
    pub id: YarnId,
    pub length_yards: Option<i32>,
    pub num_skeins: Option<i32>,
    pub weight: YarnWeight,
    pub color: String,
    pub brand: Option<String>,
    pub special_attr: Option<String>,
    pub material: Option<String>,
    pub thumbnail: Option<String>,
}

impl Yarn {
    pub fn from_new(id: YarnId, new_yarn: NewYarn) -> Self {
        Self {
            id,
            length_yards: new_yarn.length_yards,
            num_skeins: new_yarn.num_skeins,
            weight: new_yarn.weight,
            color: new_yarn.color,
            brand: new_yarn.brand,
            special_attr: new_yarn.special_attr,
            material: new_yarn.material,
            thumbnail: new_yarn.thumbnail,
        }
    }

    /// Human readable amount on hand, e.g. "420 yd" or "3 skeins"
    pub fn quantity(&self) -> Option<String> {
        match (self.length_yards, self.num_skeins) {
            (Some(yards), _) => Some(format!("{} yd", yards)),
            (None, Some(1)) => Some("1 skein".to_string()),
            (None, Some(skeins)) => Some(format!("{} skeins", skeins)),
            (None, None) => None,
        }
    }
}

/// Payload for inserting a yarn; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewYarn {
    #[serde(default)]
    pub length_yards: Option<i32>,
    #[serde(default)]
    pub num_skeins: Option<i32>,
    pub weight: YarnWeight,
    pub color: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub special_attr: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl NewYarn {
    pub fn new(color: impl Into<String>, weight: YarnWeight) -> Self {
        Self {
            length_yards: None,
            num_skeins: None,
            weight,
            color: color.into(),
            brand: None,
            special_attr: None,
            material: None,
            thumbnail: None,
        }
    }

    pub fn with_length_yards(mut self, yards: i32) -> Self {
        self.length_yards = Some(yards);
        self
    }

    pub fn with_num_skeins(mut self, skeins: i32) -> Self {
        self.num_skeins = Some(skeins);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_special_attr(mut self, attr: impl Into<String>) -> Self {
        self.special_attr = Some(attr.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Check the column limits and the yards/skeins exclusivity rule
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.color.trim().is_empty() {
            return Err(ModelError::BlankColor);
        }

        let short_fields = [
            ("color", Some(&self.color)),
            ("brand", self.brand.as_ref()),
            ("specialAttr", self.special_attr.as_ref()),
            ("material", self.material.as_ref()),
            ("thumbnail", self.thumbnail.as_ref()),
        ];
        for (field, value) in short_fields {
            if value.is_some_and(|v| v.chars().count() > MAX_SHORT_TEXT) {
                return Err(ModelError::TooLong {
                    field,
                    max: MAX_SHORT_TEXT,
                });
            }
        }

        if self.length_yards.is_some_and(|v| v < 0) {
            return Err(ModelError::Negative("lengthYards"));
        }
        if self.num_skeins.is_some_and(|v| v < 0) {
            return Err(ModelError::Negative("numSkeins"));
        }
        if self.length_yards.is_some() && self.num_skeins.is_some() {
            return Err(ModelError::LengthAndSkeins);
        }

        Ok(())
    }
}
