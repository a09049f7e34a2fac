use serde::{Deserialize, Serialize};

use crate::model::{Yarn, YarnWeight};

/// Narrows a yarn listing; an empty filter matches everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YarnFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<YarnWeight>,

    /// Case-insensitive substring of the color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl YarnFilter {
    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.color.is_none()
    }

    pub fn matches(&self, yarn: &Yarn) -> bool {
        if let Some(weight) = self.weight {
            if yarn.weight != weight {
                return false;
            }
        }
        if let Some(color) = &self.color {
            if !yarn.color.to_lowercase().contains(&color.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewYarn;

    fn yarn(color: &str, weight: YarnWeight) -> Yarn {
        Yarn::from_new(1, NewYarn::new(color, weight))
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = YarnFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&yarn("Rust", YarnWeight::Bulky)));
    }

    #[test]
    fn test_weight_and_color_filters() {
        let filter = YarnFilter {
            weight: Some(YarnWeight::Bulky),
            color: Some("BLUE".to_string()),
        };
        assert!(filter.matches(&yarn("Navy Blue", YarnWeight::Bulky)));
        assert!(!filter.matches(&yarn("Navy Blue", YarnWeight::Fine)));
        assert!(!filter.matches(&yarn("Crimson", YarnWeight::Bulky)));
    }
}
