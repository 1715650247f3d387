use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    File,
    Text,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Text => "text",
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown input mode `{other}` (expected file or text)")),
        }
    }
}

/// Risk tier derived from a score with strict thresholds at 70 and 40.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            Self::High
        } else if score > 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Hex color used for the verdict and the phishing segment.
    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#ef4444",
            Self::Medium => "#f59e0b",
            Self::Low => "#10b981",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub verdict: String,
    pub summary: String,
    pub reasons: Vec<String>,
}

impl AnalysisResult {
    pub fn severity(&self) -> SeverityTier {
        SeverityTier::from_score(self.score)
    }
}

/// Envelope details the analysis service extracted from the submitted input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMeta {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds_are_strict() {
        for score in 0..=MAX_SCORE {
            let expected = if score > 70 {
                SeverityTier::High
            } else if score > 40 {
                SeverityTier::Medium
            } else {
                SeverityTier::Low
            };
            assert_eq!(SeverityTier::from_score(score), expected, "score {score}");
        }
        assert_eq!(SeverityTier::from_score(70), SeverityTier::Medium);
        assert_eq!(SeverityTier::from_score(71), SeverityTier::High);
        assert_eq!(SeverityTier::from_score(40), SeverityTier::Low);
        assert_eq!(SeverityTier::from_score(41), SeverityTier::Medium);
    }

    #[test]
    fn input_mode_parses_case_insensitively() {
        assert_eq!(" File ".parse::<InputMode>(), Ok(InputMode::File));
        assert_eq!("TEXT".parse::<InputMode>(), Ok(InputMode::Text));
        assert!("url".parse::<InputMode>().is_err());
    }
}
