//! ImageModel - Image generation model selection

/// Image generation model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageModel {
    #[default]
    DallE2,
    DallE3,
    Other(String),
}

impl ImageModel {
    /// Only the higher tier accepts a quality setting
    pub fn supports_quality(&self) -> bool {
        matches!(self, ImageModel::DallE3)
    }
}

impl std::fmt::Display for ImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageModel::DallE2 => write!(f, "dall-e-2"),
            ImageModel::DallE3 => write!(f, "dall-e-3"),
            ImageModel::Other(name) => write!(f, "{}", name),
        }
    }
}

impl std::str::FromStr for ImageModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Image model cannot be empty".to_string());
        }
        match trimmed {
            "dall-e-2" => Ok(ImageModel::DallE2),
            "dall-e-3" => Ok(ImageModel::DallE3),
            other => Ok(ImageModel::Other(other.to_string())),
        }
    }
}
