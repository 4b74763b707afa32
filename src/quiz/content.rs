use std::fs;
use std::path::Path;

use super::error::ContentError;
use super::Gender;

const BUNDLED_RESULTS: &str = include_str!("../../content/results.ron");

/// Score band a finished quiz falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    HighRed,
    MidRed,
    Beige,
    HighGreen,
    Yellow,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::HighRed,
        Bucket::MidRed,
        Bucket::Beige,
        Bucket::HighGreen,
        Bucket::Yellow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Bucket::HighRed => "high-red",
            Bucket::MidRed => "mid-red",
            Bucket::Beige => "beige",
            Bucket::HighGreen => "high-green",
            Bucket::Yellow => "yellow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TextPool {
    Shared(Vec<String>),
    Gendered { male: Vec<String>, female: Vec<String> },
}

impl TextPool {
    pub fn for_gender(&self, gender: Gender) -> &[String] {
        match (self, gender) {
            (TextPool::Shared(texts), _) => texts,
            (TextPool::Gendered { male, .. }, Gender::Male) => male,
            (TextPool::Gendered { female, .. }, Gender::Female) => female,
        }
    }

    fn has_empty_variant(&self) -> bool {
        match self {
            TextPool::Shared(texts) => texts.is_empty(),
            TextPool::Gendered { male, female } => male.is_empty() || female.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BucketContent {
    pub titles: TextPool,
    pub descriptions: TextPool,
}

/// Titles and descriptions handed out per score band.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResultContent {
    pub high_red: BucketContent,
    pub mid_red: BucketContent,
    pub beige: BucketContent,
    pub high_green: BucketContent,
    pub yellow: BucketContent,
}

impl ResultContent {
    pub fn from_ron_str(content: &str) -> Result<Self, ContentError> {
        let content: ResultContent = ron::from_str(content)?;
        content.validate()?;
        Ok(content)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_ron_str(BUNDLED_RESULTS)
    }

    pub fn bucket(&self, bucket: Bucket) -> &BucketContent {
        match bucket {
            Bucket::HighRed => &self.high_red,
            Bucket::MidRed => &self.mid_red,
            Bucket::Beige => &self.beige,
            Bucket::HighGreen => &self.high_green,
            Bucket::Yellow => &self.yellow,
        }
    }

    fn validate(&self) -> Result<(), ContentError> {
        for bucket in Bucket::ALL {
            let content = self.bucket(bucket);
            if content.titles.has_empty_variant() {
                return Err(ContentError::EmptyTextPool {
                    bucket: bucket.name(),
                    field: "titles",
                });
            }
            if content.descriptions.has_empty_variant() {
                return Err(ContentError::EmptyTextPool {
                    bucket: bucket.name(),
                    field: "descriptions",
                });
            }
        }
        Ok(())
    }
}
