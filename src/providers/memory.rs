use async_trait::async_trait;

use crate::error::Result;
use crate::providers::FeedSource;

/// Fixed in-memory feed text
#[derive(Debug, Clone)]
pub struct StaticFeed {
    text: String,
}

impl StaticFeed {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
