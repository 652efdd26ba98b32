use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One news item about a symbol, the input to sentiment scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub symbol: String,

    /// Publication timestamp, when the provider reports one in a
    /// parseable format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDateTime>,

    pub title: String,
    pub text: String,

    /// Publishing site name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    pub url: String,
}

impl NewsArticle {
    /// Title and body joined into the text handed to the classifier.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.text)
    }

    /// Whether the article carries any scorable text.
    pub fn has_content(&self) -> bool {
        !self.content().trim().is_empty()
    }
}
