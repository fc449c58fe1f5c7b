use crate::types::{Entry, PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

const DEEPL_API_URL: &str = "https://api.deepl.com/v2/translate";
const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// Trait for translation backends.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// DeepL v2 API client. Free-tier keys (suffix `:fx`) are routed to the
/// api-free host.
pub struct DeepLTranslator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl DeepLTranslator {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let endpoint = if api_key.ends_with(":fx") {
            DEEPL_FREE_API_URL
        } else {
            DEEPL_API_URL
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            endpoint: endpoint.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

#[async_trait]
impl Translate for DeepLTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[("text", text), ("target_lang", target_lang)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Translation(format!(
                "HTTP {} from translation backend",
                status
            )));
        }

        let parsed: TranslationResponse = response.json().await?;
        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| PipelineError::Translation("empty translation response".to_string()))
    }
}

/// Translates entry titles and summaries, adding the `_ja` counterparts and
/// leaving every original field untouched.
pub struct EntryTranslator {
    backend: Box<dyn Translate>,
    target_lang: String,
}

impl EntryTranslator {
    pub fn new(backend: Box<dyn Translate>) -> Self {
        Self {
            backend,
            target_lang: "JA".to_string(),
        }
    }

    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = target_lang.into();
        self
    }

    pub async fn translate_entry(&self, entry: &Entry) -> Result<Entry> {
        let mut translated = entry.clone();
        translated.title_ja = Some(self.translate_field(&entry.title).await?);
        translated.summary_ja = Some(self.translate_field(&entry.summary).await?);
        Ok(translated)
    }

    // Empty input never reaches the backend.
    async fn translate_field(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        self.backend.translate(text, &self.target_lang).await
    }

    /// Translate a batch sequentially. All-or-nothing: the first backend
    /// failure aborts the whole batch with no partial output.
    pub async fn translate_entries(&self, entries: &[Entry]) -> Result<Vec<Entry>> {
        let mut translated = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            info!(
                "Translating {}/{}: {}",
                i + 1,
                entries.len(),
                entry.title.chars().take(50).collect::<String>()
            );
            translated.push(self.translate_entry(entry).await?);
        }

        Ok(translated)
    }
}
