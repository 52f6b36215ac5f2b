//! Tag suggestions and generated descriptions backed by an external language model.
//!
//! The model is optional. When it is not configured, tags fall back to
//! [`DEFAULT_TAG`] and descriptions come back empty. When it is configured, its
//! failures propagate to the caller unchanged; nothing here retries or times out.

pub mod model;
pub mod prompts;
pub mod sanitize;
pub mod single_flight;

use std::sync::Arc;

use crate::config::AiConfig;
use crate::error::AppError;
use crate::models::DEFAULT_TAG;

pub use model::{ChatMessage, LanguageModel, WorkersAiModel};
pub use sanitize::{sanitize_description, sanitize_tag, MAX_DESCRIPTION_CHARS};
pub use single_flight::SingleFlight;

#[derive(Clone)]
pub struct TextGenerator {
    model: Option<Arc<dyn LanguageModel>>,
    flights: SingleFlight,
}

impl TextGenerator {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self {
            model,
            flights: SingleFlight::new(),
        }
    }

    /// A generator with no model behind it.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: Option<&AiConfig>) -> Self {
        let model = config.map(|ai| Arc::new(WorkersAiModel::new(ai)) as Arc<dyn LanguageModel>);
        Self::new(model)
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Live tag preview for a description the user is still typing.
    ///
    /// Empty input short-circuits to an empty tag without calling the model.
    pub async fn suggest_tag(&self, description: &str) -> Result<String, AppError> {
        if description.is_empty() {
            return Ok(String::new());
        }
        self.tag("suggest", description, prompts::suggest_tag(description))
            .await
    }

    /// Tag stored with a newly created task.
    ///
    /// The sanitized reply is returned as is, so a reply with no usable words yields
    /// an empty tag.
    pub async fn tag_for_task(&self, description: &str) -> Result<String, AppError> {
        if description.is_empty() {
            return Ok(String::new());
        }
        self.tag("task", description, prompts::tag_for_task(description))
            .await
    }

    /// Multi-paragraph description for `title`, written in `language`.
    ///
    /// `language` falls back to English when blank. Empty titles short-circuit to an
    /// empty description, as does a missing model.
    pub async fn generate_description(
        &self,
        title: &str,
        language: &str,
    ) -> Result<String, AppError> {
        if title.is_empty() {
            return Ok(String::new());
        }
        let model = match &self.model {
            Some(model) => Arc::clone(model),
            None => return Ok(String::new()),
        };
        let language = match language.trim() {
            "" => prompts::DEFAULT_LANGUAGE,
            other => other,
        };

        let messages = prompts::describe(title, language);
        let key = format!("describe:{}:{}", language, title);
        log::debug!("Requesting description in {} for a {}-char title", language, title.len());
        let raw = self
            .flights
            .run(key, move || async move { model.complete(&messages).await })
            .await?;
        Ok(sanitize_description(&raw))
    }

    async fn tag(
        &self,
        kind: &str,
        description: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, AppError> {
        let model = match &self.model {
            Some(model) => Arc::clone(model),
            None => return Ok(DEFAULT_TAG.to_string()),
        };

        let key = format!("{}:{}", kind, description);
        log::debug!("Requesting {} tag for a {}-char description", kind, description.len());
        let raw = self
            .flights
            .run(key, move || async move { model.complete(&messages).await })
            .await?;
        Ok(sanitize_tag(&raw))
    }
}
