use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use investal_core::AdvisorSettings;

use crate::AdvisorError;

pub(crate) fn map_backend(provider: &str) -> Result<LLMBackend, AdvisorError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(AdvisorError::UnknownProvider(other.to_string())),
    }
}

/// Send one system + user exchange and return the model's text reply.
pub async fn generate(
    settings: &AdvisorSettings,
    system: &str,
    user_msg: &str,
) -> Result<String, AdvisorError> {
    let backend = map_backend(&settings.provider)?;

    let mut builder = LLMBuilder::new()
        .backend(backend)
        .model(&settings.model)
        .system(system);

    if !settings.api_key.is_empty() {
        builder = builder.api_key(&settings.api_key);
    }

    let llm = builder
        .build()
        .map_err(|e| AdvisorError::Build(e.to_string()))?;

    let messages = vec![ChatMessage::user().content(user_msg).build()];

    let response = llm
        .chat(&messages)
        .await
        .map_err(|e| AdvisorError::Chat(e.to_string()))?;

    reply_text(response.text())
}

/// Separate a blank reply from one with no text part at all.
pub(crate) fn reply_text(text: Option<String>) -> Result<String, AdvisorError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => {
            tracing::warn!("LLM replied with blank text");
            Err(AdvisorError::EmptyResponse)
        }
        None => {
            tracing::warn!("LLM reply carried no text part");
            Err(AdvisorError::MissingText)
        }
    }
}
