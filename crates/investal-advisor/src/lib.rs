pub mod engine;
mod prompt;

use investal_core::{AdvisorSettings, Opportunity};

pub use prompt::opportunity_lines;

/// Shown when no provider/key is configured; no request is made.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Error: API_KEY no configurada. Por favor, configura la variable de entorno API_KEY.";

/// Shown in place of a plan whenever generation fails.
pub const FAILURE_MESSAGE: &str =
    "Hubo un error al generar el plan de acción. Por favor, intenta de nuevo más tarde.";

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("build LLM: {0}")]
    Build(String),

    #[error("chat: {0}")]
    Chat(String),

    #[error("LLM returned blank text")]
    EmptyResponse,

    #[error("LLM response had no text")]
    MissingText,
}

/// Writes 90-day action plans from a list of opportunities.
///
/// Holds its settings explicitly; a fresh LLM client is built per request.
#[derive(Debug, Clone)]
pub struct ActionPlanner {
    settings: AdvisorSettings,
}

impl ActionPlanner {
    pub fn new(settings: AdvisorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AdvisorSettings {
        &self.settings
    }

    /// Ask the LLM for an action plan. Never fails: on any error the returned
    /// text is [`NOT_CONFIGURED_MESSAGE`] or [`FAILURE_MESSAGE`].
    pub async fn generate_plan(&self, opportunities: &[Opportunity]) -> String {
        if !self.settings.is_configured() {
            tracing::warn!("advisor not configured; skipping plan generation");
            return NOT_CONFIGURED_MESSAGE.to_string();
        }

        match self.try_generate_plan(opportunities).await {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!(error = %e, "action plan generation failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// Like [`generate_plan`](Self::generate_plan) but surfaces the error.
    pub async fn try_generate_plan(
        &self,
        opportunities: &[Opportunity],
    ) -> Result<String, AdvisorError> {
        let system = prompt::system_prompt();
        let user_msg = prompt::user_message(opportunities);

        tracing::info!(
            provider = %self.settings.provider,
            model = %self.settings.model,
            opportunities = opportunities.len(),
            "requesting action plan"
        );

        let plan = engine::generate(&self.settings, &system, &user_msg).await?;
        tracing::debug!(chars = plan.len(), "received action plan");
        Ok(plan)
    }
}
