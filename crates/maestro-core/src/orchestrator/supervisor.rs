//! Supervisor - planning, fallback routing and synthesis

use super::config::OrchestratorConfig;
use super::plan::{OrchestrationPlan, PlanStep};
use super::prompts::{
    format_history, planning_prompt, synthesis_prompt, PLANNER_SYSTEM_PROMPT,
    SYNTHESIS_SYSTEM_PROMPT,
};
use super::types::AgentResult;
use crate::agents::{capabilities, AgentCapability, AgentType, ConversationMessage};
use crate::error::{Error, Result, UserFriendlyError};
use crate::events::{token_events, EventStream, OrchestrationEvent};
use futures::stream::{self, StreamExt};
use maestro_llm::{CompletionRequest, LlmProvider};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Plans messages and merges multi-agent output
#[derive(Clone)]
pub struct Supervisor {
    provider: Arc<dyn LlmProvider>,
    config: OrchestratorConfig,
}

impl Supervisor {
    /// Create a supervisor
    pub fn new(provider: Arc<dyn LlmProvider>, config: OrchestratorConfig) -> Self {
        Self { provider, config }
    }

    fn model(&self) -> String {
        self.config
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// Decide which agent(s) handle `user_message`.
    ///
    /// Never fails: unparseable planner output yields the support plan, and a
    /// failed or timed-out planning call yields keyword routing.
    #[instrument(skip_all, fields(message_len = user_message.len(), history = history.len()))]
    pub async fn create_plan(
        &self,
        user_message: &str,
        history: &[ConversationMessage],
    ) -> OrchestrationPlan {
        let history = format_history(history, self.config.history_turns);
        let request = CompletionRequest::from_prompt(
            planning_prompt(user_message, &history),
            Some(PLANNER_SYSTEM_PROMPT),
        )
        .with_model(self.model())
        .with_temperature(self.config.planning_temperature)
        .with_max_tokens(self.config.planning_max_tokens);

        let raw = match self.request_plan(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Planning call failed, falling back to keyword routing");
                return keyword_plan(user_message);
            }
        };

        match OrchestrationPlan::parse(&raw) {
            Ok(plan) => {
                debug!(plan_type = plan.plan_type(), steps = plan.steps().len(), "Planner produced a plan");
                plan
            }
            Err(e) => {
                warn!(error = %e, raw_len = raw.len(), "Could not parse planner output, defaulting to support");
                OrchestrationPlan::default_support()
            }
        }
    }

    async fn request_plan(&self, request: CompletionRequest) -> Result<String> {
        let timeout = self.config.planning_timeout();
        match tokio::time::timeout(timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) => Ok(response.content),
            Ok(Err(e)) => Err(Error::Llm(e)),
            Err(_) => Err(Error::Llm(maestro_llm::Error::Timeout(
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ))),
        }
    }

    /// Merge step outputs into one streamed answer.
    ///
    /// Yields `token` events then `complete`, or a single `error` event on
    /// failure (tokens already yielded stay delivered).
    pub fn synthesize_results(
        &self,
        results: &[AgentResult],
        instructions: &str,
        original_query: &str,
        session_id: &str,
    ) -> EventStream {
        info!(agents = results.len(), "Synthesizing agent results");
        let request = CompletionRequest::from_prompt(
            synthesis_prompt(results, instructions, original_query),
            Some(SYNTHESIS_SYSTEM_PROMPT),
        )
        .with_model(self.model())
        .with_temperature(self.config.synthesis_temperature)
        .with_max_tokens(self.config.synthesis_max_tokens);

        let provider = Arc::clone(&self.provider);
        let session_id = session_id.to_string();

        stream::once(async move { provider.complete_stream(request).await })
            .flat_map(move |opened| match opened {
                Ok(chunks) => token_events(chunks, session_id.clone()),
                Err(e) => stream::iter([Err(Error::Llm(e))]).boxed(),
            })
            .map(|item| {
                item.unwrap_or_else(|e| {
                    error!(error = %e, "Synthesis failed");
                    OrchestrationEvent::error(Error::Synthesis(e.to_string()).user_message())
                })
            })
            .boxed()
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Pick an agent by keyword counts.
///
/// Folds over `capabilities` in order; a later entry replaces the current
/// best only with a strictly greater score, so the first entry wins ties.
pub fn route_by_keywords(message: &str, capabilities: &[AgentCapability]) -> Option<AgentType> {
    let lowered = message.to_lowercase();
    let first = capabilities.first()?;

    let (best, _) = capabilities
        .iter()
        .fold((first.agent_type, 0usize), |(best, best_score), cap| {
            let score = cap
                .keywords
                .iter()
                .filter(|keyword| lowered.contains(*keyword))
                .count();
            if score > best_score {
                (cap.agent_type, score)
            } else {
                (best, best_score)
            }
        });

    Some(best)
}

fn keyword_plan(user_message: &str) -> OrchestrationPlan {
    let agent = route_by_keywords(user_message, capabilities()).unwrap_or(AgentType::Support);
    info!(agent = %agent, "Keyword routing selected agent");
    OrchestrationPlan::single(
        PlanStep::new(agent, user_message),
        format!("Keyword routing fallback selected {agent}"),
    )
}
