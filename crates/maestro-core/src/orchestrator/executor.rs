//! Executor - runs a plan and streams its events
//!
//! One executor per request. The run happens in a spawned task that feeds a
//! bounded channel; dropping the returned stream stops the task at its next
//! suspension point.

use super::config::OrchestratorConfig;
use super::core::OrchestrationRequest;
use super::plan::{OrchestrationPlan, PlanKind, PlanStep};
use super::supervisor::Supervisor;
use super::types::AgentResult;
use crate::agents::{
    display_name, AgentDirectory, AgentInput, HandoffContext, DEFAULT_HANDOFF_REASON,
};
use crate::error::{Error, Result, UserFriendlyError};
use crate::events::{EventSink, EventStream, OrchestrationEvent};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

const PLANNING_STATUS: &str = "Analyzing your request...";
const SYNTHESIS_STATUS: &str = "Combining insights from multiple agents...";

/// How a run ended, for the summary log line
#[derive(Debug, Default)]
struct RunSummary {
    plan_type: &'static str,
    steps: usize,
    failed_steps: usize,
    synthesized: bool,
    succeeded: bool,
}

/// Output of one sequential step
#[derive(Debug, Default)]
struct StepOutcome {
    content: String,
    error: Option<String>,
    raised: Option<Error>,
}

impl StepOutcome {
    fn into_result(self, step: &PlanStep) -> AgentResult {
        match self.error {
            Some(error) if self.content.is_empty() => {
                AgentResult::failed(step.agent, step.task.clone(), error)
            }
            error => AgentResult {
                agent: step.agent,
                content: self.content,
                task: step.task.clone(),
                error,
            },
        }
    }
}

/// Interprets an [`OrchestrationPlan`]
pub struct Executor {
    supervisor: Supervisor,
    agents: Arc<AgentDirectory>,
    config: OrchestratorConfig,
}

impl Executor {
    /// Create an executor
    pub fn new(
        supervisor: Supervisor,
        agents: Arc<AgentDirectory>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            supervisor,
            agents,
            config,
        }
    }

    /// Plan and run `request`, returning its event stream.
    ///
    /// The stream always starts with `orchestration_start` and ends with
    /// exactly one `complete` or `error`.
    pub fn execute(self, request: OrchestrationRequest) -> EventStream {
        let (sink, events) = EventSink::channel(self.config.event_buffer);

        tokio::spawn(async move {
            tokio::select! {
                () = self.run(&request, &sink) => {}
                () = sink.closed() => {
                    debug!(session_id = %request.session_id, "Event stream dropped, stopping orchestration");
                }
            }
        });

        events
    }

    #[instrument(skip_all, fields(session_id = %request.session_id))]
    async fn run(&self, request: &OrchestrationRequest, sink: &EventSink) {
        let started = Instant::now();

        match self.drive(request, sink).await {
            Ok(summary) => info!(
                plan_type = summary.plan_type,
                steps = summary.steps,
                failed_steps = summary.failed_steps,
                synthesized = summary.synthesized,
                succeeded = summary.succeeded,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Orchestration finished"
            ),
            Err(Error::Cancelled) => {
                debug!("Event stream dropped, stopping orchestration");
            }
            Err(e) => {
                error!(error = %e, "Orchestration failed");
                let _ = sink.emit(OrchestrationEvent::error(e.user_message())).await;
            }
        }
    }

    async fn drive(&self, request: &OrchestrationRequest, sink: &EventSink) -> Result<RunSummary> {
        sink.emit(OrchestrationEvent::OrchestrationStart {
            message: PLANNING_STATUS.to_string(),
        })
        .await?;

        let plan = self
            .supervisor
            .create_plan(&request.user_message, &request.conversation_history)
            .await;
        info!(
            plan_type = plan.plan_type(),
            steps = plan.steps().len(),
            synthesis_needed = plan.synthesis_needed,
            analysis = %plan.analysis,
            "Executing plan"
        );

        match &plan.kind {
            PlanKind::Single(step) => self.run_single(step, request, sink).await,
            PlanKind::Sequential(steps) => self.run_sequential(&plan, steps, request, sink).await,
        }
    }

    fn agent_input(&self, request: &OrchestrationRequest, step: &PlanStep) -> AgentInput {
        AgentInput::new(request.user_message.clone(), request.user_context())
            .with_task(step.task.clone())
            .with_history(request.recent_history(self.config.history_turns))
    }

    /// Relay one agent's events unchanged up to its terminal event.
    async fn run_single(
        &self,
        step: &PlanStep,
        request: &OrchestrationRequest,
        sink: &EventSink,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            plan_type: "single",
            steps: 1,
            ..Default::default()
        };

        let input = self.agent_input(request, step);
        let mut stream = match self.agents.invoke(step.agent, input).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(agent = %step.agent, error = %e, "Agent failed to start");
                summary.failed_steps = 1;
                sink.emit(OrchestrationEvent::error(e.user_message())).await?;
                return Ok(summary);
            }
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(event) => {
                    let terminal = event.is_terminal();
                    summary.succeeded = matches!(event, OrchestrationEvent::Complete { .. });
                    sink.emit(event).await?;
                    if terminal {
                        if !summary.succeeded {
                            summary.failed_steps = 1;
                        }
                        return Ok(summary);
                    }
                }
                Err(e) => {
                    warn!(agent = %step.agent, error = %e, "Agent raised");
                    summary.failed_steps = 1;
                    sink.emit(OrchestrationEvent::error(e.user_message())).await?;
                    return Ok(summary);
                }
            }
        }

        summary.succeeded = true;
        sink.emit(OrchestrationEvent::complete(request.session_id.clone()))
            .await?;
        Ok(summary)
    }

    /// Run steps in order with handoffs, then synthesize or finish.
    async fn run_sequential(
        &self,
        plan: &OrchestrationPlan,
        steps: &[PlanStep],
        request: &OrchestrationRequest,
        sink: &EventSink,
    ) -> Result<RunSummary> {
        let total = steps.len();
        let mut results: Vec<AgentResult> = Vec::with_capacity(total);
        let mut last_error: Option<String> = None;

        for (index, step) in steps.iter().enumerate() {
            let is_last = index + 1 == total;
            sink.emit(OrchestrationEvent::AgentStep {
                step: index + 1,
                total,
                agent: step.agent.to_string(),
                task: step.task.clone(),
            })
            .await?;

            let mut input = self.agent_input(request, step);
            if let Some(previous) = results.last() {
                let handoff = HandoffContext::new(
                    previous.agent,
                    step.agent,
                    step.depends_on
                        .clone()
                        .unwrap_or_else(|| DEFAULT_HANDOFF_REASON.to_string()),
                    previous.findings(self.config.findings_summary_chars),
                )
                .with_instructions(step.task.clone())
                .with_original_query(request.user_message.clone())
                .with_conversation(request.recent_history(self.config.history_turns))
                .with_step(index + 1, total);
                debug!(from = %handoff.from_agent, to = %handoff.to_agent, "Handing off");
                input = input.with_handoff(handoff);
            }

            let outcome = self.run_step(step, input, plan.synthesis_needed, sink).await?;

            last_error = match (&outcome.raised, &outcome.error) {
                (Some(raised), _) => {
                    warn!(agent = %step.agent, step = index + 1, error = %raised, "Step raised, continuing");
                    if !is_last {
                        sink.emit(OrchestrationEvent::AgentError {
                            agent: step.agent.to_string(),
                            error: format!(
                                "{} ran into a problem, continuing with the next step...",
                                display_name(step.agent)
                            ),
                        })
                        .await?;
                    }
                    Some(raised.user_message())
                }
                (None, Some(reported)) => {
                    warn!(agent = %step.agent, step = index + 1, error = %reported, "Step reported an error");
                    Some(reported.clone())
                }
                (None, None) => None,
            };

            results.push(outcome.into_result(step));
        }

        let mut summary = RunSummary {
            plan_type: "sequential",
            steps: results.len(),
            failed_steps: results.iter().filter(|r| r.is_error()).count(),
            ..Default::default()
        };

        if plan.synthesis_needed && results.len() > 1 {
            sink.emit(OrchestrationEvent::SynthesisStart {
                message: SYNTHESIS_STATUS.to_string(),
            })
            .await?;
            summary.synthesized = true;

            let mut synthesis = self.supervisor.synthesize_results(
                &results,
                &plan.synthesis_instructions,
                &request.user_message,
                &request.session_id,
            );
            while let Some(event) = synthesis.next().await {
                summary.succeeded = matches!(event, OrchestrationEvent::Complete { .. });
                sink.emit(event).await?;
            }
        } else if let Some(message) = last_error {
            sink.emit(OrchestrationEvent::error(message)).await?;
        } else {
            summary.succeeded = true;
            sink.emit(OrchestrationEvent::complete(request.session_id.clone()))
                .await?;
        }

        Ok(summary)
    }

    /// Consume one step's stream, forwarding what the plan allows.
    async fn run_step(
        &self,
        step: &PlanStep,
        input: AgentInput,
        synthesis_needed: bool,
        sink: &EventSink,
    ) -> Result<StepOutcome> {
        let mut outcome = StepOutcome::default();

        let mut stream = match self.agents.invoke(step.agent, input).await {
            Ok(stream) => stream,
            Err(e) => {
                outcome.error = Some(e.to_string());
                outcome.raised = Some(e);
                return Ok(outcome);
            }
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(OrchestrationEvent::Token { content }) => {
                    outcome.content.push_str(&content);
                    if !synthesis_needed {
                        sink.emit(OrchestrationEvent::Token { content }).await?;
                    }
                }
                Ok(OrchestrationEvent::Error { message }) => {
                    outcome.error = Some(message);
                }
                Ok(OrchestrationEvent::Complete { .. }) => {}
                Ok(event) if event.is_always_forwarded() || !synthesis_needed => {
                    sink.emit(event).await?;
                }
                Ok(event) => {
                    debug!(agent = %step.agent, kind = event.kind(), "Suppressed step event");
                }
                Err(e) => {
                    outcome.error = Some(e.to_string());
                    outcome.raised = Some(e);
                    break;
                }
            }
        }

        Ok(outcome)
    }
}
