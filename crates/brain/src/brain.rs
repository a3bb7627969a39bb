//! The dispatcher. Decides, per message, between the generative path and
//! the rule path, and always produces a response.

use std::path::Path;
use std::sync::Arc;

use strix_core::context::{ChatContext, PlanAction, MESSAGE_KEY};
use strix_core::inference::{GenerateRequest, InferenceClient};
use strix_core::task::TaskProfiles;
use strix_rules::{evaluate, load_plans, Plan, PlanSet, RuleError, WILDCARD};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::router::TaskRouter;

/// Reply used when neither a trigger nor any rule matches.
pub const FALLBACK_RESPONSE: &str = "I have no idea how to respond!";

/// Rule-based plus generative message processor.
///
/// Processing order is strict: task triggers first, rule matching second,
/// the fixed fallback last. A trigger always pre-empts rule matching, even
/// when a rule would also have matched the same text.
pub struct Brain {
    id: String,
    router: TaskRouter,
    plans: RwLock<PlanSet>,
    client: Arc<dyn InferenceClient>,
    model: String,
}

impl Brain {
    /// Create a brain with an empty rule table apart from the seeded
    /// catch-all, so a fresh brain already answers every message.
    pub fn new(
        id: impl Into<String>,
        client: Arc<dyn InferenceClient>,
        model: impl Into<String>,
        profiles: TaskProfiles,
    ) -> Self {
        let mut plans = PlanSet::new();
        plans.add(Self::catch_all());
        Self {
            id: id.into(),
            router: TaskRouter::new(profiles),
            plans: RwLock::new(plans),
            client,
            model: model.into(),
        }
    }

    fn catch_all() -> Plan {
        Plan::new(
            [(MESSAGE_KEY, WILDCARD)],
            PlanAction::Reply(FALLBACK_RESPONSE.into()),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of plans currently installed, catch-all included.
    pub async fn plan_count(&self) -> usize {
        self.plans.read().await.len()
    }

    /// Append one plan programmatically.
    pub async fn add_plan(&self, plan: Plan) {
        self.plans.write().await.add(plan);
    }

    /// Replace the rule table with the contents of a CSV file.
    ///
    /// The new set is built completely (catch-all first, then the file's
    /// plans in order) before it is swapped in, so a match running
    /// concurrently sees either the old table or the new one, never a
    /// half-loaded mix. Returns the startup announcement line.
    pub async fn reload_rules(&self, path: impl AsRef<Path>) -> Result<String, RuleError> {
        let path = path.as_ref();
        let report = load_plans(path)?;

        let mut next = PlanSet::new();
        next.add(Self::catch_all());
        next.extend(report.set.iter().cloned());
        *self.plans.write().await = next;

        let announcement = format!("{} {}", self.id, report.announcement(&path.display().to_string()));
        info!(
            brain = %self.id,
            loaded = report.loaded,
            skipped = report.skipped,
            path = %path.display(),
            "rule table installed"
        );
        Ok(announcement)
    }

    /// Process one context. Always completes and always sets `response`.
    pub async fn process(&self, context: &mut ChatContext) {
        let message = context.message().unwrap_or_default().to_string();

        if let Some(task) = self.router.route(&message) {
            debug!(brain = %self.id, kind = %task.kind, "task trigger fired");
            let request = GenerateRequest::new(&self.model, task.prompt, task.sampling);
            context.response = Some(match self.client.generate(request).await {
                Ok(generation) => {
                    debug!(
                        brain = %self.id,
                        elapsed_ms = generation.elapsed.as_millis() as u64,
                        "generation complete"
                    );
                    generation.text
                }
                Err(e) => {
                    warn!(brain = %self.id, error = %e, "inference failed");
                    format!("Error: {e}")
                }
            });
            return;
        }

        let verdict = {
            let plans = self.plans.read().await;
            evaluate(&context.facts, &plans)
        };
        debug!(
            brain = %self.id,
            score = verdict.score,
            candidates = verdict.all.len(),
            "rule match pass"
        );
        context.record_match(verdict.best.clone(), verdict.all, verdict.score);

        context.response = Some(match verdict.best {
            Some(PlanAction::Reply(text)) => text,
            Some(PlanAction::Invoke(name)) => format!("action '{name}' is not wired up yet"),
            None => FALLBACK_RESPONSE.to_string(),
        });
    }
}

impl std::fmt::Debug for Brain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brain")
            .field("id", &self.id)
            .field("model", &self.model)
            .finish()
    }
}
