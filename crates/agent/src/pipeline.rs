//! Escalation Pipeline
//!
//! The orchestration state machine. Walks a fixed stage graph per request:
//!
//! 1. `retrieve_primary` - always
//! 2. `grade_primary` - if tier 1 returned candidates
//! 3. `retrieve_papers` - only if grading (or tier-1 failure) escalated
//! 4. `grade_papers` - if tier 2 returned candidates
//! 5. `retrieve_web` - only if tier-2 grading (or failure) escalated;
//!    terminal tier, results trusted ungraded to bound latency
//! 6. `generate` - always, exactly once, over the accepted-pool union
//!
//! Escalation is one-directional; a lower tier is never revisited. Source
//! and grading failures are absorbed into escalation decisions; only
//! generation failure reaches the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use meetmind_core::{
    AgentError, AgentResult, AnswerGenerator, EvidenceSource, RelevanceGrader, Verdict,
};

use crate::context::{AgentOutcome, RequestContext, StageId};

/// One incoming question, with the transcript as optional side context.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub query: String,
    pub side_context: Option<String>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            side_context: None,
        }
    }

    pub fn with_side_context(mut self, side_context: impl Into<String>) -> Self {
        self.side_context = Some(side_context.into());
        self
    }
}

/// The retrieval-escalation orchestration engine.
///
/// Holds one adapter per tier plus the grader and generator, all behind
/// capability traits so deterministic stubs can drive the machine in tests.
/// Stateless across requests; each `run` owns its own `RequestContext`, so
/// concurrent requests need no locking.
pub struct EscalationPipeline {
    primary: Arc<dyn EvidenceSource>,
    papers: Arc<dyn EvidenceSource>,
    web: Arc<dyn EvidenceSource>,
    grader: Arc<dyn RelevanceGrader>,
    generator: Arc<dyn AnswerGenerator>,
}

impl EscalationPipeline {
    /// Create a pipeline over the given collaborators.
    pub fn new(
        primary: Arc<dyn EvidenceSource>,
        papers: Arc<dyn EvidenceSource>,
        web: Arc<dyn EvidenceSource>,
        grader: Arc<dyn RelevanceGrader>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            primary,
            papers,
            web,
            grader,
            generator,
        }
    }

    /// Answer one question: create the request context, traverse the stage
    /// machine, and return the terminal outcome.
    pub async fn run(&self, request: QueryRequest) -> AgentResult<AgentOutcome> {
        let mut ctx = RequestContext::new(request.query, request.side_context);
        self.execute(&mut ctx).await?;
        Ok(AgentOutcome {
            answer: ctx.answer().unwrap_or_default().to_string(),
            trace: ctx.trace().to_vec(),
            sources_consulted: ctx.sources_consulted(),
            evidence: ctx.accepted().to_vec(),
        })
    }

    /// Traverse the stage machine over an externally owned context.
    ///
    /// On error the context retains the trace of every stage attempted,
    /// including the failed `generate` entry.
    pub async fn execute(&self, ctx: &mut RequestContext) -> AgentResult<()> {
        // Tier 1: always consulted.
        ctx.record_stage(StageId::RetrievePrimary);
        let fetched = self.primary.fetch(ctx.query()).await;
        match fetched {
            Ok(passages) => ctx.replace_evidence(passages),
            Err(err) => {
                warn!(error = %err, "primary source unavailable, escalating");
                ctx.replace_evidence(Vec::new());
                ctx.escalate_mut().request_papers();
            }
        }
        if ctx.evidence().is_empty() {
            // Empty evidence is worse than any-relevant-found: force the
            // next tier and skip grading.
            if !ctx.escalate().to_papers() {
                debug!("primary tier returned no passages, escalating");
                ctx.escalate_mut().request_papers();
            }
        } else {
            ctx.record_stage(StageId::GradePrimary);
            let dropped = self.grade_candidates(ctx).await;
            if dropped > 0 {
                debug!(dropped, "primary passages dropped, escalating to papers");
                ctx.escalate_mut().request_papers();
            }
        }

        // Tier 2: conditional on escalation.
        if ctx.escalate().to_papers() {
            ctx.record_stage(StageId::RetrievePapers);
            let fetched = self.papers.fetch(ctx.query()).await;
            match fetched {
                Ok(passages) => ctx.replace_evidence(passages),
                Err(err) => {
                    // Do not stall on a dead tier; go straight to tier 3.
                    warn!(error = %err, "paper source unavailable, escalating");
                    ctx.replace_evidence(Vec::new());
                    ctx.escalate_mut().request_web();
                }
            }
            if ctx.evidence().is_empty() {
                if !ctx.escalate().to_web() {
                    debug!("paper tier returned no passages, escalating");
                    ctx.escalate_mut().request_web();
                }
            } else {
                ctx.record_stage(StageId::GradePapers);
                let dropped = self.grade_candidates(ctx).await;
                if dropped > 0 {
                    debug!(dropped, "paper passages dropped, escalating to web");
                    ctx.escalate_mut().request_web();
                }
            }
        }

        // Tier 3: conditional, terminal, trusted as-is.
        if ctx.escalate().to_web() {
            ctx.record_stage(StageId::RetrieveWeb);
            let fetched = self.web.fetch(ctx.query()).await;
            match fetched {
                Ok(passages) => {
                    ctx.replace_evidence(passages);
                    let trusted = ctx.take_evidence();
                    for passage in trusted {
                        ctx.accept(passage);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "web source unavailable, continuing with accepted evidence");
                }
            }
        }

        self.generate(ctx).await
    }

    /// Grade the current tier's candidates, one passage per call, in
    /// adapter order. Survivors move into the accepted pool (and remain
    /// the candidate pool); a grading failure drops only that passage.
    /// Returns how many passages were dropped.
    async fn grade_candidates(&self, ctx: &mut RequestContext) -> usize {
        let candidates = ctx.take_evidence();
        let total = candidates.len();

        let mut survivors = Vec::new();
        for passage in candidates {
            let verdict = match self.grader.grade(ctx.query(), &passage).await {
                Ok(verdict) => verdict,
                Err(err) => {
                    // Fail-closed: an ungradable passage is not evidence.
                    warn!(error = %err, "grading failed for passage, treating as not relevant");
                    Verdict::NotRelevant
                }
            };
            if verdict.is_relevant() {
                survivors.push(passage);
            }
        }

        let dropped = total - survivors.len();
        for passage in &survivors {
            ctx.accept(passage.clone());
        }
        ctx.replace_evidence(survivors);
        dropped
    }

    /// Terminal stage: invoke the generator over the accepted pool.
    ///
    /// Generation before any retrieval stage is a contract violation and
    /// surfaces immediately as `InvalidState`.
    pub async fn generate(&self, ctx: &mut RequestContext) -> AgentResult<()> {
        if !ctx.has_retrieved() {
            return Err(AgentError::invalid_state(
                "generation attempted before any retrieval stage",
            ));
        }

        ctx.record_stage(StageId::Generate);
        info!(
            accepted = ctx.accepted().len(),
            sources = ?ctx.sources_consulted(),
            "generating answer"
        );

        let answer = self
            .generator
            .generate(ctx.query(), ctx.accepted(), ctx.side_context())
            .await?;
        ctx.set_answer(answer);
        Ok(())
    }
}
