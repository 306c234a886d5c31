//! Deterministic stub collaborators for the escalation engine.
//!
//! Grading convention: passages containing "irrelevant" are rejected,
//! passages containing "ungradable" make the grader error, everything else
//! is accepted.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use meetmind_agent::EscalationPipeline;
use meetmind_core::{
    AgentError, AgentResult, AnswerGenerator, EvidenceSource, RelevanceGrader, SourceKind, Verdict,
};

pub enum FetchBehavior {
    Passages(Vec<&'static str>),
    Unavailable,
}

pub struct ScriptedSource {
    kind: SourceKind,
    behavior: FetchBehavior,
}

impl ScriptedSource {
    pub fn returning(kind: SourceKind, passages: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            behavior: FetchBehavior::Passages(passages),
        })
    }

    pub fn empty(kind: SourceKind) -> Arc<Self> {
        Self::returning(kind, Vec::new())
    }

    pub fn unavailable(kind: SourceKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            behavior: FetchBehavior::Unavailable,
        })
    }
}

#[async_trait]
impl EvidenceSource for ScriptedSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &str) -> AgentResult<Vec<String>> {
        match &self.behavior {
            FetchBehavior::Passages(passages) => {
                Ok(passages.iter().map(|p| p.to_string()).collect())
            }
            FetchBehavior::Unavailable => {
                Err(AgentError::source_unavailable(self.kind, "scripted outage"))
            }
        }
    }
}

pub struct KeywordGrader;

#[async_trait]
impl RelevanceGrader for KeywordGrader {
    async fn grade(&self, _query: &str, passage: &str) -> AgentResult<Verdict> {
        if passage.contains("ungradable") {
            Err(AgentError::grading_failed("scripted grader outage"))
        } else if passage.contains("irrelevant") {
            Ok(Verdict::NotRelevant)
        } else {
            Ok(Verdict::Relevant)
        }
    }
}

pub struct RecordingGenerator {
    pub seen_evidence: Mutex<Option<Vec<String>>>,
    pub seen_side_context: Mutex<Option<Option<String>>>,
    fail: bool,
}

impl RecordingGenerator {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            seen_evidence: Mutex::new(None),
            seen_side_context: Mutex::new(None),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            seen_evidence: Mutex::new(None),
            seen_side_context: Mutex::new(None),
            fail: true,
        })
    }

    pub fn evidence(&self) -> Vec<String> {
        self.seen_evidence
            .lock()
            .unwrap()
            .clone()
            .expect("generator was never invoked")
    }
}

#[async_trait]
impl AnswerGenerator for RecordingGenerator {
    async fn generate(
        &self,
        _query: &str,
        evidence: &[String],
        side_context: Option<&str>,
    ) -> AgentResult<String> {
        *self.seen_evidence.lock().unwrap() = Some(evidence.to_vec());
        *self.seen_side_context.lock().unwrap() = Some(side_context.map(|s| s.to_string()));
        if self.fail {
            Err(AgentError::generation_failed("scripted model outage"))
        } else {
            Ok(format!("answer[{}]", evidence.join(" | ")))
        }
    }
}

pub fn engine(
    primary: Arc<ScriptedSource>,
    papers: Arc<ScriptedSource>,
    web: Arc<ScriptedSource>,
    generator: Arc<RecordingGenerator>,
) -> EscalationPipeline {
    EscalationPipeline::new(primary, papers, web, Arc::new(KeywordGrader), generator)
}
