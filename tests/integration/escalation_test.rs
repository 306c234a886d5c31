//! Escalation Engine Integration Tests
//!
//! Drives the stage machine end to end with deterministic stubs and checks
//! the observable contract: trace shape, escalation triggers, accepted-pool
//! ordering, and failure behavior.

use meetmind_agent::{QueryRequest, RequestContext, StageId};
use meetmind_core::{AgentError, SourceKind};

use crate::stubs::{engine, RecordingGenerator, ScriptedSource};

/// Stage declaration order, used to check that a trace never moves
/// backwards through the machine.
fn stage_rank(stage: StageId) -> usize {
    match stage {
        StageId::RetrievePrimary => 0,
        StageId::GradePrimary => 1,
        StageId::RetrievePapers => 2,
        StageId::GradePapers => 3,
        StageId::RetrieveWeb => 4,
        StageId::Generate => 5,
    }
}

fn assert_trace_well_formed(trace: &[StageId]) {
    // Terminates with exactly one generate stage.
    assert_eq!(trace.last(), Some(&StageId::Generate));
    assert_eq!(
        trace.iter().filter(|s| **s == StageId::Generate).count(),
        1
    );
    // One-directional: no stage repeats, no backwards movement.
    for pair in trace.windows(2) {
        assert!(stage_rank(pair[0]) < stage_rank(pair[1]), "trace moved backwards: {:?}", trace);
    }
}

#[tokio::test]
async fn test_full_acceptance_skips_escalation() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["alpha", "beta", "gamma"]),
        ScriptedSource::returning(SourceKind::Papers, vec!["never fetched"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator.clone(),
    );

    let outcome = pipeline
        .run(QueryRequest::new("what did we decide?"))
        .await
        .unwrap();

    assert_eq!(
        outcome.trace,
        vec![
            StageId::RetrievePrimary,
            StageId::GradePrimary,
            StageId::Generate
        ]
    );
    assert!(!outcome.trace.contains(&StageId::RetrievePapers));
    assert_eq!(outcome.sources_consulted, vec![SourceKind::Primary]);
    assert_eq!(generator.evidence(), vec!["alpha", "beta", "gamma"]);
    assert_trace_well_formed(&outcome.trace);
}

#[tokio::test]
async fn test_total_rejection_escalates_to_papers() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["irrelevant a", "irrelevant b"]),
        ScriptedSource::returning(SourceKind::Papers, vec!["paper finding"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator.clone(),
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    assert_eq!(
        outcome.trace,
        vec![
            StageId::RetrievePrimary,
            StageId::GradePrimary,
            StageId::RetrievePapers,
            StageId::GradePapers,
            StageId::Generate
        ]
    );
    assert_eq!(generator.evidence(), vec!["paper finding"]);
    assert_eq!(
        outcome.sources_consulted,
        vec![SourceKind::Primary, SourceKind::Papers]
    );
}

#[tokio::test]
async fn test_primary_outage_forces_escalation_without_grading() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::unavailable(SourceKind::Primary),
        ScriptedSource::returning(SourceKind::Papers, vec!["paper finding"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator,
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    // The attempt is still recorded before the next tier runs.
    assert_eq!(outcome.trace[0], StageId::RetrievePrimary);
    assert!(!outcome.trace.contains(&StageId::GradePrimary));
    assert!(outcome.trace.contains(&StageId::RetrievePapers));
    assert_trace_well_formed(&outcome.trace);
}

#[tokio::test]
async fn test_zero_accepted_evidence_still_generates() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::empty(SourceKind::Primary),
        ScriptedSource::empty(SourceKind::Papers),
        ScriptedSource::empty(SourceKind::Web),
        generator.clone(),
    );

    let outcome = pipeline
        .run(QueryRequest::new("q").with_side_context("the transcript"))
        .await
        .unwrap();

    assert_eq!(
        outcome.trace,
        vec![
            StageId::RetrievePrimary,
            StageId::RetrievePapers,
            StageId::RetrieveWeb,
            StageId::Generate
        ]
    );
    assert_eq!(generator.evidence(), Vec::<String>::new());
    // Side context still reaches the generator for a transcript-only answer.
    assert_eq!(
        generator.seen_side_context.lock().unwrap().clone().unwrap(),
        Some("the transcript".to_string())
    );
    assert_eq!(
        outcome.sources_consulted,
        vec![SourceKind::Primary, SourceKind::Papers, SourceKind::Web]
    );
}

#[tokio::test]
async fn test_generation_failure_surfaces_with_trace() {
    let generator = RecordingGenerator::failing();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["alpha"]),
        ScriptedSource::returning(SourceKind::Papers, vec!["never fetched"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator,
    );

    let mut ctx = RequestContext::new("q", None);
    let err = pipeline.execute(&mut ctx).await.unwrap_err();

    assert!(matches!(err, AgentError::GenerationFailed { .. }));
    assert!(ctx.answer().is_none());
    // Every attempted stage is in the trace, including the failed generate.
    assert_eq!(
        ctx.trace(),
        &[
            StageId::RetrievePrimary,
            StageId::GradePrimary,
            StageId::Generate
        ]
    );
}

#[tokio::test]
async fn test_partial_rejection_keeps_survivors_and_escalates() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(
            SourceKind::Primary,
            vec!["keep one", "irrelevant", "keep two"],
        ),
        ScriptedSource::returning(SourceKind::Papers, vec!["paper finding"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator.clone(),
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    // Partial relevance still broadens the search, without discarding the
    // survivors already graded relevant.
    assert!(outcome.trace.contains(&StageId::RetrievePapers));
    assert_eq!(
        generator.evidence(),
        vec!["keep one", "keep two", "paper finding"]
    );
}

#[tokio::test]
async fn test_accepted_pool_ordering_across_all_tiers() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["p1", "irrelevant", "p2"]),
        ScriptedSource::returning(SourceKind::Papers, vec!["a1", "irrelevant paper"]),
        ScriptedSource::returning(SourceKind::Web, vec!["w1", "w2"]),
        generator.clone(),
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    // Tier order, and adapter-return order within each tier.
    assert_eq!(generator.evidence(), vec!["p1", "p2", "a1", "w1", "w2"]);
    assert_eq!(outcome.evidence, vec!["p1", "p2", "a1", "w1", "w2"]);
    assert_trace_well_formed(&outcome.trace);
}

#[tokio::test]
async fn test_paper_outage_forwards_to_web() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["irrelevant"]),
        ScriptedSource::unavailable(SourceKind::Papers),
        ScriptedSource::returning(SourceKind::Web, vec!["web hit"]),
        generator.clone(),
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    assert!(!outcome.trace.contains(&StageId::GradePapers));
    assert!(outcome.trace.contains(&StageId::RetrieveWeb));
    assert_eq!(generator.evidence(), vec!["web hit"]);
}

#[tokio::test]
async fn test_web_outage_is_never_fatal() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["keep", "irrelevant"]),
        ScriptedSource::empty(SourceKind::Papers),
        ScriptedSource::unavailable(SourceKind::Web),
        generator.clone(),
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    // The terminal tier failing quietly reduces evidence quality, nothing
    // more; the survivor from tier 1 still reaches generation.
    assert_eq!(generator.evidence(), vec!["keep"]);
    assert!(outcome.trace.contains(&StageId::RetrieveWeb));
    assert_trace_well_formed(&outcome.trace);
}

#[tokio::test]
async fn test_ungradable_passage_fails_closed() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["fine", "ungradable"]),
        ScriptedSource::returning(SourceKind::Papers, vec!["paper finding"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator.clone(),
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    // The grader outage dropped one passage and triggered escalation, but
    // never failed the request.
    assert!(outcome.trace.contains(&StageId::RetrievePapers));
    assert_eq!(generator.evidence(), vec!["fine", "paper finding"]);
}

#[tokio::test]
async fn test_sources_consulted_matches_trace() {
    let generator = RecordingGenerator::ok();
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["irrelevant"]),
        ScriptedSource::empty(SourceKind::Papers),
        ScriptedSource::returning(SourceKind::Web, vec!["web hit"]),
        generator,
    );

    let outcome = pipeline.run(QueryRequest::new("q")).await.unwrap();

    let mut expected = Vec::new();
    for stage in &outcome.trace {
        match stage {
            StageId::RetrievePrimary => expected.push(SourceKind::Primary),
            StageId::RetrievePapers => expected.push(SourceKind::Papers),
            StageId::RetrieveWeb => expected.push(SourceKind::Web),
            _ => {}
        }
    }
    assert_eq!(outcome.sources_consulted, expected);
}

#[tokio::test]
async fn test_identical_requests_are_idempotent() {
    let make = || {
        let generator = RecordingGenerator::ok();
        engine(
            ScriptedSource::returning(SourceKind::Primary, vec!["keep", "irrelevant"]),
            ScriptedSource::returning(SourceKind::Papers, vec!["paper finding"]),
            ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
            generator,
        )
    };

    let request = QueryRequest::new("q").with_side_context("transcript");
    let first = make().run(request.clone()).await.unwrap();
    let second = make().run(request).await.unwrap();

    assert_eq!(first.trace, second.trace);
    assert_eq!(first.answer, second.answer);
    assert_eq!(first.evidence, second.evidence);
}
