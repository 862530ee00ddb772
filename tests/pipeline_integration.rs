//! Integration tests for the analysis pipeline.
//!
//! These tests drive the application handlers end to end with the mock
//! completion provider:
//! 1. Structured blocks parse into the mode's result, or fail closed
//! 2. Dataset summaries reach the prompt
//! 3. Reports export in every format

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use swot_agent::adapters::{exporter_for, CsvDatasetSource, MockCompletionProvider};
use swot_agent::application::{
    PreparePromptHandler, PreparePromptQuery, RunAnalysisCommand, RunAnalysisHandler,
};
use swot_agent::domain::extraction::{ExtractionOutcome, FallbackReason};
use swot_agent::domain::prompt::AnalysisRequest;
use swot_agent::domain::swot::{fallback_for, AnalysisMode, AnalysisResult, ScoreSet};
use swot_agent::ports::{DatasetSource, ExportFormat};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SCENARIO_ONE_REPLY: &str = "some narrative ```json\n{\"shop_name\":\"Cafe X\",\"scores\":{\"strengths\":9,\"weaknesses\":3,\"opportunities\":8,\"threats\":2},\"summary\":{\"strengths\":[\"a\"],\"weaknesses\":[\"b\"],\"opportunities\":[\"c\"],\"threats\":[\"d\"]}}\n```";

fn handler(mock: &MockCompletionProvider) -> RunAnalysisHandler {
    RunAnalysisHandler::new(Arc::new(mock.clone()), PreparePromptHandler::default())
}

fn fenced(value: serde_json::Value) -> String {
    format!("```json\n{}\n```", value)
}

fn shop(name: &str, s: u8, w: u8, o: u8, t: u8) -> serde_json::Value {
    json!({
        "name": name,
        "scores": {"strengths": s, "weaknesses": w, "opportunities": o, "threats": t},
        "summary": {
            "strengths": ["Good beans"],
            "weaknesses": ["Few seats"],
            "opportunities": ["Delivery"],
            "threats": ["Rent"]
        }
    })
}

fn single_command(name: &str) -> RunAnalysisCommand {
    RunAnalysisCommand::new(AnalysisRequest::single(name).unwrap())
}

// =============================================================================
// Extraction through the pipeline
// =============================================================================

#[tokio::test]
async fn structured_block_yields_exact_scores_and_lists() {
    let mock = MockCompletionProvider::new().with_response(SCENARIO_ONE_REPLY);
    let result = handler(&mock).handle(single_command("Cafe X")).await.unwrap();

    assert_eq!(result.outcome, ExtractionOutcome::Parsed);
    let AnalysisResult::Single(single) = &result.report.result else {
        panic!("expected a single result, got {:?}", result.report.result);
    };
    assert_eq!(single.shop_name, "Cafe X");
    assert_eq!(single.scores, ScoreSet::new(9, 3, 8, 2));
    assert_eq!(single.summary.strengths, vec!["a"]);
    assert_eq!(single.summary.weaknesses, vec!["b"]);
    assert_eq!(single.summary.opportunities, vec!["c"]);
    assert_eq!(single.summary.threats, vec!["d"]);
    assert_eq!(result.report.narrative, "some narrative");
}

#[tokio::test]
async fn reply_without_block_falls_back() {
    let mock = MockCompletionProvider::new().with_response("no json here at all");
    let result = handler(&mock).handle(single_command("Cafe X")).await.unwrap();

    assert_eq!(
        result.outcome,
        ExtractionOutcome::Fallback(FallbackReason::MissingBlock)
    );
    assert_eq!(&result.report.result, fallback_for(AnalysisMode::Single));
    let fallback = result.report.result.scored_subjects();
    assert_eq!(*fallback[0].scores, ScoreSet::new(7, 5, 6, 4));
    assert_eq!(result.report.narrative, "no json here at all");
    assert!(result.report.fallback_reason.is_some());
}

#[tokio::test]
async fn only_the_first_block_is_used() {
    let first = fenced(json!({
        "shop_name": "First",
        "scores": {"strengths": 1, "weaknesses": 2, "opportunities": 3, "threats": 4},
        "summary": {"strengths": [], "weaknesses": [], "opportunities": [], "threats": []}
    }));
    let second = fenced(json!({
        "shop_name": "Second",
        "scores": {"strengths": 10, "weaknesses": 10, "opportunities": 10, "threats": 10},
        "summary": {"strengths": [], "weaknesses": [], "opportunities": [], "threats": []}
    }));
    let mock = MockCompletionProvider::new().with_response(format!("{}\n{}", first, second));

    let result = handler(&mock).handle(single_command("First")).await.unwrap();

    let AnalysisResult::Single(single) = &result.report.result else {
        panic!("expected a single result");
    };
    assert_eq!(single.shop_name, "First");
    assert_eq!(single.scores, ScoreSet::new(1, 2, 3, 4));
}

#[tokio::test]
async fn block_only_reply_leaves_empty_narrative() {
    let reply = fenced(json!({
        "shop_name": "Cafe X",
        "scores": {"strengths": 9, "weaknesses": 3, "opportunities": 8, "threats": 2},
        "summary": {"strengths": [], "weaknesses": [], "opportunities": [], "threats": []}
    }));
    let mock = MockCompletionProvider::new().with_response(reply);

    let result = handler(&mock).handle(single_command("Cafe X")).await.unwrap();

    assert!(result.outcome.is_parsed());
    assert_eq!(result.report.narrative, "");
}

#[tokio::test]
async fn wrong_shape_for_mode_falls_back() {
    // A single-shop block is not a pairwise result.
    let mock = MockCompletionProvider::new().with_response(SCENARIO_ONE_REPLY);
    let cmd = RunAnalysisCommand::new(AnalysisRequest::pairwise("A", "B").unwrap());

    let result = handler(&mock).handle(cmd).await.unwrap();

    assert!(!result.outcome.is_parsed());
    assert_eq!(&result.report.result, fallback_for(AnalysisMode::Pairwise));
}

#[tokio::test]
async fn multi_reply_keeps_ranking_order() {
    let reply = format!(
        "📊 RANKING\n{}",
        fenced(json!({
            "my_shop": shop("A", 8, 3, 7, 4),
            "competitors": [shop("B", 6, 5, 5, 5), shop("C", 7, 4, 6, 3)],
            "ranking": [
                {"rank": 1, "name": "A", "total_score": 22, "note": "Leader"},
                {"rank": 2, "name": "C", "total_score": 20, "note": ""},
                {"rank": 3, "name": "B", "total_score": 18, "note": ""}
            ],
            "strategies": ["Loyalty card"]
        }))
    );
    let mock = MockCompletionProvider::new().with_response(reply);
    let cmd = RunAnalysisCommand::new(AnalysisRequest::multi("A", ["B", "C"]).unwrap());

    let result = handler(&mock).handle(cmd).await.unwrap();

    let AnalysisResult::Multi(multi) = &result.report.result else {
        panic!("expected a multi result");
    };
    let names: Vec<&str> = multi.ranking.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "B"]);
    assert_eq!(multi.competitors.len(), 2);
    assert_eq!(result.report.narrative, "📊 RANKING");
}

#[tokio::test]
async fn auto_detect_uses_context_and_detected_shops() {
    let reply = fenced(json!({
        "detected_shops": ["Cafe Sun", "Cafe Moon"],
        "my_shop": shop("Cafe Sun", 8, 3, 7, 4),
        "competitor": shop("Cafe Moon", 6, 5, 5, 5),
        "competitive_advantages": ["Quality"],
        "areas_to_improve": ["Price"],
        "strategies": ["Combo deals"]
    }));
    let mock = MockCompletionProvider::new().with_response(reply);
    let cmd = RunAnalysisCommand::new(AnalysisRequest::auto_detect())
        .with_context("Cafe Sun sells latte at 45k. Cafe Moon sells latte at 40k.");

    let result = handler(&mock).handle(cmd).await.unwrap();

    let AnalysisResult::Pairwise(pairwise) = &result.report.result else {
        panic!("expected a pairwise-shaped result");
    };
    assert_eq!(pairwise.detected_shops, vec!["Cafe Sun", "Cafe Moon"]);
    assert!(mock.last_prompt().unwrap().contains("Cafe Moon sells latte"));
}

#[tokio::test]
async fn auto_detect_without_context_never_calls_the_model() {
    let mock = MockCompletionProvider::new();
    let cmd = RunAnalysisCommand::new(AnalysisRequest::auto_detect());

    assert!(handler(&mock).handle(cmd).await.is_err());
    assert_eq!(mock.call_count(), 0);
}

// =============================================================================
// Datasets
// =============================================================================

#[test]
fn dataset_directory_statistics_reach_the_prompt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("menu.csv"), "item,price\nLatte,10\nMocha,20\nTea,30\n")
        .unwrap();
    std::fs::write(dir.path().join("reviews.csv"), "author,comment\nAn,Great\nBinh,Slow\n")
        .unwrap();

    let report = CsvDatasetSource::new().load_path(dir.path()).unwrap();
    assert_eq!(report.datasets.len(), 2);
    assert!(report.failures.is_empty());

    let query = PreparePromptQuery::new(AnalysisRequest::single("Cafe X").unwrap())
        .with_datasets(report.datasets);
    let prepared = PreparePromptHandler::default().handle(&query).unwrap();

    assert!(prepared.context.contains("min=10"));
    assert!(prepared.context.contains("max=30"));
    assert!(prepared.context.contains("avg=20"));
    assert!(prepared.prompt.contains(&prepared.context));
}

#[test]
fn unreadable_file_does_not_block_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("good.csv"), "a,b\n1,2\n").unwrap();
    std::fs::write(dir.path().join("empty.csv"), "").unwrap();

    let report = CsvDatasetSource::new().load_path(dir.path()).unwrap();

    assert_eq!(report.datasets.len(), 1);
    assert_eq!(report.failures.len(), 1);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn analysis_exports_in_every_format() {
    let mock = MockCompletionProvider::new().with_response(SCENARIO_ONE_REPLY);
    let result = handler(&mock).handle(single_command("Cafe X")).await.unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 5, 6).unwrap();

    let json_bytes = exporter_for(ExportFormat::Json)
        .export(&result.report, date)
        .unwrap();
    let exported: serde_json::Value = serde_json::from_slice(&json_bytes).unwrap();
    assert_eq!(exported["result"]["shop_name"], "Cafe X");
    assert_eq!(exported["exported_on"], "2026-05-06");

    let csv_bytes = exporter_for(ExportFormat::Csv)
        .export(&result.report, date)
        .unwrap();
    let csv_text = String::from_utf8(csv_bytes).unwrap();
    assert!(csv_text.contains("Cafe X,Strengths,Internal,Positive,1,a,9,2026-05-06"));
    assert!(csv_text.contains("Cafe X,Threats,External,Negative,1,d,2,2026-05-06"));

    let xlsx_bytes = exporter_for(ExportFormat::Xlsx)
        .export(&result.report, date)
        .unwrap();
    assert!(xlsx_bytes.starts_with(b"PK"));

    assert_eq!(
        ExportFormat::Csv.file_name(&result.report, date),
        "swot_Cafe_X_20260506.csv"
    );
}
