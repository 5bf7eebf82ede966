//! End-to-end retrieval pipeline over a temporary corpus and mock providers.

use std::sync::Arc;

use ragchat::adapters::providers::MockProvider;
use ragchat::domain::models::ProvidersConfig;
use ragchat::{IndexInit, ProviderGateway, RagError};

mod common;
use common::{config_for, corpus, mock_service, DIM};

const COMPANY: &str = "We build tools. We help customers. We ship fast.";

#[tokio::test]
async fn test_company_file_splits_into_three_chunks() {
    common::setup_test_logging();
    let docs = corpus(&[("company.txt", COMPANY)]);
    let provider = Arc::new(MockProvider::new("mock", DIM));
    let service = mock_service(&config_for(docs.path(), 20, 5), &[provider.clone()]);

    let report = service.initialize(IndexInit::Build).await.unwrap().unwrap();

    assert_eq!(report.files_indexed, 1);
    assert_eq!(report.chunks_added, 3);
    assert_eq!(provider.embed_calls(), 3);

    let stats = service.get_index_stats().await;
    assert_eq!(stats.total_chunks, 3);
    assert_eq!(stats.total_files, 1);
    assert_eq!(stats.files, vec!["company.txt"]);

    let results = service.retrieve("tools", 3).await.unwrap();
    let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
    assert!(texts.contains(&"We build tools."));
    assert!(texts.contains(&"We help customers."));
    assert!(texts.contains(&"We ship fast."));
    assert!(results
        .iter()
        .all(|r| r.metadata.total_chunks == Some(3) && r.filename() == Some("company.txt")));
}

#[tokio::test]
async fn test_nearest_chunk_ranks_first() {
    let docs = corpus(&[("company.txt", COMPANY)]);
    let service = mock_service(
        &config_for(docs.path(), 20, 5),
        &[Arc::new(MockProvider::new("mock", DIM))],
    );
    service.initialize(IndexInit::Build).await.unwrap();

    let results = service.retrieve("customers", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, "We help customers.");
    assert!(results[0].distance < results[1].distance);
    assert!((results[0].distance - 0.845).abs() < 0.01);
    assert!((results[1].distance - 2.0).abs() < 1e-4);
}

#[tokio::test]
async fn test_context_labels_sources() {
    let docs = corpus(&[("company.txt", COMPANY)]);
    let service = mock_service(
        &config_for(docs.path(), 20, 5),
        &[Arc::new(MockProvider::new("mock", DIM))],
    );
    service.initialize(IndexInit::Build).await.unwrap();

    let context = service.retrieve_context("customers", 1).await.unwrap();
    assert_eq!(context, "(from company.txt, part 2/3):\nWe help customers.");
}

#[tokio::test]
async fn test_submit_query_sends_context_and_names_provider() {
    let docs = corpus(&[
        ("company.txt", COMPANY),
        ("policies.txt", "Refunds are accepted within thirty days."),
    ]);
    let provider = Arc::new(MockProvider::new("mock", DIM).with_reply("We help customers daily."));
    let service = mock_service(&config_for(docs.path(), 20, 5), &[provider.clone()]);
    service.initialize(IndexInit::Build).await.unwrap();

    let response = service
        .submit_query("user-42", "How do you treat customers?")
        .await
        .unwrap();

    assert_eq!(response.response_text, "We help customers daily.");
    assert_eq!(response.provider_name, "mock");

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("We help customers."));
    assert!(prompt.contains("User: How do you treat customers?"));
    assert!(prompt.ends_with("Company Assistant:"));
}

#[tokio::test]
async fn test_query_answered_by_fallback() {
    let docs = corpus(&[("company.txt", COMPANY)]);
    let primary = Arc::new(MockProvider::new("primary", DIM));
    let fallback = Arc::new(MockProvider::new("fallback", DIM));
    let service = mock_service(
        &config_for(docs.path(), 20, 5),
        &[primary.clone(), fallback.clone()],
    );
    service.initialize(IndexInit::Build).await.unwrap();
    assert_eq!(fallback.embed_calls(), 0);

    primary.set_embed_failure(true);
    primary.set_complete_failure(true);
    let response = service.submit_query("u", "What do you ship?").await.unwrap();

    assert_eq!(response.provider_name, "fallback");
    assert_eq!(response.response_text, "fallback answer");
    assert_eq!(primary.complete_calls(), 1);
    assert_eq!(fallback.complete_calls(), 1);
}

#[tokio::test]
async fn test_all_providers_failing_surfaces_provider_failure() {
    let docs = corpus(&[("company.txt", COMPANY)]);
    let primary = Arc::new(MockProvider::new("primary", DIM));
    let fallback = Arc::new(MockProvider::new("fallback", DIM));
    let service = mock_service(
        &config_for(docs.path(), 20, 5),
        &[primary.clone(), fallback.clone()],
    );
    service.initialize(IndexInit::Build).await.unwrap();

    primary.set_complete_failure(true);
    fallback.set_complete_failure(true);
    let err = service.submit_query("u", "Hello?").await.unwrap_err();

    assert!(err.is_provider_failure());
    assert!(matches!(err, RagError::Generation { ref provider, .. } if provider == "fallback"));
}

#[tokio::test]
async fn test_rebuild_picks_up_new_files() {
    let docs = corpus(&[("company.txt", COMPANY)]);
    let service = mock_service(
        &config_for(docs.path(), 20, 5),
        &[Arc::new(MockProvider::new("mock", DIM))],
    );
    service.initialize(IndexInit::Build).await.unwrap();

    std::fs::write(docs.path().join("about.txt"), "Founded in a garage.").unwrap();
    let report = service.rebuild_index().await.unwrap();

    assert_eq!(report.files_indexed, 2);
    let stats = service.get_index_stats().await;
    assert_eq!(stats.files, vec!["about.txt", "company.txt"]);
    assert_eq!(stats.total_chunks, 4);
}

#[tokio::test]
async fn test_missing_corpus_folder() {
    let dir = common::temp_dir();
    let missing = dir.path().join("nope");
    let service = mock_service(
        &config_for(&missing, 20, 5),
        &[Arc::new(MockProvider::new("mock", DIM))],
    );

    let err = service.initialize(IndexInit::Build).await.unwrap_err();
    assert!(matches!(err, RagError::CorpusNotFound(_)));
}

#[test]
fn test_no_credentials_is_configuration_error() {
    temp_env::with_vars(
        [("GOOGLE_API_KEY", None::<&str>), ("OPENAI_API_KEY", None)],
        || {
            let err = ProviderGateway::from_config(&ProvidersConfig::default()).unwrap_err();
            assert!(matches!(err, RagError::Configuration(_)));
            assert!(!err.is_provider_failure());
        },
    );
}
