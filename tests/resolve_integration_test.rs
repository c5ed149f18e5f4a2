use anyhow::Result;
use cep_race::adapters::http::{build_client, DEFAULT_USER_AGENT};
use cep_race::{CepError, HttpProvider, RaceOutcome, Resolver, SharedProvider};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn http_provider(name: &str, server: &MockServer, path_template: &str) -> SharedProvider {
    let client = build_client(None, DEFAULT_USER_AGENT).expect("client builds");
    Arc::new(HttpProvider::new(name, server.url(path_template), client))
}

#[tokio::test]
async fn test_fastest_http_provider_wins() -> Result<()> {
    let fast_server = MockServer::start();
    let fast_mock = fast_server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/01001000");
        then.status(200).body("fast");
    });

    let slow_server = MockServer::start();
    slow_server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(200)
            .body("slow")
            .delay(Duration::from_millis(600));
    });

    let resolver = Resolver::new(vec![
        http_provider("ViaCEP", &slow_server, "/ws/{cep}/json/"),
        http_provider("BrasilAPI", &fast_server, "/api/cep/v1/{cep}"),
    ]);

    let started = Instant::now();
    let result = resolver.resolve("01001-000").await?;

    fast_mock.assert();
    assert_eq!(result.source, "BrasilAPI");
    assert_eq!(result.payload, "fast");
    assert!(started.elapsed() < Duration::from_millis(600));
    Ok(())
}

#[tokio::test]
async fn test_failed_provider_does_not_block_winner() -> Result<()> {
    let broken_server = MockServer::start();
    let broken_mock = broken_server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/01001000");
        then.status(500);
    });

    let ok_server = MockServer::start();
    ok_server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(200)
            .body("{\"cep\": \"01001-000\"}")
            .delay(Duration::from_millis(100));
    });

    let resolver = Resolver::new(vec![
        http_provider("BrasilAPI", &broken_server, "/api/cep/v1/{cep}"),
        http_provider("ViaCEP", &ok_server, "/ws/{cep}/json/"),
    ]);

    let result = resolver.resolve("01001000").await?;

    broken_mock.assert();
    assert_eq!(result.source, "ViaCEP");
    Ok(())
}

#[tokio::test]
async fn test_all_providers_failing_is_no_valid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(503);
    });

    let resolver = Resolver::new(vec![
        http_provider("A", &server, "/a/{cep}"),
        http_provider("B", &server, "/b/{cep}"),
    ]);

    let started = Instant::now();
    let err = resolver.resolve("01001000").await.unwrap_err();

    assert!(matches!(err, CepError::NoValidResponse));
    assert!(started.elapsed() < Duration::from_millis(900));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(200)
            .body("too late")
            .delay(Duration::from_secs(3));
    });

    let resolver = Resolver::new(vec![http_provider("ViaCEP", &server, "/ws/{cep}/json/")])
        .with_deadline(Duration::from_millis(300));

    let started = Instant::now();
    let outcome = resolver.race_input("01001000").await;
    let elapsed = started.elapsed();

    assert_eq!(
        outcome,
        RaceOutcome::Timeout {
            deadline: Duration::from_millis(300)
        }
    );
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(1500), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_invalid_cep_never_hits_network() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });

    let resolver = Resolver::new(vec![http_provider("A", &server, "/{cep}")]);

    let err = resolver.resolve("12345").await.unwrap_err();

    assert!(matches!(err, CepError::InvalidFormat { .. }));
    api_mock.assert_hits(0);
}
