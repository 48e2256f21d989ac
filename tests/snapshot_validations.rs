mod common;

use common::builders::{preflight_request, resolved, simple_request};
use insta::assert_debug_snapshot;
use scoped_cors::constants::method;
use scoped_cors::{CorsDecision, CorsOptions, Headers};

fn sorted_pairs(headers: Headers) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = headers.into_iter().collect();
    pairs.sort();
    pairs
}

fn capture(decision: CorsDecision) -> Vec<(String, String)> {
    match decision {
        CorsDecision::Apply(headers) => sorted_pairs(headers),
        other => panic!("expected applied headers, got {:?}", other),
    }
}

#[test]
fn default_preflight_snapshot() {
    let policy = resolved(CorsOptions::new());

    let pairs = capture(
        preflight_request()
            .origin("https://snapshot.example")
            .request_method(method::GET)
            .request_headers("X-Debug, Content-Type")
            .negotiate(&policy),
    );

    assert_debug_snapshot!(pairs, @r###"
    [
        (
            "Access-Control-Allow-Headers",
            "Content-Type, X-Debug",
        ),
        (
            "Access-Control-Allow-Methods",
            "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT",
        ),
        (
            "Access-Control-Allow-Origin",
            "https://snapshot.example",
        ),
        (
            "Vary",
            "Origin",
        ),
    ]
    "###);
}

#[test]
fn credentialed_preflight_snapshot() {
    let policy = resolved(
        CorsOptions::new()
            .origins(["https://portal.example"])
            .supports_credentials(true)
            .methods([method::GET, method::POST])
            .allow_headers(["X-Trace-Id"])
            .expose_headers(["X-Result"])
            .max_age_secs(3600),
    );

    let pairs = capture(
        preflight_request()
            .origin("https://portal.example")
            .request_method(method::POST)
            .request_headers("X-Trace-Id")
            .negotiate(&policy),
    );

    assert_debug_snapshot!(pairs, @r###"
    [
        (
            "Access-Control-Allow-Credentials",
            "true",
        ),
        (
            "Access-Control-Allow-Headers",
            "X-Trace-Id",
        ),
        (
            "Access-Control-Allow-Methods",
            "GET, POST",
        ),
        (
            "Access-Control-Allow-Origin",
            "https://portal.example",
        ),
        (
            "Access-Control-Expose-Headers",
            "X-Result",
        ),
        (
            "Access-Control-Max-Age",
            "3600",
        ),
        (
            "Vary",
            "Origin",
        ),
    ]
    "###);
}

#[test]
fn wildcard_simple_snapshot() {
    let policy = resolved(
        CorsOptions::new()
            .send_wildcard(true)
            .expose_headers(["Content-Length"]),
    );

    let pairs = capture(
        simple_request()
            .origin("https://anything.example")
            .negotiate(&policy),
    );

    assert_debug_snapshot!(pairs, @r###"
    [
        (
            "Access-Control-Allow-Origin",
            "*",
        ),
        (
            "Access-Control-Expose-Headers",
            "Content-Length",
        ),
    ]
    "###);
}

#[test]
fn origin_less_fallback_snapshot() {
    let policy = resolved(
        CorsOptions::new().origins(["https://b.example", "https://a.example"]),
    );

    let pairs = capture(simple_request().negotiate(&policy));

    assert_debug_snapshot!(pairs, @r###"
    [
        (
            "Access-Control-Allow-Origin",
            "https://a.example, https://b.example",
        ),
        (
            "Vary",
            "Origin",
        ),
    ]
    "###);
}

#[test]
fn rejected_origin_snapshot() {
    let policy = resolved(
        CorsOptions::new()
            .origins(["https://portal.example"])
            .invalid_status_code(404),
    );

    let decision = simple_request()
        .origin("https://denied.example")
        .negotiate(&policy);

    assert_debug_snapshot!(decision, @r###"
    Reject(
        404,
    )
    "###);
}
