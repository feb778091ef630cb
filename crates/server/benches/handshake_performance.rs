use criterion::{Criterion, criterion_group, criterion_main};
use osm_oauth_fixture::AppResources;
use osm_oauth_fixture::config::AppConfig;
use osm_oauth_fixture::oauth1::header::parse_authorization_header;
use osm_oauth_fixture::osm::xml::render_user_details;
use std::hint::black_box;

fn benchmark_token_issuance(c: &mut Criterion) {
    let resources = AppResources::in_memory(AppConfig::default());

    c.bench_function("issue_request_token", |b| {
        b.iter(|| {
            let pair = resources
                .oauth
                .issuer
                .issue_request_token(black_box("https://client/cb"));
            black_box(pair);
        });
    });
}

fn benchmark_full_handshake(c: &mut Criterion) {
    let resources = AppResources::in_memory(AppConfig::default());
    let oauth = &resources.oauth;

    c.bench_function("full_handshake", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            let id = counter.to_string();
            let token = oauth.issuer.issue_request_token("oob").oauth_token;
            oauth.gate.complete_authorization(&token, &id, "bench");
            let grant = oauth.correlator.exchange(&token);
            black_box(grant.ok().and_then(|g| oauth.correlator.resolve(&g.oauth_token)));
        });
    });

    c.bench_function("resolve_credential", |b| {
        let token = oauth.issuer.issue_request_token("oob").oauth_token;
        oauth.gate.complete_authorization(&token, "1", "john");

        b.iter(|| {
            black_box(oauth.correlator.resolve(black_box("1")));
        });
    });
}

fn benchmark_header_parsing(c: &mut Criterion) {
    let value = r#"OAuth oauth_consumer_key="editor", oauth_nonce="abc", oauth_signature="sig%3D", oauth_signature_method="HMAC-SHA1", oauth_timestamp="1585261492", oauth_token="1", oauth_version="1.0""#;

    c.bench_function("parse_authorization_header", |b| {
        b.iter(|| {
            let header = parse_authorization_header(black_box(value));
            black_box(header.ok());
        });
    });
}

fn benchmark_xml_rendering(c: &mut Criterion) {
    let resources = AppResources::in_memory(AppConfig::default());
    let identity = resources.oauth.registry.register("1", "john");
    let profile = resources.osm.get_self(Some(&identity));

    c.bench_function("render_user_details", |b| {
        b.iter(|| {
            black_box(render_user_details(black_box(&profile)).ok());
        });
    });
}

criterion_group!(
    benches,
    benchmark_token_issuance,
    benchmark_full_handshake,
    benchmark_header_parsing,
    benchmark_xml_rendering
);
criterion_main!(benches);
