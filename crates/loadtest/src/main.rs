use goose::prelude::*;
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

fn form_value(body: &str, key: &str) -> Option<String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| urlencoding::decode(v).ok())
        .map(|v| v.into_owned())
}

fn oauth_header(token: &str) -> String {
    format!(
        r#"OAuth oauth_consumer_key="loadtest", oauth_nonce="n", oauth_signature="s", oauth_signature_method="HMAC-SHA1", oauth_timestamp="0", oauth_token="{}", oauth_version="1.0""#,
        urlencoding::encode(token)
    )
}

async fn response_text(goose: GooseResponse) -> Option<String> {
    match goose.response {
        Ok(response) => response.text().await.ok(),
        Err(_) => None,
    }
}

async fn health_check(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/healthz").await?;
    Ok(())
}

async fn handshake(user: &mut GooseUser) -> TransactionResult {
    let callback = env::var("CALLBACK_URL").unwrap_or_else(|_| "oob".to_string());
    let goose = user
        .post_form("/oauth/request_token", &[("oauth_callback", callback.as_str())])
        .await?;
    let Some(request_token) = response_text(goose)
        .await
        .and_then(|body| form_value(&body, "oauth_token"))
    else {
        return Ok(());
    };

    let id = NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed);
    let path = format!(
        "/register/{id}/load{id}?oauth_token={}",
        urlencoding::encode(&request_token)
    );
    let _goose_metrics = user.get(&path).await?;

    let request_builder = user
        .get_request_builder(&GooseMethod::Post, "/oauth/access_token")?
        .header("Authorization", oauth_header(&request_token));
    let goose_request = GooseRequest::builder()
        .set_request_builder(request_builder)
        .build();
    let goose = user.request(goose_request).await?;
    let Some(credential) = response_text(goose)
        .await
        .and_then(|body| form_value(&body, "oauth_token"))
    else {
        return Ok(());
    };

    let request_builder = user
        .get_request_builder(&GooseMethod::Get, "/api/0.6/user/details")?
        .header("Authorization", oauth_header(&credential));
    let goose_request = GooseRequest::builder()
        .set_request_builder(request_builder)
        .build();
    let _goose_metrics = user.request(goose_request).await?;
    Ok(())
}

async fn get_users(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/api/0.6/users?users=1,2,3").await?;
    Ok(())
}

async fn get_changesets(user: &mut GooseUser) -> TransactionResult {
    let display_name = env::var("DISPLAY_NAME").unwrap_or_else(|_| "load1".to_string());
    let path = format!("/api/0.6/changesets?display_name={display_name}");
    let _goose_metrics = user.get(&path).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), GooseError> {
    println!(
        "Callback URL for request tokens: {}",
        env::var("CALLBACK_URL").unwrap_or_else(|_| "oob".to_string())
    );

    GooseAttack::initialize()?
        .register_scenario(
            scenario!("HealthCheck").register_transaction(transaction!(health_check)),
        )
        .register_scenario(scenario!("Handshake").register_transaction(transaction!(handshake)))
        .register_scenario(
            scenario!("Resources")
                .register_transaction(transaction!(get_users))
                .register_transaction(transaction!(get_changesets)),
        )
        .execute()
        .await?;

    Ok(())
}
