//! Handlers behind each CLI subcommand.

use crate::api::routes::create_router;
use crate::auth::jwt::{TokenConfig, decode, encode, parse_algorithm};
use crate::cli::output::{Output, format_timestamp};
use crate::utils::toml_config::GateConfig;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Options accepted by `jwt-gate mint`.
#[derive(Debug, Default)]
pub struct MintOptions {
    pub claims: Option<String>,
    pub claim: Vec<String>,
    pub expiry: Option<u32>,
    pub algorithm: Option<String>,
    pub raw: bool,
}

/// Merge `--claims` JSON with `--claim key=value` pairs (pairs win).
pub fn build_payload(claims: Option<&str>, pairs: &[String]) -> Result<Map<String, Value>> {
    let mut payload = match claims {
        Some(json) => match serde_json::from_str::<Value>(json).context("--claims is not valid JSON")? {
            Value::Object(map) => map,
            _ => bail!("--claims must be a JSON object"),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("--claim '{}' is not key=value", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("--claim '{}' has an empty key", pair);
        }

        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        payload.insert(key.to_string(), value);
    }

    Ok(payload)
}

/// `jwt-gate mint`
pub fn mint(config: &GateConfig, options: MintOptions, output: &Output) -> Result<()> {
    let mut token_config = config
        .token_config()
        .context("cannot build signing configuration")?;

    if let Some(minutes) = options.expiry {
        token_config = token_config.with_expiry_minutes(minutes);
    }
    if let Some(name) = options.algorithm.as_deref() {
        token_config = token_config.with_algorithm(parse_algorithm(name)?);
    }

    let payload = build_payload(options.claims.as_deref(), &options.claim)?;
    let minted = encode(&payload, &token_config)?;

    if options.raw {
        println!("{}", minted.token);
        return Ok(());
    }

    output.header("Token");
    output.kv("token", &minted.token);
    output.kv("jti", &minted.jti);
    output.kv("algorithm", &format!("{:?}", token_config.algorithm()));
    output.kv(
        "expires",
        &format!("{} ({})", format_timestamp(minted.expires_at), minted.expires_at),
    );
    output.newline();
    Ok(())
}

/// `jwt-gate decode`
pub fn decode_token(config: &GateConfig, token: &str, json: bool, output: &Output) -> Result<()> {
    let token_config = config
        .token_config()
        .context("cannot build verification configuration")?;
    let claims = decode(token.trim(), &token_config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(claims.as_map())?);
        return Ok(());
    }

    output.header("Claims");
    output.claims(&claims);
    output.newline();

    match claims.exp() {
        Some(exp) if claims.is_expired_at(Utc::now().timestamp()) => {
            output.warning(&format!("signature valid, but expired at {}", format_timestamp(exp)));
        }
        Some(exp) => output.success(&format!("valid until {}", format_timestamp(exp))),
        None => output.warning("signature valid, but the token has no integer exp claim"),
    }
    Ok(())
}

/// `jwt-gate config`
pub fn show_config(config: &GateConfig, validate: bool, output: &Output) -> Result<()> {
    output.header("Server");
    output.kv("host", &config.server.host);
    output.kv("port", &config.server.port.to_string());
    output.kv("log_level", &config.server.log_level);
    output.kv("log_format", &format!("{:?}", config.server.log_format).to_lowercase());

    output.header("Auth");
    output.kv("jwt_secret_env", &config.auth.jwt_secret_env);
    output.secret("secret", config.jwt_secret().is_ok());
    output.kv("algorithm", &config.auth.algorithm);
    output.kv("expiry_minutes", &config.auth.expiry_minutes.to_string());
    output.kv(
        "reserved_claims",
        &format!("{:?}", config.auth.reserved_claims).to_lowercase(),
    );
    output.newline();

    if validate {
        config.validate()?;
        output.success("configuration is valid");
    }
    Ok(())
}

/// `jwt-gate serve`
pub async fn serve(config: &GateConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let token_config: Arc<TokenConfig> = Arc::new(config.token_config()?);
    let app = create_router(token_config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("jwt-gate listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("jwt-gate stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_payload_from_pairs() {
        let payload = build_payload(
            None,
            &["sub=user-1".into(), "admin=true".into(), "level=3".into(), "tags=[\"a\"]".into()],
        )
        .expect("should build");

        assert_eq!(payload["sub"], json!("user-1"));
        assert_eq!(payload["admin"], json!(true));
        assert_eq!(payload["level"], json!(3));
        assert_eq!(payload["tags"], json!(["a"]));
    }

    #[test]
    fn test_build_payload_pairs_override_json() {
        let payload = build_payload(Some(r#"{"sub":"a","team":"x"}"#), &["sub=b".into()])
            .expect("should build");

        assert_eq!(payload["sub"], json!("b"));
        assert_eq!(payload["team"], json!("x"));
    }

    #[test]
    fn test_build_payload_value_may_contain_equals() {
        let payload = build_payload(None, &["note=a=b".into()]).expect("should build");
        assert_eq!(payload["note"], json!("a=b"));
    }

    #[test]
    fn test_build_payload_rejects_bad_input() {
        assert!(build_payload(Some("[1,2]"), &[]).is_err());
        assert!(build_payload(Some("{not json"), &[]).is_err());
        assert!(build_payload(None, &["novalue".into()]).is_err());
        assert!(build_payload(None, &["=x".into()]).is_err());
    }
}
