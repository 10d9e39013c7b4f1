use crate::auth::claims::{
    CLAIM_EXP, CLAIM_IAT, CLAIM_JTI, Claims, RESERVED_CLAIMS, ReservedClaimPolicy,
};
use crate::auth::random::{JTI_BYTES, random_hex};
use crate::types::{Result, TokenError};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode_header};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Algorithm used when none is configured.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token lifetime used when none (or zero) is configured.
pub const DEFAULT_EXPIRY_MINUTES: u32 = 60;

/// The only algorithm family the codec signs or accepts.
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Returns true for HS256, HS384 and HS512.
pub fn is_hmac(algorithm: Algorithm) -> bool {
    HMAC_ALGORITHMS.contains(&algorithm)
}

/// Parses an algorithm identifier such as `"HS384"`.
///
/// Only HMAC identifiers are accepted; anything else is a signing error
/// because the codec could never produce a token with it.
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| TokenError::Signing(format!("unknown algorithm '{}'", name)))?;

    if !is_hmac(algorithm) {
        return Err(TokenError::Signing(format!(
            "{:?} is not an HMAC algorithm",
            algorithm
        )));
    }

    Ok(algorithm)
}

/// Signing parameters for one shared secret.
///
/// Defaults are filled in at construction: HS256 and a 60 minute
/// lifetime. The secret is never printed by `Debug`.
#[derive(Clone)]
pub struct TokenConfig {
    algorithm: Algorithm,
    secret: Vec<u8>,
    expiry_minutes: u32,
    reserved_claims: ReservedClaimPolicy,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM,
            secret: Vec::new(),
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            reserved_claims: ReservedClaimPolicy::default(),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .field("expiry_minutes", &self.expiry_minutes)
            .field("reserved_claims", &self.reserved_claims)
            .finish()
    }
}

impl TokenConfig {
    /// Creates a config for `secret` with default algorithm and expiry.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the token lifetime. Zero restores the default.
    pub fn with_expiry_minutes(mut self, minutes: u32) -> Self {
        self.expiry_minutes = if minutes == 0 {
            DEFAULT_EXPIRY_MINUTES
        } else {
            minutes
        };
        self
    }

    pub fn with_reserved_claims(mut self, policy: ReservedClaimPolicy) -> Self {
        self.reserved_claims = policy;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn expiry_minutes(&self) -> u32 {
        self.expiry_minutes
    }

    pub fn expiry_seconds(&self) -> i64 {
        i64::from(self.expiry_minutes) * 60
    }

    pub fn reserved_claims(&self) -> ReservedClaimPolicy {
        self.reserved_claims
    }

    /// Shorthand for [`encode`] with this config.
    pub fn encode(&self, payload: &Map<String, Value>) -> Result<EncodedToken> {
        encode(payload, self)
    }

    /// Shorthand for [`decode`] with this config.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        decode(token, self)
    }
}

/// A freshly minted token together with its generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedToken {
    pub token: String,
    pub jti: String,
    /// Unix seconds.
    pub expires_at: i64,
}

/// Mints a signed token carrying `payload` plus `iat`, `exp` and `jti`.
pub fn encode(payload: &Map<String, Value>, config: &TokenConfig) -> Result<EncodedToken> {
    encode_at(payload, config, Utc::now().timestamp())
}

/// Like [`encode`] for any payload that serializes to a JSON object.
pub fn encode_value<T: Serialize>(payload: &T, config: &TokenConfig) -> Result<EncodedToken> {
    match serde_json::to_value(payload).map_err(|_| TokenError::InvalidPayload)? {
        Value::Object(map) => encode(&map, config),
        _ => Err(TokenError::InvalidPayload),
    }
}

/// Mints a token as if the clock read `issued_at` (unix seconds).
pub fn encode_at(
    payload: &Map<String, Value>,
    config: &TokenConfig,
    issued_at: i64,
) -> Result<EncodedToken> {
    if !is_hmac(config.algorithm) {
        return Err(TokenError::Signing(format!(
            "{:?} is not an HMAC algorithm",
            config.algorithm
        )));
    }
    if config.secret.is_empty() {
        warn!("signing token with an empty secret; it will not pass decode");
    }

    let jti = random_hex(JTI_BYTES)?;
    let exp = issued_at + config.expiry_seconds();

    let mut claims = Map::new();
    claims.insert(CLAIM_IAT.to_string(), Value::from(issued_at));
    claims.insert(CLAIM_JTI.to_string(), Value::from(jti.clone()));
    claims.insert(CLAIM_EXP.to_string(), Value::from(exp));

    for (key, value) in payload {
        if RESERVED_CLAIMS.contains(&key.as_str()) {
            match config.reserved_claims {
                ReservedClaimPolicy::Reject => return Err(TokenError::ReservedClaim(key.clone())),
                ReservedClaimPolicy::Ignore => continue,
                ReservedClaimPolicy::Override => {}
            }
        }
        claims.insert(key.clone(), value.clone());
    }

    let token = jsonwebtoken::encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(&config.secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))?;

    // Under the override policy the embedded values may differ from the generated ones.
    let claims = Claims::new(claims);
    let jti = match claims.get(CLAIM_JTI) {
        Some(Value::String(embedded)) => embedded.clone(),
        Some(other) => other.to_string(),
        None => jti,
    };
    let expires_at = claims.exp().unwrap_or(exp);

    debug!(jti = %jti, exp = expires_at, "minted token");

    Ok(EncodedToken {
        token,
        jti,
        expires_at,
    })
}

/// Verifies `token` against `config.secret` and returns its claims.
///
/// Expiry is not checked here; callers compare [`Claims::exp`] against
/// the clock (the middleware does).
pub fn decode(token: &str, config: &TokenConfig) -> Result<Claims> {
    if config.secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }
    if token.is_empty() {
        return Err(TokenError::MissingToken);
    }

    let header = decode_header(token)?;
    if !is_hmac(header.alg) {
        return Err(TokenError::InvalidSigningMethod(format!("{:?}", header.alg)));
    }

    let mut validation = Validation::new(header.alg);
    validation.algorithms = HMAC_ALGORITHMS.to_vec();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(&config.secret),
        &validation,
    )?;

    Ok(Claims::new(data.claims))
}
