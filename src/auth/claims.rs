use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Issued-at claim (unix seconds).
pub const CLAIM_IAT: &str = "iat";
/// Expiry claim (unix seconds).
pub const CLAIM_EXP: &str = "exp";
/// Unique token identifier claim.
pub const CLAIM_JTI: &str = "jti";

/// Claims the codec always writes itself.
pub const RESERVED_CLAIMS: [&str; 3] = [CLAIM_IAT, CLAIM_EXP, CLAIM_JTI];

/// What to do when a payload key collides with a reserved claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservedClaimPolicy {
    /// Refuse to mint the token.
    #[default]
    Reject,
    /// Drop the payload value and keep the generated one.
    Ignore,
    /// Let the payload value replace the generated one.
    Override,
}

/// Decoded claim set of a token.
///
/// Values stay as dynamic JSON; the reserved numeric claims have typed
/// accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Issued-at in unix seconds, if present and integral.
    pub fn iat(&self) -> Option<i64> {
        self.get(CLAIM_IAT).and_then(Value::as_i64)
    }

    /// Expiry in unix seconds, if present and integral.
    pub fn exp(&self) -> Option<i64> {
        self.get(CLAIM_EXP).and_then(Value::as_i64)
    }

    pub fn jti(&self) -> Option<&str> {
        self.get(CLAIM_JTI).and_then(Value::as_str)
    }

    /// True when `exp` is strictly before `now`. A token without an
    /// integer `exp` counts as expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp().is_none_or(|exp| exp < now)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        Value::Object(claims.0)
    }
}
