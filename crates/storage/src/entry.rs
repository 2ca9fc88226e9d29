use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Tipo do valor armazenado.
///
/// Serializado sem tag: no JSON aparece só a forma do valor
/// (string, array ou objeto).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<serde_json::Value>),
    Dict(serde_json::Map<String, serde_json::Value>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Entrada no store: valor + TTL + instante de morte.
///
/// `death_time` é calculado uma única vez na criação e nunca muda.
/// Reescrever a chave significa criar uma `Entry` nova.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    value: Value,
    #[serde(serialize_with = "serialize_ttl_nanos")]
    ttl: Duration,
    death_time: DateTime<Utc>,
}

impl Entry {
    pub fn new(value: impl Into<Value>, ttl: Duration) -> Self {
        Self::created_at(value, ttl, Utc::now())
    }

    /// Cria a entrada como se tivesse sido escrita em `now`.
    pub fn created_at(value: impl Into<Value>, ttl: Duration, now: DateTime<Utc>) -> Self {
        // TTL fora do intervalo do chrono satura no maior instante representável
        let death_time = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value: value.into(),
            ttl,
            death_time,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn death_time(&self) -> DateTime<Utc> {
        self.death_time
    }

    /// Expirada se morreu estritamente antes de `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.death_time < now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

fn serialize_ttl_nanos<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(ttl.as_nanos()).unwrap_or(u64::MAX))
}
