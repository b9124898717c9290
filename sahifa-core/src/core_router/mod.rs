//! Path-style request dispatch.
//!
//! A fixed table maps exact paths (plus the one pattern path
//! `/articles/{slug}/rating`) to domain operations, emulating REST
//! semantics without a network. This is the sole entry point external
//! callers use; it raises nothing beyond the operations' own failures
//! plus the two routing-level ones (`MethodNotAllowed`, `NotFound`).

use metrics::counter;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core_backend::{ContentBackend, DEFAULT_POLL_ID};
use crate::error::{BackendError, BackendResult};

/// Request method, mimicking the HTTP verbs the surface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            _ => Err(BackendError::MethodNotAllowed),
        }
    }
}

/// First value for `name` in a query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Deserialize the request body into an operation's payload type. An
/// absent body counts as an empty one; shape errors fail as validation
/// before any domain logic runs.
fn parse_payload<T: DeserializeOwned + Default>(payload: &Value) -> BackendResult<T> {
    if payload.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(payload.clone())
        .map_err(|_| BackendError::Validation("بيانات الطلب غير صالحة".to_string()))
}

fn respond<T: serde::Serialize>(result: T) -> Value {
    serde_json::to_value(result).expect("operation results serialize to plain JSON")
}

impl ContentBackend {
    /// Dispatch one pseudo-request. `endpoint` is a path with an
    /// optional query string; `payload` is the JSON body (use
    /// `Value::Null` for none).
    pub fn process_request(
        &mut self,
        endpoint: &str,
        method: Method,
        payload: Value,
    ) -> BackendResult<Value> {
        debug!(%endpoint, %method, "dispatch");
        let result = self.dispatch(endpoint, method, &payload);
        match &result {
            Ok(_) => counter!("sahifa_requests_total").increment(1),
            Err(err) => {
                counter!("sahifa_request_errors_total", "code" => err.code()).increment(1);
            }
        }
        result
    }

    fn dispatch(
        &mut self,
        endpoint: &str,
        method: Method,
        payload: &Value,
    ) -> BackendResult<Value> {
        let (path, query) = match endpoint.split_once('?') {
            Some((path, query)) => (path, query),
            None => (endpoint, ""),
        };

        match path {
            "/auth/login" => {
                require_post(method)?;
                Ok(respond(self.login(parse_payload(payload)?)?))
            }
            "/auth/register" => {
                require_post(method)?;
                Ok(respond(self.register(parse_payload(payload)?)?))
            }
            "/auth/logout" => Ok(respond(self.logout())),
            "/newsletter/subscribe" => {
                Ok(respond(self.subscribe_newsletter(parse_payload(payload)?)?))
            }
            "/polls/vote" => Ok(respond(self.vote_poll(parse_payload(payload)?)?)),
            "/polls/results" => {
                let poll_id = query_param(query, "pollId")
                    .or_else(|| {
                        payload
                            .get("pollId")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| DEFAULT_POLL_ID.to_string());
                Ok(respond(self.poll_results(&poll_id, None)?))
            }
            "/admin/articles" => {
                require_post(method)?;
                Ok(respond(self.create_article(parse_payload(payload)?)?))
            }
            "/admin/polls" => Ok(respond(self.create_poll(parse_payload(payload)?)?)),
            "/admin/users" => Ok(respond(self.create_user(parse_payload(payload)?)?)),
            _ => {
                if let Some(slug) = path
                    .strip_prefix("/articles/")
                    .and_then(|rest| rest.strip_suffix("/rating"))
                {
                    return Ok(respond(self.rate_article(slug, parse_payload(payload)?)?));
                }
                Err(BackendError::NotFound(
                    "المسار المطلوب غير متاح في بيئة التطوير المحلية".to_string(),
                ))
            }
        }
    }
}

fn require_post(method: Method) -> BackendResult<()> {
    if method == Method::Post {
        Ok(())
    } else {
        Err(BackendError::MethodNotAllowed)
    }
}
