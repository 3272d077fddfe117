//! Demonstrates a request pipeline sharing one attribute store across stages.
//!
//! Each middleware gets a clone of the request's `SharedAttributes` handle and
//! reads or writes whatever it needs. The final stage asks for a value with the
//! wrong type on purpose, so the `bad type` diagnostic shows up in the log.
//!
//! Run with: RUST_LOG=debug cargo run --example request_context

use sovran_attributes::{AttributeError, SharedAttributes};
use std::collections::HashMap;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AttributeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pipeline: Vec<Box<dyn Middleware>> = vec![
        Box::new(Timing),
        Box::new(Authenticate),
        Box::new(RateLimit { per_user: 2 }),
    ];

    let mut hits = HashMap::new();
    for path in ["/profile", "/profile", "/profile", "/settings"] {
        let request = Request::new(path, "Bearer alice");
        let response = dispatch(&pipeline, &request, &mut hits)?;
        println!("{} -> {}", path, response);
    }

    Ok(())
}

// ============================================================================
// The context owner
// ============================================================================

struct Request {
    path: String,
    authorization: String,
    attributes: SharedAttributes,
}

impl Request {
    fn new(path: &str, authorization: &str) -> Self {
        Self {
            path: path.to_string(),
            authorization: authorization.to_string(),
            attributes: SharedAttributes::new(),
        }
    }
}

trait Middleware {
    fn before(
        &self,
        request: &Request,
        attrs: SharedAttributes,
        hits: &mut HashMap<String, u32>,
    ) -> Result<Option<String>, AttributeError>;
}

fn dispatch(
    pipeline: &[Box<dyn Middleware>],
    request: &Request,
    hits: &mut HashMap<String, u32>,
) -> Result<String, AttributeError> {
    for stage in pipeline {
        if let Some(rejection) = stage.before(request, request.attributes.clone(), hits)? {
            return Ok(rejection);
        }
    }
    handle(request)
}

fn handle(request: &Request) -> Result<String, AttributeError> {
    let attrs = &request.attributes;
    let user = attrs.get::<String>("user")?;
    let started = attrs.with(|a| *a.get::<Option<Instant>>("started"))?;

    // "user" holds a String; reading it as a number falls back to 0 and logs
    let user_id = attrs.get::<u64>("user")?;

    let elapsed = started.map(|t| t.elapsed().as_micros()).unwrap_or_default();
    Ok(format!(
        "200 OK for {} on {} (user_id={}, {}us)",
        user, request.path, user_id, elapsed
    ))
}

// ============================================================================
// Middleware stages
// ============================================================================

struct Timing;

impl Middleware for Timing {
    fn before(
        &self,
        _request: &Request,
        attrs: SharedAttributes,
        _hits: &mut HashMap<String, u32>,
    ) -> Result<Option<String>, AttributeError> {
        attrs.insert("started", Some(Instant::now()))?;
        Ok(None)
    }
}

struct Authenticate;

impl Middleware for Authenticate {
    fn before(
        &self,
        request: &Request,
        attrs: SharedAttributes,
        _hits: &mut HashMap<String, u32>,
    ) -> Result<Option<String>, AttributeError> {
        match request.authorization.strip_prefix("Bearer ") {
            Some(user) => {
                tracing::debug!(user, "authenticated");
                attrs.insert("user", user.to_string())?;
                Ok(None)
            }
            None => Ok(Some("401 Unauthorized".to_string())),
        }
    }
}

struct RateLimit {
    per_user: u32,
}

impl Middleware for RateLimit {
    fn before(
        &self,
        _request: &Request,
        attrs: SharedAttributes,
        hits: &mut HashMap<String, u32>,
    ) -> Result<Option<String>, AttributeError> {
        let user = attrs.with(|a| a.try_get::<String>("user").cloned())??;
        let count = hits.entry(user).or_insert(0);
        *count += 1;

        if *count > self.per_user {
            tracing::info!(count = *count, "rate limited");
            return Ok(Some("429 Too Many Requests".to_string()));
        }
        Ok(None)
    }
}
