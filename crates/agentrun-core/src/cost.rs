//! Deterministic execution cost estimation.
//!
//! Pure functions: identical inputs always produce identical output. Local
//! models have no real billing, so they get a symbolic per-character rate;
//! hosted models are priced from a static per-model table.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use agentrun_protocols::provider::UsageSnapshot;

/// Symbolic cost per generated character for local models.
pub const UNIT_COST: f64 = 0.001;

/// USD per 1K tokens, (prompt, completion).
static OPENAI_PRICING: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        ("gpt-4o", (0.005, 0.015)),
        ("gpt-4o-mini", (0.003, 0.006)),
    ])
});

/// Cost of a local-model answer: characters times the symbolic unit rate.
pub fn local_cost(answer: &str) -> f64 {
    answer.chars().count() as f64 * UNIT_COST
}

/// Cost of a hosted-API answer from reported token usage.
///
/// Unknown models are treated as unpriced and cost 0.0; this is not an
/// error. The result is rounded to 6 decimal places.
pub fn hosted_cost(model: &str, usage: &UsageSnapshot) -> f64 {
    let Some((prompt_rate, completion_rate)) = OPENAI_PRICING.get(model) else {
        return 0.0;
    };
    let prompt_cost = (usage.prompt_tokens as f64 / 1000.0) * prompt_rate;
    let completion_cost = (usage.completion_tokens as f64 / 1000.0) * completion_rate;
    round6(prompt_cost + completion_cost)
}

/// Estimate the cost of one finished run.
pub fn estimate(provider: &str, model: &str, answer: &str, usage: Option<&UsageSnapshot>) -> f64 {
    match provider {
        "ollama" => local_cost(answer),
        "openai" => usage.map(|u| hosted_cost(model, u)).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
