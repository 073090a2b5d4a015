//! Tuning loaders.
//!
//! Tuning is user-facing configuration, so malformed values are coerced to
//! the nearest valid integer instead of being rejected: fractional values are
//! floored, out-of-range values clamped, and anything non-numeric falls back
//! to the current value.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{
    Tuning, ARR_RANGE, COUNTDOWN_RANGE, DAS_RANGE, GRAVITY_RANGE, LINES_TARGET_RANGE,
    LOCK_DELAY_RANGE, SOFT_DROP_RANGE,
};

/// Tuning document as written by users; every field is optional and untyped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTuning {
    gravity_ms: Option<Value>,
    lock_delay_ms: Option<Value>,
    countdown_seconds: Option<Value>,
    lines_target: Option<Value>,
    soft_drop_ms: Option<Value>,
    das_ms: Option<Value>,
    arr_ms: Option<Value>,
}

impl RawTuning {
    fn apply(&self, base: Tuning) -> Tuning {
        let pick = |raw: &Option<Value>, current: u32, range: (u32, u32)| {
            raw.as_ref()
                .map_or(current, |v| coerce_value(v, current, range))
        };
        Tuning {
            gravity_ms: pick(&self.gravity_ms, base.gravity_ms, GRAVITY_RANGE),
            lock_delay_ms: pick(&self.lock_delay_ms, base.lock_delay_ms, LOCK_DELAY_RANGE),
            countdown_seconds: pick(
                &self.countdown_seconds,
                base.countdown_seconds,
                COUNTDOWN_RANGE,
            ),
            lines_target: pick(&self.lines_target, base.lines_target, LINES_TARGET_RANGE),
            soft_drop_ms: pick(&self.soft_drop_ms, base.soft_drop_ms, SOFT_DROP_RANGE),
            das_ms: pick(&self.das_ms, base.das_ms, DAS_RANGE),
            arr_ms: pick(&self.arr_ms, base.arr_ms, ARR_RANGE),
        }
        .normalized()
    }
}

/// Floor and clamp a finite number into `range`.
pub fn coerce_number(n: f64, fallback: u32, (lo, hi): (u32, u32)) -> u32 {
    if !n.is_finite() {
        return fallback.clamp(lo, hi);
    }
    n.floor().clamp(lo as f64, hi as f64) as u32
}

/// Coerce a textual value (env var, numeric JSON string).
pub fn coerce_str(s: &str, fallback: u32, range: (u32, u32)) -> u32 {
    match s.trim().parse::<f64>() {
        Ok(n) => coerce_number(n, fallback, range),
        Err(_) => fallback.clamp(range.0, range.1),
    }
}

fn coerce_value(v: &Value, fallback: u32, range: (u32, u32)) -> u32 {
    match v {
        Value::Number(n) => match n.as_f64() {
            Some(f) => coerce_number(f, fallback, range),
            None => fallback.clamp(range.0, range.1),
        },
        Value::String(s) => coerce_str(s, fallback, range),
        _ => fallback.clamp(range.0, range.1),
    }
}

/// Parse a camelCase JSON tuning object on top of the defaults.
///
/// ```
/// let t = sprint40::config::tuning_from_json(r#"{"dasMs": 120.7, "arrMs": -3}"#).unwrap();
/// assert_eq!(t.das_ms, 120);
/// assert_eq!(t.arr_ms, 0);
/// assert_eq!(t.gravity_ms, 800);
/// ```
pub fn tuning_from_json(json: &str) -> Result<Tuning> {
    tuning_from_json_with(json, Tuning::default())
}

/// Like [`tuning_from_json`], overlaying onto `base` instead of the defaults.
pub fn tuning_from_json_with(json: &str, base: Tuning) -> Result<Tuning> {
    let value: Value = serde_json::from_str(json).context("tuning: invalid JSON")?;
    if !value.is_object() {
        return Err(anyhow!("tuning: expected a JSON object"));
    }
    let raw: RawTuning =
        serde_json::from_value(value).context("tuning: unexpected document shape")?;
    Ok(raw.apply(base.normalized()))
}

/// Environment variable names, in `Tuning` field order.
pub const ENV_GRAVITY_MS: &str = "SPRINT_GRAVITY_MS";
pub const ENV_LOCK_DELAY_MS: &str = "SPRINT_LOCK_DELAY_MS";
pub const ENV_COUNTDOWN_SECONDS: &str = "SPRINT_COUNTDOWN_SECONDS";
pub const ENV_LINES_TARGET: &str = "SPRINT_LINES_TARGET";
pub const ENV_SOFT_DROP_MS: &str = "SPRINT_SOFT_DROP_MS";
pub const ENV_DAS_MS: &str = "SPRINT_DAS_MS";
pub const ENV_ARR_MS: &str = "SPRINT_ARR_MS";

/// Overlay `SPRINT_*` environment variables onto `base`.
pub fn tuning_from_env(base: Tuning) -> Tuning {
    tuning_from_lookup(base, |name| std::env::var(name).ok())
}

/// Overlay values produced by `lookup` onto `base`; unset names keep `base`.
pub fn tuning_from_lookup<F>(base: Tuning, lookup: F) -> Tuning
where
    F: Fn(&str) -> Option<String>,
{
    let base = base.normalized();
    let pick = |name: &str, current: u32, range: (u32, u32)| {
        lookup(name).map_or(current, |s| coerce_str(&s, current, range))
    };
    Tuning {
        gravity_ms: pick(ENV_GRAVITY_MS, base.gravity_ms, GRAVITY_RANGE),
        lock_delay_ms: pick(ENV_LOCK_DELAY_MS, base.lock_delay_ms, LOCK_DELAY_RANGE),
        countdown_seconds: pick(
            ENV_COUNTDOWN_SECONDS,
            base.countdown_seconds,
            COUNTDOWN_RANGE,
        ),
        lines_target: pick(ENV_LINES_TARGET, base.lines_target, LINES_TARGET_RANGE),
        soft_drop_ms: pick(ENV_SOFT_DROP_MS, base.soft_drop_ms, SOFT_DROP_RANGE),
        das_ms: pick(ENV_DAS_MS, base.das_ms, DAS_RANGE),
        arr_ms: pick(ENV_ARR_MS, base.arr_ms, ARR_RANGE),
    }
}

/// `SPRINT_QUIET=1` (or `true`) silences lifecycle logging.
pub fn is_quiet() -> bool {
    std::env::var("SPRINT_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
