//! Headless replay of scripted input.
//!
//! A script is a list of timed key transitions, one per line:
//!
//! ```text
//! # at_ms  kind     action
//! 3000     press    moveRight
//! 3120     release  moveRight
//! 3200     press    hardDrop
//! ```
//!
//! Times are measured on the driver clock, which starts at the first frame
//! and includes the countdown.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::EventSink;
use crate::driver::FrameDriver;
use crate::types::{EngineState, GameAction, MAX_FRAME_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub transition: KeyTransition,
    pub action: GameAction,
}

/// Parse a replay script. Blank lines and `#` comments are skipped; events
/// must be in non-decreasing time order.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    let mut last_at = 0u64;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(at), Some(kind), Some(name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(anyhow!(
                "script line {}: expected `<at_ms> <press|release> <action>`",
                line_no
            ));
        };

        let at_ms = at
            .parse::<u64>()
            .map_err(|_| line_error(line_no, "invalid time", at))?;
        if at_ms < last_at {
            return Err(anyhow!(
                "script line {}: time {} goes backwards (previous {})",
                line_no,
                at_ms,
                last_at
            ));
        }
        let transition = match kind.to_ascii_lowercase().as_str() {
            "press" | "down" => KeyTransition::Press,
            "release" | "up" => KeyTransition::Release,
            _ => return Err(line_error(line_no, "unknown transition", kind)),
        };
        let action = GameAction::from_str(name)
            .ok_or_else(|| line_error(line_no, "unknown action", name))?;

        last_at = at_ms;
        events.push(ScriptEvent {
            at_ms,
            transition,
            action,
        });
    }

    Ok(events)
}

fn line_error(line_no: usize, what: &str, value: &str) -> anyhow::Error {
    anyhow!("script line {}: {}: {}", line_no, what, value)
}

/// Outcome of a replay, printed by the binary as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub state: &'static str,
    pub time_ms: u64,
    pub time: String,
    pub lines_cleared: u32,
    pub lines_remaining: u32,
    pub frames: u64,
    pub clock_ms: u64,
}

/// Feed `events` into `driver` with a fixed frame step until the script is
/// exhausted and the run has finished, or the driver clock reaches `limit_ms`.
///
/// The step is capped at [`MAX_FRAME_MS`] and the clock advances by the
/// delta the driver applied, so script times stay on engine time.
pub fn run_script<S: EventSink>(
    driver: &mut FrameDriver<S>,
    events: &[ScriptEvent],
    frame_ms: u32,
    limit_ms: u64,
) -> RunSummary {
    let frame_ms = frame_ms.clamp(1, MAX_FRAME_MS);
    let mut clock_ms = 0u64;
    let mut frames = 0u64;
    let mut next = 0usize;

    loop {
        while let Some(ev) = events.get(next) {
            if ev.at_ms > clock_ms {
                break;
            }
            match ev.transition {
                KeyTransition::Press => driver.press(ev.action),
                KeyTransition::Release => driver.release(ev.action),
            };
            next += 1;
        }

        let script_done = next >= events.len();
        if script_done && driver.engine().state() == EngineState::Finished {
            break;
        }
        if clock_ms >= limit_ms {
            break;
        }

        clock_ms += driver.frame(frame_ms) as u64;
        frames += 1;
    }

    let engine = driver.engine();
    RunSummary {
        state: engine.state().as_str(),
        time_ms: engine.time_ms(),
        time: format_time_ms(engine.time_ms()),
        lines_cleared: engine.lines_cleared(),
        lines_remaining: engine.lines_remaining(),
        frames,
        clock_ms,
    }
}

/// `12.345s` under a minute, `m:ss.mmm` above.
pub fn format_time_ms(ms: u64) -> String {
    let secs = ms / 1000;
    let millis = ms % 1000;
    if secs < 60 {
        format!("{}.{:03}s", secs, millis)
    } else {
        format!("{}:{:02}.{:03}", secs / 60, secs % 60, millis)
    }
}
