//! Headless sprint runner.
//!
//! Replays a script of timed key transitions through the frame driver and
//! prints a JSON summary of the run to stdout. Lifecycle events are logged to
//! stderr unless `SPRINT_QUIET=1`.
//!
//! ```text
//! sprint40 [--seed N] [--tuning FILE] [--frame-ms N] [--limit-ms N] [SCRIPT]
//! ```
//!
//! Without `SCRIPT` the script is read from stdin. `--frame-ms` is capped at
//! the driver's 50 ms frame clamp.

use std::io::Read;

use anyhow::{anyhow, Context, Result};

use sprint40::config::{is_quiet, tuning_from_env, tuning_from_json_with};
use sprint40::core::{Engine, EventSink};
use sprint40::replay::{format_time_ms, parse_script, run_script};
use sprint40::types::Tuning;
use sprint40::FrameDriver;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunArgs {
    seed: u32,
    tuning_path: Option<String>,
    frame_ms: u32,
    limit_ms: u64,
    script_path: Option<String>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            seed: 1,
            tuning_path: None,
            frame_ms: 16,
            limit_ms: 30 * 60 * 1000,
            script_path: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunArgs> {
    let mut out = RunArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--tuning" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --tuning"))?;
                out.tuning_path = Some(v.clone());
            }
            "--frame-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --frame-ms"))?;
                out.frame_ms = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --frame-ms value: {}", v))?;
            }
            "--limit-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --limit-ms"))?;
                out.limit_ms = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --limit-ms value: {}", v))?;
            }
            other if other.starts_with("--") => {
                return Err(anyhow!("unknown argument: {}", other));
            }
            path => {
                if out.script_path.is_some() {
                    return Err(anyhow!("unexpected extra argument: {}", path));
                }
                out.script_path = Some(path.to_string());
            }
        }
        i += 1;
    }
    Ok(out)
}

/// Logs lifecycle events to stderr.
#[derive(Debug, Default)]
struct LogSink {
    quiet: bool,
}

impl EventSink for LogSink {
    fn on_finish(&mut self, time_ms: u64) {
        if !self.quiet {
            eprintln!("[sprint40] finished in {}", format_time_ms(time_ms));
        }
    }

    fn on_top_out(&mut self) {
        if !self.quiet {
            eprintln!("[sprint40] topped out");
        }
    }
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&argv)?;

    let mut tuning = Tuning::default();
    if let Some(path) = &args.tuning_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path))?;
        tuning = tuning_from_json_with(&text, tuning)?;
    }
    let tuning = tuning_from_env(tuning);

    let script = match &args.script_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path))?,
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading script from stdin")?;
            s
        }
    };
    let events = parse_script(&script)?;

    let quiet = is_quiet();
    if !quiet {
        eprintln!(
            "[sprint40] seed={} events={} gravity={}ms das={}ms arr={}ms",
            args.seed,
            events.len(),
            tuning.gravity_ms,
            tuning.das_ms,
            tuning.arr_ms
        );
    }

    let engine = Engine::with_sink(args.seed, tuning, LogSink { quiet });
    let mut driver = FrameDriver::with_engine(engine);
    let summary = run_script(&mut driver, &events, args.frame_ms, args.limit_ms);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), RunArgs::default());
    }

    #[test]
    fn test_parse_args_all_flags() {
        let line = "--seed 9 --tuning t.json --frame-ms 8 --limit-ms 5000 run.txt";
        let args = parse_args(&argv(line)).unwrap();
        assert_eq!(args.seed, 9);
        assert_eq!(args.tuning_path.as_deref(), Some("t.json"));
        assert_eq!(args.frame_ms, 8);
        assert_eq!(args.limit_ms, 5000);
        assert_eq!(args.script_path.as_deref(), Some("run.txt"));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&argv("--seed")).is_err());
        assert!(parse_args(&argv("--seed x")).is_err());
        assert!(parse_args(&argv("--verbose")).is_err());
        assert!(parse_args(&argv("a b")).is_err());
    }
}
