use std::ffi::OsString;

use clap::{ArgAction, Parser};

use super::defaults::{DEFAULT_RPS, DEFAULT_URL};
use super::parsers::{parse_bool_flag, parse_positive_u64};
use super::types::PositiveU64;

/// Long flags that may be spelled with a single dash (`-url`, `-rps`).
const SINGLE_DASH_LONG_FLAGS: [&str; 5] = ["url", "rps", "body", "insecure", "help"];

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fixed-rate HTTP probe - sends GET requests at a steady rate and logs status and latency of every response."
)]
pub struct ProbeArgs {
    /// URL to probe
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Number of requests to send every second
    #[arg(long, default_value = DEFAULT_RPS, value_parser = parse_positive_u64)]
    pub rps: PositiveU64,

    /// Print the response body in the logs
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    pub body: bool,

    /// Skip TLS certificate verification
    #[arg(
        short = 'k',
        long = "insecure",
        alias = "k",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    pub insecure: bool,
}

/// Rewrites Go-style single-dash long flags (`-url x`, `-body=true`) into the
/// double-dash form clap understands. Everything after `--` is left alone.
pub fn normalize_flag_style<I, T>(raw_args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    raw_args
        .into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_single_dash_long(rest) => {
                    OsString::from(format!("-{}", text))
                }
                Some(_) | None => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    SINGLE_DASH_LONG_FLAGS.contains(&name)
}
