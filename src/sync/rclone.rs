// backupmanager/src/sync/rclone.rs
use regex::Regex;
use std::sync::LazyLock;

const QUIET_FLAG: &str = "-q";
const VERBOSE_FLAG: &str = "-v";

static VERBOSITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-v+|--verbose)(=\d+)?$").expect("valid verbosity regex"));

/// How a sync-tool command treats verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandClass {
    /// Output is parsed by the caller, so it must stay free of log noise.
    Listing,
    Transfer,
}

impl CommandClass {
    pub fn of(command: &str) -> Self {
        match command {
            "ls" | "lsl" | "lsd" | "lsf" | "lsjson" => CommandClass::Listing,
            _ => CommandClass::Transfer,
        }
    }
}

fn is_verbosity_flag(opt: &str) -> bool {
    VERBOSITY_RE.is_match(opt)
}

/// Builds sync-tool arguments: config, options, then command and operands.
///
/// Listing commands drop all verbosity flags. Transfer commands keep the
/// user's options and gain one `-v` when `verbose_log` is set, unless the
/// user asked for `-q`.
pub fn construct_rclone_args(
    config_path: &str,
    opts: &[String],
    command: &str,
    source: &str,
    dest: &str,
    verbose_log: bool,
) -> Vec<String> {
    let mut args = vec![format!("--config={}", config_path)];

    match CommandClass::of(command) {
        CommandClass::Listing => {
            args.extend(opts.iter().filter(|opt| !is_verbosity_flag(opt)).cloned());
        }
        CommandClass::Transfer => {
            args.extend(opts.iter().cloned());
            if verbose_log && !opts.iter().any(|opt| opt == QUIET_FLAG) {
                args.push(VERBOSE_FLAG.to_string());
            }
        }
    }

    args.extend(
        [command, source, dest]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(str::to_string),
    );
    args
}
