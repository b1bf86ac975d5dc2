pub mod constants;
pub mod precedence;
pub mod storage;
pub mod version;

use serde::Serialize;
use std::path::Path;
use tracing::debug;
use which::which;

/// A fully planned command: the program and its discrete arguments.
/// Arguments are never shell-interpreted by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Secret the executor loads storage credentials from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_ref: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), credential_ref: None }
    }

    pub fn credential_ref(mut self, secret_name: &str) -> Self {
        self.credential_ref = Some(secret_name.to_string()).filter(|s| !s.is_empty());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Writes the planned invocation to stdout as JSON for the executor.
pub fn print_invocation(invocation: &Invocation) -> crate::errors::Result<()> {
    println!("{}", serde_json::to_string_pretty(invocation)?);
    Ok(())
}

/// Resolves a tool binary to its absolute path when it is on `PATH`,
/// falling back to the bare name for the executor to resolve.
pub fn find_tool_executable(name: &str) -> String {
    match which(name) {
        Ok(path) => path.display().to_string(),
        Err(e) => {
            debug!(tool = name, error = %e, "tool not found in PATH, keeping bare name");
            name.to_string()
        }
    }
}

/// `--ca=`, `--cert=`, `--key=` for certificates mounted under `dir`.
pub fn tls_args(dir: &str) -> Vec<String> {
    let dir = Path::new(dir);
    [
        ("--ca", constants::TLS_CA_FILE),
        ("--cert", constants::TLS_CERT_FILE),
        ("--key", constants::TLS_KEY_FILE),
    ]
    .into_iter()
    .map(|(flag, file)| format!("{}={}", flag, dir.join(file).display()))
    .collect()
}
