use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};

/// How much of a bad input is kept in an error message
const BAD_INPUT_SAMPLE_LEN: usize = 256;

pub fn error_chain_to_pretty_formatted<E>(error: E) -> String
where
    E: std::error::Error,
{
    let mut err = format!("{}", error);
    let mut source = error.source();
    while let Some(inner_err) = source {
        err.push_str(&format!("\nCaused by: \n{}", inner_err));
        source = inner_err.source();
    }
    err
}

/// First few hundred characters of `input`, cut on a char boundary
pub fn bad_input_sample(input: &str) -> String {
    match input.char_indices().nth(BAD_INPUT_SAMPLE_LEN) {
        Some((end, _)) => format!("{}...", &input[..end]),
        None => input.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
#[error("SerdeJsonError Context: {context}\n{bad_input_sample}\n{backtrace}")]
pub struct SerdeJsonError {
    #[source]
    pub source: serde_json::Error,
    pub context: String,
    pub bad_input_sample: String,
    pub backtrace: OptionBacktracePrettyPrinter,
}

impl SerdeJsonError {
    pub fn from_serde_json_error<S: Into<String>>(
        source: serde_json::Error,
        context: S,
        bad_input: &str,
    ) -> Self {
        Self {
            source,
            context: context.into(),
            bad_input_sample: bad_input_sample(bad_input),
            backtrace: OptionBacktracePrettyPrinter::capture(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("IoError Context: {context} ({path})\n{backtrace}", path = path.display())]
pub struct IoError {
    #[source]
    pub source: std::io::Error,
    pub context: String,
    pub path: PathBuf,
    pub backtrace: OptionBacktracePrettyPrinter,
}

impl IoError {
    pub fn from_io_error<S: Into<String>>(
        source: std::io::Error,
        context: S,
        path: &Path,
    ) -> Self {
        Self {
            source,
            context: context.into(),
            path: path.to_path_buf(),
            backtrace: OptionBacktracePrettyPrinter::capture(),
        }
    }
}

#[derive(Debug)]
pub struct OptionBacktracePrettyPrinter(pub Option<Backtrace>);

impl OptionBacktracePrettyPrinter {
    pub fn capture() -> Self {
        Self::from(Backtrace::capture())
    }
}

impl From<Backtrace> for OptionBacktracePrettyPrinter {
    fn from(value: Backtrace) -> Self {
        Self(Some(value))
    }
}
impl std::fmt::Display for OptionBacktracePrettyPrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_ref() {
            Some(child) => write!(f, "{}", child),
            None => write!(f, "No backtrace"),
        }
    }
}
