mod app;
mod probe;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use probe::ProbeError;
pub use validation::ValidationError;

/// Renders an error together with its `source()` chain on a single line.
///
/// reqwest hides the interesting part of a failure (refused connection,
/// certificate rejection) behind a generic "error sending request" message,
/// so log records carry the whole chain.
#[must_use]
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err;
    while let Some(source) = current.source() {
        let text = source.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        current = source;
    }
    rendered
}
