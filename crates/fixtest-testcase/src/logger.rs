use tracing::{Span, info_span};

/// Per-test logging handle.
///
/// Test cases never log through it themselves; they hand it to
/// [`make_process`](crate::make_process) so process output is attributed to
/// the right test.
#[derive(Debug, Clone)]
pub struct TestLogger {
    name: String,
    span: Span,
}

impl TestLogger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let span = info_span!("test", name = %name);
        Self { name, span }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}
