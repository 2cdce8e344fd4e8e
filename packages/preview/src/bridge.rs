use crate::error::{ExtractionError, RenderError};
use crate::extract::extract;
use crate::sandbox::{RenderOutput, Sandbox, Scope};
use loaderkit_model::{Framework, ShapeModel};
use loaderkit_translator::translate;
use tracing::{debug, info, instrument, warn};

/// Identifies one submission to the sandbox. Only the most recently issued
/// ticket may update the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What came of one preview attempt
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// Rendered, and the scene was read back
    Rendered {
        output: RenderOutput,
        model: ShapeModel,
    },
    /// Rendered, but the output could not be read back into a scene
    ExtractionFailed {
        output: RenderOutput,
        error: ExtractionError,
    },
    /// The sandbox rejected the source; the preview stays frozen
    Failed(RenderError),
    /// A newer submission was issued before this one completed
    Stale,
}

/// Drives source text through translation, the sandbox and extraction,
/// keeping the last good render for display.
#[derive(Debug, Default)]
pub struct PreviewBridge {
    issued: u64,
    last_good: Option<RenderOutput>,
    last_error: Option<RenderError>,
}

impl PreviewBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source as the sandbox should receive it
    pub fn prepare(&self, source: &str, dialect: Framework, sandbox: &dyn Sandbox) -> String {
        let native = sandbox.native_dialect();
        if dialect == native {
            return source.to_string();
        }
        translate(source, native).text
    }

    /// Issue a ticket for a new execution, superseding every earlier one
    pub fn submit(&mut self) -> Ticket {
        self.issued += 1;
        debug!(ticket = self.issued, "preview submitted");
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Record the result of the execution `ticket` was issued for
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<RenderOutput, RenderError>,
    ) -> PreviewOutcome {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, latest = self.issued, "discarding stale preview");
            return PreviewOutcome::Stale;
        }

        let output = match result {
            Ok(output) => output,
            Err(error) => {
                info!(error = %error, "preview failed, keeping last good render");
                self.last_error = Some(error.clone());
                return PreviewOutcome::Failed(error);
            }
        };

        self.last_error = None;
        self.last_good = Some(output.clone());

        match extract(&output) {
            Ok(model) => {
                info!(primitives = model.primitives.len(), "preview rendered");
                PreviewOutcome::Rendered { output, model }
            }
            Err(error) => {
                warn!(error = %error, "could not extract shapes from preview");
                PreviewOutcome::ExtractionFailed { output, error }
            }
        }
    }

    /// Submit, execute and complete in one step
    #[instrument(skip(self, source, sandbox, scope), fields(dialect = %dialect))]
    pub fn run(
        &mut self,
        source: &str,
        dialect: Framework,
        sandbox: &dyn Sandbox,
        scope: &Scope,
    ) -> PreviewOutcome {
        let ticket = self.submit();
        let prepared = self.prepare(source, dialect, sandbox);
        let result = sandbox.execute(&prepared, scope);
        self.complete(ticket, result)
    }

    /// Most recent successful render, shown while later attempts fail
    pub fn last_good(&self) -> Option<&RenderOutput> {
        self.last_good.as_ref()
    }

    pub fn last_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }
}
