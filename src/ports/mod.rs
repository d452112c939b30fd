// Ports - Interface definitions (contracts)

use async_trait::async_trait;

use crate::domain::model::{CancelSignal, ProcessInvocation, RunResult};
use crate::error::AmbimuxResult;

/// Port for running external media tools
///
/// Implementations launch exactly one process per call with the arguments
/// passed as a list (never through a shell) and resolve once it exits.
/// A non-zero exit is reported in [`RunResult`]; only a failure to start,
/// a timeout or a cancellation is an error.
#[async_trait]
pub trait ProcessPort: Send + Sync {
    /// Run the invocation to completion
    async fn run(
        &self,
        invocation: &ProcessInvocation,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<RunResult>;
}
