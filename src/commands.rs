//! Async commands for side effects.
//!
//! Services return commands from `update()`; the App spawns each one on the
//! runtime and reports its completion back through [`AppMessage`].

use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;

/// An async operation run outside the event loop.
///
/// Commands usually send their outcome to the owning service through a
/// channel captured at construction.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name used in logs.
    fn name(&self) -> String;

    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()>;
}
