//! Notification module
//!
//! Email composition lives in core; delivery is a trait implemented by
//! the infrastructure layer (SMTP) and by [`MockMailer`] in tests. The
//! workflow engine launches sends as fire-and-forget background tasks,
//! so delivery failures never reach a caller.

mod composer;
mod mock;
mod traits;

pub use composer::{ComposerConfig, EmailComposer};
pub use mock::MockMailer;
pub use traits::{MailMessage, Mailer};
