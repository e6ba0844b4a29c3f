//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod session;
mod store;
mod template;
mod tree;

pub use session::{SelectionSession, SelectionSummary, SessionState};
pub use store::SessionStore;
pub use template::{TemplateOptions, TemplateService};
pub use tree::TreeService;
