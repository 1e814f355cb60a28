pub mod session;

pub use session::{IrSession, PendingGraph};
