pub mod verify;

pub use verify::{verify, verify_with, VerifyOptions};
