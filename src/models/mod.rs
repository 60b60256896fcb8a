pub mod mail;
pub mod triage;

pub use mail::*;
pub use triage::*;
