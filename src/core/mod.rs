pub mod error;
pub mod records;
pub mod state_machine;

pub use error::*;
pub use records::*;
pub use state_machine::*;
