pub use error::{Error, Result};
pub use frame::Frame;
pub use machine::Machine;

pub mod constants;
mod error;
mod frame;
mod instruction;
mod machine;
mod memory;
mod opcode;
mod operations;
mod state;
