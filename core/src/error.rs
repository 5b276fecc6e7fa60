use thiserror::Error;

/// Failures a single `step` or program load can surface.
///
/// The interpreter this machine models silently corrupted its own state in
/// every one of these situations; here they are explicit and fail the
/// offending cycle instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A computed address left the 4096-byte address space.
    #[error("memory access out of bounds at {address:#05X}")]
    OutOfBounds { address: usize },

    /// A call was issued with the stack already at full depth.
    #[error("call stack overflow")]
    StackOverflow,

    /// A return was issued with no saved program counter on the stack.
    #[error("return with an empty call stack")]
    StackUnderflow,

    /// A loaded program does not fit between the program start address and
    /// the top of memory.
    #[error("program of {size} bytes exceeds the {max} byte program region")]
    ProgramTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
