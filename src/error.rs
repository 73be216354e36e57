use thiserror::Error;

/// Errors from program construction and execution.
///
/// Unbalanced loops are rejected at construction by the bracket pre-pass,
/// so the engine never scans for a match at run time. The tape conditions
/// are raised at cell-access time: the data cursor may sit out of bounds
/// as long as no instruction touches the cell there.
#[derive(Debug, Error)]
pub enum Error {
    /// A `[` or `]` with no partner, reported with its character offset
    /// in the source text.
    #[error("unbalanced loop: `{symbol}` at offset {offset} has no match")]
    UnbalancedLoop { symbol: char, offset: usize },

    /// A cell access with the data cursor left of cell 0.
    #[error("tape underflow: data cursor at {cursor}")]
    TapeUnderflow { cursor: isize },

    /// A cell access with the data cursor past the last cell.
    #[error("tape overflow: data cursor at {cursor}, tape has {len} cells")]
    TapeOverflow { cursor: isize, len: usize },

    /// The input or output channel failed.
    #[error("channel error: {0}")]
    Io(#[from] std::io::Error),
}
