use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("style `{0}` is already defined")]
    DuplicateStyle(String),

    #[error("unknown style `{0}`")]
    UnknownStyle(String),

    #[error("style `{name}` cannot inherit from `{parent}`: the parent chain would cycle")]
    CyclicInheritance { name: String, parent: String },

    #[error("table row {row} has {found} cells but the header has {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("block {block} needs {height:.1}pt but a page only holds {available:.1}pt")]
    Overflow {
        block: usize,
        height: f32,
        available: f32,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
