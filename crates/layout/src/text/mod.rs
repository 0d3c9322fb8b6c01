mod wrapper;

pub use wrapper::{PositionedLine, TextBlock, WrappedLines, position_lines, wrap_lines};
