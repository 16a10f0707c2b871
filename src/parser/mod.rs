pub mod assembler;
pub mod scanner;

pub use assembler::{parse_lines, parse_matches, AssemblyStats, MatchAssembler, MatchRecord, ParseOutcome};
pub use scanner::{LogEvent, LogScanner, Role};
