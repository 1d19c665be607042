//! Input handling
//! Document text extraction and interactive (human-in-the-loop) answers

pub mod prompter;
pub mod text_extractor;

pub use prompter::{choose_index, choose_option, InputSource, ScriptedInput, TerminalInput};
pub use text_extractor::{DocumentReader, PdfExtractor};
