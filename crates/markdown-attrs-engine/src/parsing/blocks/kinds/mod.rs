pub mod block_quote;
pub mod code_fence;
pub mod definition_list;
pub mod heading;
pub mod indented_code;
pub mod list;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use definition_list::{DefinitionDescription, DefinitionList};
pub use heading::AtxHeading;
pub use indented_code::IndentedCode;
pub use list::{List, ListItem, ListMarker};
pub use paragraph::Paragraph;
pub use table::Table;
pub use thematic_break::ThematicBreak;
