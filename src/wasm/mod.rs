mod builder;
mod constants;
mod parser;
mod pubkey;
pub mod try_into_js_value;

pub use builder::BuilderNamespace;
pub use parser::ParserNamespace;
pub use pubkey::WasmPubkey;

// Re-export constants functions
pub use constants::*;
