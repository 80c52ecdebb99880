//! Decoding wire buffers back into domain records
//!
//! # Module Structure
//!
//! - `table` - Internal FlatBuffer table parsing helpers
//! - `records` - One decode routine per record kind
//!
//! # Usage
//!
//! ```ignore
//! use econfeed_protocol::{decode_message, Message};
//!
//! match decode_message(buf)? {
//!     Message::Economic(event) => println!("{}", event.base.short_id),
//!     Message::Log(log) => println!("{}", log.message),
//!     _ => {}
//! }
//! ```

mod records;
pub(crate) mod table;

pub use records::decode_message;
pub use table::FlatTable;
