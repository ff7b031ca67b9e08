//! Operation handlers
//!
//! One handler per facade operation. Each orchestrates the same bridge:
//! translate the command, register the correlation entry, dispatch
//! downstream, then wait bounded for the callback.

mod commands;
mod lookup_handler;
mod quote_handler;
mod transfer_handler;

pub use commands::*;
pub use lookup_handler::LookupHandler;
pub use quote_handler::QuoteHandler;
pub use transfer_handler::TransferHandler;
