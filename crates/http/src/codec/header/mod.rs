//! HTTP response header decoding
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Decodes the status line and header block of a response
//!   - Finds the header/body boundary across arbitrary read fragments
//!   - Fails fast on non-2xx statuses and unsupported encodings
//!   - Manages header size limits
//!   - Chooses the body framing from Content-Length

mod header_decoder;

pub use header_decoder::HeaderDecoder;
