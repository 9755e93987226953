//! Compressed RTF (MS-OXRTFCP).
//!
//! Message bodies in RTF are stored LZFu-compressed in `PidTagRtfCompressed`.
//! This module provides the compressor used when writing messages, a
//! reference decompressor, and a helper turning plain text into a minimal
//! RTF document.
//!
//! # Example
//!
//! ```rust
//! use oxmsg::rtf::{compress, decompress, rtf_from_text};
//!
//! let rtf = rtf_from_text("Hello World!");
//! let packed = compress(&rtf)?;
//! assert_eq!(decompress(&packed)?, rtf);
//! # Ok::<(), oxmsg::rtf::RtfError>(())
//! ```

mod compressed;
mod error;

// Re-exports
pub use compressed::{
    RtfCompression, compress, compress_with, decompress, is_compressed_rtf, rtf_from_text,
};
pub use error::{RtfError, RtfResult};
