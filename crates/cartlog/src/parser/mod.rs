/// CaRT log line decoding
///
/// Every line of a log file is either a CaRT log line, which is decoded into a
/// [`StructuredRecord`], or something else written to the same file, which is
/// kept verbatim as a [`RawRecord`].
///
/// # Layout
///
/// - `classify.rs`: shape test and line decoder
/// - `level.rs`: severity vocabulary
/// - `tag.rs`: trace/function/descriptor extraction from the tag token
/// - `anon.rs`: pointer and GAH redaction for cross-run grouping
/// - `model.rs`: record types and their derived accessors
///
/// # Line format
///
/// ```text
/// 01/23-12:34:56.78 node1 CaRT[1234] rpc  INFO src/cart/crt_rpc.c:42 crt_rpc_priv_alloc(0x1a2b) Allocated
/// ^ timestamp       ^host ^pid       ^fac ^lvl ^path:lineno          ^tag                        ^message
/// ```

pub mod anon;
pub mod classify;
pub mod level;
pub mod model;
pub mod tag;

pub use classify::{classify, is_structured};
pub use level::Level;
pub use model::{ParentShape, RawRecord, Record, StructuredRecord};

// Constants
pub const TIMESTAMP_WIDTH: usize = 17;
pub const MIN_TOKENS: usize = 6;
/// Fixed-width part of the preamble; host and pid widths are added to it.
pub const PREAMBLE_BASE: usize = 29;
