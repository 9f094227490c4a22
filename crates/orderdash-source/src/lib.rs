pub mod cache;
pub mod client;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod normalize;
pub mod parse;
pub(crate) mod retry;
pub mod types;

pub use cache::ResponseCache;
pub use client::{orders_from_document, FetchOptions, OrderSourceClient};
pub use error::SourceError;
pub use extract::{detect_shape, extract_orders, DocumentShape};
pub use inspect::{summarize_document, DocumentSummary, OrderPreview};
pub use normalize::{normalize, normalize_order};
pub use parse::parse_currency;
pub use types::{RawAddress, RawCustomer, RawLineItem, RawOrder, RawRefund, Scalar};
