#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![deny(missing_docs)]

#[doc(inline)]
pub use grisaille_image as image;

#[doc(inline)]
pub use grisaille_imgproc as imgproc;

/// closed set of operators with their configuration, and the dispatcher.
pub mod operation;

pub use operation::{apply, run, Operation, Processed};
