// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by the evaluator, the gradient, and the
//! renderer.  Everything here is a caller mistake; none of it is
//! transient, so nothing is ever retried.

/// Failures reported synchronously by the library.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// A parameter was outside what the operation accepts: an
    /// iteration cap of zero, too few anchor colors, a ramp shorter
    /// than its anchor list, or a malformed sampling grid.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// A lookup into a color ramp with an escape time the ramp cannot
    /// hold.  Usually means the ramp and the evaluator were built with
    /// different iteration caps.
    #[fail(display = "escape time {} is outside the ramp (length {})", index, len)]
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the ramp.
        len: usize,
    },

    /// A worker thread in the parallel renderer panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

/// Shorthand used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;

pub(crate) fn invalid<T, S: Into<String>>(message: S) -> Result<T> {
    Err(Error::InvalidConfiguration(message.into()))
}
