//! Variadic front-end for [`Logger::message`](crate::Logger::message).
//!
//! Each argument is converted with `MessageArg::from`, so text, integers,
//! label arrays, overlays and the no-newline marker can be mixed freely.
//!
//! # Examples
//!
//! ```
//! use verbosity_logger::prelude::*;
//! use verbosity_logger::{report, report_label};
//!
//! let out = MemorySink::new();
//! let mut logger = Logger::builder()
//!     .threshold(2)
//!     .labels([("v", 1), ("vv", 2), ("vvv", 3)])
//!     .sink(SharedStream::new(out.clone()))
//!     .build()
//!     .unwrap();
//!
//! // Explicit level
//! report!(logger, 1, "Scanning").unwrap();
//!
//! // Progress without a trailing newline
//! report!(logger, "working", MessageArg::no_newline()).unwrap();
//! report!(logger, Overlay::new().prefix(""), "...done").unwrap();
//!
//! // Label shortcut
//! assert_eq!(report_label!(logger, "vvv", "too chatty").unwrap(), None);
//!
//! assert_eq!(out.contents(), "Scanning\nworking...done\n");
//! ```

/// Submit a message built from mixed arguments.
///
/// # Examples
///
/// ```
/// # use verbosity_logger::prelude::*;
/// # let mut logger = Logger::new();
/// use verbosity_logger::report;
/// report!(logger, "Always shown").unwrap();
/// report!(logger, 3, "Shown at threshold 3 or higher").unwrap();
/// report!(logger, ["warn"], Overlay::new().prefix("! "), "Labeled").unwrap();
/// ```
#[macro_export]
macro_rules! report {
    ($logger:expr $(, $arg:expr)* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::MessageArg> =
            ::std::vec![$($crate::MessageArg::from($arg)),*];
        $logger.message(args)
    }};
}

/// Submit a message under a label's level or mask.
///
/// # Examples
///
/// ```
/// # use verbosity_logger::prelude::*;
/// # let mut logger = Logger::new();
/// # logger.label_levels([("debug", 4)]);
/// use verbosity_logger::report_label;
/// report_label!(logger, "debug", "Cache miss for key ", "users:42").unwrap();
/// ```
#[macro_export]
macro_rules! report_label {
    ($logger:expr, $label:expr $(, $arg:expr)* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::MessageArg> =
            ::std::vec![$($crate::MessageArg::from($arg)),*];
        $logger.invoke_label($label, args)
    }};
}
