//! # string2hid
//!
//! Turn a typed text string into the raw USB HID keyboard reports a physical
//! keyboard would send, and write them to a HID gadget device such as
//! `/dev/hidg0`.
//!
//! Every key press is an 8-byte boot keyboard report followed by an all-zero
//! release report. Only a US layout is modelled.
//!
//! ## Quick start
//!
//! ```no_run
//! use string2hid::{DeviceSink, Engine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sink = DeviceSink::open("/dev/hidg0").await?;
//!     let mut engine = Engine::new(sink);
//!     engine.type_str(r"ls -la\n").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Input syntax
//!
//! | Input | Effect |
//! |-------|--------|
//! | `abc123` | Type the characters |
//! | `\\` | Backslash |
//! | `\n` | Enter |
//! | `\t` `\b` `\d` `\e` | Tab, backspace, delete, escape |
//! | `\c` `\s` `\a` `\g` | Ctrl, shift, alt, GUI (modifier only) |
//! | `\-` | Pause for the engine delay (1 s by default) |
//! | `\"...\"` | Press up to six keys at once, e.g. `\"\a\t\"` for alt+tab |
//!
//! ## Without a device
//!
//! [`MemorySink`] records the reports instead of writing them:
//!
//! ```
//! use string2hid::{Engine, MemorySink};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut engine = Engine::new(MemorySink::new());
//!     engine.type_str(r#"\"\cc\""#).await.unwrap();
//!     let reports = engine.into_sink().reports;
//!     assert_eq!(reports, vec![[0x01, 0, 0x06, 0, 0, 0, 0, 0], [0; 8]]);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod keymap;
pub mod parser;
pub mod report;
pub mod sink;
pub mod unit;

pub use engine::{DEFAULT_DELAY, Engine, TypeSummary};
pub use error::{EncodeError, EngineError, ParseError};
pub use parser::{Parser, parse_duration, parse_str};
pub use report::{Encoded, KeyboardReport, REPORT_LEN, encode};
pub use sink::{DEFAULT_DEVICE, DeviceSink, MemorySink, ReportSink};
pub use unit::{ComboKey, EmissionUnit};
