//! Core primitives for the keyseg toolchain.
//!
//! Two independent building blocks that higher-level cryptographic code sits
//! on top of:
//!
//! * [`segment`] and [`reader`] — non-owning views over a backing block and a
//!   cursor that carves them into successive windows without copying.
//! * [`keypair`] — raw public/private key bytes with a fixed 32-byte public
//!   half and copy-in/copy-out access.
//!
//! [`layout`] builds on the reader to describe a blob as named fixed-width
//! fields. Nothing here performs I/O, logging or any cipher operation.

pub mod keypair;
pub mod layout;
pub mod reader;
pub mod segment;

mod error;

pub use error::KeysegError;
pub use keypair::{KeyPair, PUBLIC_KEY_LEN};
pub use layout::{FieldDef, FieldLayout, SplitFields};
pub use reader::{SeekOrigin, SegmentedWindowReader};
pub use segment::Segment;
