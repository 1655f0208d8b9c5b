//! A small single-producer/single-consumer byte ring buffer over
//! caller-supplied storage.
//!
//! Written for interrupt-driven embedded code where one context (say a UART
//! receive interrupt) writes bytes and another (the main loop) reads them,
//! without locks. The queue keeps a cumulative write count and a cumulative
//! read count next to its slot indices. The producer only ever stores to the
//! write side and the consumer only to the read side, and the number of unread
//! bytes is the wrapping difference of the two counts.
//!
//! The queue never allocates: storage is a `&mut [u8]` borrowed for the
//! lifetime of the queue.
//!
//! # Feature Flags
//! The **smringbuf** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd, and implement `std::error::Error` for `Error`
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! smringbuf = "0.1"
//! ```
//!
//! Next, add this to your crate root:
//!
//! ```
//! extern crate smringbuf;
//! ```
//!
//! To use smringbuf in a `#![no_std]` crate, disable the default features:
//!
//! ```toml
//! [dependencies]
//! smringbuf = { version = "0.1", default-features = false }
//! ```
//!
//! # Counter domain
//!
//! `RingBuffer<'a, C>` counts in `C`, `u8` by default as on the 8-bit
//! targets it was designed for. The capacity may not exceed `C::MAX`, so a
//! `RingBuffer<u8>` holds at most 255 bytes; use `u16`, `u32` or `usize` for
//! larger queues.
//!
//! # Examples
//! ```
//! extern crate smringbuf;
//!
//! use smringbuf::RingBuffer;
//!
//! fn main() {
//!     let mut storage = [0u8; 11];
//!     let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
//!     assert!(ring.is_empty());
//!
//!     ring.write(26).unwrap();
//!     assert_eq!(ring.available_data(), 1);
//!
//!     assert_eq!(ring.read(), Ok(26));
//!     assert!(ring.is_empty());
//! }
//! ```
//!
//! # Producer & Consumer
//! ```
//! use smringbuf::{Error, RingBuffer};
//!
//! let mut storage = [0u8; 4];
//! let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
//! let (mut producer, mut consumer) = ring.split();
//!
//! assert_eq!(producer.write_slice(b"hello"), 4);
//! assert_eq!(producer.write(b'o'), Err(Error::Full { element: b'o' }));
//!
//! let mut line = [0u8; 4];
//! assert_eq!(consumer.read_slice(&mut line), 4);
//! assert_eq!(&line, b"hell");
//! assert_eq!(consumer.read(), Err(Error::Empty));
//! ```
//!
//! # Unchecked access
//! ```
//! use smringbuf::RingBuffer;
//!
//! let mut storage = [0u8; 8];
//! let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
//!
//! for value in 100..125 {
//!     if !ring.is_full() {
//!         unsafe { ring.write_unchecked(value) };
//!     }
//! }
//! assert_eq!(ring.available_data(), 8);
//!
//! while !ring.is_empty() {
//!     let _ = unsafe { ring.read_unchecked() };
//! }
//! assert_eq!(ring.available_space(), 8);
//! ```

#![cfg_attr(not(any(feature="std", test)), no_std)]

#![deny(missing_docs)]

#[macro_use]
extern crate log;
#[cfg(not(any(feature="std", test)))]
extern crate core as std;

mod counter;
mod ringbuffer;
mod utils;
pub mod error;

pub use counter::Counter;
pub use error::Error;
pub use ringbuffer::{Consumer, Drain, Producer, RingBuffer};
