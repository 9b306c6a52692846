//! # Events Module
//!
//! Progress reporting for the checksum pipeline.
//!
//! ## Design
//! Pipeline threads emit events through a channel so the CLI can render
//! progress without the core knowing how it is displayed.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Hash(HashEvent::FileHashed { path, .. }) = event {
//!             println!("hashed {}", path.display());
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(sink, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
