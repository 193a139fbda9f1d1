//! Item Source Client: querying the archive API and deciding how far back
//! to look.

pub mod client;
pub mod item;
pub mod window;

pub use client::ArchiveClient;
pub use item::Item;
