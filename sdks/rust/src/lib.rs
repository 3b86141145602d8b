//! Rust SDK for CareerWise
//!
//! # HTTP Client (default feature)
//!
//! ```rust,no_run
//! use careerwise_sdk::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:8000")?;
//!
//!     let reply = client.chat().simple("What career should I pursue?").await?;
//!     println!("{}", reply.response);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Chat session
//!
//! [`ChatSession`] keeps the transcript, input and pending state of one chat
//! and never fails: connection problems turn into a fallback reply.
//!
//! ```rust,no_run
//! use careerwise_sdk::{ChatSession, Client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ChatSession::open(Client::new("http://localhost:8000")?).await;
//! session.set_input("Interview preparation tips");
//! session.send().await;
//! for message in session.messages() {
//!     println!("{:?}: {}", message.sender, message.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod session;
pub mod types;

#[cfg(feature = "http-client")]
pub mod client;

// Re-exports
pub use error::Error;
pub use session::{ChatSession, ChatTransport, FALLBACK_REPLY, GREETING, SUGGESTIONS};
pub use types::*;

#[cfg(feature = "http-client")]
pub use client::Client;
