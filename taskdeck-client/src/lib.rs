//! # TaskDeck Client Library
//!
//! This library is the client side of TaskDeck: a typed API client plus
//! the local view state a frontend keeps between requests.
//!
//! ## Modules
//!
//! - `api`: reqwest-based API client with bearer-token sessions
//! - `session`: on-disk session cache (token + public user)
//! - `state`: in-memory task list with filters and priority sort
//!
//! The client reconciles its local list only from the payload each call
//! returns; there is no background refresh and no cross-client
//! synchronization, so two open clients can drift until their next call.
//!
//! ## Example
//!
//! ```no_run
//! use taskdeck_client::api::ApiClient;
//! use taskdeck_client::state::TaskList;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = ApiClient::new("http://localhost:3000", "./session.json").await?;
//! client.login("alice@example.com", "secret1").await?;
//!
//! let mut list = TaskList::new();
//! list.set_tasks(client.list_tasks().await?);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod session;
pub mod state;
