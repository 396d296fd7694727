//! Async client for the Janus platform Open-API.
//!
//! The client signs every request with the platform's SigV4-style scheme
//! (via [`janus_auth`]), speaks JSON over an exchangeable [`Transport`], and
//! exposes the inventory operations: availability zones, paged and full VM
//! listings, per-VM detail/snapshot/backup lookups, id-or-name resolution,
//! and an infrastructure utilization report.
//!
//! Requests are issued strictly sequentially; nothing in this crate fans out
//! concurrent calls. The full VM list is cached in a single slot with no
//! expiry — every full scan refreshes it, and [`JanusClient::invalidate_vm_cache`]
//! drops it explicitly.
//!
//! # Usage
//!
//! ```no_run
//! use janus_auth::Credentials;
//! use janus_client::{ClientConfig, JanusClient};
//!
//! # async fn example() -> Result<(), janus_client::ClientError> {
//! let config = ClientConfig::new(
//!     "https://scp.example.com",
//!     Credentials::new("AKIDEXAMPLE", "secret", "default", "janus"),
//! );
//! let client = JanusClient::new(&config)?;
//!
//! let report = client.generate_infrastructure_report().await?;
//! println!("{} VMs", report.overall_totals.total_vms);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - the [`JanusClient`] operations
//! - [`transport`] - the HTTP collaborator seam and its reqwest implementation
//! - [`cache`] - the single-slot VM list cache
//! - [`config`] - endpoint and credential configuration
//! - [`error`] - the failure taxonomy

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use cache::VmCache;
pub use client::JanusClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
