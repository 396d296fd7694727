//! The Janus API client.
//!
//! Owns a [`Transport`], signs and sends every request through it, and
//! exposes the typed query operations: availability zones, paged and full VM
//! listings, per-VM detail/snapshot/backup lookups, name-or-id resolution,
//! and the infrastructure utilization report.
//!
//! All operations issue requests strictly sequentially; pagination never
//! fans out.

use std::sync::Arc;

use http::Method;
use janus_model::envelope::{ApiEnvelope, PageToken};
use janus_model::{build_report, AvailabilityZone, InfrastructureReport, Vm};
use tracing::{debug, warn};

use crate::cache::VmCache;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Versioned path prefix of every Open-API endpoint.
const API_PREFIX: &str = "/janus/20190725";

/// Page size used when driving a full scan.
const SCAN_PAGE_SIZE: u32 = 100;

/// Client for the Janus platform Open-API.
///
/// Holds the transport and a single-slot cache of the most recent full VM
/// scan. Cheap to share behind an `Arc`; see the crate docs for the cache's
/// refresh semantics.
#[derive(Debug)]
pub struct JanusClient {
    transport: Arc<dyn Transport>,
    cache: VmCache,
}

impl JanusClient {
    /// Create a client over the reqwest-backed [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the configured base URL is
    /// unusable.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: VmCache::new(),
        }
    }

    /// Send one signed request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] for HTTP error statuses, carrying the decoded
    ///   error body when the server sent JSON
    /// - [`ClientError::Transport`] when no response was obtained
    /// - [`ClientError::Decode`] when a success body is not valid JSON
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> ClientResult<serde_json::Value> {
        debug!(%method, path, ?query, "sending API request");

        let response = self
            .transport
            .execute(ApiRequest {
                method,
                path: path.to_owned(),
                query,
                body,
            })
            .await?;

        if response.is_success() {
            decode_body(&response)
        } else {
            warn!(
                status = response.status,
                reason = %response.reason,
                "API returned an error status"
            );
            Err(ClientError::Api {
                status: response.status,
                reason: response.reason,
                body: serde_json::from_str(&response.body).ok(),
            })
        }
    }

    /// Query all availability zones (resource pools).
    pub async fn get_availability_zones(&self) -> ClientResult<Vec<AvailabilityZone>> {
        let value = self
            .send_request(Method::GET, &format!("{API_PREFIX}/azs"), Vec::new(), None)
            .await?;
        let envelope: ApiEnvelope<AvailabilityZone> =
            serde_json::from_value(value).unwrap_or_default();
        Ok(envelope.data.unwrap_or_default().data)
    }

    /// Query one page of VMs.
    ///
    /// Omitted parameters leave the page selection to the server.
    pub async fn get_vms(
        &self,
        page_num: Option<u64>,
        page_size: Option<u32>,
    ) -> ClientResult<ApiEnvelope<Vm>> {
        let mut query = Vec::new();
        if let Some(page_num) = page_num {
            query.push(("page_num".to_owned(), page_num.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size".to_owned(), page_size.to_string()));
        }

        let value = self
            .send_request(Method::GET, &format!("{API_PREFIX}/servers"), query, None)
            .await?;
        serde::Deserialize::deserialize(&value).map_err(|source| ClientError::Decode {
            body: value.to_string(),
            source,
        })
    }

    /// Fetch the complete VM list, driving pagination to the end.
    ///
    /// With `use_cache` and a populated cache this returns the cached list
    /// without touching the network. Otherwise pages of [`SCAN_PAGE_SIZE`] are
    /// fetched sequentially starting at page 0, in server order, until the
    /// server stops yielding records or a next-page token. A failed or
    /// malformed page terminates the scan; what was accumulated so far is
    /// returned rather than discarded. Every full scan refreshes the cache,
    /// whatever `use_cache` was.
    pub async fn get_all_vms(&self, use_cache: bool) -> Vec<Vm> {
        if use_cache {
            if let Some(cached) = self.cache.lookup() {
                debug!(count = cached.len(), "using cached VM list");
                return cached;
            }
        }

        let mut all_vms = Vec::new();
        let mut current_page = 0_u64;
        loop {
            debug!(page = current_page, "downloading VM list page");
            let envelope = match self
                .get_vms(Some(current_page), Some(SCAN_PAGE_SIZE))
                .await
            {
                Ok(envelope) => envelope,
                Err(err) => {
                    warn!(page = current_page, error = %err, "scan terminated early");
                    break;
                }
            };
            let Some(page) = envelope.data else {
                warn!(page = current_page, "scan terminated on malformed page");
                break;
            };

            let fetched = page.data.len();
            all_vms.extend(page.data);

            let next_page = page
                .next_page_num
                .as_ref()
                .and_then(PageToken::as_page_num);
            if fetched == 0 {
                break;
            }
            let Some(next_page) = next_page else { break };
            current_page = next_page;
        }

        debug!(count = all_vms.len(), "full VM scan complete");
        self.cache.store(all_vms.clone());
        all_vms
    }

    /// Drop the cached VM list; the next cached call re-scans the platform.
    pub fn invalidate_vm_cache(&self) {
        self.cache.invalidate();
    }

    /// Query the detailed record of one VM by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty id, before any
    /// network call.
    pub async fn get_vm_details(&self, vm_id: &str) -> ClientResult<serde_json::Value> {
        if vm_id.is_empty() {
            return Err(ClientError::InvalidArgument("a vm_id is required"));
        }
        self.send_request(
            Method::GET,
            &format!("{API_PREFIX}/servers/{vm_id}"),
            Vec::new(),
            None,
        )
        .await
    }

    /// Query all snapshots of one VM.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty id, before any
    /// network call.
    pub async fn get_vm_snapshots(&self, vm_id: &str) -> ClientResult<serde_json::Value> {
        if vm_id.is_empty() {
            return Err(ClientError::InvalidArgument("a vm_id is required"));
        }
        self.send_request(
            Method::GET,
            &format!("{API_PREFIX}/servers/{vm_id}/snapshots"),
            Vec::new(),
            None,
        )
        .await
    }

    /// Query all backups of one VM.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty id, before any
    /// network call.
    pub async fn get_vm_backups(&self, vm_id: &str) -> ClientResult<serde_json::Value> {
        if vm_id.is_empty() {
            return Err(ClientError::InvalidArgument("a vm_id is required"));
        }
        self.send_request(
            Method::GET,
            &format!("{API_PREFIX}/servers/{vm_id}/backups"),
            Vec::new(),
            None,
        )
        .await
    }

    /// Resolve a VM by id or exact name and return its detailed record.
    ///
    /// An identifier with exactly 5 hyphen-delimited segments is taken to be
    /// an id and looked up directly. Anything else is treated as a name: the
    /// full VM list is scanned (cached) for the first exact, case-sensitive
    /// match, and its id is looked up. `Ok(None)` means no VM carries that
    /// name — distinct from every failure.
    pub async fn find_vm(&self, identifier: &str) -> ClientResult<Option<serde_json::Value>> {
        let id_shaped = identifier.split('-').count() == 5;

        if id_shaped {
            debug!(identifier, "identifier is id-shaped, querying directly");
            return self.get_vm_details(identifier).await.map(Some);
        }

        debug!(identifier, "identifier is name-shaped, scanning VM list");
        let vm_list = self.get_all_vms(true).await;
        match vm_list.iter().find(|vm| vm.name == identifier) {
            Some(vm) => {
                debug!(identifier, vm_id = %vm.id, "name matched, fetching details");
                self.get_vm_details(&vm.id).await.map(Some)
            }
            None => {
                debug!(identifier, "no VM with that name");
                Ok(None)
            }
        }
    }

    /// Scan the whole infrastructure and build the utilization report.
    ///
    /// Always performs an uncached full scan. A failed zone query degrades to
    /// an empty zone list (every VM then falls under the zone-exclusion
    /// policy) rather than failing the report.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoVmsFound`] when the scan yields no VMs at all.
    pub async fn generate_infrastructure_report(&self) -> ClientResult<InfrastructureReport> {
        debug!("generating infrastructure report, scanning all virtual machines");

        let all_vms = self.get_all_vms(false).await;
        let zones = match self.get_availability_zones().await {
            Ok(zones) => zones,
            Err(err) => {
                warn!(error = %err, "zone query failed, reporting without zone buckets");
                Vec::new()
            }
        };

        build_report(&all_vms, &zones).ok_or(ClientError::NoVmsFound)
    }
}

/// Decode a success body, reporting the raw text on failure.
fn decode_body(response: &ApiResponse) -> ClientResult<serde_json::Value> {
    serde_json::from_str(&response.body).map_err(|source| {
        warn!(body = %response.body, "invalid JSON response from API");
        ClientError::Decode {
            body: response.body.clone(),
            source,
        }
    })
}
