//! Transport seam between the client and the remote service.
//!
//! Everything above this trait speaks plain JSON shaped like the remote
//! API's batch-update and get endpoints. Implementations own authentication,
//! HTTP, and retries; tests substitute a canned mock.

use crate::error::Result;
use serde_json::Value as Json;

/// A transport to the remote spreadsheet service.
///
/// All methods take the spreadsheet id rather than holding one, so a single
/// connection can serve many spreadsheets.
pub trait Connection {
    /// Fetch spreadsheet-level properties and the property block of every tab
    ///
    /// The response carries `properties.title` and a `sheets` array whose
    /// entries each hold a `properties` object.
    fn get_properties(&self, spreadsheet_id: &str) -> Result<Json>;

    /// Fetch cell data for the given textual ranges, including grid data
    ///
    /// The response nests values as `sheets[].data[].rowData[].values[]`.
    fn get_data(&self, spreadsheet_id: &str, ranges: &[String]) -> Result<Json>;

    /// Execute a batch of mutation requests in order, atomically
    fn execute_requests(&self, spreadsheet_id: &str, requests: &[Json]) -> Result<Json>;
}
