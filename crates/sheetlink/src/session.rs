//! Per-entity connection state and the batch request queue.

use crate::connection::Connection;
use crate::error::{Error, Result};
use log::debug;
use serde_json::Value as Json;
use std::fmt;
use std::rc::Rc;

/// The connection handle and pending request queue behind one entity.
///
/// Every entity (spreadsheet, tab, range) owns a `Session`. Sessions forked
/// from the same parent share the underlying connection but queue requests
/// independently, so each entity batches and commits on its own.
pub struct Session {
    spreadsheet_id: String,
    conn: Option<Rc<dyn Connection>>,
    requests: Vec<Json>,
}

impl Session {
    /// A detached session; request building works, but fetching and
    /// committing fail until a connection is attached.
    pub fn detached<S: Into<String>>(spreadsheet_id: S) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            conn: None,
            requests: Vec::new(),
        }
    }

    pub fn new<S: Into<String>>(spreadsheet_id: S, conn: Rc<dyn Connection>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            conn: Some(conn),
            requests: Vec::new(),
        }
    }

    /// A session against the same spreadsheet and connection, with its own
    /// empty queue.
    pub fn fork(&self) -> Self {
        Self {
            spreadsheet_id: self.spreadsheet_id.clone(),
            conn: self.conn.clone(),
            requests: Vec::new(),
        }
    }

    pub fn attach(&mut self, conn: Rc<dyn Connection>) {
        self.conn = Some(conn);
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn connection(&self) -> Result<&Rc<dyn Connection>> {
        self.conn.as_ref().ok_or(Error::NoConnection)
    }

    /// Queue a mutation request for the next commit
    pub fn push(&mut self, request: Json) {
        self.requests.push(request);
    }

    /// The requests queued so far, in commit order
    pub fn requests(&self) -> &[Json] {
        &self.requests
    }

    /// Send all queued requests as one atomic batch
    ///
    /// The queue is cleared only on success; on failure it is left intact so
    /// the commit can be retried.
    pub fn commit(&mut self) -> Result<Json> {
        let conn = self.connection()?;
        debug!(
            "committing {} request(s) to spreadsheet {}",
            self.requests.len(),
            self.spreadsheet_id
        );
        let response = conn.execute_requests(&self.spreadsheet_id, &self.requests)?;
        self.requests.clear();
        Ok(response)
    }

    /// Fetch spreadsheet properties via the attached connection
    pub fn fetch_properties(&self) -> Result<Json> {
        self.connection()?.get_properties(&self.spreadsheet_id)
    }

    /// Fetch one textual range and return its row objects
    ///
    /// An in-bounds range with no written cells comes back without a
    /// `rowData` key; that decodes as an empty block rather than an error.
    pub fn fetch_range(&self, range: &str) -> Result<Vec<Json>> {
        let conn = self.connection()?;
        debug!("fetching {} from spreadsheet {}", range, self.spreadsheet_id);
        let response = conn.get_data(&self.spreadsheet_id, &[range.to_string()])?;
        let grid = response
            .get("sheets")
            .and_then(Json::as_array)
            .and_then(|sheets| sheets.first())
            .and_then(|sheet| sheet.get("data"))
            .and_then(Json::as_array)
            .and_then(|data| data.first())
            .ok_or_else(|| {
                Error::MalformedResponse(format!("no grid data in response for {}", range))
            })?;
        Ok(grid
            .get("rowData")
            .and_then(Json::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("connected", &self.conn.is_some())
            .field("queued_requests", &self.requests.len())
            .finish()
    }
}
