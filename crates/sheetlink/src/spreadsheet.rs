//! Spreadsheet handle: the top-level entity.

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::requests;
use crate::session::Session;
use crate::tab::Tab;
use crate::{DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT};
use log::debug;
use serde_json::Value as Json;
use sheetlink_core::{CellValue, GridRange};
use std::rc::Rc;

/// A handle to a whole remote spreadsheet and its tabs.
///
/// [`Spreadsheet::connect`] fetches the property tree and materializes a
/// [`Tab`] handle per tab; each tab shares the connection but queues its own
/// requests. Requests queued via the spreadsheet itself commit through
/// [`Spreadsheet::commit`].
#[derive(Debug)]
pub struct Spreadsheet {
    session: Session,
    title: String,
    tabs: Vec<Tab>,
}

impl Spreadsheet {
    /// Connect and fetch the spreadsheet's properties and tab list
    pub fn connect<S: Into<String>>(spreadsheet_id: S, conn: Rc<dyn Connection>) -> Result<Self> {
        let session = Session::new(spreadsheet_id, conn);
        let mut spreadsheet = Self {
            session,
            title: String::new(),
            tabs: Vec::new(),
        };
        spreadsheet.fetch()?;
        Ok(spreadsheet)
    }

    /// Re-fetch properties, rebuilding the tab handles
    ///
    /// Cached tab data does not survive a re-fetch.
    pub fn fetch(&mut self) -> Result<()> {
        let response = self.session.fetch_properties()?;
        self.title = response
            .get("properties")
            .and_then(|p| p.get("title"))
            .and_then(Json::as_str)
            .ok_or_else(|| Error::MalformedResponse("response missing properties.title".into()))?
            .to_string();
        let sheets = response
            .get("sheets")
            .and_then(Json::as_array)
            .ok_or_else(|| Error::MalformedResponse("response missing sheets".into()))?;
        self.tabs = sheets
            .iter()
            .map(|sheet| {
                let properties = sheet.get("properties").ok_or_else(|| {
                    Error::MalformedResponse("sheet entry missing properties".into())
                })?;
                Tab::from_properties(&self.session, properties)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "fetched spreadsheet {:?} with {} tab(s)",
            self.title,
            self.tabs.len()
        );
        Ok(())
    }

    pub fn spreadsheet_id(&self) -> &str {
        self.session.spreadsheet_id()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, title: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.title() == title)
    }

    pub fn tab_mut(&mut self, title: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.title() == title)
    }

    /// The first tab in display order, if any
    pub fn first_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.iter_mut().min_by_key(|t| t.index())
    }

    /// Queue creation of a new tab with default extent
    ///
    /// The handle list updates on the next [`Spreadsheet::fetch`] after the
    /// commit, once the service has assigned the tab's id.
    pub fn add_tab(&mut self, title: &str) -> Result<()> {
        if self.tab(title).is_some() {
            return Err(Error::DuplicateTab(title.to_string()));
        }
        self.session.push(requests::add_tab(
            title,
            None,
            None,
            DEFAULT_ROW_COUNT,
            DEFAULT_COLUMN_COUNT,
        ));
        Ok(())
    }

    /// Queue a block write against a named tab
    ///
    /// `rng` defaults to the tab origin, sized to the data.
    pub fn write_values(
        &mut self,
        data: &[Vec<CellValue>],
        to_tab: &str,
        rng: Option<GridRange>,
    ) -> Result<()> {
        let tab = self
            .tab(to_tab)
            .ok_or_else(|| Error::TabNotFound(to_tab.to_string()))?;
        let rng = match rng {
            Some(mut rng) => {
                rng.sheet_id = tab.tab_id();
                rng
            }
            None => {
                let mut rng = GridRange::whole_tab(tab.tab_id());
                rng.start_row_index = Some(0);
                rng.start_column_index = Some(0);
                rng
            }
        };
        self.session.push(requests::write_cells(&rng, data)?);
        Ok(())
    }

    /// Fetch cell data into a named tab's cache
    ///
    /// `rng` narrows the fetch to a sub-range; `None` fetches the whole tab.
    pub fn get_data(&mut self, tab: &str, rng: Option<GridRange>) -> Result<()> {
        let tab = self
            .tab_mut(tab)
            .ok_or_else(|| Error::TabNotFound(tab.to_string()))?;
        match rng {
            Some(rng) => tab.get_range_data(rng),
            None => tab.get_data(),
        }
    }

    /// The requests queued on the spreadsheet so far
    pub fn requests(&self) -> &[Json] {
        self.session.requests()
    }

    /// Send the spreadsheet's queued requests as one batch
    pub fn commit(&mut self) -> Result<Json> {
        self.session.commit()
    }
}
