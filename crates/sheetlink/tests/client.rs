//! End-to-end client tests against a canned in-process transport.

use pretty_assertions::assert_eq;
use serde_json::{json, Value as Json};
use sheetlink::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One recorded transport call
#[derive(Debug, Clone, PartialEq)]
enum Call {
    GetProperties(String),
    GetData(String, Vec<String>),
    ExecuteRequests(String, Vec<Json>),
}

/// A transport that records calls and replays canned responses
struct MockConnection {
    calls: RefCell<Vec<Call>>,
    properties: Json,
    data: Json,
    fail: Cell<bool>,
}

impl MockConnection {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            properties: json!({
                "properties": {"title": "Test Sheet"},
                "sheets": [
                    {"properties": {
                        "sheetId": 0,
                        "title": "Sheet1",
                        "index": 0,
                        "gridProperties": {"rowCount": 1000, "columnCount": 26},
                    }},
                    {"properties": {
                        "sheetId": 1234,
                        "title": "data",
                        "index": 1,
                        "gridProperties": {"rowCount": 500, "columnCount": 10},
                    }},
                ],
            }),
            data: json!({
                "sheets": [{"data": [{"rowData": [
                    {"values": [
                        {"userEnteredValue": {"formulaValue": "=A2+A3"},
                         "effectiveValue": {"numberValue": 3},
                         "formattedValue": "3"},
                        {"effectiveValue": {"stringValue": "x"}},
                    ]},
                    {"values": [
                        {"effectiveValue": {"numberValue": 0}},
                    ]},
                ]}]}],
            }),
            fail: Cell::new(false),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Connection for MockConnection {
    fn get_properties(&self, spreadsheet_id: &str) -> sheetlink::Result<Json> {
        self.calls
            .borrow_mut()
            .push(Call::GetProperties(spreadsheet_id.to_string()));
        Ok(self.properties.clone())
    }

    fn get_data(&self, spreadsheet_id: &str, ranges: &[String]) -> sheetlink::Result<Json> {
        self.calls.borrow_mut().push(Call::GetData(
            spreadsheet_id.to_string(),
            ranges.to_vec(),
        ));
        Ok(self.data.clone())
    }

    fn execute_requests(
        &self,
        spreadsheet_id: &str,
        requests: &[Json],
    ) -> sheetlink::Result<Json> {
        if self.fail.get() {
            return Err(Error::transport("connection reset"));
        }
        self.calls.borrow_mut().push(Call::ExecuteRequests(
            spreadsheet_id.to_string(),
            requests.to_vec(),
        ));
        Ok(json!({"replies": []}))
    }
}

fn connect(conn: &Rc<MockConnection>) -> Spreadsheet {
    Spreadsheet::connect("ssid", conn.clone() as Rc<dyn Connection>).unwrap()
}

#[test]
fn connect_materializes_tabs() {
    let conn = MockConnection::new();
    let sheet = connect(&conn);

    assert_eq!(sheet.title(), "Test Sheet");
    assert_eq!(sheet.spreadsheet_id(), "ssid");
    assert_eq!(sheet.tabs().len(), 2);
    assert_eq!(conn.calls(), vec![Call::GetProperties("ssid".to_string())]);

    let tab = sheet.tab("data").unwrap();
    assert_eq!(tab.tab_id(), 1234);
    assert_eq!(tab.index(), 1);
    assert_eq!(tab.row_count(), 500);
    assert_eq!(tab.column_count(), 10);

    assert!(sheet.tab("missing").is_none());
}

#[test]
fn write_then_commit_sends_one_batch() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    let data = vec![
        vec![CellValue::from("a"), CellValue::Int(1)],
        vec![CellValue::from("b"), CellValue::Int(2)],
    ];
    sheet.write_values(&data, "Sheet1", None).unwrap();
    assert_eq!(sheet.requests().len(), 1);

    sheet.commit().unwrap();
    assert_eq!(sheet.requests().len(), 0);

    let batch = match conn.calls().last().cloned() {
        Some(Call::ExecuteRequests(id, reqs)) => {
            assert_eq!(id, "ssid");
            reqs
        }
        other => panic!("expected batch call, got {:?}", other),
    };
    assert_eq!(batch.len(), 1);
    assert_eq!(
        batch[0]["updateCells"]["range"],
        json!({
            "sheetId": 0,
            "startRowIndex": 0,
            "endRowIndex": 2,
            "startColumnIndex": 0,
            "endColumnIndex": 2,
        })
    );
}

#[test]
fn failed_commit_keeps_the_queue() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    sheet
        .write_values(&[vec![CellValue::Int(1)]], "Sheet1", None)
        .unwrap();
    conn.fail.set(true);
    assert!(sheet.commit().is_err());
    assert_eq!(sheet.requests().len(), 1);

    // Retry succeeds and drains the queue
    conn.fail.set(false);
    sheet.commit().unwrap();
    assert_eq!(sheet.requests().len(), 0);
}

#[test]
fn commit_order_matches_queue_order() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    let tab = sheet.tab_mut("Sheet1").unwrap();
    tab.insert_rows(0, 2);
    tab.delete_columns(3, 5);
    tab.append_rows(10);
    tab.commit().unwrap();

    let batch = match conn.calls().last().cloned() {
        Some(Call::ExecuteRequests(_, reqs)) => reqs,
        other => panic!("expected batch call, got {:?}", other),
    };
    let keys: Vec<&str> = batch
        .iter()
        .map(|r| r.as_object().unwrap().keys().next().unwrap().as_str())
        .collect();
    assert_eq!(keys, vec!["insertDimension", "deleteDimension", "appendDimension"]);
}

#[test]
fn get_data_decodes_computed_values() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    sheet.get_data("Sheet1", None).unwrap();
    let tab = sheet.tab("Sheet1").unwrap();
    assert_eq!(
        tab.values(),
        &[
            vec![Some(CellValue::Int(3)), Some(CellValue::String("x".into()))],
            // 0 is a value, not a gap
            vec![Some(CellValue::Int(0))],
        ]
    );

    // Whole-tab fetch goes out as the bare title
    assert!(conn
        .calls()
        .contains(&Call::GetData("ssid".to_string(), vec!["Sheet1".to_string()])));
}

#[test]
fn get_data_with_range_fetches_a_sub_span() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    let rng = GridRange::from_a1(0, "A1:B2").unwrap();
    sheet.get_data("Sheet1", Some(rng)).unwrap();
    assert!(conn.calls().contains(&Call::GetData(
        "ssid".to_string(),
        vec!["Sheet1!A1:B2".to_string()]
    )));
}

#[test]
fn projections_select_the_reading() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    let tab = sheet.tab_mut("Sheet1").unwrap();
    tab.get_data_with(ValueProjection::Entered, FormatProjection::Effective)
        .unwrap();
    assert_eq!(tab.values()[0][0], Some(CellValue::Formula("=A2+A3".into())));

    tab.get_data_with(ValueProjection::Displayed, FormatProjection::Effective)
        .unwrap();
    assert_eq!(tab.values()[0][0], Some(CellValue::String("3".into())));

    // Sub-range fetches take the same projections
    let rng = GridRange::from_a1(0, "A1:B2").unwrap();
    tab.get_range_data_with(rng, ValueProjection::Entered, FormatProjection::Effective)
        .unwrap();
    assert_eq!(tab.values()[0][0], Some(CellValue::Formula("=A2+A3".into())));
}

#[test]
fn range_fetches_its_own_span() {
    let conn = MockConnection::new();
    let session = Session::new("ssid", conn.clone() as Rc<dyn Connection>);

    let mut rng = Range::from_a1(&session, 0, "Sheet1!A1:B2").unwrap();
    rng.get_data().unwrap();
    assert_eq!(rng.values().len(), 2);
    assert_eq!(
        conn.calls(),
        vec![Call::GetData(
            "ssid".to_string(),
            vec!["Sheet1!A1:B2".to_string()]
        )]
    );
}

#[test]
fn range_queues_formatting_requests() {
    let conn = MockConnection::new();
    let session = Session::new("ssid", conn.clone() as Rc<dyn Connection>);

    let mut rng = Range::from_a1(&session, 7, "A1:C10").unwrap();
    rng.set_background_color(&Color::from_rgb(255, 255, 255));
    rng.apply_number_format(&NumberFormat::currency());
    assert_eq!(rng.requests().len(), 2);

    rng.commit().unwrap();
    assert_eq!(rng.requests().len(), 0);
}

#[test]
fn add_tab_rejects_duplicates() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    assert!(matches!(
        sheet.add_tab("Sheet1"),
        Err(Error::DuplicateTab(_))
    ));

    sheet.add_tab("fresh").unwrap();
    assert_eq!(
        sheet.requests()[0],
        json!({
            "addSheet": {
                "properties": {
                    "title": "fresh",
                    "gridProperties": {"rowCount": 1000, "columnCount": 26},
                }
            }
        })
    );
}

#[test]
fn tab_create_sends_its_own_properties() {
    let conn = MockConnection::new();
    let session = Session::new("ssid", conn.clone() as Rc<dyn Connection>);

    let mut tab = Tab::new(&session, 77, "scratch", 2, 100, 5);
    tab.create().unwrap();

    let batch = match conn.calls().last().cloned() {
        Some(Call::ExecuteRequests(_, reqs)) => reqs,
        other => panic!("expected batch call, got {:?}", other),
    };
    assert_eq!(
        batch[0],
        json!({
            "addSheet": {
                "properties": {
                    "title": "scratch",
                    "gridProperties": {"rowCount": 100, "columnCount": 5},
                    "sheetId": 77,
                    "index": 2,
                }
            }
        })
    );
}

#[test]
fn unknown_tab_is_an_error() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    assert!(matches!(
        sheet.write_values(&[vec![CellValue::Int(1)]], "nope", None),
        Err(Error::TabNotFound(_))
    ));
    assert!(matches!(
        sheet.get_data("nope", None),
        Err(Error::TabNotFound(_))
    ));
}

#[test]
fn detached_session_cannot_reach_the_service() {
    let session = Session::detached("ssid");
    let mut tab = Tab::new(&session, 0, "Sheet1", 0, 1000, 26);

    // Queueing works offline
    tab.insert_rows(0, 1);
    assert_eq!(tab.requests().len(), 1);

    // Network operations do not
    assert!(matches!(tab.commit(), Err(Error::NoConnection)));
    assert!(matches!(tab.get_data(), Err(Error::NoConnection)));
}

#[test]
fn write_records_emits_header_and_rows() {
    let conn = MockConnection::new();
    let mut sheet = connect(&conn);

    let mut record = indexmap::IndexMap::new();
    record.insert("city".to_string(), CellValue::from("Oslo"));
    record.insert("pop".to_string(), CellValue::Int(717_700));

    let tab = sheet.tab_mut("data").unwrap();
    tab.write_records(&[record], None).unwrap();
    let req = &tab.requests()[0];
    assert_eq!(
        req["updateCells"]["rows"][0]["values"],
        json!([
            {"userEnteredValue": {"stringValue": "city"}},
            {"userEnteredValue": {"stringValue": "pop"}},
        ])
    );
    assert_eq!(req["updateCells"]["range"]["sheetId"], json!(1234));
}
