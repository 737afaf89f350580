#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use separador_core::storage::JsonFileStore;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a file-backed store in a unique directory for each test.
pub fn temp_store() -> JsonFileStore {
    let temp = TempDir::new().expect("create temp dir");
    let store = JsonFileStore::in_dir(temp.path(), "state.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    store
}

pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
}

/// Document shape written by the first public release: no allocations,
/// commitments or ledger yet.
pub const FIRST_GENERATION_DOCUMENT: &str = r#"{
  "currentView": "DASHBOARD",
  "isSetupComplete": true,
  "userProfile": {
    "companyType": "PJ_SIMPLES",
    "monthlyRevenue": 12000,
    "salaryMethod": "FIXED",
    "salaryValue": 4000,
    "taxRate": 8
  }
}"#;

/// Document written once allocations and commitments existed but before the ledger.
pub const THIRD_GENERATION_DOCUMENT: &str = r#"{
  "currentView": "SETTINGS",
  "isSetupComplete": true,
  "userProfile": {
    "companyType": "MEI",
    "meiCategory": "TRUCKER",
    "monthlyRevenue": 7000,
    "salaryMethod": "PROFIT",
    "salaryValue": 0,
    "taxRate": 6,
    "appLevel": 3,
    "allocations": {
      "reserve": { "enabled": true, "type": "PERCENTAGE", "value": 10 },
      "growth": { "enabled": true, "type": "FIXED", "value": 250 }
    },
    "currentReserveBalance": 3200,
    "commitments": [
      { "id": "1735689600000", "name": "Seguro do caminhão", "type": "OBLIGATION", "value": 450 }
    ]
  }
}"#;
