//! In-memory stand-ins for the upstream services, shared by tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::directory::{DirectoryError, DirectoryLookup};
use crate::domain::StationRecord;
use crate::geo::GeoError;
use crate::policy::{TranslateError, Translator};

use super::{Geolocator, StationDirectory};

pub const UUID: &str = "123e4567-e89b-12d3-a456-426614174000";

pub fn station(uuid: &str, name: &str, codec: &str, url: &str) -> StationRecord {
    StationRecord {
        uuid: uuid.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        homepage: format!("https://{uuid}.example"),
        country: "Sweden".to_string(),
        codec: codec.to_string(),
        attributes: vec![
            ("name".to_string(), name.to_string()),
            ("codec".to_string(), codec.to_string()),
        ],
    }
}

pub fn mp3(uuid: &str) -> StationRecord {
    station(uuid, &format!("Station {uuid}"), "MP3", "https://stream.example/live")
}

pub enum Reply {
    Stations(Vec<StationRecord>),
    Status(u16),
}

/// Directory that answers every lookup the same way and records calls.
pub struct FakeDirectory {
    reply: Reply,
    lookups: Mutex<Vec<DirectoryLookup>>,
}

impl FakeDirectory {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            lookups: Mutex::new(Vec::new()),
        })
    }

    pub fn lookups(&self) -> Vec<DirectoryLookup> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl StationDirectory for FakeDirectory {
    async fn stations(&self, lookup: DirectoryLookup) -> Result<Vec<StationRecord>, DirectoryError> {
        self.lookups.lock().unwrap().push(lookup);
        match &self.reply {
            Reply::Stations(stations) => Ok(stations.clone()),
            Reply::Status(status) => Err(DirectoryError::Api {
                status: *status,
                message: "upstream says no".into(),
            }),
        }
    }
}

/// Geolocator with a fixed answer.
pub struct FakeGeo {
    city: Option<&'static str>,
    pub addresses: Mutex<Vec<String>>,
}

impl FakeGeo {
    pub fn new(city: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            city,
            addresses: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Geolocator for FakeGeo {
    async fn city(&self, address: &str) -> Result<String, GeoError> {
        self.addresses.lock().unwrap().push(address.to_string());
        self.city.map(str::to_string).ok_or(GeoError::Api {
            status: 503,
            message: "down".into(),
        })
    }
}

/// Translator backed by a dictionary; unknown text passes through.
pub struct FakeTranslator {
    dict: HashMap<&'static str, &'static str>,
    fail: bool,
    calls: Mutex<usize>,
}

impl FakeTranslator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            dict: HashMap::from([("Radio Scheisse", "Radio Shit"), ("merde", "shit")]),
            fail: false,
            calls: Mutex::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            dict: HashMap::new(),
            fail: true,
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(TranslateError::Api {
                status: 500,
                message: "down".into(),
            });
        }
        Ok(self.dict.get(text).copied().unwrap_or(text).to_string())
    }
}
