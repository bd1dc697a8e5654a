// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Refresh, property and setting tests against an in-memory API.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use petfeed_lib::api::{PetlibroApi, SettingCommand};
use petfeed_lib::state::section::{BASE_INFO, GRAIN_STATUS, REAL_INFO};
use petfeed_lib::{
    AnyFeeder, DeviceError, DoorPosition, Error, Feeder, FeederModel, GranaryFeeder,
    OneRfidPetFeeder, OneRfidSmartFeeder, ParseError, Payload, ProtocolError, RefreshPhase,
};
use serde_json::{Value, json};

const SERIAL: &str = "AF0301000000001";

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// In-memory API recording every call.
#[derive(Debug, Default)]
struct FakeApi {
    sections: Mutex<HashMap<&'static str, Option<Payload>>>,
    failing: Mutex<Option<&'static str>>,
    calls: Mutex<Vec<String>>,
    settings: Mutex<Vec<(String, SettingCommand)>>,
}

impl FakeApi {
    fn with_section(self, name: &'static str, data: Value) -> Self {
        self.sections.lock().insert(name, Some(payload(data)));
        self
    }

    fn set_section(&self, name: &'static str, data: Option<Value>) {
        self.sections.lock().insert(name, data.map(payload));
    }

    fn fail_on(&self, name: &'static str) {
        *self.failing.lock() = Some(name);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn fetch(&self, name: &'static str) -> Result<Option<Payload>, ProtocolError> {
        self.calls.lock().push(name.to_string());
        if *self.failing.lock() == Some(name) {
            return Err(ProtocolError::Status {
                status: 502,
                reason: "Bad Gateway".to_string(),
            });
        }
        Ok(self.sections.lock().get(name).cloned().flatten())
    }
}

impl PetlibroApi for FakeApi {
    async fn device_base_info(&self, _serial: &str) -> Result<Option<Payload>, ProtocolError> {
        self.fetch(BASE_INFO)
    }

    async fn device_grain_status(&self, _serial: &str) -> Result<Option<Payload>, ProtocolError> {
        self.fetch(GRAIN_STATUS)
    }

    async fn device_real_info(&self, _serial: &str) -> Result<Option<Payload>, ProtocolError> {
        self.fetch(REAL_INFO)
    }

    async fn send_setting(
        &self,
        serial: &str,
        command: &SettingCommand,
    ) -> Result<(), ProtocolError> {
        self.settings
            .lock()
            .push((serial.to_string(), *command));
        Ok(())
    }
}

fn smart_feeder_api() -> FakeApi {
    FakeApi::default()
        .with_section(BASE_INFO, json!({"mac": "AA:BB:CC:DD:EE:FF", "hardwareVersion": "2.0"}))
        .with_section(
            GRAIN_STATUS,
            json!({
                "todayFeedingQuantity": 9,
                "todayFeedingQuantities": [3, 3, 3],
                "todayFeedingTimes": 3,
                "todayEatingTimes": 4,
                "eatingTime": "5'30''"
            }),
        )
        .with_section(
            REAL_INFO,
            json!({
                "online": true,
                "batteryState": "high",
                "barnDoorState": false,
                "grainOutletState": true,
                "surplusGrain": false,
                "runningState": "RUNNING",
                "wifiRssi": -48
            }),
        )
}

// ============================================================================
// Defaults
// ============================================================================

mod defaults {
    use super::*;

    #[test]
    fn pet_feeder_before_refresh() {
        let feeder = OneRfidPetFeeder::new(SERIAL, Arc::new(FakeApi::default()));

        assert_eq!(feeder.refresh_phase(), RefreshPhase::Uninitialized);
        assert!(feeder.state().is_empty());
        assert_eq!(feeder.name(), "");
        assert_eq!(feeder.mac(), "");
        assert!(!feeder.online());
        assert_eq!(feeder.unit_type(), 1);
        assert_eq!(feeder.today_feeding_times(), 0);
        assert_eq!(feeder.today_eating_times(), 0);
        assert_eq!(feeder.today_eating_time(), 0);
        assert_eq!(feeder.battery_state(), "unknown");
        assert_eq!(feeder.door_state(), DoorPosition::Unknown);
        assert_eq!(feeder.remaining_desiccant(), "unknown");
        assert!(feeder.today_feeding_quantity().abs() < f64::EPSILON);
    }

    #[test]
    fn smart_feeder_before_refresh() {
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::new(FakeApi::default()));

        assert!(feeder.food_low());
        assert!(!feeder.food_dispenser_state());
        assert!(!feeder.door_state());
        assert_eq!(feeder.door_error_state(), "NORMAL");
        assert_eq!(feeder.battery_display_type(), "percentage");
        assert!(!feeder.running_state());
        assert!(feeder.today_feeding_quantities().is_empty());
    }
}

// ============================================================================
// Refresh
// ============================================================================

mod refresh {
    use super::*;

    #[tokio::test]
    async fn populates_properties() {
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::new(smart_feeder_api()));
        feeder.refresh().await.unwrap();

        assert_eq!(feeder.refresh_phase(), RefreshPhase::Populated);
        assert_eq!(feeder.mac(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(feeder.hardware_version(), "2.0");
        assert!(feeder.online());
        assert_eq!(feeder.battery_state(), "high");
        assert_eq!(feeder.today_feeding_times(), 3);
        assert_eq!(feeder.today_eating_times(), 4);
        assert_eq!(feeder.today_eating_time(), 330);
        assert_eq!(feeder.today_feeding_quantities(), vec![3, 3, 3]);
        assert!((feeder.today_feeding_quantity() - 9.0).abs() < f64::EPSILON);
        assert!(feeder.food_low());
        assert!(!feeder.food_dispenser_state());
        assert!(feeder.running_state());
        assert_eq!(feeder.wifi_rssi(), -48);
    }

    #[tokio::test]
    async fn base_info_is_merged_first() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidPetFeeder::new(SERIAL, Arc::clone(&api));
        feeder.refresh().await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], BASE_INFO);
        assert!(calls[1..].contains(&GRAIN_STATUS.to_string()));
        assert!(calls[1..].contains(&REAL_INFO.to_string()));
    }

    #[tokio::test]
    async fn each_refresh_is_one_revision_per_merge() {
        let feeder = OneRfidPetFeeder::new(SERIAL, Arc::new(smart_feeder_api()));

        feeder.refresh().await.unwrap();
        let first = feeder.state();
        feeder.refresh().await.unwrap();
        let second = feeder.state();

        // Base merge plus the model's merge.
        assert_eq!(first.revision(), 2);
        assert_eq!(second.revision(), 4);
        assert_eq!(first.sections(), second.sections());
    }

    #[tokio::test]
    async fn identical_responses_give_identical_properties() {
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::new(smart_feeder_api()));

        feeder.refresh().await.unwrap();
        let first = (
            feeder.today_eating_time(),
            feeder.food_low(),
            feeder.battery_state(),
            feeder.today_feeding_quantities(),
        );
        feeder.refresh().await.unwrap();
        let second = (
            feeder.today_eating_time(),
            feeder.food_low(),
            feeder.battery_state(),
            feeder.today_feeding_quantities(),
        );

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_section_replaces_previous_data() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::clone(&api));
        feeder.refresh().await.unwrap();
        assert_eq!(feeder.battery_state(), "high");

        api.set_section(REAL_INFO, Some(json!({})));
        feeder.refresh().await.unwrap();

        assert_eq!(feeder.battery_state(), "unknown");
        assert!(!feeder.online());
    }

    #[tokio::test]
    async fn missing_section_is_stored_empty() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::clone(&api));
        feeder.refresh().await.unwrap();

        api.set_section(GRAIN_STATUS, None);
        feeder.refresh().await.unwrap();

        let state = feeder.state();
        assert!(state.section(GRAIN_STATUS).is_some_and(|s| s.is_empty()));
        assert_eq!(feeder.today_eating_time(), 0);
        assert!(feeder.today_feeding_quantities().is_empty());
    }

    #[tokio::test]
    async fn later_merge_wins() {
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::new(smart_feeder_api()));
        feeder.refresh().await.unwrap();

        feeder.core().update([
            (REAL_INFO, Some(payload(json!({"batteryState": "low"})))),
            (REAL_INFO, Some(payload(json!({"batteryState": "medium"})))),
        ]);

        assert_eq!(feeder.battery_state(), "medium");
    }

    #[tokio::test]
    async fn model_fetch_replaces_earlier_merge_of_same_section() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::clone(&api));
        feeder.core().update([(
            REAL_INFO,
            Some(payload(json!({"batteryState": "low", "doorErrorState": "BLOCKED"}))),
        )]);
        assert_eq!(feeder.battery_state(), "low");

        feeder.refresh().await.unwrap();

        assert_eq!(feeder.battery_state(), "high");
        // Replaced wholesale: keys missing from the fetch are gone.
        assert_eq!(feeder.door_error_state(), "NORMAL");
        let fetched = api.sections.lock()[REAL_INFO].clone();
        assert_eq!(feeder.state().section(REAL_INFO), fetched.as_ref());
    }

    #[tokio::test]
    async fn failure_propagates_and_restores_phase() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::clone(&api));

        api.fail_on(REAL_INFO);
        let err = feeder.refresh().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::Status { status: 502, .. })
        ));
        assert_eq!(feeder.refresh_phase(), RefreshPhase::Uninitialized);
        // The base merge completed before the failing fetch.
        assert_eq!(feeder.mac(), "AA:BB:CC:DD:EE:FF");
        assert!(feeder.state().section(REAL_INFO).is_none());
    }

    #[tokio::test]
    async fn failure_after_success_keeps_populated() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::clone(&api));
        feeder.refresh().await.unwrap();

        api.fail_on(BASE_INFO);
        assert!(feeder.refresh().await.is_err());

        assert_eq!(feeder.refresh_phase(), RefreshPhase::Populated);
        assert_eq!(feeder.battery_state(), "high");
    }
}

// ============================================================================
// Pet feeder
// ============================================================================

mod pet_feeder {
    use super::*;

    #[tokio::test]
    async fn quantity_follows_unit_type() {
        let api = Arc::new(
            FakeApi::default()
                .with_section(GRAIN_STATUS, json!({"todayFeedingQuantity": 6}))
                .with_section(REAL_INFO, json!({"unitType": 2, "coverClosePosition": 4})),
        );
        let feeder = OneRfidPetFeeder::new(SERIAL, Arc::clone(&api));
        feeder.refresh().await.unwrap();

        assert!((feeder.today_feeding_quantity() - 2.1).abs() < 1e-9);
        assert_eq!(feeder.door_state(), DoorPosition::Closed);
        assert_eq!(feeder.door_state().to_string(), "Closed");

        api.set_section(REAL_INFO, Some(json!({"unitType": 4, "coverClosePosition": 1})));
        feeder.refresh().await.unwrap();

        assert!((feeder.today_feeding_quantity() - 120.0).abs() < 1e-9);
        assert_eq!(feeder.door_state(), DoorPosition::Open);
    }

    #[tokio::test]
    async fn unknown_unit_falls_back_to_cups() {
        let api = Arc::new(
            FakeApi::default()
                .with_section(GRAIN_STATUS, json!({"todayFeedingQuantity": 6}))
                .with_section(REAL_INFO, json!({"unitType": 9})),
        );
        let feeder = OneRfidPetFeeder::new(SERIAL, api);
        feeder.refresh().await.unwrap();

        assert!((feeder.today_feeding_quantity() - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn malformed_eating_time_is_zero() {
        for raw in ["", "5'", "abc'10''", "1'2'3''", "-1'30''"] {
            let api = Arc::new(
                FakeApi::default().with_section(GRAIN_STATUS, json!({"eatingTime": raw})),
            );
            let feeder = OneRfidPetFeeder::new(SERIAL, api);
            feeder.refresh().await.unwrap();

            assert_eq!(feeder.today_eating_time(), 0, "{raw:?}");
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

mod settings {
    use super::*;

    #[tokio::test]
    async fn forwarded_verbatim_without_touching_state() {
        let api = Arc::new(smart_feeder_api());
        let feeder = OneRfidSmartFeeder::new(SERIAL, Arc::clone(&api));
        feeder.refresh().await.unwrap();
        let before = feeder.state();

        feeder.set_feeding_plan(true).await.unwrap();
        feeder.set_child_lock(false).await.unwrap();
        feeder.set_light_enable(true).await.unwrap();
        feeder.set_light_switch(false).await.unwrap();
        feeder.set_sound_enable(true).await.unwrap();
        feeder.set_sound_switch(false).await.unwrap();

        assert_eq!(
            *api.settings.lock(),
            vec![
                (SERIAL.to_string(), SettingCommand::FeedingPlan(true)),
                (SERIAL.to_string(), SettingCommand::ChildLock(false)),
                (SERIAL.to_string(), SettingCommand::LightEnable(true)),
                (SERIAL.to_string(), SettingCommand::LightSwitch(false)),
                (SERIAL.to_string(), SettingCommand::SoundEnable(true)),
                (SERIAL.to_string(), SettingCommand::SoundSwitch(false)),
            ]
        );
        assert_eq!(feeder.state(), before);
    }
}

// ============================================================================
// Device listing
// ============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn builds_pet_feeder() {
        let listing = payload(json!({
            "deviceSn": SERIAL,
            "productName": "One RFID Pet Feeder",
            "name": "Hallway",
            "remainingDesiccantDays": 12
        }));

        let feeder = AnyFeeder::from_listing(listing, Arc::new(smart_feeder_api())).unwrap();
        feeder.refresh().await.unwrap();

        assert_eq!(feeder.model(), FeederModel::OneRfidPetFeeder);
        assert_eq!(feeder.name(), "Hallway");
        assert_eq!(feeder.product_name(), "One RFID Pet Feeder");
        assert!(feeder.as_granary().is_none());
        assert!(!feeder.capabilities().has_controls());
        let pet_feeder = feeder.as_pet_feeder().unwrap();
        assert_eq!(pet_feeder.remaining_desiccant(), "12");
    }

    #[test]
    fn unsupported_model() {
        let listing = payload(json!({
            "deviceSn": SERIAL,
            "productName": "Dockstream Smart Fountain"
        }));

        let err = AnyFeeder::from_listing(listing, Arc::new(FakeApi::default())).unwrap_err();

        assert!(matches!(
            err,
            Error::Device(DeviceError::UnsupportedModel(ref name)) if name == "Dockstream Smart Fountain"
        ));
    }

    #[test]
    fn missing_serial() {
        let listing = payload(json!({"productName": "One RFID Smart Feeder"}));

        let err = AnyFeeder::from_listing(listing, Arc::new(FakeApi::default())).unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
    }
}
