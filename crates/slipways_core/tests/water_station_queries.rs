mod common;

use common::{Behavior, FakeStore, Level, RecordingLog};
use slipways_core::model::station::Station;
use slipways_core::model::water::{Water, WaterDto};
use slipways_core::model::RecordMeta;
use slipways_core::service::codes::{ID_MISMATCH, UNEXPECTED_FAULT, VALIDATION_FAILED, WRITE_DECLINED};
use slipways_core::{CancelSignal, Outcome, StationService, WaterService};
use uuid::Uuid;

fn water(longname: &str) -> Water {
    Water {
        meta: RecordMeta::persisted(Uuid::new_v4(), 1_700_000_000_000, None),
        longname: longname.to_string(),
        shortname: None,
    }
}

fn station(longname: &str) -> Station {
    Station {
        meta: RecordMeta::persisted(Uuid::new_v4(), 1_700_000_000_000, None),
        longname: longname.to_string(),
        shortname: None,
        water_fk: None,
    }
}

#[test]
fn waters_are_listed_by_longname() {
    let store = FakeStore::with_rows(
        Behavior::Persist,
        vec![water("Weser"), water("Donau"), water("Main")],
    );
    let log = RecordingLog::default();

    let names = WaterService::new(&store, &log)
        .list(&CancelSignal::new())
        .success()
        .unwrap()
        .into_iter()
        .map(|water| water.longname)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["Donau", "Main", "Weser"]);
}

#[test]
fn water_get_returns_none_for_unknown_id() {
    let stored = water("Elbe");
    let id = stored.meta.id.unwrap();
    let store = FakeStore::with_rows(Behavior::Persist, vec![stored]);
    let log = RecordingLog::default();
    let service = WaterService::new(&store, &log);

    let found = service.get(id, &CancelSignal::new()).success().unwrap();
    assert_eq!(found.map(|water| water.longname).as_deref(), Some("Elbe"));
    let missing = service.get(Uuid::new_v4(), &CancelSignal::new()).success().unwrap();
    assert!(missing.is_none());
    assert!(log.is_empty());
}

#[test]
fn water_put_with_mismatched_id_is_rejected() {
    let stored = water("Elbe");
    let id = stored.meta.id.unwrap();
    let store = FakeStore::with_rows(Behavior::Persist, vec![stored]);
    let log = RecordingLog::default();
    let mut request = WaterDto::new("Oberelbe");
    request.meta.id = Some(Uuid::new_v4());

    let outcome = WaterService::new(&store, &log).put(id, Some(request), &CancelSignal::new());

    assert!(matches!(&outcome, Outcome::BadRequest(reason) if reason == "IDs are not the same"));
    assert_eq!(store.calls.get(), 0);
    assert_eq!(log.at(Level::Warn)[0].code, Some(ID_MISMATCH));
}

#[test]
fn water_put_replaces_names_and_stamps_updated() {
    let stored = water("Elbe");
    let id = stored.meta.id.unwrap();
    let store = FakeStore::with_rows(Behavior::Persist, vec![stored]);
    let log = RecordingLog::default();
    let mut request = WaterDto::new("Oberelbe");
    request.meta.id = Some(id);
    request.shortname = Some("OE".to_string());

    let dto = WaterService::new(&store, &log)
        .put(id, Some(request), &CancelSignal::new())
        .success()
        .unwrap();

    assert_eq!(dto.longname, "Oberelbe");
    assert_eq!(dto.shortname.as_deref(), Some("OE"));
    assert_eq!(dto.meta.created, Some(1_700_000_000_000));
    assert!(dto.meta.updated.is_some());
}

#[test]
fn water_put_on_unknown_id_is_declined() {
    let store = FakeStore::<Water>::new(Behavior::Persist);
    let log = RecordingLog::default();
    let id = Uuid::new_v4();
    let mut request = WaterDto::new("Havel");
    request.meta.id = Some(id);

    let outcome = WaterService::new(&store, &log).put(id, Some(request), &CancelSignal::new());

    assert_eq!(outcome.code(), Some(WRITE_DECLINED));
    assert_eq!(log.at(Level::Error).len(), 1);
}

#[test]
fn water_delete_validates_and_echoes_row() {
    let stored = water("Saale");
    let id = stored.meta.id.unwrap();
    let store = FakeStore::with_rows(Behavior::Persist, vec![stored]);
    let log = RecordingLog::default();
    let service = WaterService::new(&store, &log);

    let rejected = service.delete(Uuid::nil(), &CancelSignal::new());
    assert!(matches!(&rejected, Outcome::BadRequest(reason) if reason == "Id is incorrect"));
    assert_eq!(log.at(Level::Warn)[0].code, Some(VALIDATION_FAILED));

    let removed = service.delete(id, &CancelSignal::new()).success().unwrap();
    assert_eq!(removed.longname, "Saale");
    assert!(store.rows.borrow().is_empty());

    let again = service.delete(id, &CancelSignal::new());
    assert_eq!(again.code(), Some(WRITE_DECLINED));
}

#[test]
fn stations_are_listed_by_longname_and_faults_are_fatal() {
    let store = FakeStore::with_rows(
        Behavior::Persist,
        vec![station("Worms"), station("Andernach"), station("Kaub")],
    );
    let log = RecordingLog::default();
    let service = StationService::new(&store, &log);

    let names = service
        .list(&CancelSignal::new())
        .success()
        .unwrap()
        .into_iter()
        .map(|station| station.longname)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Andernach", "Kaub", "Worms"]);

    store.behavior.set(Behavior::Fault);
    let outcome = service.get(Uuid::new_v4(), &CancelSignal::new());
    assert!(matches!(&outcome, Outcome::Fatal { code: UNEXPECTED_FAULT, .. }));
    assert_eq!(log.at(Level::Error).len(), 1);
}
