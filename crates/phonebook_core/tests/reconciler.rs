use phonebook_core::{
    Contact, ContactDraft, ContactId, DirectoryOperation, InMemoryDirectory, ReconcileError,
    Reconciler, RemoteError,
};

fn seeded() -> InMemoryDirectory {
    InMemoryDirectory::with_contacts(vec![
        Contact::new(1_u64, "Ann", "1234567890", "a@x.com"),
        Contact::new(3_u64, "Bo", "2223334444", "bo@x.com"),
        Contact::new(6_u64, "Cy", "5556667777", "cy@x.com"),
    ])
}

fn ids(contacts: &[Contact]) -> Vec<String> {
    contacts.iter().map(|contact| contact.id.to_string()).collect()
}

#[test]
fn load_all_replaces_cache_in_server_order() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);

    let loaded = reconciler.load_all().unwrap();
    assert_eq!(ids(loaded), vec!["1", "3", "6"]);

    directory.insert_out_of_band(Contact::new(10_u64, "Dee", "n/a", "dee"));
    reconciler.load_all().unwrap();
    assert_eq!(ids(reconciler.contacts()), vec!["1", "3", "6", "10"]);
}

#[test]
fn load_failure_keeps_previous_cache() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();
    let before = reconciler.contacts().to_vec();

    directory.fail_next(DirectoryOperation::List, RemoteError::Status(500));
    let err = reconciler.load_all().unwrap_err();

    assert!(matches!(err, ReconcileError::FetchFailure(RemoteError::Status(500))));
    assert_eq!(reconciler.contacts(), before.as_slice());
}

#[test]
fn create_appends_acknowledged_record() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();

    let draft = ContactDraft::new("Eve", "9998887777", "eve@x.com");
    let saved = reconciler.save(&draft, None).unwrap();

    assert_eq!(saved.id, ContactId::from(7_u64));
    assert_eq!(reconciler.contacts().len(), 4);
    let last = reconciler.contacts().last().unwrap();
    assert_eq!(last, &Contact::new(7_u64, "Eve", "9998887777", "eve@x.com"));
    assert_eq!(
        reconciler
            .contacts()
            .iter()
            .filter(|contact| contact.id == ContactId::from(7_u64))
            .count(),
        1
    );
}

#[test]
fn update_replaces_entry_in_place() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();

    let draft = ContactDraft::new("Bo Renamed", "2223334444", "bo@y.com");
    let saved = reconciler.save(&draft, Some(&ContactId::from(3_u64))).unwrap();

    assert_eq!(reconciler.contacts().len(), 3);
    assert_eq!(reconciler.contacts()[1], saved);
    assert_eq!(reconciler.contacts()[1].name, "Bo Renamed");
    assert_eq!(ids(reconciler.contacts()), vec!["1", "3", "6"]);
}

#[test]
fn supplied_id_decides_replace_even_when_not_cached() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);

    let draft = ContactDraft::new("Ann B", "1234567890", "a@x.com");
    reconciler.save(&draft, Some(&ContactId::from(1_u64))).unwrap();

    let requests = directory.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].operation, DirectoryOperation::Replace);
    assert!(reconciler.contacts().is_empty());
}

#[test]
fn save_failure_leaves_cache_unchanged() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();
    let before = reconciler.contacts().to_vec();

    directory.fail_next(DirectoryOperation::Create, RemoteError::Status(500));
    let err = reconciler
        .save(&ContactDraft::new("Eve", "9998887777", "eve@x.com"), None)
        .unwrap_err();
    assert!(matches!(err, ReconcileError::SaveFailure(_)));
    assert_eq!(reconciler.contacts(), before.as_slice());

    directory.fail_next(
        DirectoryOperation::Replace,
        RemoteError::Transport("connection reset".to_string()),
    );
    let err = reconciler
        .save(
            &ContactDraft::new("Changed", "1234567890", "a@x.com"),
            Some(&ContactId::from(1_u64)),
        )
        .unwrap_err();
    assert!(matches!(err, ReconcileError::SaveFailure(_)));
    assert_eq!(reconciler.contacts(), before.as_slice());
}

#[test]
fn remove_drops_matching_entry() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();

    reconciler.remove(&ContactId::from(3_u64)).unwrap();

    assert_eq!(reconciler.contacts().len(), 2);
    assert!(reconciler.cache().get(&ContactId::from(3_u64)).is_none());
    assert_eq!(ids(reconciler.contacts()), vec!["1", "6"]);
}

#[test]
fn remove_last_contact_empties_cache() {
    let directory =
        InMemoryDirectory::with_contacts(vec![Contact::new(1_u64, "Ann", "1234567890", "a@x.com")]);
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();

    reconciler.remove(&ContactId::from(1_u64)).unwrap();

    assert!(reconciler.contacts().is_empty());
}

#[test]
fn remove_failure_keeps_entry() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();

    directory.fail_next(DirectoryOperation::Delete, RemoteError::Status(503));
    let err = reconciler.remove(&ContactId::from(3_u64)).unwrap_err();

    assert!(matches!(err, ReconcileError::DeleteFailure(RemoteError::Status(503))));
    assert_eq!(reconciler.contacts().len(), 3);
    assert_eq!(
        err.to_string(),
        "Error deleting contact: Failed to delete contact (HTTP 503)"
    );
}

#[test]
fn remove_uncached_id_is_cache_noop() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();
    directory.insert_out_of_band(Contact::new(42_u64, "Zed", "0000000000", "z@x.com"));

    reconciler.remove(&ContactId::from(42_u64)).unwrap();

    assert_eq!(ids(reconciler.contacts()), vec!["1", "3", "6"]);
    assert!(directory
        .records()
        .iter()
        .all(|contact| contact.id != ContactId::from(42_u64)));
}

#[test]
fn text_ids_match_numeric_cache_entries() {
    let directory = seeded();
    let mut reconciler = Reconciler::new(&directory);
    reconciler.load_all().unwrap();

    reconciler.remove(&ContactId::Text("6".to_string())).unwrap();

    assert_eq!(ids(reconciler.contacts()), vec!["1", "3"]);
}
