use eden_core::editor::{AdminEditor, EditorSettings, EventForm};
use eden_core::public::PublicSchedule;
use eden_core::storage::{
    FileStorage, MemoryStorage, PollingWatcher, SCHEDULE_KEY, Storage, StorageWatcher, TAGS_KEY,
};

fn form(title: &str, tags: &str) -> EventForm {
    EventForm {
        id: None,
        day: "Sunday".to_string(),
        time: "6:00 PM".to_string(),
        title: title.to_string(),
        description: "Closing night.".to_string(),
        tags: tags.to_string(),
    }
}

#[test]
fn test_admin_edit_reaches_public_tab() {
    let admin_storage = MemoryStorage::new();
    let public_storage = admin_storage.open_tab();
    let mut public_watcher = public_storage.subscribe();

    let mut public = PublicSchedule::new(public_storage);
    assert_eq!(public.load().len(), 3);

    let mut admin = AdminEditor::open(
        admin_storage.clone(),
        admin_storage.subscribe(),
        EditorSettings::default(),
    );
    admin.submit(form("Lantern Parade", "Outdoor")).unwrap();

    let reloaded = public_watcher
        .poll()
        .iter()
        .any(|change| public.on_change(change));
    assert!(reloaded);
    let titles: Vec<&str> = public.cards().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Emerging Voices Summit",
            "Riverlight Night Walk",
            "Family Print Lab",
            "Lantern Parade"
        ]
    );
}

#[test]
fn test_tag_rename_in_one_tab_updates_the_other() {
    let first_storage = MemoryStorage::new();
    let second_storage = first_storage.open_tab();

    let mut first = AdminEditor::open(
        first_storage.clone(),
        first_storage.subscribe(),
        EditorSettings::default(),
    );
    let mut second = AdminEditor::open(
        second_storage.clone(),
        second_storage.subscribe(),
        EditorSettings::default(),
    );
    first.reset_to_defaults();
    second.poll_storage();

    first.rename_shared_tag("Talk", "Discussion").unwrap();
    let keys: Vec<String> = second.poll_storage().into_iter().map(|c| c.key).collect();

    assert!(keys.contains(&TAGS_KEY.to_string()));
    assert!(keys.contains(&SCHEDULE_KEY.to_string()));
    assert!(second.shared_tags().iter().any(|t| t == "Discussion"));
    assert!(second.schedule()[0].has_tag("Discussion"));
    assert!(!second.schedule()[0].has_tag("Talk"));
}

#[test]
fn test_file_storage_editors_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("data"));
    let watcher = |storage: &FileStorage| {
        PollingWatcher::new(storage.clone(), &[SCHEDULE_KEY, TAGS_KEY])
    };

    let mut first = AdminEditor::open(storage.clone(), watcher(&storage), EditorSettings::default());
    let mut second = AdminEditor::open(storage.clone(), watcher(&storage), EditorSettings::default());
    // The first editor seeded the tags before the second one started watching.
    assert!(second.poll_storage().is_empty());

    first.delete("riverlight-walk").unwrap();
    assert!(first.poll_storage().is_empty());

    let changes = second.poll_storage();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].key, SCHEDULE_KEY);
    assert_eq!(second.schedule().len(), 2);

    let on_disk = storage.get_item(SCHEDULE_KEY).unwrap().unwrap();
    assert!(!on_disk.contains("riverlight-walk"));
}
