use mimic_model::{Catalog, Sequence};
use mimic_store::prelude::*;
use mimic_store::STORAGE_KEY;

fn catalog_sequence() -> Sequence {
    let catalog = Catalog::builtin();
    let mut sequence = Sequence::new();
    sequence.push_item(catalog.get("api-2").unwrap());
    sequence.push_delay(500);
    sequence.push_item(catalog.get("pay-1").unwrap());
    sequence
}

#[test]
fn test_flows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let mut repo = FlowRepository::open(FileStore::new(dir.path()));
        repo.save("nightly", catalog_sequence().steps()).unwrap()
    };

    let repo = FlowRepository::open(FileStore::new(dir.path()));
    assert_eq!(repo.list(), &[saved.clone()]);

    let sequence = repo.load_sequence(&saved.id).unwrap();
    assert_eq!(sequence.len(), 3);
}

#[test]
fn test_single_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested"));
    let path = store.path_for(STORAGE_KEY);

    let mut repo = FlowRepository::open(store);
    repo.save("one", catalog_sequence().steps()).unwrap();
    repo.save("two", catalog_sequence().steps()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let flows: Vec<SavedFlow> = serde_json::from_str(&raw).unwrap();
    assert_eq!(flows.len(), 2);

    let entries = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_missing_directory_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FlowRepository::open(FileStore::new(dir.path().join("absent")));
    assert!(repo.list().is_empty());
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for(STORAGE_KEY), "[{\"id\": 1").unwrap();

    let mut repo = FlowRepository::open(store);
    assert!(repo.list().is_empty());

    // the next save rewrites the file with valid content
    repo.save("fresh", catalog_sequence().steps()).unwrap();
    let reopened = FlowRepository::open(FileStore::new(dir.path()));
    assert_eq!(reopened.list().len(), 1);
}
