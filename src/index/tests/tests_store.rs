#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use crate::base::FileId;
use crate::index::{FileIndex, IndexEntries, IndexKey, IndexStore};

fn entries(pairs: Vec<(&str, Vec<u32>)>) -> IndexEntries {
    pairs
        .into_iter()
        .map(|(name, offsets)| (IndexKey::by_name(name), offsets))
        .collect()
}

#[test]
fn test_replace_swaps_whole_file() {
    let store = IndexStore::new(1);
    let file = FileId::new(0);
    store.replace(file, FileIndex::new(1, entries(vec![("a", vec![1]), ("b", vec![2])])));
    let old = store.file(file).unwrap();

    let previous = store.replace(file, FileIndex::new(2, entries(vec![("c", vec![3])])));
    assert!(Arc::ptr_eq(&previous.unwrap(), &old));

    assert_eq!(store.get(file, &IndexKey::by_name("a")), Vec::<u32>::new());
    assert_eq!(store.get(file, &IndexKey::by_name("c")), vec![3]);
    // A reader holding the old snapshot still sees it whole.
    assert_eq!(old.get(&IndexKey::by_name("b")), Some(&[2][..]));
    assert_eq!(old.content_hash(), 1);
}

#[test]
fn test_files_are_sorted() {
    let store = IndexStore::new(1);
    for raw in [5, 1, 3] {
        store.replace(FileId::new(raw), FileIndex::default());
    }
    assert_eq!(
        store.files(),
        vec![FileId::new(1), FileId::new(3), FileId::new(5)]
    );
    let snapshot: Vec<_> = store.snapshot().into_iter().map(|(f, _)| f).collect();
    assert_eq!(snapshot, store.files());
}

#[test]
fn test_remove_and_clear() {
    let store = IndexStore::new(1);
    store.replace(FileId::new(0), FileIndex::default());
    store.replace(FileId::new(1), FileIndex::default());
    assert!(store.remove(FileId::new(0)).is_some());
    assert!(!store.contains(FileId::new(0)));
    assert_eq!(store.len(), 1);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_readers_and_writer() {
    let store = Arc::new(IndexStore::new(1));
    let file = FileId::new(0);
    store.replace(file, FileIndex::new(0, entries(vec![("a", vec![0]), ("b", vec![0])])));

    std::thread::scope(|scope| {
        let writer = Arc::clone(&store);
        scope.spawn(move || {
            for i in 1..200u32 {
                let index = FileIndex::new(u64::from(i), entries(vec![("a", vec![i]), ("b", vec![i])]));
                writer.replace(file, index);
            }
        });
        for _ in 0..4 {
            let reader = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..200 {
                    let index = reader.file(file).unwrap();
                    // Both keys always come from the same replace.
                    assert_eq!(
                        index.get(&IndexKey::by_name("a")),
                        index.get(&IndexKey::by_name("b"))
                    );
                }
            });
        }
    });
}
