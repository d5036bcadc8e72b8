//! Single-writer, many-reader scenario over `ConcurrentTreeMap`.

use std::thread;

use balanced_trees::ConcurrentTreeMap;

#[test]
fn single_writer_many_readers_converge() {
    const N: u64 = 150_000;
    let map: ConcurrentTreeMap<u64, u64> = ConcurrentTreeMap::with_order(32).unwrap();

    let writer_map = map.clone();
    let writer = thread::spawn(move || {
        for k in 0..N {
            writer_map.put(k, k * 2);
        }
    });

    let mut readers = Vec::new();
    for _ in 0..4 {
        let reader_map = map.clone();
        readers.push(thread::spawn(move || {
            // Every entry a reader observes must be internally consistent
            // (value == key * 2); readers may see a partial tree while the
            // writer is still running.
            for _ in 0..50 {
                for (k, v) in reader_map.get_all() {
                    assert_eq!(v, k * 2);
                }
            }
        }));
    }

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    assert_eq!(map.size(), N as usize);
    for k in 0..N {
        assert_eq!(map.get(&k), Some(k * 2));
    }
}

#[test]
fn range_iterator_is_weakly_consistent_under_concurrent_writes() {
    let map: ConcurrentTreeMap<u64, u64> = ConcurrentTreeMap::new();
    for k in 0..1000u64 {
        map.put(k, k);
    }

    let writer_map = map.clone();
    let writer = thread::spawn(move || {
        for k in 1000..2000u64 {
            writer_map.put(k, k);
        }
    });

    // A value present for the whole scan must appear exactly once.
    let mut seen = std::collections::HashSet::new();
    for (k, _) in map.range(Some(0), Some(1000)).unwrap() {
        assert!(seen.insert(k), "key {k} observed twice in one range scan");
    }
    assert!(seen.len() <= 1000);

    writer.join().unwrap();
    assert_eq!(map.size(), 2000);
}

#[test]
fn clear_resets_to_empty() {
    let map: ConcurrentTreeMap<u64, u64> = ConcurrentTreeMap::new();
    for k in 0..10u64 {
        map.put(k, k);
    }
    map.clear();
    assert_eq!(map.size(), 0);
    assert!(map.is_empty());
}
