use crate::{FormatCache, Locale, ScanEnv, ScanOptions};

#[test]
fn test_same_format_is_interned_once() {
    let cache = FormatCache::new(4);
    let a = cache.get_or_compile("%Y-%m-%d");
    let b = cache.get_or_compile("%Y-%m-%d");
    assert_eq!(cache.len(), 1);
    assert_eq!(a.format(), b.format());
    drop(a);
    // still referenced by `b`: nothing parked
    assert_eq!(cache.gc_len(), 0);
    drop(b);
    assert_eq!(cache.gc_len(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_clone_retains() {
    let cache = FormatCache::new(4);
    let a = cache.get_or_compile("%H:%M");
    let b = a.clone();
    drop(a);
    assert_eq!(cache.gc_len(), 0);
    drop(b);
    assert_eq!(cache.gc_len(), 1);
}

#[test]
fn test_revive_from_gc() {
    let cache = FormatCache::new(4);
    drop(cache.get_or_compile("%H:%M"));
    assert_eq!(cache.gc_len(), 1);
    let handle = cache.get_or_compile("%H:%M");
    assert_eq!(cache.gc_len(), 0);
    assert_eq!(cache.len(), 1);
    drop(handle);
}

#[test]
fn test_gc_capacity_bound_and_lifo_eviction() {
    let cache = FormatCache::new(2);
    drop(cache.get_or_compile("%a"));
    drop(cache.get_or_compile("%b"));
    drop(cache.get_or_compile("%d"));
    // the oldest unreferenced entry was evicted
    assert_eq!(cache.gc_len(), 2);
    assert_eq!(cache.len(), 2);
    // and the younger two revive without growing the map
    drop(cache.get_or_compile("%b"));
    drop(cache.get_or_compile("%d"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_zero_capacity_frees_immediately() {
    let cache = FormatCache::new(0);
    drop(cache.get_or_compile("%Y"));
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.gc_len(), 0);
}

#[test]
fn test_gc_never_exceeds_capacity() {
    let cache = FormatCache::new(3);
    for i in 0..16 {
        let format = format!("%Y+{i}");
        drop(cache.get_or_compile(&format));
        assert!(cache.gc_len() <= 3);
    }
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_clear_drops_parked_entries_only() {
    let cache = FormatCache::new(4);
    let live = cache.get_or_compile("%Y");
    drop(cache.get_or_compile("%m"));
    drop(cache.get_or_compile("%d"));
    cache.clear();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.gc_len(), 0);
    drop(live);
    assert_eq!(cache.gc_len(), 1);
}

#[test]
fn test_compiled_handle_scans() {
    let cache = FormatCache::new(4);
    let handle = cache.get_or_compile("%Y-%m-%d");
    let locale = Locale::english();
    let env = ScanEnv::new(&locale);
    let date = handle
        .scan("2023-01-17", &ScanOptions::default(), &env)
        .unwrap();
    assert_eq!(date.year, 2023);
    // a handle revived from the GC scans identically
    drop(handle);
    let revived = cache.get_or_compile("%Y-%m-%d");
    let date = revived
        .scan("1999-12-31", &ScanOptions::default(), &env)
        .unwrap();
    assert_eq!((date.year, date.month, date.day_of_month), (1999, 12, 31));
}

#[test]
fn test_mandatory_space_count_exposed() {
    let cache = FormatCache::new(4);
    assert_eq!(cache.get_or_compile("%d %b %Y").mandatory_space_count(), 2);
    assert_eq!(cache.get_or_compile("%d-%b-%Y").mandatory_space_count(), 0);
}

#[test]
fn test_global_cache_scans() {
    // other tests share the global cache, so only behavior is asserted
    let a = crate::scan(
        "%Y|%m",
        "2023|06",
        &ScanOptions::default(),
        &ScanEnv::new(&Locale::english()),
    )
    .unwrap();
    assert_eq!(a.month, 6);
    let b = crate::scan(
        "%Y|%m",
        "2024|07",
        &ScanOptions::default(),
        &ScanEnv::new(&Locale::english()),
    )
    .unwrap();
    assert_eq!((b.year, b.month), (2024, 7));
    assert!(FormatCache::global().len() >= 1);
}

#[test]
fn test_shared_across_threads() {
    let cache = FormatCache::new(8);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = std::sync::Arc::clone(&cache);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let handle = cache.get_or_compile("%Y-%m-%dT%H:%M:%S");
                    let locale = Locale::english();
                    let env = ScanEnv::new(&locale);
                    let date = handle
                        .scan("2023-01-17T08:30:00", &ScanOptions::default(), &env)
                        .unwrap();
                    assert_eq!(date.hour, 8);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.gc_len(), 1);
}
