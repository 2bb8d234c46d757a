//! Process-wide intern cache for compiled scan formats.
//!
//! Compiling a format string is much more expensive than scanning with it,
//! so compiled programs are shared across every user of the same format.
//! Entries are reference counted through [`CompiledFormat`] handles; an
//! entry whose last handle is dropped is not freed immediately but parked
//! in a bounded LIFO, so hot formats tend to survive and very recent
//! zero-reference entries are reused first.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::date::DateFields;
use crate::scan;
use crate::scan::compile::{compile, ScanProgram};
use crate::scan::{ScanEnv, ScanOptions};
use crate::ScanError;

/// Default number of unreferenced compiled formats kept for reuse.
pub const DEFAULT_GC_CAPACITY: usize = 32;

static GLOBAL: Lazy<Arc<FormatCache>> =
    Lazy::new(|| FormatCache::new(DEFAULT_GC_CAPACITY));

struct Entry {
    program: Arc<ScanProgram>,
    /// Outstanding handles; guarded by the cache lock.
    refs: u32,
}

#[derive(Default)]
struct Inner {
    map: HashMap<Box<str>, Entry>,
    /// Formats with no outstanding handle, newest first.
    gc: VecDeque<Box<str>>,
}

/// Intern cache mapping format strings to compiled scan programs.
///
/// A single lock serializes lookups, releases and garbage collection,
/// including every entry's reference count. Every entry is either
/// referenced (count above zero, not parked) or unreferenced (count zero,
/// parked exactly once in the GC LIFO); the LIFO never holds more than the
/// configured capacity, evicting its oldest entry when it would.
pub struct FormatCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl FormatCache {
    /// Construct a cache keeping at most `capacity` unreferenced entries.
    ///
    /// A capacity of zero frees entries as soon as their last handle drops.
    #[must_use]
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// The process-default cache.
    #[must_use]
    pub fn global() -> &'static Arc<FormatCache> {
        &GLOBAL
    }

    /// Fetch the compiled program for `format`, compiling it on first use.
    ///
    /// A hit on an unreferenced entry revives it out of the GC LIFO.
    #[must_use]
    pub fn get_or_compile(self: &Arc<Self>, format: &str) -> CompiledFormat {
        let mut guard = self.inner.lock();
        let Inner { map, gc } = &mut *guard;
        if let Some(entry) = map.get_mut(format) {
            if entry.refs == 0 {
                if let Some(at) = gc.iter().position(|key| &**key == format) {
                    gc.remove(at);
                }
            }
            entry.refs += 1;
            return CompiledFormat {
                cache: Arc::clone(self),
                program: Arc::clone(&entry.program),
            };
        }
        let program = Arc::new(compile(format));
        map.insert(
            Box::from(format),
            Entry {
                program: Arc::clone(&program),
                refs: 1,
            },
        );
        CompiledFormat {
            cache: Arc::clone(self),
            program,
        }
    }

    /// Number of interned formats, referenced or parked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    /// Whether the cache holds no formats at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of unreferenced formats parked for reuse.
    #[must_use]
    pub fn gc_len(&self) -> usize {
        self.inner.lock().gc.len()
    }

    /// Drop every unreferenced entry. Referenced entries stay interned.
    pub fn clear(&self) {
        let mut guard = self.inner.lock();
        let Inner { map, gc } = &mut *guard;
        while let Some(key) = gc.pop_front() {
            map.remove(&key);
        }
    }

    fn retain(&self, format: &str) {
        let mut guard = self.inner.lock();
        let Inner { map, gc } = &mut *guard;
        if let Some(entry) = map.get_mut(format) {
            if entry.refs == 0 {
                if let Some(at) = gc.iter().position(|key| &**key == format) {
                    gc.remove(at);
                }
            }
            entry.refs += 1;
        }
    }

    fn release(&self, format: &str) {
        let mut guard = self.inner.lock();
        let Inner { map, gc } = &mut *guard;
        let Some(entry) = map.get_mut(format) else {
            return;
        };
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs > 0 {
            return;
        }
        // park rather than free; may be reused shortly
        gc.push_front(Box::from(format));
        if gc.len() > self.capacity {
            if let Some(oldest) = gc.pop_back() {
                map.remove(&oldest);
            }
        }
    }
}

impl fmt::Debug for FormatCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        f.debug_struct("FormatCache")
            .field("capacity", &self.capacity)
            .field("len", &guard.map.len())
            .field("gc_len", &guard.gc.len())
            .finish()
    }
}

/// Reference-counted handle on an interned compiled format.
///
/// Cloning retains the cache entry, dropping releases it; the entry itself
/// outlives its handles inside the cache's GC LIFO.
pub struct CompiledFormat {
    cache: Arc<FormatCache>,
    program: Arc<ScanProgram>,
}

impl CompiledFormat {
    /// The format string this program was compiled from.
    #[must_use]
    pub fn format(&self) -> &str {
        self.program.format()
    }

    /// Number of mandatory space tokens in the format.
    #[must_use]
    pub fn mandatory_space_count(&self) -> u32 {
        self.program.mandatory_space_count()
    }

    /// Scan `input` with this compiled format.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] when the input does not match the format, a
    /// number overflows, a weekday is out of range, a locale list is
    /// missing, or a time zone designator cannot be bound.
    pub fn scan(
        &self,
        input: &str,
        opts: &ScanOptions,
        env: &ScanEnv<'_>,
    ) -> Result<DateFields, ScanError> {
        let mut rec = DateFields::default();
        scan::run(&self.program, input, opts, env, &mut rec)?;
        Ok(rec)
    }
}

impl Clone for CompiledFormat {
    fn clone(&self) -> Self {
        self.cache.retain(self.program.format());
        Self {
            cache: Arc::clone(&self.cache),
            program: Arc::clone(&self.program),
        }
    }
}

impl Drop for CompiledFormat {
    fn drop(&mut self) {
        self.cache.release(self.program.format());
    }
}

impl fmt::Debug for CompiledFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFormat")
            .field("format", &self.format())
            .finish_non_exhaustive()
    }
}
