//! The lazily materialized table of user-registered converters.
//!
//! States: uninitialized (empty `OnceLock`) → ready (table installed).
//! `OnceLock::get_or_init` runs the install at most once, even when several
//! threads register their first converter concurrently; the losers block
//! until the winner has installed the table and then insert into it.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::SharedConverter;
use crate::descriptor::TypeDescriptor;

type Table = FxHashMap<TypeDescriptor, SharedConverter>;

pub(super) struct CustomTable {
    slot: OnceLock<Entries>,
}

/// Readers load the current snapshot without locking. Writers serialize on
/// `write`, copy the snapshot, insert, and publish the copy.
struct Entries {
    snapshot: ArcSwap<Table>,
    write: Mutex<()>,
}

impl CustomTable {
    pub(super) const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    pub(super) fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    pub(super) fn get(&self, target: &TypeDescriptor) -> Option<SharedConverter> {
        self.slot.get()?.snapshot.load().get(target).cloned()
    }

    /// Insert or overwrite; returns the replaced converter.
    pub(super) fn insert(
        &self,
        target: TypeDescriptor,
        converter: SharedConverter,
    ) -> Option<SharedConverter> {
        let entries = self.slot.get_or_init(|| {
            tracing::debug!("materializing custom converter table");
            Entries {
                snapshot: ArcSwap::from_pointee(Table::default()),
                write: Mutex::new(()),
            }
        });

        let _guard = entries.write.lock();
        let mut next = Table::clone(&entries.snapshot.load());
        let previous = next.insert(target, converter);
        entries.snapshot.store(Arc::new(next));
        previous
    }

    pub(super) fn keys(&self) -> Vec<TypeDescriptor> {
        self.slot
            .get()
            .map(|entries| entries.snapshot.load().keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use super::*;
    use crate::error::Result;
    use crate::value::Value;

    fn constant(n: i64) -> SharedConverter {
        Arc::new(move |_: &TypeDescriptor, _: Value| -> Result<Value> { Ok(Value::Int(n)) })
    }

    #[test]
    fn test_starts_uninitialized() {
        let table = CustomTable::new();
        assert!(!table.is_ready());
        assert!(table.get(&TypeDescriptor::I32).is_none());
        assert!(table.keys().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let table = CustomTable::new();
        assert!(table.insert(TypeDescriptor::I32, constant(1)).is_none());
        assert!(table.is_ready());
        assert!(table.insert(TypeDescriptor::I32, constant(2)).is_some());
        assert_eq!(table.keys(), vec![TypeDescriptor::I32]);
    }

    #[test]
    fn test_concurrent_first_registration() {
        const THREADS: usize = 8;
        let table = CustomTable::new();
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for i in 0..THREADS {
                let table = &table;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    table.insert(TypeDescriptor::concrete(format!("T{i}")), constant(i as i64));
                });
            }
        });

        let mut keys = table.keys();
        keys.sort();
        assert_eq!(keys.len(), THREADS);
        for i in 0..THREADS {
            assert!(table.get(&TypeDescriptor::concrete(format!("T{i}"))).is_some());
        }
    }
}
