use std::collections::{HashMap, VecDeque};

/// Identifies one rasterised page: the same page renders differently in
/// dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterKey {
    pub page: u32,
    pub dark_mode: bool,
}

impl RasterKey {
    pub fn new(page: u32, dark_mode: bool) -> Self {
        Self { page, dark_mode }
    }
}

/// Least-recently-used store of rendered pages.
#[derive(Debug, Clone)]
pub struct PageCache<V> {
    capacity: usize,
    entries: HashMap<RasterKey, V>,
    recency: VecDeque<RasterKey>,
}

impl<V> PageCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), entries: HashMap::new(), recency: VecDeque::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: RasterKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Returns the entry and marks it most recently used.
    pub fn get(&mut self, key: RasterKey) -> Option<&V> {
        if self.entries.contains_key(&key) {
            self.touch(key);
        }

        self.entries.get(&key)
    }

    /// Inserts `value`, evicting least-recently-used entries beyond capacity.
    /// Returns the evicted values so callers can release them.
    pub fn insert(&mut self, key: RasterKey, value: V) -> Vec<V> {
        if self.entries.insert(key, value).is_some() {
            self.touch(key);
            return Vec::new();
        }

        self.recency.push_back(key);

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.recency.pop_front() else {
                break;
            };
            if let Some(value) = self.entries.remove(&oldest) {
                evicted.push(value);
            }
        }

        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    fn touch(&mut self, key: RasterKey) {
        if let Some(position) = self.recency.iter().position(|existing| *existing == key) {
            self.recency.remove(position);
            self.recency.push_back(key);
        }
    }
}

/// Pages around `current` worth rendering ahead of time, nearest first,
/// alternating before/after and staying within `[1, total]`.
pub fn prefetch_pages(current: u32, total: u32, radius: u32) -> Vec<u32> {
    let mut pages = Vec::new();
    if total == 0 {
        return pages;
    }

    for offset in 1..=radius {
        if let Some(before) = current.checked_sub(offset).filter(|page| *page >= 1) {
            pages.push(before);
        }

        let after = current.saturating_add(offset);
        if after <= total {
            pages.push(after);
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used_page() {
        let mut cache = PageCache::new(2);

        assert!(cache.insert(RasterKey::new(1, false), "one").is_empty());
        assert!(cache.insert(RasterKey::new(2, false), "two").is_empty());

        let _ = cache.get(RasterKey::new(1, false));
        let evicted = cache.insert(RasterKey::new(3, false), "three");

        assert_eq!(evicted, vec!["two"]);
        assert!(cache.contains(RasterKey::new(1, false)));
        assert!(cache.contains(RasterKey::new(3, false)));
    }

    #[test]
    fn dark_and_light_rasters_are_distinct_entries() {
        let mut cache = PageCache::new(4);
        cache.insert(RasterKey::new(5, false), 'l');
        cache.insert(RasterKey::new(5, true), 'd');

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(RasterKey::new(5, true)), Some(&'d'));
    }

    #[test]
    fn reinserting_replaces_without_eviction() {
        let mut cache = PageCache::new(1);
        cache.insert(RasterKey::new(1, false), 1);

        assert!(cache.insert(RasterKey::new(1, false), 2).is_empty());
        assert_eq!(cache.get(RasterKey::new(1, false)), Some(&2));
    }

    #[test]
    fn prefetch_alternates_and_stays_in_range() {
        assert_eq!(prefetch_pages(5, 10, 2), vec![4, 6, 3, 7]);
        assert_eq!(prefetch_pages(1, 3, 3), vec![2, 3]);
        assert_eq!(prefetch_pages(604, 604, 1), vec![603]);
        assert!(prefetch_pages(1, 0, 2).is_empty());
    }
}
