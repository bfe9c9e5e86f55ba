//! Cache of agent answers keyed by role and full prompt.

use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;

/// Answers kept before the oldest is evicted
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct Entries {
    answers: HashMap<String, String>,
    /// Keys in insertion order, oldest first
    order: VecDeque<String>,
}

#[derive(Debug)]
pub struct CrewCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl Default for CrewCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl CrewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn key(role: &str, system_prompt: &str, prompt: &str) -> String {
        format!("{role}\u{1f}{system_prompt}\u{1f}{prompt}")
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.answers.get(key).cloned()
    }

    pub async fn insert(&self, key: String, content: String) {
        let mut entries = self.entries.lock().await;
        if entries.answers.contains_key(&key) {
            entries.answers.insert(key, content);
            return;
        }
        if entries.order.len() == self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.answers.remove(&oldest);
            }
        }
        entries.order.push_back(key.clone());
        entries.answers.insert(key, content);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_roundtrip_is_keyed_by_role() {
        let cache = CrewCache::new();
        cache
            .insert(CrewCache::key("writer", "sys", "cats"), "Cats!".to_string())
            .await;

        assert_eq!(
            cache.get(&CrewCache::key("writer", "sys", "cats")).await.as_deref(),
            Some("Cats!")
        );
        assert!(cache.get(&CrewCache::key("researcher", "sys", "cats")).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_answer() {
        let cache = CrewCache::with_capacity(2);
        cache.insert("dogs".to_string(), "Woof".to_string()).await;
        cache.insert("cats".to_string(), "Meow".to_string()).await;
        cache.insert("cats".to_string(), "Purr".to_string()).await;
        assert_eq!(cache.len().await, 2);

        cache.insert("owls".to_string(), "Hoot".to_string()).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("dogs").await.is_none());
        assert_eq!(cache.get("cats").await.as_deref(), Some("Purr"));
        assert_eq!(cache.get("owls").await.as_deref(), Some("Hoot"));
    }
}
