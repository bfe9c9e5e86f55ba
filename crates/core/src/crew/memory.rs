//! # Crew Memory
//!
//! Short-term memory shared across kickoffs of one crew. Task outputs are
//! remembered after each run together with the run's subject (its input
//! values); later runs recall the entries whose subject shares words with
//! their own.

use std::collections::{HashSet, VecDeque};
use tokio::sync::Mutex;

/// Entries kept before the oldest is evicted
pub const DEFAULT_CAPACITY: usize = 32;

/// Shortest word that counts when matching memories
const MIN_WORD_LEN: usize = 3;

/// Words that never make two subjects related
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "about", "from", "into", "what", "how", "why", "who", "are",
    "was", "its", "this", "that", "your", "you", "our", "all", "any", "can", "not", "but",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
    /// Kickoff that produced the entry
    pub run: u64,
    /// Input values of that kickoff
    pub subject: String,
    pub task: String,
    pub content: String,
}

#[derive(Debug)]
pub struct CrewMemory {
    capacity: usize,
    entries: Mutex<VecDeque<MemoryEntry>>,
}

impl Default for CrewMemory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl CrewMemory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn remember(&self, entry: MemoryEntry) {
        let mut entries = self.entries.lock().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Entries from other runs ranked by words their subject shares with
    /// `subject`, best first.
    pub async fn recall(&self, subject: &str, current_run: u64, limit: usize) -> Vec<MemoryEntry> {
        let wanted = words(subject);
        if wanted.is_empty() || limit == 0 {
            return Vec::new();
        }

        let entries = self.entries.lock().await;
        let mut scored: Vec<(usize, &MemoryEntry)> = entries
            .iter()
            .filter(|e| e.run != current_run)
            .map(|e| (words(&e.subject).intersection(&wanted).count(), e))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Newest first among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.run.cmp(&a.1.run)));
        scored.into_iter().take(limit).map(|(_, e)| e.clone()).collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(run: u64, subject: &str, content: &str) -> MemoryEntry {
        MemoryEntry {
            run,
            subject: subject.to_string(),
            task: "research_task".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_recall_skips_current_run_and_unrelated_entries() {
        let memory = CrewMemory::default();
        memory.remember(entry(1, "sleeping felines", "Cats sleep sixteen hours")).await;
        memory.remember(entry(1, "rust ownership", "Borrowing rules")).await;
        memory.remember(entry(2, "felines", "Felines again")).await;

        let recalled = memory.recall("How long do felines sleep?", 2, 5).await;
        assert_eq!(
            recalled,
            vec![entry(1, "sleeping felines", "Cats sleep sixteen hours")]
        );
    }

    #[tokio::test]
    async fn test_recall_matches_subject_not_content() {
        let memory = CrewMemory::default();
        memory
            .remember(entry(1, "golden retrievers", "Key facts and sources on quantum dogs"))
            .await;

        assert!(memory.recall("quantum computing", 2, 5).await.is_empty());
        assert_eq!(memory.recall("Golden retrievers", 2, 5).await.len(), 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let memory = CrewMemory::with_capacity(2);
        memory.remember(entry(1, "first entry", "one")).await;
        memory.remember(entry(2, "second entry", "two")).await;
        memory.remember(entry(3, "third entry", "three")).await;

        assert_eq!(memory.len().await, 2);
        let recalled = memory.recall("first entry", 9, 5).await;
        assert!(recalled.iter().all(|e| e.run != 1));
    }

    #[tokio::test]
    async fn test_stop_words_and_short_words_recall_nothing() {
        let memory = CrewMemory::default();
        memory.remember(entry(1, "the history of AI", "notes")).await;
        assert!(memory.recall("an AI", 2, 5).await.is_empty());
        assert!(memory.recall("the future of it", 2, 5).await.is_empty());
    }
}
