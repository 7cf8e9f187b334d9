//! Local post log
//!
//! Submitted posts are persisted to a single JSON file under the user's home
//! directory. Writes go through a temp file and rename, so readers only ever
//! observe a complete log, and a sidecar lock file serializes concurrent
//! streakdeck invocations (a `submit` racing an open TUI, or two `submit`s
//! racing each other).

use crate::services::platform::Platform;
use crate::types::{Result, StreakdeckError};
use chrono::NaiveDate;
use directories::BaseDirs;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// One submitted post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub url: String,
    pub platform: Platform,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PostLogFile {
    posts: Vec<Post>,
}

/// JSON-backed post log
pub struct PostStore {
    log_dir: PathBuf,
}

impl PostStore {
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| StreakdeckError::Store("Cannot determine home directory".into()))?;
        let log_dir = base_dirs.home_dir().join(".streakdeck");
        fs::create_dir_all(&log_dir)?;
        Ok(Self { log_dir })
    }

    pub fn with_log_dir(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join("posts.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.log_dir.join("posts.lock")
    }

    /// The lock lives in a sidecar file rather than the log itself: every
    /// write replaces the log by rename, which would detach a lock held on
    /// the old inode while another process still waits on it.
    fn open_lock(&self) -> Result<File> {
        fs::create_dir_all(&self.log_dir)?;
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        Ok(file)
    }

    /// Load all recorded posts. A missing file is an empty log; a corrupt
    /// file is reported, not silently discarded.
    pub fn posts(&self) -> Result<Vec<Post>> {
        let lock = self.open_lock()?;
        FileExt::lock_shared(&lock)
            .map_err(|e| StreakdeckError::Store(format!("Failed to acquire read lock: {}", e)))?;
        let result = self.read_log();
        let _ = FileExt::unlock(&lock);
        result
    }

    /// Append a post and persist the log. The exclusive lock spans the whole
    /// read-modify-write, so concurrent submits cannot drop each other's
    /// posts.
    pub fn add_post(&self, post: Post) -> Result<()> {
        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock)
            .map_err(|e| StreakdeckError::Store(format!("Failed to acquire write lock: {}", e)))?;
        let result = self.read_log().and_then(|mut posts| {
            posts.push(post);
            self.write_log(&posts)
        });
        let _ = FileExt::unlock(&lock);
        result
    }

    /// Posts per calendar day, chronologically keyed
    pub fn daily_counts(&self) -> Result<BTreeMap<NaiveDate, u32>> {
        let mut counts = BTreeMap::new();
        for post in self.posts()? {
            *counts.entry(post.date).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Total recorded posts
    pub fn total_posts(&self) -> Result<u32> {
        Ok(self.posts()?.len() as u32)
    }

    fn read_log(&self) -> Result<Vec<Post>> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        let log: PostLogFile = serde_json::from_str(&content)
            .map_err(|e| StreakdeckError::Parse(format!("Corrupt post log: {}", e)))?;
        Ok(log.posts)
    }

    /// Atomic write: serialize to a temp file, sync, then rename over the
    /// log. A reader can never open a truncated or half-written file.
    fn write_log(&self, posts: &[Post]) -> Result<()> {
        let log = PostLogFile {
            posts: posts.to_vec(),
        };
        let json = serde_json::to_string_pretty(&log)
            .map_err(|e| StreakdeckError::Parse(e.to_string()))?;

        let path = self.log_path();
        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_post(url: &str, platform: Platform, d: NaiveDate) -> Post {
        Post {
            url: url.into(),
            platform,
            date: d,
        }
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::with_log_dir(dir.path().to_path_buf());
        assert!(store.posts().unwrap().is_empty());
        assert_eq!(store.total_posts().unwrap(), 0);
    }

    #[test]
    fn test_add_post_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::with_log_dir(dir.path().to_path_buf());

        let post = make_post(
            "https://x.com/user/status/1",
            Platform::Twitter,
            date(2025, 4, 28),
        );
        store.add_post(post.clone()).unwrap();

        let posts = store.posts().unwrap();
        assert_eq!(posts, vec![post]);
    }

    #[test]
    fn test_daily_counts_groups_by_date() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::with_log_dir(dir.path().to_path_buf());

        let day = date(2025, 4, 28);
        store
            .add_post(make_post("https://x.com/a/1", Platform::Twitter, day))
            .unwrap();
        store
            .add_post(make_post("https://x.com/a/2", Platform::Twitter, day))
            .unwrap();
        store
            .add_post(make_post(
                "https://linkedin.com/posts/b",
                Platform::Linkedin,
                date(2025, 4, 27),
            ))
            .unwrap();

        let counts = store.daily_counts().unwrap();
        assert_eq!(counts.get(&day), Some(&2));
        assert_eq!(counts.get(&date(2025, 4, 27)), Some(&1));
        assert_eq!(store.total_posts().unwrap(), 3);
    }

    #[test]
    fn test_corrupt_log_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::with_log_dir(dir.path().to_path_buf());
        fs::write(store.log_path(), "not json").unwrap();

        let err = store.posts().unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::with_log_dir(dir.path().to_path_buf());
        store
            .add_post(make_post(
                "https://x.com/u/status/1",
                Platform::Twitter,
                date(2025, 4, 28),
            ))
            .unwrap();

        let leftover = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().ends_with(".tmp"));
        assert!(!leftover);
        assert_eq!(store.total_posts().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_submits_keep_every_post() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        let day = date(2025, 4, 28);

        let handles: Vec<_> = (0..2)
            .map(|t| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store = PostStore::with_log_dir(path);
                    for i in 0..25 {
                        store
                            .add_post(make_post(
                                &format!("https://x.com/u/status/{}-{}", t, i),
                                Platform::Twitter,
                                day,
                            ))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Interleaved writers must not drop each other's appends, and no
        // reader along the way may have seen a partial file.
        let store = PostStore::with_log_dir(path);
        assert_eq!(store.total_posts().unwrap(), 50);
        assert_eq!(store.daily_counts().unwrap().get(&day), Some(&50));
    }
}
