use std::fs;
use std::path::PathBuf;

const MAGIC: &[u8; 4] = b"COP1";
const NUM_SLOTS: usize = 3;
const NAME_LEN: usize = 9;
// Each entry: 9 bytes name + 4 bytes score = 13 bytes
const ENTRY_SIZE: usize = NAME_LEN + 4;
// File size: 4 magic + 3 * 13 = 43 bytes
const FILE_SIZE: usize = 4 + NUM_SLOTS * ENTRY_SIZE;

#[derive(Clone)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    fn empty() -> Self {
        ScoreEntry {
            name: String::new(),
            score: 0,
        }
    }
}

/// Top-3 table for the one scored game, persisted as a small
/// fixed-layout binary file next to the executable. IO failures are
/// swallowed; a missing or corrupt file just means an empty table.
#[derive(Clone)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
    path: PathBuf,
    /// Whether the current run already posted its score, to avoid
    /// duplicate submissions while the game-over screen is up.
    submitted: bool,
}

impl HighScores {
    pub fn load() -> Self {
        Self::load_from(Self::scores_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let mut hs = HighScores {
            entries: (0..NUM_SLOTS).map(|_| ScoreEntry::empty()).collect(),
            path,
            submitted: false,
        };
        hs.read_file();
        hs
    }

    fn scores_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("coinop.scores");
            }
        }
        PathBuf::from("coinop.scores")
    }

    fn read_file(&mut self) {
        let Ok(data) = fs::read(&self.path) else { return };
        if data.len() < FILE_SIZE {
            return;
        }
        if &data[0..4] != MAGIC {
            return;
        }

        let mut offset = 4;
        for slot in 0..NUM_SLOTS {
            // Read 9-byte name
            let name_bytes = &data[offset..offset + NAME_LEN];
            let name = String::from_utf8_lossy(name_bytes)
                .trim_end_matches('\0')
                .trim_end()
                .to_string();
            offset += NAME_LEN;

            // Read 4-byte score
            let bytes: [u8; 4] = [
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ];
            let score = u32::from_le_bytes(bytes);
            offset += 4;

            self.entries[slot] = ScoreEntry { name, score };
        }
    }

    fn write_file(&self) {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        for entry in &self.entries {
            // Write 9-byte name (padded with zeros)
            let name_bytes = entry.name.as_bytes();
            let len = name_bytes.len().min(NAME_LEN);
            buf.extend_from_slice(&name_bytes[..len]);
            for _ in len..NAME_LEN {
                buf.push(0);
            }
            // Write 4-byte score
            buf.extend_from_slice(&entry.score.to_le_bytes());
        }
        let _ = fs::write(&self.path, &buf);
    }

    /// Check if a score would make the top 3 (without inserting it)
    pub fn qualifies(&self, score: u32) -> bool {
        score != 0 && self.entries.iter().any(|e| score > e.score)
    }

    /// Submit a score with a name. Returns true if it entered the top 3.
    pub fn submit(&mut self, name: &str, score: u32) -> bool {
        if score == 0 {
            return false;
        }

        // Truncate name to 9 chars
        let name: String = name.chars().take(NAME_LEN).collect();

        // Find insertion point (sorted descending)
        let Some(pos) = self.entries.iter().position(|e| score > e.score) else {
            return false;
        };

        // Shift lower scores down
        for i in (pos + 1..NUM_SLOTS).rev() {
            self.entries[i] = self.entries[i - 1].clone();
        }
        self.entries[pos] = ScoreEntry { name, score };
        self.write_file();
        true
    }

    /// Top 3 entries, best first. Unfilled slots have empty names.
    pub fn top_scores(&self) -> Vec<ScoreEntry> {
        self.entries.clone()
    }

    pub fn was_submitted(&self) -> bool {
        self.submitted
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// Called when the scored game leaves its game-over state.
    pub fn clear_submitted(&mut self) {
        self.submitted = false;
    }
}
