// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Body text long enough that snippets are never out of range
#[allow(dead_code)] // Used in integration tests
pub const FILLER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

/// Render a crawled page with the corpus `<url>` tag
#[allow(dead_code)] // Used in integration tests
pub fn page(url: &str, title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{title}</title></head>\
         <body><url>{url}</url><p>{body}</p></body></html>"
    )
}

/// Synthetic crawl: a corpus directory, a score artifact and room for
/// an index, all under one temp dir
#[allow(dead_code)] // Used in integration tests
pub struct TestCorpus {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestCorpus {
    /// Three pages, two of which have scores
    #[allow(dead_code)] // Used in integration tests
    pub fn small() -> Self {
        let corpus = Self::with_pages(&[
            ("a.html", "http://x/a", "A", FILLER),
            ("b.html", "http://x/b", "B", FILLER),
            ("c.html", "http://x/c", "C", FILLER),
        ]);
        corpus.write_scores("http://x/a:pr:0.5\nhttp://x/b:pr:0.25\n");
        corpus
    }

    /// Create pages as `(relative path, url, title, body)`
    pub fn with_pages(pages: &[(&str, &str, &str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();

        let mut corpus = Self {
            dir,
            files: Vec::new(),
        };
        for (path, url, title, body) in pages {
            corpus.add_file(path, &page(url, title, body));
        }
        corpus
    }

    /// Write a raw file under the corpus root
    #[allow(dead_code)] // Used in integration tests
    pub fn add_file(&mut self, path: &str, content: &str) -> PathBuf {
        let full_path = self.docs().join(path);
        std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        std::fs::write(&full_path, content).unwrap();
        self.files.push(full_path.clone());
        full_path
    }

    /// Replace the score artifact
    #[allow(dead_code)] // Used in integration tests
    pub fn write_scores(&self, content: &str) {
        std::fs::write(self.scores(), content).unwrap();
    }

    /// Corpus root
    pub fn docs(&self) -> PathBuf {
        self.dir.path().join("docs")
    }

    /// Score artifact path
    #[allow(dead_code)] // Used in integration tests
    pub fn scores(&self) -> PathBuf {
        self.dir.path().join("pageRankResult.txt")
    }

    /// Index directory (created on first run)
    #[allow(dead_code)] // Used in integration tests
    pub fn index(&self) -> PathBuf {
        self.dir.path().join("index")
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
