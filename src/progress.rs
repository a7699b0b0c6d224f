//! Progress bar display for artifact installation

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the artifact installation phase
pub struct ProgressDisplay {
    artifact_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total artifact count
    pub fn new(total_artifacts: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let artifact_pb = ProgressBar::new(total_artifacts);
        artifact_pb.set_style(style);

        Self { artifact_pb }
    }

    /// Show the artifact currently being installed
    pub fn update_artifact(&self, description: &str) {
        // Truncate long descriptions for display
        let msg = if description.len() > 50 {
            format!("...{}", &description[description.len() - 47..])
        } else {
            description.to_string()
        };
        self.artifact_pb.set_message(msg);
    }

    /// Advance past one artifact
    pub fn inc(&self) {
        self.artifact_pb.inc(1);
    }

    /// Finish cleanly
    pub fn finish(&self) {
        self.artifact_pb.finish();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.artifact_pb.abandon();
    }
}
