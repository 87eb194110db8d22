use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}";
const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner} {msg}";

/// A reusable progress tracker that handles both creating and updating progress bars
/// with support for multi-progress displays
pub struct ProgressTracker {
    pub progress_bar: ProgressBar,
}

impl ProgressTracker {
    /// Creates a new MultiProgress for managing multiple progress bars
    pub fn create_multi() -> MultiProgress {
        MultiProgress::new()
    }

    /// Add a step counter to a multi-progress display
    ///
    /// # Arguments
    /// * `total` - The total number of steps
    /// * `description` - Optional description of what's being processed
    pub fn add_to_multi(multi: &MultiProgress, total: u64, description: Option<&str>) -> Self {
        let progress_bar = multi.add(ProgressBar::new(total));
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        progress_bar.set_style(style);
        progress_bar.set_message(description.unwrap_or("").to_string());
        progress_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { progress_bar }
    }

    /// Create a new indeterminate tracker with unknown total
    pub fn new_indeterminate(multi: &MultiProgress, description: &str) -> Self {
        let progress_bar = multi.add(ProgressBar::new_spinner());
        let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
        progress_bar.set_style(style);
        progress_bar.set_message(description.to_string());
        progress_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { progress_bar }
    }

    /// A tracker that draws nothing
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.progress_bar.finish_with_message(msg.to_string());
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    pub fn update_message(&self, msg: &str) {
        self.progress_bar.set_message(msg.to_string());
    }
}
