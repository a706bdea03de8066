//! Progress reporting for reductions, with multi-file batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Receives progress notifications from a running reduction
///
/// Calls are fire-and-forget and must not influence the reduction.
pub trait ProgressReporter {
    /// Called once per iteration before the seam is merged
    fn report(&mut self, current: usize, total: usize);

    /// Called once after the last iteration
    fn done(&mut self) {}
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &mut T {
    fn report(&mut self, current: usize, total: usize) {
        (**self).report(current, total);
    }

    fn done(&mut self) {
        (**self).done();
    }
}

/// Reporter that ignores every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _current: usize, _total: usize) {}
}

/// Seam counters for one file of the batch
#[derive(Clone, Debug, Default)]
struct FileSlot {
    name: String,
    merged: usize,
    seams: usize,
    finished: bool,
}

impl FileSlot {
    fn label(&self) -> String {
        if self.finished {
            format!("✓ {}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Per-file seam bars for a batch of reductions
///
/// Up to `MAX_INDIVIDUAL_PROGRESS_BARS` bars follow the most recently started
/// files. Larger batches also get an overall file counter.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    seam_bars: Vec<ProgressBar>,
    slots: Vec<Option<FileSlot>>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SEAM_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} seams [{bar:30.green/white}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            seam_bars: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Create the bars for a batch of `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.slots = vec![None; file_count];

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        self.seam_bars = (0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                let bar = ProgressBar::new(0);
                bar.set_style(SEAM_STYLE.clone());
                self.multi_progress.add(bar)
            })
            .collect();
    }

    /// Start tracking a file that will have `seams` seams merged
    pub fn start_file(&mut self, index: usize, path: &Path, seams: usize) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(FileSlot {
                name: path.file_name().unwrap_or_default().to_string_lossy().into_owned(),
                seams,
                ..FileSlot::default()
            });
        }
        self.redraw();
    }

    /// Record that `merged` seams of a file are done
    pub fn update_seams(&mut self, index: usize, merged: usize) {
        if let Some(slot) = self.slot_mut(index) {
            slot.merged = merged.min(slot.seams);
        }
        self.redraw();
    }

    /// Fill a file's bar and advance the batch counter
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(slot) = self.slot_mut(index) {
            slot.merged = slot.seams;
            slot.finished = true;
        }
        self.redraw();
    }

    /// Reporter feeding one file's bar, counting from `offset` seams
    pub const fn reporter(&mut self, index: usize, offset: usize) -> FileProgress<'_> {
        FileProgress {
            manager: self,
            index,
            offset,
        }
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images reduced");
        }
        let _ = self.multi_progress.clear();
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut FileSlot> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn redraw(&self) {
        let started: Vec<&FileSlot> = self.slots.iter().flatten().collect();
        let recent = started
            .get(started.len().saturating_sub(self.seam_bars.len())..)
            .unwrap_or_default();

        for (position, bar) in self.seam_bars.iter().enumerate() {
            match recent.get(position) {
                Some(slot) => {
                    bar.set_length(slot.seams as u64);
                    bar.set_position(slot.merged as u64);
                    let width = slot.seams.to_string().len();
                    bar.set_message(format!("{:>width$}/{}", slot.merged, slot.seams));
                    bar.set_prefix(slot.label());
                }
                None => {
                    bar.reset();
                    bar.set_length(0);
                    bar.set_message(String::new());
                    bar.set_prefix(String::new());
                }
            }
        }
    }
}

/// Adapts one file's progress bar to [`ProgressReporter`]
///
/// Several reductions of the same file (columns, then rows) share one bar by
/// starting from different offsets. Completion is signalled separately
/// through [`ProgressManager::complete_file`].
pub struct FileProgress<'a> {
    manager: &'a mut ProgressManager,
    index: usize,
    offset: usize,
}

impl ProgressReporter for FileProgress<'_> {
    fn report(&mut self, current: usize, _total: usize) {
        self.manager.update_seams(self.index, self.offset + current);
    }
}
