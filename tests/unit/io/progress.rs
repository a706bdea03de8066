//! Tests for progress tracking and multi-file batch processing

#[cfg(test)]
mod tests {
    use seammerge::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use seammerge::io::progress::{NoProgress, ProgressManager, ProgressReporter};
    use std::path::Path;

    // Tests a full single-file lifecycle
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_lifecycle() {
        let mut pm = ProgressManager::new();

        pm.initialize(1);
        pm.start_file(0, Path::new("test.png"), 10);
        pm.update_seams(0, 5);
        pm.complete_file(0);
        pm.finish();
    }

    // Tests default trait implementation
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();

        pm.initialize(2);
        pm.start_file(1, Path::new("second.png"), 4);
        pm.complete_file(1);
        pm.finish();
    }

    // Tests batch mode above the individual bar limit
    // Verified by always using individual bars
    #[test]
    fn test_batch_mode_many_files() {
        let mut pm = ProgressManager::new();
        let count = MAX_INDIVIDUAL_PROGRESS_BARS + 3;

        pm.initialize(count);
        for index in 0..count {
            pm.start_file(index, Path::new("batch.png"), 2);
            pm.update_seams(index, 1);
            pm.complete_file(index);
        }
        pm.finish();
    }

    // Tests that updates for unknown files are ignored
    #[test]
    fn test_unknown_file_updates() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);

        pm.update_seams(7, 3);
        pm.complete_file(7);
        pm.finish();
    }

    // Tests the per-file reporter with an offset for a second pass
    #[test]
    fn test_file_reporter() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        pm.start_file(0, Path::new("two_pass.png"), 6);

        {
            let mut columns = pm.reporter(0, 0);
            columns.report(0, 4);
            columns.report(3, 4);
            columns.done();
        }
        {
            let mut rows = pm.reporter(0, 4);
            rows.report(1, 2);
        }

        // Counts past the announced total are capped
        pm.update_seams(0, 9);
        pm.complete_file(0);
        pm.finish();
    }

    // Tests the silent reporter, also through a mutable reference
    #[test]
    fn test_no_progress() {
        let mut silent = NoProgress;
        silent.report(1, 2);
        silent.done();

        let mut borrowed = &mut silent;
        ProgressReporter::report(&mut borrowed, 2, 2);
        ProgressReporter::done(&mut borrowed);
    }
}
