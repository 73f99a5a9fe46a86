use super::{CountSettings, FileReport, recover};
use crate::count::{FrequencyMap, TextBuffer, tokenize};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Count a whole buffer as a single segment
pub fn count_buffer(buffer: &TextBuffer) -> FrequencyMap {
    tokenize::count(buffer, buffer.full_segment())
}

pub fn count_file(path: &Path) -> Result<FrequencyMap> {
    let buffer = TextBuffer::load(path)?;
    Ok(count_buffer(&buffer))
}

pub fn run(
    files: &[PathBuf],
    settings: &CountSettings,
    on_file: &mut dyn FnMut(&FileReport),
) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        let (map, error) = recover(path, count_file(path))?;
        let report = FileReport::from_map(path, &map, settings.top_n, error);
        tracing::debug!("{}: {} distinct words", path.display(), report.distinct_words);
        on_file(&report);
        reports.push(report);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_single_counts_whole_buffer() {
        let counts = count_buffer(&TextBuffer::from("the cat sat. The CAT sat!"));
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn test_missing_file_reports_and_continues() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("progc");
        std::fs::write(&good, "int main int").unwrap();
        let files = vec![dir.path().join("nope"), good];

        let reports = run(&files, &CountSettings::default(), &mut |_| {}).unwrap();
        assert!(reports[0].failed());
        assert_eq!(reports[0].distinct_words, 0);
        assert_eq!(reports[1].distinct_words, 2);
        assert_eq!(reports[1].top_words[0].word, "int");
    }
}
