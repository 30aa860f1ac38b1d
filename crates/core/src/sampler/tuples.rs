use std::borrow::Cow;
use std::path::Path;

use tracing::debug;

use super::SamplerError;

/// Split input text into tuples, one per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped and blank lines skipped;
/// anything else on the line is kept verbatim, in input order.
pub fn parse_tuples(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the tuple file at `path`.
///
/// The file has no declared encoding: bytes that are not valid UTF-8 are
/// replaced with U+FFFD rather than failing the run.
///
/// An empty result is not an error here; [`TupleSampler::new`](super::TupleSampler::new)
/// rejects it.
pub async fn load_tuples(path: &Path) -> Result<Vec<String>, SamplerError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SamplerError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        debug!(path = %path.display(), "Tuple file is not valid UTF-8, decoded lossily");
    }

    let tuples = parse_tuples(&text);
    debug!(path = %path.display(), tuples = tuples.len(), "Loaded tuples");
    Ok(tuples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_tuples_strips_terminators() {
        let tuples = parse_tuples("ruby gems\r\nfoo bar\nlast line");
        assert_eq!(tuples, vec!["ruby gems", "foo bar", "last line"]);
    }

    #[test]
    fn test_parse_tuples_skips_blank_lines() {
        let tuples = parse_tuples("\none two three\n   \n\tfour five six\n\n");
        assert_eq!(tuples, vec!["one two three", "\tfour five six"]);
    }

    #[test]
    fn test_parse_tuples_empty() {
        assert!(parse_tuples("").is_empty());
        assert!(parse_tuples("\n\n \n").is_empty());
    }

    #[tokio::test]
    async fn test_load_tuples_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "the quick fox\njumps over the\nlazy dog\n").unwrap();

        let tuples = load_tuples(file.path()).await.unwrap();
        assert_eq!(tuples.len(), 3);
        assert_eq!(tuples[0], "the quick fox");
        assert_eq!(tuples[2], "lazy dog");
    }

    #[tokio::test]
    async fn test_load_tuples_latin1_line() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"caf\xe9 cr\xe8me\n").unwrap();

        let tuples = load_tuples(file.path()).await.unwrap();
        assert_eq!(tuples, vec!["caf\u{FFFD} cr\u{FFFD}me"]);
    }

    #[tokio::test]
    async fn test_load_tuples_mixed_encodings_keeps_every_line() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"caf\xe9 cr\xe8me\nfoo bar\n").unwrap();

        let tuples = load_tuples(file.path()).await.unwrap();
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[1], "foo bar");
    }

    #[tokio::test]
    async fn test_load_tuples_missing_file() {
        let result = load_tuples(Path::new("/nonexistent/tuples.txt")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, SamplerError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/tuples.txt"));
    }
}
