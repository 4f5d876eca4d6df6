//! One-shot plain-text [`Download`]s of a generated poem.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

/// Title used when the user leaves the title empty.
pub const DEFAULT_TITLE: &str = "My Poem";

/// File name for a poem titled `title`: whitespace becomes `_` and `.txt` is
/// appended. An empty title falls back to [`DEFAULT_TITLE`].
///
/// Path separators (`/`, `\`) and `:` also become `_`, so the name is always
/// a single path component.
pub fn file_name(title: &str) -> String {
    let title = match title.trim() {
        "" => DEFAULT_TITLE,
        _ => title,
    };

    let mut name: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    name.push_str(".txt");
    name
}

/// A poem written verbatim to a temporary file, ready to hand to the user.
/// The file is deleted when the [`Download`] is dropped; use
/// [`Self::persist_in`] to keep a copy.
#[derive(Debug)]
pub struct Download {
    file: NamedTempFile,
    file_name: String,
}

impl Download {
    /// Write `text` to a new temporary file named for `title`.
    pub fn new(text: &str, title: &str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("versewright-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(text.as_bytes())?;
        file.flush()?;

        Ok(Self {
            file,
            file_name: file_name(title),
        })
    }

    /// Name to offer the file under, for example `My_Poem.txt`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type of the file.
    pub const fn mime(&self) -> &'static str {
        "text/plain"
    }

    /// Where the temporary file lives. It is **not** named [`Self::file_name`].
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the file back.
    pub fn bytes(&self) -> io::Result<Vec<u8>> {
        std::fs::read(self.path())
    }

    /// Copy the file to `dir`/[`file_name`] and drop the temporary file.
    /// An existing file of the same name is overwritten.
    ///
    /// [`file_name`]: Self::file_name
    pub fn persist_in(self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let dest = dir.as_ref().join(&self.file_name);
        std::fs::copy(self.file.path(), &dest)?;

        #[cfg(feature = "log")]
        log::info!("Saved poem to {}", dest.display());

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("My Poem"), "My_Poem.txt");
        assert_eq!(file_name("Ode to\tthe  Sea"), "Ode_to_the__Sea.txt");
        assert_eq!(file_name("haiku"), "haiku.txt");
        assert_eq!(file_name(""), "My_Poem.txt");
        assert_eq!(file_name("  "), "My_Poem.txt");
        assert_eq!(file_name("a/b\\c:d"), "a_b_c_d.txt");
        assert_eq!(file_name("/etc/passwd"), "_etc_passwd.txt");
    }

    #[test]
    fn test_download_is_verbatim() {
        let text = "Line one\n  indented line two\n\nstanza two, ünïcödé\n";
        let download = Download::new(text, "Autumn Leaves").unwrap();
        assert_eq!(download.file_name(), "Autumn_Leaves.txt");
        assert_eq!(download.mime(), "text/plain");
        assert_eq!(download.bytes().unwrap(), text.as_bytes());
    }

    #[test]
    fn test_download_is_one_shot() {
        let download = Download::new("gone soon", "tmp").unwrap();
        let path = download.path().to_path_buf();
        assert!(path.exists());
        drop(download);
        assert!(!path.exists());
    }

    #[test]
    fn test_persist_in() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download::new("kept", "Kept Poem").unwrap();
        let temp = download.path().to_path_buf();

        let dest = download.persist_in(dir.path()).unwrap();
        assert_eq!(dest, dir.path().join("Kept_Poem.txt"));
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "kept");
        assert!(!temp.exists());
    }

    #[test]
    fn test_persist_in_stays_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let absolute = other.path().join("escaped");

        for title in ["../up", "sub/dir", "..", absolute.to_str().unwrap()] {
            let download = Download::new("x", title).unwrap();
            let dest = download.persist_in(dir.path()).unwrap();
            assert_eq!(dest.parent(), Some(dir.path()), "{title}");
            assert!(dest.exists(), "{title}");
        }
        assert_eq!(std::fs::read_dir(other.path()).unwrap().count(), 0);
    }
}
