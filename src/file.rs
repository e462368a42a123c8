//! File utilities.

use std::fs;
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::to_writer_pretty;

/// Reads the entire file at `path` as UTF-8 text.
pub fn read_text(path: impl AsRef<Path>) -> Result<String, Error> {
    fs::read_to_string(path)
}

/// Writes `lines` to a given `path`, separated by newlines. No newline follows the last line.
pub fn write_lines<L: AsRef<str>>(path: impl AsRef<Path>, lines: &[L]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(line.as_ref().as_bytes())?;
    }
    writer.flush()
}

// JSON-encodes the `value` in pretty-printed form and writes it to a given `path`.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<(), Error> {
    let file = File::create(path)?;
    Ok(to_writer_pretty(file, value)?)
}

pub trait WriteJsonFile<S: Serialize> {
    fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), Error>;
}

impl<S: Serialize> WriteJsonFile<S> for S {
    fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        write_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("drawcheck-file-{}-{name}", std::process::id()))
    }

    #[test]
    fn lines_round_trip_through_text() {
        let path = temp_path("lines.txt");
        write_lines(&path, &["1,2,3", "4,5,6"]).unwrap();
        assert_eq!("1,2,3\n4,5,6", read_text(&path).unwrap());

        write_lines::<String>(&path, &[]).unwrap();
        assert_eq!("", read_text(&path).unwrap());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn json_is_pretty_printed() {
        let path = temp_path("value.json");
        vec![1, 2].write_json_file(&path).unwrap();
        assert_eq!("[\n  1,\n  2\n]", read_text(&path).unwrap());
        fs::remove_file(path).unwrap();
    }
}
