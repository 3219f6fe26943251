/*
storage.rs

Copyright 2026 The Math Buster contributors

This file is part of Math Buster.

Math Buster is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Math Buster is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Math Buster. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Key-value storage for the saved data.

use log::debug;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Key-value store that keeps each value as a whole.
pub trait Storage: Send {
    /// Return the value for the given key, or None if the key does not exist.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replace the value for the given key.
    fn write(&mut self, key: &str, data: &[u8]) -> io::Result<()>;
}

/// Object to store the values in files, one JSON file per key.
pub struct FileStorage {
    /// Absolute path to the directory that contains the files.
    data_dir: PathBuf,
}

impl FileStorage {
    /// Create a [`FileStorage`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the values must be saved.
    /// The directory is created on the first write.
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Data directory: {data_dir:?}");
        Self { data_dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let mut file: File = match File::open(self.path(key)) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(error),
            },
        };
        let mut data: Vec<u8> = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    fn write(&mut self, key: &str, data: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        // Write a temporary file first and then rename it, so that a failure never leaves a
        // partially written file behind
        let path: PathBuf = self.path(key);
        let tmp_path: PathBuf = path.with_extension("json.tmp");
        let result: io::Result<()> =
            write_file(&tmp_path, data).and_then(|()| fs::rename(&tmp_path, &path));
        if result.is_err()
            && let Err(error) = fs::remove_file(&tmp_path)
        {
            debug!("Cannot remove {tmp_path:?}: {error}");
        }
        result
    }
}

fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let file: File = File::create(path)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()
}

/// Object to keep the values in memory. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &[u8]) -> io::Result<()> {
        self.entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}
