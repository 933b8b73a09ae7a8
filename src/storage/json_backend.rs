use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{KeyValueStore, Result};
use crate::core::utils::{ensure_dir, write_atomic, PathResolver};

const FILE_EXTENSION: &str = "json";

/// File-backed store: each key lives in its own JSON file under `<base>/store`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens the store under `base`, or the default application directory.
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(base);
        let root = PathResolver::store_dir_in(&base);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{FILE_EXTENSION}", encode_key(key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_key)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Escapes every byte outside `[A-Za-z0-9_-]` as `%XX`, so distinct keys map
/// to distinct file names on any filesystem.
pub fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

pub fn decode_key(encoded: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut iter = encoded.bytes();
    while let Some(byte) = iter.next() {
        if byte == b'%' {
            let hi = char::from(iter.next()?).to_digit(16)?;
            let lo = char::from(iter.next()?).to_digit(16)?;
            bytes.push(u8::try_from(hi * 16 + lo).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_key_escapes_path_characters() {
        assert_eq!(encode_key("money-tracker-alice"), "money-tracker-alice");
        assert_eq!(encode_key("money-tracker-../x"), "money-tracker-%2E%2E%2Fx");
        assert_eq!(encode_key("a b%"), "a%20b%25");
    }

    #[test]
    fn decode_key_inverts_encode_key() {
        for key in ["plain", "with space", "slash/and\\back", "ünïcödé", "100%"] {
            assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
        }
        assert_eq!(decode_key("%Z1"), None);
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(store.get("absent").unwrap(), None);
        store.remove("absent").unwrap();
    }

    #[test]
    fn set_overwrites_and_keys_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(Some(dir.path().to_path_buf())).unwrap();
        store.set("money-tracker-a/b", "1").unwrap();
        store.set("money-tracker-a/b", "2").unwrap();
        assert_eq!(store.get("money-tracker-a/b").unwrap().as_deref(), Some("2"));
        assert_eq!(store.keys().unwrap(), ["money-tracker-a/b"]);
        store.remove("money-tracker-a/b").unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
