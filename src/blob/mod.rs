use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::Context;

use crate::encoding::Encoding;

/// Read a blob from a file, or from stdin when `source` is `-`, and decode it.
pub fn read_blob(source: &Path, encoding: Encoding) -> anyhow::Result<Vec<u8>> {
    let raw = if source == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("read blob from stdin")?;
        buf
    } else {
        fs::read(source).with_context(|| format!("read blob {}", source.display()))?
    };
    let blob = encoding
        .decode(&raw)
        .with_context(|| format!("decode blob as {encoding}"))?;
    tracing::debug!(bytes = blob.len(), %encoding, "blob decoded");
    Ok(blob)
}

pub fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_decodes_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.hex");
        fs::write(&path, "00ff10\n").unwrap();

        let blob = read_blob(&path, Encoding::Hex).unwrap();
        assert_eq!(blob, vec![0x00, 0xff, 0x10]);

        let raw = read_blob(&path, Encoding::Raw).unwrap();
        assert_eq!(raw, b"00ff10\n".to_vec());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.hex");
        let err = read_blob(&path, Encoding::Hex).unwrap_err();
        assert!(format!("{err:#}").contains("absent.hex"));
    }

    #[test]
    fn write_text_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys/nested/pk.hex");
        write_text(&path, "abcd").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "abcd");
    }
}
