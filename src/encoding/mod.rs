use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use keyseg_core::KeysegError;

/// How blobs are encoded on input and rendered on output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
    /// Raw bytes on input; rendered as hex on output.
    Raw,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Raw => "raw",
        }
    }

    pub fn decode(&self, input: &[u8]) -> anyhow::Result<Vec<u8>> {
        match self {
            Encoding::Raw => Ok(input.to_vec()),
            Encoding::Hex => {
                let text = compact_text(input)?;
                Ok(hex::decode(text)?)
            }
            Encoding::Base64 => {
                let text = compact_text(input)?;
                Ok(general_purpose::STANDARD.decode(text)?)
            }
        }
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Base64 => general_purpose::STANDARD.encode(bytes),
            Encoding::Hex | Encoding::Raw => hex::encode(bytes),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = KeysegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Encoding::Hex),
            "base64" | "b64" => Ok(Encoding::Base64),
            "raw" | "bin" => Ok(Encoding::Raw),
            _ => Err(KeysegError::UnknownEnumerationValue {
                kind: "encoding",
                value: s.to_string(),
            }),
        }
    }
}

// text encodings tolerate line breaks and surrounding blanks
fn compact_text(input: &[u8]) -> anyhow::Result<String> {
    let text = std::str::from_utf8(input)?;
    Ok(text.chars().filter(|c| !c.is_ascii_whitespace()).collect())
}
