use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeysegError;
use crate::reader::SegmentedWindowReader;
use crate::segment::Segment;

/// One named fixed-width field of a blob.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub len: usize,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }
}

/// Ordered description of a binary blob as consecutive named fields.
///
/// Parses from the compact `name:len,name:len` form or from JSON shaped as
/// `{"fields": [{"name": "public", "len": 32}, ...]}`. Both paths go through
/// the same validation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawLayout")]
pub struct FieldLayout {
    fields: Vec<FieldDef>,
}

#[derive(Deserialize)]
struct RawLayout {
    fields: Vec<FieldDef>,
}

impl TryFrom<RawLayout> for FieldLayout {
    type Error = KeysegError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        FieldLayout::new(raw.fields)
    }
}

impl FieldLayout {
    /// Build a layout from `fields`, trimming whitespace around each name.
    pub fn new(fields: Vec<FieldDef>) -> Result<Self, KeysegError> {
        let fields = fields
            .into_iter()
            .map(|mut field| {
                let trimmed = field.name.trim();
                if trimmed.len() != field.name.len() {
                    field.name = trimmed.to_owned();
                }
                field
            })
            .collect();
        let layout = Self { fields };
        layout.validate()?;
        Ok(layout)
    }

    /// Check the layout is usable: at least one field, every name non-empty
    /// and unique, no zero-width fields and a total width that fits `usize`.
    pub fn validate(&self) -> Result<(), KeysegError> {
        if self.fields.is_empty() {
            return Err(invalid("layout has no fields"));
        }
        let mut seen = HashSet::with_capacity(self.fields.len());
        let mut total = 0usize;
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(invalid("field name is empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field `{}`", field.name)));
            }
            if field.len == 0 {
                return Err(invalid(format!("field `{}` has zero width", field.name)));
            }
            total = total
                .checked_add(field.len)
                .ok_or_else(|| invalid("total layout width overflows"))?;
        }
        Ok(())
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Combined width of every field.
    pub fn total_len(&self) -> usize {
        self.fields.iter().map(|f| f.len).sum()
    }

    /// Split `data` into one zero-copy view per field, in layout order.
    ///
    /// Bytes past the end of the layout are returned as `trailing`. A blob
    /// shorter than the layout fails with [`KeysegError::OutOfRange`].
    pub fn split<'l, 'a>(&'l self, data: &'a [u8]) -> Result<SplitFields<'l, 'a>, KeysegError> {
        let mut reader = SegmentedWindowReader::new(Segment::whole(data));
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            fields.push((field.name.as_str(), reader.read(field.len)?));
        }
        let trailing = Segment::new(data, self.total_len(), reader.remaining())?;
        Ok(SplitFields { fields, trailing })
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, field) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", field.name, field.len)?;
        }
        Ok(())
    }
}

impl FromStr for FieldLayout {
    type Err = KeysegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                let (name, len) = part
                    .split_once(':')
                    .ok_or_else(|| invalid(format!("expected name:len, got `{part}`")))?;
                let len = len
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| invalid(format!("bad width for `{}`: {e}", name.trim())))?;
                Ok(FieldDef::new(name.trim(), len))
            })
            .collect::<Result<Vec<_>, KeysegError>>()?;
        FieldLayout::new(fields)
    }
}

/// Result of [`FieldLayout::split`].
#[derive(Debug)]
pub struct SplitFields<'l, 'a> {
    pub fields: Vec<(&'l str, Segment<'a, u8>)>,
    pub trailing: Segment<'a, u8>,
}

impl<'a> SplitFields<'_, 'a> {
    /// Look a field up by name.
    pub fn get(&self, name: &str) -> Option<Segment<'a, u8>> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, seg)| *seg)
    }
}

fn invalid(msg: impl Into<String>) -> KeysegError {
    KeysegError::InvalidConfiguration(msg.into())
}
