use std::fmt;
use std::str::FromStr;

use keyseg_core::{FieldLayout, KeysegError, SeekOrigin, Segment, SegmentedWindowReader};
use serde::Serialize;

use crate::encoding::Encoding;

/// One `origin:offset` step of the `window` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekArg {
    pub origin: SeekOrigin,
    pub offset: isize,
}

impl FromStr for SeekArg {
    type Err = KeysegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (origin, offset) = s.split_once(':').ok_or_else(|| {
            KeysegError::InvalidConfiguration(format!("expected origin:offset, got `{s}`"))
        })?;
        let offset = offset.trim().parse::<isize>().map_err(|e| {
            KeysegError::InvalidConfiguration(format!("bad seek offset `{}`: {e}", offset.trim()))
        })?;
        Ok(SeekArg {
            origin: origin.parse()?,
            offset,
        })
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldReport {
    pub name: String,
    pub offset: usize,
    pub len: usize,
    pub value: String,
}

impl FieldReport {
    fn new(name: &str, segment: Segment<'_, u8>, encoding: Encoding) -> Self {
        Self {
            name: name.to_string(),
            offset: segment.offset(),
            len: segment.len(),
            value: encoding.encode(&segment),
        }
    }
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} @{:<6} {:>5}B  {}",
            self.name, self.offset, self.len, self.value
        )
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SplitReport {
    pub layout: String,
    pub blob_len: usize,
    pub fields: Vec<FieldReport>,
    pub trailing: Option<FieldReport>,
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "layout {} over {} bytes", self.layout, self.blob_len)?;
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        if let Some(trailing) = &self.trailing {
            writeln!(f, "{trailing}")?;
        }
        Ok(())
    }
}

/// Split `blob` by `layout` and render every field.
pub fn split(
    layout: &FieldLayout,
    blob: &[u8],
    encoding: Encoding,
) -> Result<SplitReport, KeysegError> {
    let split = layout.split(blob)?;
    let fields = split
        .fields
        .iter()
        .map(|(name, segment)| FieldReport::new(name, *segment, encoding))
        .collect();
    let trailing = (!split.trailing.is_empty())
        .then(|| FieldReport::new("<trailing>", split.trailing, encoding));
    tracing::debug!(
        fields = layout.fields().len(),
        trailing = split.trailing.len(),
        "blob split"
    );
    Ok(SplitReport {
        layout: layout.to_string(),
        blob_len: blob.len(),
        fields,
        trailing,
    })
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WindowReport {
    pub start: isize,
    pub end: isize,
    pub window: FieldReport,
}

impl fmt::Display for WindowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cursor {} -> {}", self.start, self.end)?;
        writeln!(f, "{}", self.window)
    }
}

/// Apply `seeks` in order, then read `count` bytes from wherever the cursor
/// ends up.
pub fn window(
    blob: &[u8],
    seeks: &[SeekArg],
    count: usize,
    encoding: Encoding,
) -> Result<WindowReport, KeysegError> {
    let mut reader = SegmentedWindowReader::new(Segment::whole(blob));
    for step in seeks {
        let position = reader.seek(step.offset, step.origin);
        tracing::debug!(origin = %step.origin, offset = step.offset, position, "seek");
    }
    let start = reader.position();
    let segment = reader.read(count)?;
    Ok(WindowReport {
        start,
        end: reader.position(),
        window: FieldReport::new("window", segment, encoding),
    })
}
