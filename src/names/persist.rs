//! Compact binary form of a [`NameIndex`].
//!
//! The wire record mirrors the in-memory columns: names in sorted order,
//! kinds as ordinals, starts, and ends only when they are not implied by name
//! lengths. Duplicates travel alongside in diversion order. Decoding
//! re-validates everything a builder would have guaranteed.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::index::{DuplicateMap, NameIndex, Occurrence};
use crate::base::{RegionError, RegionKind, RegionResult, SortedNames};

const WIRE_VERSION: u16 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct WireNameIndex {
    version: u16,
    names: Vec<String>,
    kinds: Vec<u16>,
    starts: Vec<u32>,
    ends: Option<Vec<u32>>,
    duplicates: Vec<WireDuplicate>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireDuplicate {
    name: String,
    kind: u16,
    start: u32,
    end: u32,
}

impl<K: RegionKind> NameIndex<K> {
    /// Serialize to the compact binary form.
    pub fn to_bytes(&self) -> RegionResult<Vec<u8>> {
        let wire = WireNameIndex {
            version: WIRE_VERSION,
            names: self.names().iter().map(str::to_owned).collect(),
            kinds: self.iter().map(|r| r.kind().ordinal()).collect(),
            starts: self.iter().map(|r| r.start()).collect(),
            ends: self
                .has_explicit_ends()
                .then(|| self.iter().map(|r| r.end()).collect()),
            duplicates: self
                .duplicates()
                .iter()
                .flat_map(|(name, occurrences)| {
                    occurrences.iter().map(move |d| WireDuplicate {
                        name: name.to_string(),
                        kind: d.kind.ordinal(),
                        start: d.start,
                        end: d.end,
                    })
                })
                .collect(),
        };
        postcard::to_stdvec(&wire).map_err(|e| RegionError::Encode(e.to_string()))
    }

    /// Deserialize from [`to_bytes`](Self::to_bytes) output.
    ///
    /// # Errors
    /// [`RegionError::Decode`] for undecodable bytes, an unknown version,
    /// mismatched column lengths, unsorted or repeated names, empty ranges,
    /// or kind ordinals `K` does not define.
    pub fn from_bytes(bytes: &[u8]) -> RegionResult<Self> {
        let wire: WireNameIndex =
            postcard::from_bytes(bytes).map_err(|e| RegionError::decode(e.to_string()))?;
        if wire.version != WIRE_VERSION {
            return Err(RegionError::decode(format!(
                "unsupported version {}",
                wire.version
            )));
        }
        let len = wire.names.len();
        if wire.kinds.len() != len
            || wire.starts.len() != len
            || wire.ends.as_ref().is_some_and(|ends| ends.len() != len)
        {
            return Err(RegionError::decode("column lengths differ"));
        }

        let names = SortedNames::from_sorted(wire.names.into_iter().map(SmolStr::from).collect())
            .ok_or_else(|| RegionError::decode("names are not strictly ascending"))?;
        let kinds = wire
            .kinds
            .iter()
            .map(|&ordinal| decode_kind(ordinal))
            .collect::<RegionResult<Box<[K]>>>()?;
        for (i, &start) in wire.starts.iter().enumerate() {
            let end = match &wire.ends {
                Some(ends) => Some(ends[i]),
                None => names
                    .as_slice()
                    .get(i)
                    .and_then(|name| super::builder::implicit_end(name, start)),
            };
            match end {
                Some(end) if start < end => {}
                _ => return Err(RegionError::decode(format!("empty region at ordinal {i}"))),
            }
        }

        let mut duplicates = DuplicateMap::new();
        for d in wire.duplicates {
            if d.start >= d.end {
                return Err(RegionError::decode(format!("empty duplicate of '{}'", d.name)));
            }
            let occurrence = Occurrence {
                kind: decode_kind(d.kind)?,
                start: d.start,
                end: d.end,
            };
            duplicates
                .entry(SmolStr::from(d.name))
                .or_insert_with(Vec::new)
                .push(occurrence);
        }

        Ok(Self::from_parts(
            names,
            kinds,
            wire.starts.into_boxed_slice(),
            wire.ends.map(Vec::into_boxed_slice),
            duplicates,
        ))
    }
}

fn decode_kind<K: RegionKind>(ordinal: u16) -> RegionResult<K> {
    K::from_ordinal(ordinal).ok_or_else(|| RegionError::decode(format!("unknown kind {ordinal}")))
}
