use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::errors::{IntervalSetError, IntervalSetResult};
use crate::utils::get_dynamic_reader;

///
/// Chromosome name to length (in bases) for one assembly.
///
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChromSizes {
    sizes: HashMap<String, u32>,
}

impl ChromSizes {
    pub fn get(&self, chr: &str) -> Option<u32> {
        self.sizes.get(chr).copied()
    }

    pub fn insert<S: Into<String>>(&mut self, chr: S, length: u32) {
        self.sizes.insert(chr.into(), length);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.sizes.iter().map(|(chr, len)| (chr.as_str(), *len))
    }
}

impl From<HashMap<String, u32>> for ChromSizes {
    fn from(sizes: HashMap<String, u32>) -> Self {
        ChromSizes { sizes }
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for ChromSizes {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        ChromSizes {
            sizes: iter.into_iter().map(|(chr, len)| (chr.into(), len)).collect(),
        }
    }
}

impl TryFrom<&Path> for ChromSizes {
    type Error = IntervalSetError;

    ///
    /// Read a `.chrom.sizes` file: one `name<whitespace>length` pair per line.
    ///
    fn try_from(path: &Path) -> IntervalSetResult<Self> {
        let reader = get_dynamic_reader(path)
            .map_err(|e| IntervalSetError::FileReadError(format!("{}: {}", path.display(), e)))?;

        let mut sizes: HashMap<String, u32> = HashMap::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (Some(chr), Some(length)) = (parts.next(), parts.next()) else {
                return Err(IntervalSetError::ChromSizesParseError(line.clone()));
            };
            let length = length
                .parse::<u32>()
                .map_err(|_| IntervalSetError::ChromSizesParseError(line.clone()))?;

            sizes.insert(chr.to_string(), length);
        }

        Ok(ChromSizes { sizes })
    }
}
