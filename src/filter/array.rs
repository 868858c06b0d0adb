use crate::descriptor::parse_descriptor;
use crate::error::Result;
use crate::node::DataNode;
use crate::validate::PatternCache;

use super::filter_field;

/// Filter a list against a homogeneous schema.
///
/// Only `spec[0]` is parsed and applied to every item; further descriptors
/// are ignored. `None` data or an empty spec yields an empty list. Items that
/// resolve to `null` scalars are dropped, the rest keep their input order.
pub fn filter_array(data: Option<&[DataNode]>, spec: &[DataNode]) -> Result<Vec<DataNode>> {
    filter_array_with(data, spec, &PatternCache::new())
}

pub(crate) fn filter_array_with<'a>(
    data: Option<&[DataNode]>,
    spec: &'a [DataNode],
    patterns: &PatternCache<'a>,
) -> Result<Vec<DataNode>> {
    let (Some(items), Some(first)) = (data, spec.first()) else {
        return Ok(Vec::new());
    };

    let fd = parse_descriptor(first)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(kept) = filter_field(item, &fd, patterns)? {
            out.push(kept);
        }
    }

    Ok(out)
}
