use tracing::warn;

use crate::domain::entities::address::{is_metadata_key, CellAddress};
use crate::domain::entities::region::Region;

/// Smallest rectangle containing every data cell of a sparse cell map.
///
/// Metadata keys are skipped. The result does not depend on iteration order.
/// `None` means the map holds no data cells at all.
pub fn compute_region<I, K, V, F>(cells: I, decode: F) -> Option<Region>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    F: Fn(&str) -> Option<CellAddress>,
{
    let mut bounds: Option<Region> = None;

    for (key, _) in cells {
        let key = key.as_ref();
        if is_metadata_key(key) {
            continue;
        }

        let Some(address) = decode(key) else {
            warn!(key, "skipping cell key that does not decode to an address");
            continue;
        };

        bounds = Some(match bounds {
            Some(region) => region.expanded_to(address),
            None => Region::single(address),
        });
    }

    bounds
}
