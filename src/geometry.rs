use crate::types::BoundingBox;

fn clamp_coord(value: i64, dimension: u32) -> i64 {
    let upper = (i64::from(dimension) - 1).max(0);
    value.max(0).min(upper)
}

/// Clamp a raw box into `[0, width-1] x [0, height-1]`.
///
/// Never fails. A box lying entirely outside the image collapses onto the
/// nearest edge and comes back degenerate.
pub fn clamp_bbox(bbox: &BoundingBox, width: u32, height: u32) -> BoundingBox {
    BoundingBox {
        xmin: clamp_coord(bbox.xmin, width),
        ymin: clamp_coord(bbox.ymin, height),
        xmax: clamp_coord(bbox.xmax, width),
        ymax: clamp_coord(bbox.ymax, height),
    }
}
