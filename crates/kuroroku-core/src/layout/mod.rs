/// Squarified treemap tiling (Bruls, Huizing, van Wijk).
///
/// Flat layout: every record receives exactly one rectangle whose area is
/// proportional to its size within the caller-supplied bounds; hierarchy is
/// ignored here (the tree view is served by [`crate::model::FileTree`]).
/// Rows are built greedily against the worst-aspect-ratio criterion so
/// rectangles stay close to square.
use crate::model::FileRecord;
use tracing::debug;

/// One positioned rectangle in the treemap strip.
///
/// Coordinates live in the same unit space as the `width`/`height` passed
/// to [`tile`]; the caller performs any on-screen normalization. `record`
/// is a read-only back-reference — correlate results by `record.path`, not
/// by position, since output order is row-completion order rather than
/// input order.
#[derive(Debug, Clone, Copy)]
pub struct TileRect<'a> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub record: &'a FileRecord,
}

impl TileRect<'_> {
    /// Area of this rectangle in layout units.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// The rectangle not yet consumed by emitted rows.
struct FreeRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl FreeRect {
    /// Fixed side length for the next strip: the shorter remaining side.
    #[inline]
    fn short_side(&self) -> f64 {
        if self.w > self.h {
            self.h
        } else {
            self.w
        }
    }
}

/// Compute the squarified tiling of `records` inside `width × height`.
///
/// Degenerate inputs — an empty collection, non-positive bounds, or an
/// all-zero size total — yield an empty vec rather than an error; zero-size
/// records among non-zero ones receive zero-sized rectangles. Rectangle
/// areas sum to `width * height` and interiors never overlap.
pub fn tile<'a>(records: &'a [FileRecord], width: f64, height: f64) -> Vec<TileRect<'a>> {
    if records.is_empty() || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let total: u64 = records.iter().map(|r| r.size).sum();
    if total == 0 {
        return Vec::new();
    }

    // Target areas, sorted descending. Rows always take a consecutive run
    // of this ordering, so min/max within a row are its ends.
    let bounds_area = width * height;
    let mut items: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i, r.size as f64 / total as f64 * bounds_area))
        .collect();
    items.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut rects = Vec::with_capacity(records.len());
    let mut free = FreeRect {
        x: 0.0,
        y: 0.0,
        w: width,
        h: height,
    };

    // Greedy row building: accept a candidate while it does not worsen the
    // row's worst aspect ratio, otherwise flush and start a new row. The
    // row is a consecutive run of the sorted ordering, so its max area is
    // its first entry, its min is the candidate, and a running sum avoids
    // re-summing the row per candidate.
    let mut row: Vec<(usize, f64)> = Vec::new();
    let mut row_sum = 0.0;
    for &(idx, area) in &items {
        let side = free.short_side();
        let accept = match row.first() {
            // An empty row is infinitely bad: always accept.
            None => true,
            Some(&(_, max)) => {
                let (_, min) = row[row.len() - 1];
                let current = worst_aspect(max, min, row_sum, side);
                let trial = worst_aspect(max, area, row_sum + area, side);
                trial <= current
            }
        };

        if accept {
            row.push((idx, area));
            row_sum += area;
        } else {
            flush_row(&row, &mut free, records, &mut rects);
            row.clear();
            row.push((idx, area));
            row_sum = area;
        }
    }
    flush_row(&row, &mut free, records, &mut rects);

    debug!(records = records.len(), rects = rects.len(), "tiled records");
    rects
}

/// Lay out one completed row along the shorter side of the free rectangle.
///
/// Vertical strip (consuming width) when the free rect is wider than tall,
/// horizontal strip (consuming height) otherwise. Strip thickness is the
/// row's area over the fixed side; each item's length is its area over the
/// thickness. An all-zero row degrades to zero-sized rectangles instead of
/// dividing by zero.
fn flush_row<'a>(
    row: &[(usize, f64)],
    free: &mut FreeRect,
    records: &'a [FileRecord],
    out: &mut Vec<TileRect<'a>>,
) {
    if row.is_empty() {
        return;
    }

    let row_area: f64 = row.iter().map(|&(_, a)| a).sum();
    let vertical = free.w > free.h;
    let side = if vertical { free.h } else { free.w };
    let thickness = if side > 0.0 { row_area / side } else { 0.0 };

    let mut offset = 0.0;
    for &(idx, area) in row {
        let length = if thickness > 0.0 { area / thickness } else { 0.0 };
        let rect = if vertical {
            TileRect {
                x: free.x,
                y: free.y + offset,
                width: thickness,
                height: length,
                record: &records[idx],
            }
        } else {
            TileRect {
                x: free.x + offset,
                y: free.y,
                width: length,
                height: thickness,
                record: &records[idx],
            }
        };
        offset += length;
        out.push(rect);
    }

    if vertical {
        free.x += thickness;
        free.w -= thickness;
    } else {
        free.y += thickness;
        free.h -= thickness;
    }
}

/// Worst (highest) aspect ratio a row would have if laid out now.
///
/// `max`/`min` are the largest and smallest areas in the row and `sum` its
/// total; against the fixed side length `L`:
/// `worst = max(L² · max / sum², sum² / (L² · min))`.
/// A zero-area or zero-side row is infinitely bad.
fn worst_aspect(max: f64, min: f64, sum: f64, side: f64) -> f64 {
    if side <= 0.0 || sum <= 0.0 || min <= 0.0 {
        return f64::INFINITY;
    }

    let l2 = side * side;
    let s2 = sum * sum;
    (l2 * max / s2).max(s2 / (l2 * min))
}
