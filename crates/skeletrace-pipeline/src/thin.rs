//! Topological thinning: erode a foreground mask to a 1-pixel-wide,
//! connectivity-preserving skeleton.
//!
//! Phase A is the invariant-thinning automaton of Eckhardt & Maderlechner
//! (1993): each round classifies every interior pixel from its
//! 8-neighborhood (interior / boundary, inner-boundary, simple-boundary,
//! perfect-inner-boundary) and removes the pixels whose deletion provably
//! keeps the foreground connected, plus thin protrusions whose distance
//! value marks them as noise rather than structure. Rounds repeat until a
//! fixpoint or the iteration cap.
//!
//! Phase B is a single template sweep that clips remaining one-sided spur
//! pixels: a pixel is cleared when one side of its encoded neighborhood is
//! empty and the opposite side fully occupied.
//!
//! Border pixels are cleared before and after Phase A so that edge
//! artifacts never seed spurious skeleton structure.

use crate::binarize::BinaryMask;
use crate::distance::DistanceField;
use crate::grid::PixelGrid;
use crate::types::{Dimensions, PipelineError, SkeletonConfig};

/// Parameters for [`thin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinParams {
    /// Mask value treated as background (0 or 1).
    pub background: u8,
    /// Upper bound on Phase A rounds.
    pub max_iterations: usize,
    /// Fraction of the peak distance value below which a single-neighbor
    /// pixel is pruned as a protrusion.
    pub tip_prune_factor: f64,
}

impl Default for ThinParams {
    fn default() -> Self {
        Self {
            background: 0,
            max_iterations: SkeletonConfig::DEFAULT_MAX_ITERATIONS,
            tip_prune_factor: SkeletonConfig::DEFAULT_TIP_PRUNE_FACTOR,
        }
    }
}

/// A thinned 0/1 mask: the 1-pixel-wide centerline of the input shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonMask {
    grid: PixelGrid<u8>,
    rounds: usize,
}

impl SkeletonMask {
    pub(crate) const fn from_grid(grid: PixelGrid<u8>, rounds: usize) -> Self {
        Self { grid, rounds }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Mask dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Skeleton value at `(x, y)`: 0 or 1.
    #[must_use]
    pub fn value(&self, x: u32, y: u32) -> u8 {
        *self.grid.get(x, y)
    }

    /// The underlying row-major 0/1 buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.grid.data()
    }

    /// Number of skeleton pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.grid.data().iter().filter(|&&v| v == 1).count()
    }

    /// Number of Phase A rounds it took to converge (or the cap).
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Encoded 8-neighborhood of the pixel at `(x, y)`.
    ///
    /// See [`encode_neighborhood`] for the bit layout.
    #[must_use]
    pub fn neighborhood(&self, x: u32, y: u32) -> u8 {
        encode_neighborhood(
            self.grid.data(),
            self.grid.width() as usize,
            self.grid.height() as usize,
            self.grid.index(x, y),
        )
    }
}

/// Encode a pixel's 8-neighborhood as one bit per compass direction.
///
/// Bit layout (bit 0 = least significant):
///
/// ```text
///   NW(0) N(1) NE(2)
///    W(7)       E(3)
///   SW(6) S(5) SE(4)
/// ```
///
/// Out-of-bounds neighbors read as 0, so the encoding is safe on border
/// pixels.
pub(crate) fn encode_neighborhood(data: &[u8], width: usize, height: usize, k: usize) -> u8 {
    let x = k % width;
    let y = k / width;
    let mut bits = 0u8;

    let mut probe = |dx: isize, dy: isize, bit: u8| {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
            let idx = ny as usize * width + nx as usize;
            bits |= (data[idx] & 1) << bit;
        }
    };

    probe(-1, -1, 0); // NW
    probe(0, -1, 1); // N
    probe(1, -1, 2); // NE
    probe(1, 0, 3); // E
    probe(1, 1, 4); // SE
    probe(0, 1, 5); // S
    probe(-1, 1, 6); // SW
    probe(-1, 0, 7); // W

    bits
}

/// Thin `mask` down to its skeleton, guided by `distance`.
///
/// Runs Phase A (iterative classification-removal) until no pixel changes
/// or `params.max_iterations` rounds have passed, then the Phase B
/// template sweep. The distance field steers tip pruning: a pixel with a
/// single neighbor is eroded while its distance value stays below
/// `tip_prune_factor` × the field's maximum, so shallow protrusions melt
/// away while genuinely thick limbs keep their endpoints.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] when `mask` and
/// `distance` disagree on dimensions.
pub fn thin(
    mask: &BinaryMask,
    distance: &DistanceField,
    params: &ThinParams,
) -> Result<SkeletonMask, PipelineError> {
    if mask.dimensions() != distance.dimensions() {
        return Err(PipelineError::dimension_mismatch(
            mask.dimensions(),
            distance.dimensions(),
        ));
    }

    let w = mask.width() as usize;
    let h = mask.height() as usize;

    let mut data: Vec<u8> = mask
        .data()
        .iter()
        .map(|&v| u8::from(v != params.background))
        .collect();

    if w < 3 || h < 3 {
        // Nothing interior: the cleared border covers the whole image.
        clear_border(&mut data, w, h);
        let grid = PixelGrid::from_raw(mask.width(), mask.height(), data)
            .unwrap_or_else(|| PixelGrid::new(mask.width(), mask.height()));
        return Ok(SkeletonMask::from_grid(grid, 0));
    }

    let threshold = params.tip_prune_factor * f64::from(distance.max_value());

    clear_border(&mut data, w, h);
    let rounds = erode(
        &mut data,
        w,
        h,
        distance.data(),
        threshold,
        params.max_iterations,
    );
    clear_border(&mut data, w, h);
    clip_spurs(&mut data, w, h);

    let grid = PixelGrid::from_raw(mask.width(), mask.height(), data)
        .unwrap_or_else(|| PixelGrid::new(mask.width(), mask.height()));
    Ok(SkeletonMask::from_grid(grid, rounds))
}

/// Zero the first/last row and column.
fn clear_border(data: &mut [u8], w: usize, h: usize) {
    if w == 0 || h == 0 {
        return;
    }
    for i in 0..w {
        data[i] = 0;
        data[(h - 1) * w + i] = 0;
    }
    for j in 0..h {
        data[j * w] = 0;
        data[j * w + (w - 1)] = 0;
    }
}

/// Pixel classification for one Phase A round.
const BACKGROUND: u8 = 0;
const BOUNDARY: u8 = 1;
const INTERIOR: u8 = 2;

/// Phase A: iterative classification-removal. Returns the number of
/// rounds executed.
fn erode(
    data: &mut [u8],
    w: usize,
    h: usize,
    distance: &[u32],
    threshold: f64,
    max_iterations: usize,
) -> usize {
    let size = w * h;
    let inf = w + 1;
    let sup = size - w - 1;

    // Per-pixel flags, allocated once and rewritten each round. Cells
    // outside the interior range keep their zero/false initial values,
    // which is exactly the classification of the cleared border.
    let mut class = vec![BACKGROUND; size];
    let mut neighbor_count = vec![0u8; size];
    let mut inner = vec![false; size];
    let mut simple = vec![false; size];
    let mut perfect = vec![false; size];
    let mut next = data.to_vec();

    let mut rounds = 0;
    let mut found = true;

    while found && rounds < max_iterations {
        found = false;

        // Interior / boundary classification plus neighbor counts.
        for k in inf..sup {
            let strong = data[k - 1] + data[k + 1] + data[k - w] + data[k + w];
            let diagonal = data[k - w - 1] + data[k - w + 1] + data[k + w - 1] + data[k + w + 1];
            neighbor_count[k] = strong + diagonal;
            class[k] = if data[k] == 0 {
                BACKGROUND
            } else if strong == 4 {
                INTERIOR
            } else {
                BOUNDARY
            };
        }

        // Inner boundary: a boundary pixel with an interior axis neighbor.
        for k in inf..sup {
            inner[k] = data[k] != 0
                && class[k] == BOUNDARY
                && (class[k + 1] == INTERIOR
                    || class[k - 1] == INTERIOR
                    || class[k + w] == INTERIOR
                    || class[k - w] == INTERIOR);
        }

        // Simple boundary: exactly one connected run of foreground in the
        // 8-neighborhood (crossing-number test) plus an axis neighbor.
        for k in inf..sup {
            simple[k] = data[k] != 0 && class[k] == BOUNDARY && is_simple(data, w, k);
        }

        // Perfect inner boundary: removal cannot cut an interior neighbor
        // off, witnessed by an interior axis neighbor whose opposite
        // pixel is already background.
        for k in inf..sup {
            perfect[k] = inner[k]
                && ((class[k + 1] == INTERIOR && data[k - 1] == 0)
                    || (class[k - 1] == INTERIOR && data[k + 1] == 0)
                    || (class[k + w] == INTERIOR && data[k - w] == 0)
                    || (class[k - w] == INTERIOR && data[k + w] == 0));
        }

        // Removal. Simple+perfect pixels and shallow single-neighbor tips
        // keep the round going; fully isolated pixels are dropped without
        // extending the loop.
        next.copy_from_slice(data);
        for k in inf..sup {
            if data[k] == 0 {
                continue;
            }
            if simple[k] && perfect[k] {
                next[k] = 0;
                found = true;
            } else if neighbor_count[k] == 0 {
                next[k] = 0;
            } else if neighbor_count[k] == 1 && f64::from(distance[k]) < threshold {
                next[k] = 0;
                found = true;
            }
        }
        data.copy_from_slice(&next);

        rounds += 1;
    }

    rounds
}

/// Crossing-number simplicity test.
///
/// Walk the 8 neighbors in ring order (E, NE, N, NW, W, SW, S, SE) and
/// count 0→1 transitions; the pixel is simple when there is exactly one
/// transition, or none with all eight neighbors set. Requires at least one
/// axis neighbor so that removal cannot strand a diagonal-only link.
fn is_simple(data: &[u8], w: usize, k: usize) -> bool {
    let p0 = data[k + 1] & 1;
    let p1 = data[k - w + 1] & 1;
    let p2 = data[k - w] & 1;
    let p3 = data[k - w - 1] & 1;
    let p4 = data[k - 1] & 1;
    let p5 = data[k + w - 1] & 1;
    let p6 = data[k + w] & 1;
    let p7 = data[k + w + 1] & 1;

    let transitions = (1 - p0) * p1
        + (1 - p1) * p2
        + (1 - p2) * p3
        + (1 - p3) * p4
        + (1 - p4) * p5
        + (1 - p5) * p6
        + (1 - p6) * p7
        + (1 - p7) * p0;
    let set = p0 + p1 + p2 + p3 + p4 + p5 + p6 + p7;

    let single_run = transitions == 1 || (transitions == 0 && set == 8);
    single_run && (p0 | p2 | p4 | p6) != 0
}

/// Phase B: clip one-sided spur pixels in a single in-place sweep.
///
/// Each template pairs an empty side (three consecutive directions off)
/// with a full opposite side; matching pixels can be removed without
/// breaking connectivity. Masks follow the [`encode_neighborhood`] bit
/// layout.
fn clip_spurs(data: &mut [u8], w: usize, h: usize) {
    const TEMPLATES: [(u8, u8); 8] = [
        (0x07, 0x70), // NW+N+NE empty, SE+S+SW full
        (0x0E, 0xA0), // N+NE+E empty, S+W full
        (0x1C, 0xC1), // NE+E+SE empty, W+SW+NW full
        (0x38, 0x82), // E+SE+S empty, N+W full
        (0x70, 0x07), // SE+S+SW empty, NW+N+NE full
        (0xE0, 0x0A), // S+SW+W empty, N+E full
        (0xC1, 0x1C), // SW+W+NW empty, NE+E+SE full
        (0x83, 0x28), // W+NW+N empty, E+S full
    ];

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let k = y * w + x;
            if data[k] & 1 == 0 {
                continue;
            }
            let v = encode_neighborhood(data, w, h, k);
            if TEMPLATES
                .iter()
                .any(|&(empty, full)| v & empty == 0 && v & full == full)
            {
                data[k] = 0;
            }
        }
    }
}
