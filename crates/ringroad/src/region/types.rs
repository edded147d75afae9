//! Region types: closed arcs on a ring and the tagged feasible region.
//!
//! Positions are linear coordinates in `[0, D]` (arc-length from access
//! point A). A region that wraps through A is stored as two arcs, one ending
//! at `D` and one starting at `0`.

/// Closed arc `[lo, hi]` on a ring, `lo <= hi`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingArc {
    pub lo: f64,
    pub hi: f64,
}

impl RingArc {
    /// Arc clipped to the ring domain `[0, d]`.
    #[inline]
    pub fn clamped(lo: f64, hi: f64, d: f64) -> Self {
        let hi = hi.min(d).max(0.0);
        let lo = lo.max(0.0).min(hi);
        Self { lo, hi }
    }

    /// Zero-width arc at `x`.
    #[inline]
    pub fn point(x: f64) -> Self {
        Self { lo: x, hi: x }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn contains_eps(&self, x: f64, eps: f64) -> bool {
        self.lo - eps <= x && x <= self.hi + eps
    }

    /// Endpoints; a degenerate arc contributes its single point.
    fn push_boundary(&self, out: &mut Vec<f64>) {
        out.push(self.lo);
        if !self.is_degenerate() {
            out.push(self.hi);
        }
    }
}

/// Positions on one ring that keep one caller within the threshold.
#[derive(Clone, Debug, PartialEq)]
pub enum FeasibleRegion {
    /// No position on this ring serves the caller.
    Empty,
    /// Exactly one position (threshold equals the best access distance).
    Point(f64),
    /// Union of closed arcs, in the order the case analysis emits them.
    Arcs(Vec<RingArc>),
}

impl FeasibleRegion {
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            FeasibleRegion::Empty => true,
            FeasibleRegion::Point(_) => false,
            FeasibleRegion::Arcs(arcs) => arcs.is_empty(),
        }
    }

    /// Membership with slack `eps` on every boundary.
    pub fn contains(&self, x: f64, eps: f64) -> bool {
        match self {
            FeasibleRegion::Empty => false,
            FeasibleRegion::Point(p) => (x - p).abs() <= eps,
            FeasibleRegion::Arcs(arcs) => arcs.iter().any(|arc| arc.contains_eps(x, eps)),
        }
    }

    /// Flat boundary summary: every arc's endpoints in emission order, with
    /// degenerate arcs collapsed to one value. This is the input of the mean
    /// aggregation and is not an exhaustive position set.
    pub fn boundary_values(&self) -> Vec<f64> {
        match self {
            FeasibleRegion::Empty => Vec::new(),
            FeasibleRegion::Point(p) => vec![*p],
            FeasibleRegion::Arcs(arcs) => {
                let mut out = Vec::with_capacity(2 * arcs.len());
                for arc in arcs {
                    arc.push_boundary(&mut out);
                }
                out
            }
        }
    }

    /// Sorted, merged arcs (points become zero-width arcs).
    pub fn normalized_arcs(&self) -> Vec<RingArc> {
        let mut arcs = match self {
            FeasibleRegion::Empty => return Vec::new(),
            FeasibleRegion::Point(p) => return vec![RingArc::point(*p)],
            FeasibleRegion::Arcs(arcs) => arcs.clone(),
        };
        arcs.sort_by(|x, y| x.lo.total_cmp(&y.lo));
        let mut merged: Vec<RingArc> = Vec::with_capacity(arcs.len());
        for arc in arcs {
            if let Some(last) = merged.last_mut() {
                if arc.lo <= last.hi {
                    last.hi = last.hi.max(arc.hi);
                    continue;
                }
            }
            merged.push(arc);
        }
        merged
    }

    /// Set intersection; boundaries closer than `eps` count as touching.
    pub fn intersect(&self, other: &FeasibleRegion, eps: f64) -> FeasibleRegion {
        let xs = self.normalized_arcs();
        let ys = other.normalized_arcs();
        let mut out = Vec::new();
        let (mut p, mut q) = (0usize, 0usize);
        while p < xs.len() && q < ys.len() {
            let lo = xs[p].lo.max(ys[q].lo);
            let hi = xs[p].hi.min(ys[q].hi);
            if lo <= hi + eps {
                out.push(RingArc { lo, hi: hi.max(lo) });
            }
            if xs[p].hi < ys[q].hi {
                p += 1;
            } else {
                q += 1;
            }
        }
        FeasibleRegion::from_arcs(out)
    }

    /// Collapse an arc list: none → `Empty`, one zero-width arc → `Point`.
    pub(crate) fn from_arcs(arcs: Vec<RingArc>) -> FeasibleRegion {
        match arcs.as_slice() {
            [] => FeasibleRegion::Empty,
            [only] if only.is_degenerate() => FeasibleRegion::Point(only.lo),
            _ => FeasibleRegion::Arcs(arcs),
        }
    }
}
