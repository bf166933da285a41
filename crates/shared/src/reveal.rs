use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be inside the viewport
    pub threshold: f64,
    /// Shrinks the viewport from the bottom edge
    pub bottom_margin: f64,
    /// Animation delay added per element position
    pub stagger: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
            stagger: Duration::from_millis(50),
        }
    }
}

/// Fraction of an element (`top`, `height`, in viewport coordinates) that lies
/// inside `[0, viewport_height - bottom_margin]`.
pub fn intersection_ratio(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    let view_bottom = (viewport_height - bottom_margin).max(0.0);

    if height <= 0.0 {
        return if top >= 0.0 && top <= view_bottom {
            1.0
        } else {
            0.0
        };
    }

    let visible = (top + height).min(view_bottom) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

/// One-shot reveal bookkeeping for a fixed list of observed elements.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    fired: Vec<bool>,
    options: RevealOptions,
}

impl RevealTracker {
    pub fn new(count: usize, options: RevealOptions) -> Self {
        Self {
            fired: vec![false; count],
            options,
        }
    }

    /// Delay applied to element `idx` before its entrance animation starts.
    pub fn initial_delay(&self, idx: usize) -> Duration {
        let idx = u32::try_from(idx).unwrap_or(u32::MAX);
        self.options.stagger.saturating_mul(idx)
    }

    /// Records a visibility sample. Returns `true` exactly once per element: the
    /// first time its ratio reaches the threshold. Afterwards it is unobserved.
    pub fn observe(&mut self, idx: usize, ratio: f64) -> bool {
        let threshold = self.options.threshold;
        match self.fired.get_mut(idx) {
            Some(fired) if !*fired && ratio > 0.0 && ratio >= threshold => {
                *fired = true;
                true
            }
            _ => false,
        }
    }

    /// Geometry convenience over [`RevealTracker::observe`].
    pub fn observe_rect(&mut self, idx: usize, top: f64, height: f64, viewport_height: f64) -> bool {
        let ratio = intersection_ratio(top, height, viewport_height, self.options.bottom_margin);
        self.observe(idx, ratio)
    }

    pub fn has_fired(&self, idx: usize) -> bool {
        self.fired.get(idx).copied().unwrap_or(false)
    }

    pub fn pending(&self) -> usize {
        self.fired.iter().filter(|fired| !**fired).count()
    }

    pub fn is_done(&self) -> bool {
        self.pending() == 0
    }
}
