//! Tiling engine: pure master-stack layout computation
//!
//! A pure function from (window count, output rectangle) to per-window
//! geometry. The first `nmaster` windows of the workspace's creation order
//! form the master column; the rest stack into the remaining width.
//!
//! Heights use a running division: each window consumes its fair share of
//! whatever height *remains* in its column. With truncating integer math
//! this differs from dividing up front by a constant (the last window
//! absorbs the rounding slack, so column heights always sum to the full
//! output height).

use crate::models::Rect;

pub const DEFAULT_NMASTER: usize = 1;
pub const DEFAULT_MFACT: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct TilingEngine {
    pub nmaster: usize,
    pub mfact: f64,
}

impl Default for TilingEngine {
    fn default() -> Self {
        TilingEngine {
            nmaster: DEFAULT_NMASTER,
            mfact: DEFAULT_MFACT,
        }
    }
}

impl TilingEngine {
    pub fn new(nmaster: usize, mfact: f64) -> Self {
        TilingEngine { nmaster, mfact }
    }

    /// Compute geometry for `n` windows inside `area`, master column first.
    ///
    /// Returns one rect per window in the same order the caller enumerates
    /// the workspace's creation order. Empty input yields no rects.
    pub fn layout(&self, n: usize, area: Rect) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }

        let master_width = if n > self.nmaster {
            if self.nmaster > 0 {
                (area.width as f64 * self.mfact) as i32
            } else {
                0
            }
        } else {
            area.width
        };

        let master_slots = n.min(self.nmaster);
        let mut master_used = 0;
        let mut stack_used = 0;
        let mut rects = Vec::with_capacity(n);

        for i in 0..n {
            if i < self.nmaster {
                let height = (area.height - master_used) / (master_slots - i) as i32;
                rects.push(Rect::new(area.x, area.y + master_used, master_width, height));
                master_used += height;
            } else {
                let height = (area.height - stack_used) / (n - i) as i32;
                rects.push(Rect::new(
                    area.x + master_width,
                    area.y + stack_used,
                    area.width - master_width,
                    height,
                ));
                stack_used += height;
            }
        }

        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: Rect = Rect {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    };

    #[test]
    fn zero_windows_yield_no_rects() {
        assert!(TilingEngine::default().layout(0, OUTPUT).is_empty());
    }

    #[test]
    fn single_window_fills_the_output() {
        let rects = TilingEngine::default().layout(1, OUTPUT);
        assert_eq!(rects, vec![OUTPUT]);
    }

    #[test]
    fn two_windows_split_at_mfact() {
        let rects = TilingEngine::default().layout(2, OUTPUT);
        assert_eq!(rects[0], Rect::new(0, 0, 960, 1080));
        assert_eq!(rects[1], Rect::new(960, 0, 960, 1080));
    }

    #[test]
    fn stack_heights_sum_to_output_height() {
        for n in 2..8 {
            let rects = TilingEngine::default().layout(n, OUTPUT);
            let stack_total: i32 = rects[1..].iter().map(|r| r.height).sum();
            assert_eq!(stack_total, OUTPUT.height, "n = {n}");
            assert_eq!(rects[0].height, OUTPUT.height);
        }
    }

    #[test]
    fn running_division_absorbs_rounding_in_the_last_window() {
        // 1080 / 7 truncates; the running division hands the slack to the
        // final stack window instead of losing it.
        let rects = TilingEngine::default().layout(8, OUTPUT);
        let heights: Vec<i32> = rects[1..].iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![154, 154, 154, 154, 154, 155, 155]);
    }

    #[test]
    fn multiple_master_slots_share_the_master_column() {
        let engine = TilingEngine::new(2, 0.5);
        let rects = engine.layout(3, OUTPUT);
        assert_eq!(rects[0], Rect::new(0, 0, 960, 540));
        assert_eq!(rects[1], Rect::new(0, 540, 960, 540));
        assert_eq!(rects[2], Rect::new(960, 0, 960, 1080));
    }

    #[test]
    fn zero_nmaster_collapses_the_master_column() {
        let engine = TilingEngine::new(0, 0.5);
        let rects = engine.layout(2, OUTPUT);
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[0].width, 1920);
        assert_eq!(rects[0].height, 540);
        assert_eq!(rects[1].height, 540);
    }
}
