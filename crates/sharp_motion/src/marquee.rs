//! Infinite horizontal marquee.
//!
//! The strip holds one cycle of content repeated at least twice. Translating
//! it from 0 to `-distance` and jumping back to 0 is invisible only when
//! `distance` is the measured width of one cycle, so the next copy lands
//! where the first one started.

use crate::config::MarqueeConfig;
use crate::error::{MotionError, MotionResult};
use crate::layout::RowLayout;

/// Items in a marquee row, already duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeStrip {
    items: Vec<String>,
    cycle_len: usize,
}

impl MarqueeStrip {
    /// Wraps pre-duplicated items.
    ///
    /// # Errors
    ///
    /// [`MotionError::MarqueeNotSeamless`] unless the items are one cycle
    /// repeated at least twice.
    pub fn new(items: Vec<String>) -> MotionResult<Self> {
        let cycle_len = Self::find_cycle(&items)?;
        Ok(Self { items, cycle_len })
    }

    /// Builds a strip by repeating `cycle` `copies` times. Any count of two
    /// or more is seamless.
    ///
    /// # Errors
    ///
    /// [`MotionError::MarqueeNotSeamless`] for an empty cycle or fewer than
    /// two copies.
    pub fn from_cycle<S: AsRef<str>>(cycle: &[S], copies: usize) -> MotionResult<Self> {
        if copies < 2 {
            return Err(MotionError::MarqueeNotSeamless {
                reason: format!("need at least 2 copies, got {copies}"),
            });
        }
        let items = std::iter::repeat(cycle)
            .take(copies)
            .flatten()
            .map(|s| s.as_ref().to_owned())
            .collect();
        Self::new(items)
    }

    /// Shortest cycle that tiles `items` at least twice.
    fn find_cycle(items: &[String]) -> MotionResult<usize> {
        if items.is_empty() {
            return Err(MotionError::MarqueeNotSeamless {
                reason: "strip is empty".into(),
            });
        }
        (1..=items.len() / 2)
            .filter(|len| items.len() % len == 0)
            .find(|&len| items.iter().enumerate().all(|(i, item)| *item == items[i % len]))
            .ok_or_else(|| MotionError::MarqueeNotSeamless {
                reason: format!("{} items are not one cycle repeated", items.len()),
            })
    }

    /// Checks the strip is non-empty and made of a repeated cycle.
    ///
    /// # Errors
    ///
    /// [`MotionError::MarqueeNotSeamless`] describing the problem.
    pub fn validate(&self) -> MotionResult<()> {
        let cycle_len = Self::find_cycle(&self.items)?;
        if cycle_len == self.cycle_len {
            Ok(())
        } else {
            Err(MotionError::MarqueeNotSeamless {
                reason: format!("cycle of {} items, expected {}", cycle_len, self.cycle_len),
            })
        }
    }

    /// All items in display order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// One full cycle.
    #[must_use]
    pub fn cycle(&self) -> &[String] {
        &self.items[..self.cycle_len]
    }

    /// How many times the cycle repeats.
    #[must_use]
    pub fn copies(&self) -> usize {
        self.items.len() / self.cycle_len
    }

    /// Width of one cycle when laid out with `layout`, measuring each item
    /// with `measure`.
    pub fn cycle_width(&self, layout: &RowLayout, measure: impl Fn(&str) -> f32) -> f32 {
        let widths: Vec<f32> = self.cycle().iter().map(|s| measure(s.as_str())).collect();
        layout.period(&widths)
    }
}

/// Linear, never-ending translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteLoopAnimator {
    distance: f32,
    period: f64,
    elapsed: f64,
}

impl InfiniteLoopAnimator {
    /// Creates an animator at offset 0 travelling `config.distance`.
    #[must_use]
    pub fn new(config: &MarqueeConfig) -> Self {
        Self {
            distance: config.distance,
            period: config.period,
            elapsed: 0.0,
        }
    }

    /// Creates an animator that travels exactly one cycle of `strip` per
    /// period, so the jump back to 0 lands the next copy where the first
    /// one started.
    ///
    /// # Errors
    ///
    /// [`MotionError::MarqueeNotSeamless`] if the strip does not repeat or
    /// the measured cycle has no positive, finite width.
    pub fn for_strip(
        strip: &MarqueeStrip,
        layout: &RowLayout,
        measure: impl Fn(&str) -> f32,
        config: &MarqueeConfig,
    ) -> MotionResult<Self> {
        strip.validate()?;
        let distance = strip.cycle_width(layout, measure);
        if !(distance.is_finite() && distance > 0.0) {
            return Err(MotionError::MarqueeNotSeamless {
                reason: format!("cycle width {distance} is not a positive length"),
            });
        }
        tracing::debug!(items = strip.items().len(), distance, "marquee ready");
        Ok(Self {
            distance,
            period: config.period,
            elapsed: 0.0,
        })
    }

    /// Pixels travelled per period.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Offset at absolute time `t` seconds.
    #[must_use]
    pub fn offset_at(&self, t: f64) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        let phase = t.rem_euclid(self.period) / self.period;
        -(self.distance * phase as f32)
    }

    /// Advances the clock.
    pub fn advance(&mut self, dt: f64) {
        if self.period > 0.0 {
            // wrapped so precision does not decay over long sessions
            self.elapsed = (self.elapsed + dt).rem_euclid(self.period);
        }
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset_at(self.elapsed)
    }

    /// Seconds into the current cycle.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Loop length in seconds.
    #[must_use]
    pub fn period(&self) -> f64 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_periodic() {
        let marquee = InfiniteLoopAnimator::new(&MarqueeConfig::default());
        assert_eq!(marquee.offset_at(0.0), 0.0);
        assert_eq!(marquee.offset_at(5.0), -250.0);
        assert_eq!(marquee.offset_at(10.0), -500.0);
        assert_eq!(marquee.offset_at(25.0), -250.0);
        assert_eq!(marquee.offset_at(20.0), 0.0);
        for t in [0.0, 3.5, 7.25, 19.0] {
            assert_eq!(marquee.offset_at(t), marquee.offset_at(t + 20.0));
        }
    }

    #[test]
    fn test_advance_wraps() {
        let mut marquee = InfiniteLoopAnimator::new(&MarqueeConfig::default());
        marquee.advance(15.0);
        marquee.advance(10.0);
        assert_eq!(marquee.elapsed(), 5.0);
        assert_eq!(marquee.offset(), -250.0);
    }

    #[test]
    fn test_offset_range() {
        let marquee = InfiniteLoopAnimator::new(&MarqueeConfig::default());
        for i in 0..400 {
            let offset = marquee.offset_at(f64::from(i) * 0.137);
            assert!(offset <= 0.0 && offset > -1000.0);
        }
    }

    #[test]
    fn test_strip_validation() {
        let strip = MarqueeStrip::from_cycle(&["Cold Drinks", "·"], 2).unwrap();
        assert_eq!(strip.items().len(), 4);
        assert_eq!(strip.cycle(), ["Cold Drinks", "·"]);

        let odd = MarqueeStrip::new(vec!["a".into(), "b".into(), "a".into()]);
        assert!(matches!(odd, Err(MotionError::MarqueeNotSeamless { .. })));
        assert!(MarqueeStrip::new(vec!["a".into()]).is_err());

        let mismatched = MarqueeStrip::new(vec!["a".into(), "b".into(), "a".into(), "c".into()]);
        assert!(matches!(mismatched, Err(MotionError::MarqueeNotSeamless { .. })));

        assert!(MarqueeStrip::from_cycle(&["a"], 1).is_err());
        assert!(MarqueeStrip::new(Vec::new()).is_err());
    }

    #[test]
    fn test_odd_copy_counts_are_seamless() {
        let strip = MarqueeStrip::from_cycle(&["Cold Drinks", "·"], 3).unwrap();
        assert_eq!(strip.items().len(), 6);
        assert_eq!(strip.copies(), 3);
        assert_eq!(strip.cycle(), ["Cold Drinks", "·"]);
        assert!(strip.validate().is_ok());
    }

    #[test]
    fn test_loop_travels_one_measured_cycle() {
        let strip = MarqueeStrip::from_cycle(&["Expert Barbers", "·"], 2).unwrap();
        let layout = RowLayout::with_gap(48.0);
        let measure = |s: &str| s.chars().count() as f32 * 22.0;
        let cycle = strip.cycle_width(&layout, measure);
        assert_eq!(cycle, 14.0 * 22.0 + 48.0 + 22.0 + 48.0);

        let marquee =
            InfiniteLoopAnimator::for_strip(&strip, &layout, measure, &MarqueeConfig::default())
                .unwrap();
        assert_eq!(marquee.distance(), cycle);

        // just before the wrap the second copy sits where the first began
        let end = marquee.offset_at(marquee.period() - 1e-9);
        assert!((end + cycle).abs() < 1e-3, "{end} vs -{cycle}");
        assert_eq!(marquee.offset_at(marquee.period()), 0.0);
    }

    #[test]
    fn test_unmeasurable_cycle_is_rejected() {
        let strip = MarqueeStrip::from_cycle(&["a"], 2).unwrap();
        let config = MarqueeConfig::default();
        let zero = InfiniteLoopAnimator::for_strip(&strip, &RowLayout::with_gap(0.0), |_| 0.0, &config);
        assert!(matches!(zero, Err(MotionError::MarqueeNotSeamless { .. })));
    }

    #[test]
    fn test_cycle_width() {
        let strip = MarqueeStrip::from_cycle(&["ab", "·"], 2).unwrap();
        let width = strip.cycle_width(&RowLayout::with_gap(48.0), |s| s.chars().count() as f32 * 10.0);
        assert_eq!(width, 20.0 + 48.0 + 10.0 + 48.0);
    }
}
