/// A smooth scroll between two offsets, sampled from the host's frame clock.
///
/// The tween does not know the time it was requested at: its clock starts on the first
/// [`Self::sample`], so a host that only ticks once a frame has been requested still sees the
/// full animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTween {
    pub from: u64,
    pub to: u64,
    /// `None` until the first sample.
    pub start_ms: Option<u64>,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl ScrollTween {
    pub fn new(from: u64, to: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms: None,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.start_ms
            .is_some_and(|start| now_ms.saturating_sub(start) >= self.duration_ms)
    }

    /// Offset at `now_ms`, starting the clock if this is the first sample. Exactly `to` once done.
    pub fn sample(&mut self, now_ms: u64) -> u64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(start);
        if elapsed >= self.duration_ms {
            return self.to;
        }
        let t = elapsed as f64 / self.duration_ms as f64;
        let eased = self.easing.sample(t);

        let from = self.from as f64;
        let to = self.to as f64;
        let v = (from + (to - from) * eased).max(0.0);
        (v + 0.5) as u64
    }

    /// Heads for `to` from `current`, restarting the clock on the next sample.
    pub fn retarget(&mut self, current: u64, to: u64, duration_ms: u64) {
        *self = Self::new(current, to, duration_ms, self.easing);
    }

    /// Pulls both ends into `[0, max_offset]` after the content shrank.
    ///
    /// Returns `true` if the target moved.
    pub fn clamp_to(&mut self, max_offset: u64) -> bool {
        self.from = self.from.min(max_offset);
        if self.to <= max_offset {
            return false;
        }
        self.to = max_offset;
        true
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    SmoothStep,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
