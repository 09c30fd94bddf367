//! Level and experience tracking

use super::xp::{ProgressionConfig, XpCurve};

/// Synchronous progression notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionEvent {
    ExperienceGained { amount: u32 },
    LevelUp { level: u32 },
}

pub type ProgressionListener = Box<dyn FnMut(&ProgressionEvent)>;

/// Current level, banked experience, and the curve between them.
///
/// Once `level == max_level` the tracker is terminal and ignores experience.
pub struct ProgressionTracker {
    level: u32,
    exp: u32,
    max_level: u32,
    curve: XpCurve,
    listeners: Vec<ProgressionListener>,
}

impl ProgressionTracker {
    pub fn new(config: &ProgressionConfig) -> Self {
        Self {
            level: 1,
            exp: 0,
            max_level: config.max_level.max(1),
            curve: XpCurve::from(config),
            listeners: Vec::new(),
        }
    }

    /// Register a listener; it runs inline before the triggering call returns
    pub fn subscribe(&mut self, listener: impl FnMut(&ProgressionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: ProgressionEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Bank experience and apply every level-up it pays for.
    ///
    /// Returns the levels reached, in order; one `LevelUp` event fires per entry.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<u32> {
        if self.is_max_level() {
            return Vec::new();
        }

        self.exp = self.exp.saturating_add(amount);
        self.notify(ProgressionEvent::ExperienceGained { amount });

        let mut reached = Vec::new();
        while self.level < self.max_level {
            let needed = self.exp_to_next_level();
            if self.exp < needed {
                break;
            }
            self.exp -= needed;
            self.level += 1;
            log::info!("Level up! Now level {}", self.level);
            reached.push(self.level);
            self.notify(ProgressionEvent::LevelUp { level: self.level });
        }

        if self.is_max_level() {
            self.exp = 0;
        }
        reached
    }

    pub fn current_level(&self) -> u32 {
        self.level
    }

    pub fn current_exp(&self) -> u32 {
        self.exp
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level
    }

    /// XP needed to go from the current level to the next
    pub fn exp_to_next_level(&self) -> u32 {
        self.curve.xp_required(self.level + 1)
    }

    /// Fraction of the way to the next level, 1.0 when nothing is left to earn
    pub fn progress(&self) -> f32 {
        let needed = self.exp_to_next_level();
        if self.is_max_level() || needed == 0 {
            1.0
        } else {
            self.exp as f32 / needed as f32
        }
    }

    pub fn curve(&self) -> &XpCurve {
        &self.curve
    }
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self::new(&ProgressionConfig::default())
    }
}

impl std::fmt::Debug for ProgressionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionTracker")
            .field("level", &self.level)
            .field("exp", &self.exp)
            .field("max_level", &self.max_level)
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}
