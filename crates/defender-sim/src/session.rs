//! Per-session state that lives outside the ECS world: wave bookkeeping,
//! score, base health, and the session-wide effect timers.

use defender_core::constants::{
    BASE_HEALTH_START, PELLET_REGEN_TICKS, POWERUP_REGEN_TICKS, SPAWN_INTERVALS_SECS, TICK_RATE,
    TOWER_BOOST_RANGE_FACTOR, WAVE_ENEMY_INCREMENT, WAVE_TIMER_TICKS,
};

/// Wave, score, and timer state for one play session. All timers are
/// tick counters that count down to zero.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current wave, starting at 1.
    pub wave_number: u32,
    pub base_health: i32,
    pub score: u32,
    /// Enemies spawned so far this wave.
    pub spawned: u32,
    /// Enemies destroyed this wave (any cause).
    pub destroyed: u32,
    /// Spawn quota for this wave.
    pub total: u32,
    /// Grace period before spawning begins.
    pub wave_timer: u32,
    /// Countdown to the next enemy spawn.
    pub spawn_timer: u32,
    pub tower_boost_timer: u32,
    pub freeze_timer: u32,
    /// Countdown to the next pellet regeneration. Sits at zero while no
    /// cell is eligible and resets only on successful placement.
    pub pellet_regen_timer: u32,
    pub powerup_regen_timer: u32,
}

impl SessionState {
    /// Fresh session state for wave 1 with the given enemy quota.
    pub fn new(total: u32) -> Self {
        Self {
            wave_number: 1,
            base_health: BASE_HEALTH_START,
            score: 0,
            spawned: 0,
            destroyed: 0,
            total,
            wave_timer: WAVE_TIMER_TICKS,
            spawn_timer: 0,
            tower_boost_timer: 0,
            freeze_timer: 0,
            pellet_regen_timer: PELLET_REGEN_TICKS,
            powerup_regen_timer: POWERUP_REGEN_TICKS,
        }
    }

    /// Ticks between spawns for the current wave. The interval table is
    /// indexed by wave number and clamped at its last entry.
    pub fn spawn_interval_ticks(&self) -> u32 {
        let index = (self.wave_number as usize - 1).min(SPAWN_INTERVALS_SECS.len() - 1);
        (SPAWN_INTERVALS_SECS[index] * TICK_RATE as f64) as u32
    }

    pub fn freeze_active(&self) -> bool {
        self.freeze_timer > 0
    }

    pub fn tower_boost_active(&self) -> bool {
        self.tower_boost_timer > 0
    }

    /// Range multiplier applied to every tower while boosted.
    pub fn tower_range_factor(&self) -> f64 {
        if self.tower_boost_active() {
            TOWER_BOOST_RANGE_FACTOR
        } else {
            1.0
        }
    }

    /// Count the session-wide effect timers down by one tick.
    pub fn tick_effect_timers(&mut self) {
        self.tower_boost_timer = self.tower_boost_timer.saturating_sub(1);
        self.freeze_timer = self.freeze_timer.saturating_sub(1);
    }

    /// Roll over to the next wave: larger quota, fresh counters, and a
    /// new grace period.
    pub fn advance_wave(&mut self) {
        self.wave_number += 1;
        self.spawned = 0;
        self.destroyed = 0;
        self.total += WAVE_ENEMY_INCREMENT;
        self.wave_timer = WAVE_TIMER_TICKS;
        self.spawn_timer = 0;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(0)
    }
}
