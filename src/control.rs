use std::collections::VecDeque;

use rand::Rng;

use crate::config::{CylinderConfig, OperatingResetPolicy};
use crate::error::CylinderResult;
use crate::readout::{read_cylinder, CylinderReadout};
use crate::simulation::{Cylinder, OperationMode};
use crate::timers::{Scheduler, TimerEvent, VirtualClock};

/// Owns a cylinder together with the timers that drive it.
///
/// At most one mode tick is armed at a time. Every (re)arm bumps a generation
/// counter and ticks carrying an older generation are dropped, so a tick that
/// was already queued when its mode ended cannot move the rod.
pub struct CylinderController<S: Scheduler, R> {
    cylinder: Cylinder,
    config: CylinderConfig,
    scheduler: S,
    rng: R,
    mode_tick: Option<S::Handle>,
    tick_generation: u64,
    operating_resets: VecDeque<S::Handle>,
    operating_generation: u64,
    running: bool,
}

impl<S: Scheduler, R: Rng> CylinderController<S, R> {
    /// Build a controller and run the mount-time derived recompute.
    pub fn new(config: CylinderConfig, scheduler: S, mut rng: R) -> CylinderResult<Self> {
        config.validate()?;
        let mut cylinder = Cylinder::new(&config);
        cylinder.refresh(&mut rng);

        let mut controller = Self {
            cylinder,
            config,
            scheduler,
            rng,
            mode_tick: None,
            tick_generation: 0,
            operating_resets: VecDeque::new(),
            operating_generation: 0,
            running: true,
        };
        controller.arm_mode_tick();
        Ok(controller)
    }

    pub fn cylinder(&self) -> &Cylinder {
        &self.cylinder
    }

    pub fn config(&self) -> &CylinderConfig {
        &self.config
    }

    pub fn readout(&self) -> CylinderReadout {
        read_cylinder(&self.cylinder)
    }

    pub fn has_mode_tick(&self) -> bool {
        self.mode_tick.is_some()
    }

    /// Switch mode. The previous tick is always cancelled and, for a
    /// non-Manual mode, a fresh one is armed.
    pub fn set_mode(&mut self, mode: OperationMode) {
        if !self.running {
            return;
        }
        let previous = self.cylinder.mode();
        self.cylinder.set_mode(mode, &mut self.rng);
        log::debug!("mode {} -> {}", previous, mode);
        self.arm_mode_tick();
    }

    /// Manual slider input.
    pub fn set_extension(&mut self, value: f64) -> CylinderResult<()> {
        if !self.running {
            return Ok(());
        }
        self.cylinder.apply_manual(value, &mut self.rng)?;
        self.arm_operating_reset();
        Ok(())
    }

    pub fn emergency_stop(&mut self) {
        if !self.running {
            return;
        }
        log::info!(
            "emergency stop in {} mode at {:.1}%",
            self.cylinder.mode(),
            self.cylinder.extension()
        );
        self.cylinder.emergency_stop(&mut self.rng);
        self.arm_mode_tick();
    }

    /// Handle a fired timer. Returns whether visible state changed.
    pub fn on_timer(&mut self, event: TimerEvent) -> bool {
        if !self.running {
            return false;
        }
        match event {
            TimerEvent::ModeTick { generation } => {
                if generation != self.tick_generation || self.mode_tick.is_none() {
                    log::trace!("dropping stale tick {}", generation);
                    return false;
                }
                let moved = self.cylinder.tick(&mut self.rng);
                log::trace!(
                    "{} tick -> {:.1}%",
                    self.cylinder.mode(),
                    self.cylinder.extension()
                );
                moved
            }
            TimerEvent::OperatingElapsed { generation } => match self.config.reset_policy {
                OperatingResetPolicy::Coalesce => {
                    if generation != self.operating_generation {
                        return false;
                    }
                    self.operating_resets.clear();
                    self.clear_operating()
                }
                OperatingResetPolicy::Independent => {
                    self.operating_resets.pop_front();
                    self.clear_operating()
                }
            },
        }
    }

    /// Cancel every pending timer. Later commands and timer events are ignored.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.mode_tick = None;
        self.operating_resets.clear();
        self.tick_generation += 1;
        self.operating_generation += 1;
    }

    fn arm_mode_tick(&mut self) {
        // Drop the old handle before arming so two ticks never overlap.
        self.mode_tick = None;
        self.tick_generation += 1;
        if let Some(period) = self.cylinder.mode().tick_period_ms(&self.config) {
            let event = TimerEvent::ModeTick {
                generation: self.tick_generation,
            };
            self.mode_tick = Some(self.scheduler.every(period, event));
        }
    }

    fn arm_operating_reset(&mut self) {
        if self.config.reset_policy == OperatingResetPolicy::Coalesce {
            self.operating_resets.clear();
        }
        self.operating_generation += 1;
        let event = TimerEvent::OperatingElapsed {
            generation: self.operating_generation,
        };
        let handle = self.scheduler.after(self.config.operating_hold_ms, event);
        self.operating_resets.push_back(handle);
    }

    fn clear_operating(&mut self) -> bool {
        let was_operating = self.cylinder.is_operating();
        self.cylinder.clear_operating();
        was_operating
    }
}

impl<R: Rng> CylinderController<VirtualClock, R> {
    /// Let `ms` of virtual time pass, feeding every due timer into the controller.
    pub fn run_for(&mut self, ms: u64) {
        let clock = self.scheduler.clone();
        clock.advance(ms, |event| {
            self.on_timer(event);
        });
    }
}
