#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Active { set: u32 },
    Resting { set: u32, remaining: u32 },
    Finished,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Ignored,
    Counting { remaining: u32 },
    NextSet { set: u32 },
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetSchedule {
    reps_per_set: u32,
    total_sets: u32,
    rest_seconds: u32,
    phase: Phase,
}

impl SetSchedule {
    pub fn new(reps_per_set: u32, total_sets: u32, rest_seconds: u32) -> Self {
        Self {
            reps_per_set,
            total_sets,
            rest_seconds,
            phase: Phase::Active { set: 1 },
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reps_per_set(&self) -> u32 {
        self.reps_per_set
    }

    pub fn total_sets(&self) -> u32 {
        self.total_sets
    }

    pub fn current_set(&self) -> u32 {
        match self.phase {
            Phase::Active { set } | Phase::Resting { set, .. } => set,
            Phase::Finished => self.total_sets,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    pub fn rest_remaining(&self) -> Option<u32> {
        match self.phase {
            Phase::Resting { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Enter rest once the cumulative rep total covers the current set.
    pub fn on_reps(&mut self, total_reps: u32) -> Option<u32> {
        match self.phase {
            Phase::Active { set } if total_reps >= self.reps_per_set.saturating_mul(set) => {
                self.phase = Phase::Resting {
                    set,
                    remaining: self.rest_seconds,
                };
                Some(set)
            }
            _ => None,
        }
    }

    pub fn rest_seconds(&self) -> u32 {
        self.rest_seconds
    }

    pub fn tick(&mut self) -> Tick {
        let (set, remaining) = match self.phase {
            Phase::Resting { set, remaining } => (set, remaining.saturating_sub(1)),
            _ => return Tick::Ignored,
        };

        if remaining > 0 {
            self.phase = Phase::Resting { set, remaining };
            Tick::Counting { remaining }
        } else if set < self.total_sets {
            self.phase = Phase::Active { set: set + 1 };
            Tick::NextSet { set: set + 1 }
        } else {
            self.phase = Phase::Finished;
            Tick::Finished
        }
    }
}
