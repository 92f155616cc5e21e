//! Personnel scheduling: a shift roster over a planning horizon.
//!
//! Each employee works at most one shift per day. The objective is a
//! weighted penalty sum over shift coverage, workload balance, night shifts
//! followed by early shifts, and working stretches longer than five days.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::ProblemModel;

const INSTANCE_COUNT: usize = 5;
const INSTANCE_SEED: u64 = 0xE5_0000;

pub const OFF: u8 = 0;
pub const EARLY: u8 = 1;
pub const LATE: u8 = 2;
pub const NIGHT: u8 = 3;
const SHIFT_KINDS: usize = 4;
const MAX_STRETCH: usize = 5;

const COVERAGE_WEIGHT: f64 = 10.0;
const WORKLOAD_WEIGHT: f64 = 3.0;
const NIGHT_EARLY_WEIGHT: f64 = 5.0;
const STRETCH_WEIGHT: f64 = 2.0;

/// `roster[employee][day]` holds a shift code.
pub type Roster = Vec<Vec<u8>>;

#[derive(Debug, Clone)]
pub struct PersonnelScheduling {
    employees: usize,
    /// `demand[day][shift - 1]` for EARLY, LATE, NIGHT.
    demand: Vec<[u32; 3]>,
    target_shifts: usize,
}

impl PersonnelScheduling {
    pub fn new(employees: usize, demand: Vec<[u32; 3]>) -> Self {
        let total: u32 = demand.iter().flatten().sum();
        let target_shifts = if employees == 0 {
            0
        } else {
            (total as usize + employees / 2) / employees
        };
        Self {
            employees,
            demand,
            target_shifts,
        }
    }

    pub fn days(&self) -> usize {
        self.demand.len()
    }

    pub fn penalty(&self, roster: &Roster) -> f64 {
        let mut coverage = 0u32;
        for (day, wanted) in self.demand.iter().enumerate() {
            for (kind, &need) in wanted.iter().enumerate() {
                let shift = kind as u8 + 1;
                let staffed = roster.iter().filter(|row| row[day] == shift).count() as u32;
                coverage += staffed.abs_diff(need);
            }
        }

        let mut workload = 0usize;
        let mut night_early = 0usize;
        let mut stretch = 0usize;
        for row in roster {
            let worked = row.iter().filter(|&&s| s != OFF).count();
            workload += worked.abs_diff(self.target_shifts);
            night_early += row
                .windows(2)
                .filter(|pair| pair[0] == NIGHT && pair[1] == EARLY)
                .count();

            let mut run = 0;
            for &shift in row {
                run = if shift == OFF { 0 } else { run + 1 };
                if run > MAX_STRETCH {
                    stretch += 1;
                }
            }
        }

        COVERAGE_WEIGHT * coverage as f64
            + WORKLOAD_WEIGHT * workload as f64
            + NIGHT_EARLY_WEIGHT * night_early as f64
            + STRETCH_WEIGHT * stretch as f64
    }

    fn random_shift<R: Rng>(rng: &mut R) -> u8 {
        rng.random_range(0..SHIFT_KINDS) as u8
    }

    fn random_cell<R: Rng>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.employees == 0 || self.days() == 0 {
            return None;
        }
        Some((
            rng.random_range(0..self.employees),
            rng.random_range(0..self.days()),
        ))
    }

    /// Tries every shift for one random cell and keeps the cheapest.
    fn best_cell_change<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Roster {
        let mut next = roster.clone();
        let Some((employee, day)) = self.random_cell(rng) else {
            return next;
        };
        let mut best = (self.penalty(&next), next[employee][day]);
        for shift in 0..SHIFT_KINDS as u8 {
            next[employee][day] = shift;
            let score = self.penalty(&next);
            if score < best.0 {
                best = (score, shift);
            }
        }
        next[employee][day] = best.1;
        next
    }

    fn reassign_cell<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Roster {
        let mut next = roster.clone();
        if let Some((employee, day)) = self.random_cell(rng) {
            next[employee][day] = Self::random_shift(rng);
        }
        next
    }

    /// Swaps the shifts of two employees on one day.
    fn swap_on_day<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Roster {
        let mut next = roster.clone();
        if let Some((a, day)) = self.random_cell(rng) {
            let b = rng.random_range(0..self.employees);
            let shift = next[a][day];
            next[a][day] = next[b][day];
            next[b][day] = shift;
        }
        next
    }

    /// Redraws one employee's entire roster.
    fn ruin_employee<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Roster {
        let mut next = roster.clone();
        if let Some((employee, _)) = self.random_cell(rng) {
            for shift in next[employee].iter_mut() {
                *shift = Self::random_shift(rng);
            }
        }
        next
    }
}

impl ProblemModel for PersonnelScheduling {
    type Solution = Roster;
    const NAME: &'static str = "Personnel Scheduling";
    const HEURISTIC_COUNT: usize = 4;

    fn instance_count() -> usize {
        INSTANCE_COUNT
    }

    fn load(index: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(INSTANCE_SEED + index as u64);
        let employees = 8 + 4 * index;
        let days = if index < 3 { 14 } else { 28 };
        let peak = (employees / 4) as u32 + 1;
        let demand = (0..days)
            .map(|_| {
                [
                    rng.random_range(1..=peak),
                    rng.random_range(1..=peak),
                    rng.random_range(1..=peak),
                ]
            })
            .collect();
        Self::new(employees, demand)
    }

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Roster {
        (0..self.employees)
            .map(|_| {
                (0..self.days())
                    .map(|_| {
                        if rng.random_bool(0.4) {
                            OFF
                        } else {
                            rng.random_range(EARLY..=NIGHT)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn cost(&self, roster: &Roster) -> f64 {
        self.penalty(roster)
    }

    fn apply_heuristic<R: Rng>(&self, heuristic: usize, roster: &Roster, rng: &mut R) -> Roster {
        match heuristic {
            0 => self.best_cell_change(roster, rng),
            1 => self.reassign_cell(roster, rng),
            2 => self.swap_on_day(roster, rng),
            3 => self.ruin_employee(roster, rng),
            _ => unreachable!(
                "personnel scheduling has {} heuristics",
                Self::HEURISTIC_COUNT
            ),
        }
    }
}
