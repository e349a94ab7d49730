//! Stochastic simulation driver.
//!
//! Wraps a [`School`] with daily population churn and runs the
//! [`DailyScheduler`] once per simulated day. All randomness comes from
//! the injected [`Rng`]; seeding it makes a run reproducible.
//!
//! # Daily cycle
//!
//! 1. Up to `max_new_students` random students arrive.
//! 2. Each instructor kind arrives with its own probability.
//! 3. At most one idle instructor and at most one idle student leave.
//! 4. The scheduler runs the day.

mod report;

pub use report::DayStatus;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Gender, Profile, School, Specialization};
use crate::scheduler::{DailyScheduler, DayOutcome, SchoolKpi};

/// Arrival and departure probabilities for daily churn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChurnConfig {
    /// Most random students that can arrive in one day.
    pub max_new_students: u32,
    /// Daily arrival probability of a teacher.
    pub teacher_arrival: f64,
    /// Daily arrival probability of a demonstrator.
    pub demonstrator_arrival: f64,
    /// Daily arrival probability of an OO trainer.
    pub oo_trainer_arrival: f64,
    /// Daily arrival probability of a GUI trainer.
    pub gui_trainer_arrival: f64,
    /// Chance each idle instructor is the one to leave (first hit leaves).
    pub instructor_departure: f64,
    /// Chance each idle student is the one to leave (first hit leaves).
    pub student_departure: f64,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            max_new_students: 2,
            teacher_arrival: 0.2,
            demonstrator_arrival: 0.1,
            oo_trainer_arrival: 0.05,
            gui_trainer_arrival: 0.05,
            instructor_departure: 0.2,
            student_departure: 0.05,
        }
    }
}

impl ChurnConfig {
    /// No arrivals, no departures.
    pub fn none() -> Self {
        Self {
            max_new_students: 0,
            teacher_arrival: 0.0,
            demonstrator_arrival: 0.0,
            oo_trainer_arrival: 0.0,
            gui_trainer_arrival: 0.0,
            instructor_departure: 0.0,
            student_departure: 0.0,
        }
    }

    /// Arrival probability for an instructor kind.
    pub fn arrival_probability(&self, specialization: Specialization) -> f64 {
        match specialization {
            Specialization::Teacher => self.teacher_arrival,
            Specialization::Demonstrator => self.demonstrator_arrival,
            Specialization::OoTrainer => self.oo_trainer_arrival,
            Specialization::GuiTrainer => self.gui_trainer_arrival,
        }
    }
}

/// Population changes applied before a day's pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Churn {
    /// Names of arriving students.
    pub new_students: Vec<String>,
    /// Names of arriving instructors.
    pub new_instructors: Vec<String>,
    /// Instructor who left, if any.
    pub departed_instructor: Option<String>,
    /// Student who left, if any.
    pub departed_student: Option<String>,
}

/// A school plus the machinery to run it day by day.
#[derive(Debug)]
pub struct Simulation<R> {
    school: School,
    scheduler: DailyScheduler,
    churn: ChurnConfig,
    rng: R,
    day: u32,
}

impl<R: Rng> Simulation<R> {
    /// Creates a simulation at day 0 with default churn.
    pub fn new(school: School, rng: R) -> Self {
        Self {
            school,
            scheduler: DailyScheduler::new(),
            churn: ChurnConfig::default(),
            rng,
            day: 0,
        }
    }

    /// Sets the scheduler.
    pub fn with_scheduler(mut self, scheduler: DailyScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Sets the churn probabilities.
    pub fn with_churn(mut self, churn: ChurnConfig) -> Self {
        self.churn = churn;
        self
    }

    /// Current school state.
    pub fn school(&self) -> &School {
        &self.school
    }

    /// Last simulated day (0 before the first step).
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Status block for the last simulated day.
    pub fn status(&self) -> DayStatus<'_> {
        DayStatus::new(self.day, &self.school)
    }

    /// Simulates one day: churn, then the scheduler pass.
    pub fn step(&mut self) -> DayOutcome {
        self.day += 1;
        let churn = self.apply_churn();
        debug!("day {}: churn {:?}", self.day, churn);

        let outcome = self.scheduler.advance(&mut self.school, self.day);

        let kpi = SchoolKpi::calculate(&self.school);
        info!(
            "day {}: {} students ({} idle), {} instructors ({:.0}% busy), {} courses, {} graduates",
            self.day,
            kpi.students,
            kpi.idle_students,
            kpi.instructors,
            kpi.instructor_utilization * 100.0,
            kpi.active_courses,
            kpi.graduates
        );
        outcome
    }

    /// Simulates `days` days, calling `observe` after each.
    pub fn run<F>(&mut self, days: u32, mut observe: F)
    where
        F: FnMut(&Self, &DayOutcome),
    {
        for _ in 0..days {
            let outcome = self.step();
            observe(self, &outcome);
        }
    }

    /// Applies one day of arrivals and departures.
    pub fn apply_churn(&mut self) -> Churn {
        let mut churn = Churn::default();

        let arrivals = self.rng.random_range(0..=self.churn.max_new_students);
        for _ in 0..arrivals {
            let profile = random_student(&mut self.rng);
            churn.new_students.push(profile.name.clone());
            self.school.add_student(profile);
        }

        for specialization in Specialization::ALL {
            if chance(&mut self.rng, self.churn.arrival_probability(specialization)) {
                let profile = arriving_instructor(specialization);
                churn.new_instructors.push(profile.name.clone());
                self.school.add_instructor(profile, specialization);
            }
        }

        let idle: Vec<_> = self.school.idle_instructors().map(|i| i.id).collect();
        let p = self.churn.instructor_departure;
        if let Some(id) = idle.into_iter().find(|_| chance(&mut self.rng, p)) {
            churn.departed_instructor = self
                .school
                .remove_instructor(id)
                .map(|i| i.profile.name);
        }

        let idle: Vec<_> = self.school.idle_students().map(|s| s.id).collect();
        let p = self.churn.student_departure;
        if let Some(id) = idle.into_iter().find(|_| chance(&mut self.rng, p)) {
            churn.departed_student = self.school.remove_student(id).map(|s| s.profile.name);
        }

        churn
    }
}

fn chance<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.random_bool(probability.clamp(0.0, 1.0))
}

/// Generates a random student: capitalised five-letter name, age 18..=22.
pub fn random_student<R: Rng>(rng: &mut R) -> Profile {
    let mut name = String::with_capacity(5);
    name.push(rng.random_range(b'A'..=b'Z') as char);
    for _ in 0..4 {
        name.push(rng.random_range(b'a'..=b'z') as char);
    }
    let gender = if rng.random_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };
    Profile::new(name, gender, rng.random_range(18..=22))
}

fn arriving_instructor(specialization: Specialization) -> Profile {
    match specialization {
        Specialization::Teacher => Profile::new("Ross", Gender::Male, 32),
        Specialization::Demonstrator => Profile::new("Rachael", Gender::Female, 30),
        Specialization::OoTrainer => Profile::new("Monica", Gender::Female, 28),
        Specialization::GuiTrainer => Profile::new("Chandler", Gender::Male, 29),
    }
}
