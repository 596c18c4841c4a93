//! Score computation and letter classification.
//!
//! This module turns the four grade components of a student into a final
//! weighted score and maps that score onto letter grade bands. Both the
//! weights and the bands come from a [`GradingPolicy`].

pub mod calculator;
pub mod grade;
pub mod policy;
pub mod utility;

pub use calculator::{GradeComponents, final_score};
pub use policy::{GradeBand, GradeScale, GradingPolicy, Weights};
