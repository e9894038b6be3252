//! Statistical utilities for the freerange survey pipeline.
//!
//! This crate provides a collection of statistical tools including:
//!
//! - **Descriptive statistics**: mean, median, population variance and standard deviation
//! - **Standardization**: population z-scores over columns with absent values
//! - **Frequency counting**: occurrence counters keyed by `f64`
//! - **Cumulative distributions**: right-continuous empirical CDFs on a shared grid
//! - **Percentiles and box summaries**: interpolated quartiles and whisker bounds
//!
//! Absent observations are modelled as `Option::None` and are never treated
//! as zero by any function in this crate.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`zscore`]: Standardization of optional columns
//! - [`counter`]: Frequency counters
//! - [`cumulative`]: Empirical cumulative distribution curves
//! - [`percentiles`]: Percentile computation and storage
//! - [`boxplot`]: Box-plot summaries
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use freerange_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Standardizing a column with absent values
//!
//! ```
//! use freerange_stats::zscore::Standardized;
//!
//! let column = Standardized::new(&[Some(2.0), None, Some(6.0)]);
//! assert_eq!(column.zscores[1], None);
//! ```
//!
//! ## Building a cumulative distribution
//!
//! ```
//! use freerange_stats::{counter::FrequencyCounter, cumulative::CumulativeCurve};
//!
//! let counter: FrequencyCounter = [6.0, 8.0, 8.0, 12.0].into_iter().collect();
//! let curve = CumulativeCurve::on_grid(&counter, &[6.0, 8.0, 12.0]);
//! assert_eq!(curve.points.last(), Some(&(12.0, 100.0)));
//! ```

pub mod boxplot;
pub mod counter;
pub mod cumulative;
pub mod descriptive;
pub mod percentiles;
pub mod zscore;
