//! Distribution fitting for daily precipitation.
//!
//! - **Gamma** for wet-day amounts, by method of moments or maximum
//!   likelihood, with return levels derived through the independent-day
//!   annualization.
//! - **GEV** for annual maxima, by maximum likelihood, with return levels
//!   read directly off the quantile function.
//!
//! # Quick Start
//!
//! ```no_run
//! use pluvial_fit::{FitMethod, annual_maxima, fit_gamma, fit_gev, gamma_return_level};
//!
//! let wet = vec![1.2, 4.5, 0.8, 12.0, 3.3, 7.1];
//! let gamma = fit_gamma(&wet, FitMethod::Mle).unwrap();
//! let level_10y = gamma_return_level(&gamma, 0.3, 10.0, 365).unwrap();
//!
//! let amounts = vec![10.0; 3650];
//! let years: Vec<i32> = (0..3650).map(|d| 2000 + d / 365).collect();
//! let maxima: Vec<f64> = annual_maxima(&amounts, &years, 365)
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.amount)
//!     .collect();
//! let gev = fit_gev(&maxima).unwrap();
//! ```

mod error;
mod gamma;
mod gamma_fit;
mod gev;
mod maxima;
mod return_level;

pub use error::FitError;
pub use gamma::GammaParams;
pub use gamma_fit::{FitMethod, fit_gamma};
pub use gev::{GevParams, MIN_GEV_MAXIMA, fit_gev};
pub use maxima::{AnnualMaximum, annual_maxima, block_maxima};
pub use return_level::gamma_return_level;
