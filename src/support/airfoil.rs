//! NACA four-digit airfoil sections.
//!
//! A section is described by a four-digit code such as `2412`:
//! maximum camber of 2% chord, located at 40% chord, with a 12% thick profile.
//! [`AirfoilCode`] validates and decodes the code, and [`AirfoilProfile`]
//! samples the closed boundary loop used by the mesh builder.
//!
//! ```
//! use wing_opt::support::airfoil::AirfoilCode;
//!
//! let code: AirfoilCode = "2412".parse().unwrap();
//! let profile = code.profile(1.0, 81);
//! assert_eq!(profile.len(), 161);
//! ```

mod code;
mod profile;

pub use code::{AirfoilCode, AirfoilCodeError};
pub use profile::{AirfoilProfile, ProfilePoint};
