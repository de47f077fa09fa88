//! Formscore Rules - Form checks over joint angle series
//!
//! Each rule reads the angle series it needs, conditions them, and reports
//! zero or more [`Violation`](formscore_core::Violation)s. Rules are
//! independent. The [`RuleEngine`] runs them in a fixed priority order:
//!
//! 1. Spine neutral (sudden changes, butt wink, excessive range)
//! 2. Squat depth
//! 3. Hip angle
//! 4. Trunk inclination (reserved)
//! 5. Tibia inclination (reserved)
//!
//! That order is also the tie-break order for feedback of equal severity.

pub mod depth;
pub mod engine;
pub mod hip;
pub mod inclination;
pub mod rule;
pub mod spine;

pub use depth::*;
pub use engine::*;
pub use hip::*;
pub use inclination::*;
pub use rule::*;
pub use spine::*;
