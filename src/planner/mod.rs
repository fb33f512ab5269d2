pub mod adjust;
pub mod anomaly;
pub mod calculations;
pub mod constants;
pub mod reconcile;

pub use adjust::{ItemPos, Nudge, Rounding, adjustable_positions, apply_nudge, nudge_item};
pub use anomaly::detect_anomaly;
pub use calculations::{
    CompletenessTier, all_within_tolerance, completeness_ratio, deficit, round_quantity,
    round_to_step, round_within, tolerance, within_tolerance,
};
pub use reconcile::{ReconcileReport, prescale_meals, reconcile, round_quantities};
