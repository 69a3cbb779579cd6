use crate::BigInt;

/// The two decision variables the packing selector needs from the control
/// pool, borrowed for the duration of a single `pack` call (spec §9: "pass
/// a borrowed reference to the control pool into the pack operation
/// without structural aliasing hazards").
#[derive(Debug, Clone)]
pub struct ControlSnapshot {
    pub tax:     BigInt,
    pub subsidy: BigInt
}
