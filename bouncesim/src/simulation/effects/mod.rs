//! Cosmetic bookkeeping fed by the bodies: position trails and
//! short-lived particle bursts. Nothing here feeds back into physics

pub mod trail;
pub mod burst;
