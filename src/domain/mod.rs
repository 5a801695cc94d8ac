// Domain types and value objects
mod analysis;
mod language;

#[cfg(test)]
pub(crate) use analysis::fixtures;

// Re-export commonly used types to the world
pub use analysis::{
    AnalysisResult, Direction, InstitutionalReading, InvalidationRules, LiquiditySide,
    LiquidityZone, MAX_SCORE, MarketBias, Outcome, RiskProfile, Setup, SetupKind, SetupSlot,
    Setups, Strength,
};
pub use language::Language;
