//! The structured chart analysis returned by the vision model.
//!
//! Field names follow the JSON the model is asked to produce, so the same types
//! are used to parse the reply and to persist history entries.

use {
    crate::utils::parse_local_wall_clock,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LiquiditySide {
    Buyside,
    Sellside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strength {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SetupKind {
    Pullback,
    Confirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskProfile {
    Aggressive,
    Conservative,
}

/// How a setup played out, as classified by the user after the fact.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
    Be,
    #[default]
    Pending,
}

impl Outcome {
    pub fn is_resolved(self) -> bool {
        self != Outcome::Pending
    }
}

/// One of the two fixed setup archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum SetupSlot {
    /// Aggressive pullback entry on the liquidity sweep
    A,
    /// Conservative entry after confirmation
    B,
}

impl SetupSlot {
    pub fn key(self) -> &'static str {
        match self {
            SetupSlot::A => "setup_A",
            SetupSlot::B => "setup_B",
        }
    }

    fn expected_shape(self) -> (SetupKind, RiskProfile) {
        match self {
            SetupSlot::A => (SetupKind::Pullback, RiskProfile::Aggressive),
            SetupSlot::B => (SetupKind::Confirmation, RiskProfile::Conservative),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBias {
    pub direction: Direction,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityZone {
    #[serde(rename = "type")]
    pub side: LiquiditySide,
    pub price_approx: String,
    pub strength: Strength,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionalReading {
    pub market_intent: String,
    pub retail_traps: String,
    pub liquidity_objective: String,
}

/// A concrete proposed trade. Prices stay strings so the chart's exact decimal
/// formatting survives storage and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    #[serde(rename = "type")]
    pub kind: SetupKind,
    pub risk_profile: RiskProfile,
    pub entry: String,
    pub stop_loss: String,
    pub tp1: String,
    pub tp2: String,
    pub tp3: String,
    pub reliability: u8,
    pub risk_reward: String,
    /// `YYYY-MM-DD HH:mm`, user's local time
    pub expiry: String,
    pub logic: String,
    #[serde(default)]
    pub user_result: Outcome,
}

impl Setup {
    /// Expiry as epoch ms, if the model respected the wall-clock format
    pub fn expiry_at(&self) -> Option<i64> {
        parse_local_wall_clock(&self.expiry)
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expiry_at().is_some_and(|expiry| now_ms > expiry)
    }

    pub fn targets(&self) -> [&str; 3] {
        [&self.tp1, &self.tp2, &self.tp3]
    }

    fn validate(&self, slot: SetupSlot) -> Result<(), String> {
        let (kind, risk) = slot.expected_shape();
        if self.kind != kind || self.risk_profile != risk {
            return Err(format!(
                "{} must be {}/{}, got {}/{}",
                slot.key(),
                kind,
                risk,
                self.kind,
                self.risk_profile
            ));
        }
        if self.reliability > MAX_SCORE {
            return Err(format!(
                "{} reliability {} out of range",
                slot.key(),
                self.reliability
            ));
        }
        let prices = [
            ("entry", &self.entry),
            ("stop_loss", &self.stop_loss),
            ("tp1", &self.tp1),
            ("tp2", &self.tp2),
            ("tp3", &self.tp3),
        ];
        if let Some((name, _)) = prices.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(format!("{}.{} is blank", slot.key(), name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setups {
    #[serde(rename = "setup_A")]
    pub a: Setup,
    #[serde(rename = "setup_B")]
    pub b: Setup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidationRules {
    pub bias_invalidation: String,
    pub setup_invalidation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub asset_class: String,
    pub market_bias: MarketBias,
    pub liquidity_zones: Vec<LiquidityZone>,
    pub institutional_reading: InstitutionalReading,
    pub setups: Setups,
    pub invalidation_rules: InvalidationRules,
    pub limitations: Vec<String>,
}

impl AnalysisResult {
    pub fn setup(&self, slot: SetupSlot) -> &Setup {
        match slot {
            SetupSlot::A => &self.setups.a,
            SetupSlot::B => &self.setups.b,
        }
    }

    pub fn setup_mut(&mut self, slot: SetupSlot) -> &mut Setup {
        match slot {
            SetupSlot::A => &mut self.setups.a,
            SetupSlot::B => &mut self.setups.b,
        }
    }

    /// Copy of this result with one setup's outcome replaced.
    pub fn with_outcome(&self, slot: SetupSlot, outcome: Outcome) -> AnalysisResult {
        let mut next = self.clone();
        next.setup_mut(slot).user_result = outcome;
        next
    }

    /// Structural checks serde cannot express: score ranges and slot archetypes.
    pub fn validate(&self) -> Result<(), String> {
        if self.market_bias.confidence > MAX_SCORE {
            return Err(format!(
                "market_bias.confidence {} out of range",
                self.market_bias.confidence
            ));
        }
        self.setups.a.validate(SetupSlot::A)?;
        self.setups.b.validate(SetupSlot::B)?;
        Ok(())
    }

    /// A fresh analysis has no user verdicts, whatever the model wrote.
    pub(crate) fn clear_outcomes(&mut self) {
        self.setups.a.user_result = Outcome::Pending;
        self.setups.b.user_result = Outcome::Pending;
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn setup(slot: SetupSlot, entry: &str) -> Setup {
        let (kind, risk_profile) = slot.expected_shape();
        Setup {
            kind,
            risk_profile,
            entry: entry.to_string(),
            stop_loss: "4321.10".to_string(),
            tp1: "4350.00".to_string(),
            tp2: "4365.50".to_string(),
            tp3: "4390.25".to_string(),
            reliability: 64,
            risk_reward: "1:2.5".to_string(),
            expiry: "2026-03-14 18:00".to_string(),
            logic: "Sweep of the Asian low".to_string(),
            user_result: Outcome::Pending,
        }
    }

    pub(crate) fn analysis(direction: Direction, confidence: u8) -> AnalysisResult {
        AnalysisResult {
            asset_class: "Commodities".to_string(),
            market_bias: MarketBias {
                direction,
                confidence,
            },
            liquidity_zones: vec![LiquidityZone {
                side: LiquiditySide::Sellside,
                price_approx: "4330.00".to_string(),
                strength: Strength::High,
                reason: "Equal lows".to_string(),
            }],
            institutional_reading: InstitutionalReading {
                market_intent: "Accumulation".to_string(),
                retail_traps: "Breakout sellers".to_string(),
                liquidity_objective: "Buy stops above 4390".to_string(),
            },
            setups: Setups {
                a: setup(SetupSlot::A, "4338.66"),
                b: setup(SetupSlot::B, "4342.10"),
            },
            invalidation_rules: InvalidationRules {
                bias_invalidation: "Close below 4320".to_string(),
                setup_invalidation: "No sweep before London".to_string(),
            },
            limitations: vec!["Single timeframe".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::analysis;
    use super::*;

    #[test]
    fn outcome_wire_names() {
        let json = serde_json::to_string(&[Outcome::Win, Outcome::Loss, Outcome::Be, Outcome::Pending])
            .unwrap();
        assert_eq!(json, r#"["WIN","LOSS","BE","PENDING"]"#);
        assert_eq!(Outcome::Be.to_string(), "BE");
    }

    #[test]
    fn setups_use_slot_keys() {
        let value = serde_json::to_value(analysis(Direction::Buy, 72)).unwrap();
        assert!(value["setups"]["setup_A"].is_object());
        assert!(value["setups"]["setup_B"].is_object());
        assert_eq!(value["setups"]["setup_A"]["type"], "pullback");
        assert_eq!(value["market_bias"]["direction"], "BUY");
    }

    #[test]
    fn missing_user_result_defaults_to_pending() {
        let mut value = serde_json::to_value(analysis(Direction::Sell, 40)).unwrap();
        value["setups"]["setup_B"]
            .as_object_mut()
            .unwrap()
            .remove("user_result");
        let parsed: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.setups.b.user_result, Outcome::Pending);
    }

    #[test]
    fn validate_rejects_out_of_range_scores() {
        let mut result = analysis(Direction::Buy, 72);
        assert!(result.validate().is_ok());
        result.market_bias.confidence = 101;
        assert!(result.validate().is_err());

        let mut result = analysis(Direction::Buy, 72);
        result.setups.b.reliability = 150;
        assert!(result.validate().is_err());
    }

    #[test]
    fn validate_rejects_swapped_archetypes() {
        let mut result = analysis(Direction::Buy, 72);
        std::mem::swap(&mut result.setups.a, &mut result.setups.b);
        let err = result.validate().unwrap_err();
        assert!(err.contains("setup_A"));
    }

    #[test]
    fn validate_rejects_blank_prices() {
        let mut result = analysis(Direction::Buy, 72);
        result.setups.a.tp2 = "  ".to_string();
        assert!(result.validate().unwrap_err().contains("tp2"));
    }

    #[test]
    fn with_outcome_touches_only_one_slot() {
        let result = analysis(Direction::Buy, 72);
        let next = result.with_outcome(SetupSlot::B, Outcome::Loss);
        assert_eq!(next.setups.a.user_result, Outcome::Pending);
        assert_eq!(next.setups.b.user_result, Outcome::Loss);
        assert_eq!(result.setups.b.user_result, Outcome::Pending);
    }

    #[test]
    fn expiry_parsed_in_local_time() {
        let result = analysis(Direction::Buy, 72);
        let expiry = result.setups.a.expiry_at().unwrap();
        assert!(result.setups.a.is_expired_at(expiry + 1));
        assert!(!result.setups.a.is_expired_at(expiry - 1));

        let mut odd = result.setups.a.clone();
        odd.expiry = "tomorrow".to_string();
        assert_eq!(odd.expiry_at(), None);
        assert!(!odd.is_expired_at(i64::MAX));
    }
}
