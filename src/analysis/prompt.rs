use crate::domain::Language;

const OUTPUT_SCHEMA: &str = r#"{
  "asset_class": "Forex | Crypto | Indices | Commodities | Stocks | Unknown",
  "market_bias": { "direction": "BUY | SELL | NEUTRAL", "confidence": 0 },
  "liquidity_zones": [
    { "type": "BUYSIDE | SELLSIDE", "price_approx": "0.0000", "strength": "low | medium | high", "reason": "" }
  ],
  "institutional_reading": { "market_intent": "", "retail_traps": "", "liquidity_objective": "" },
  "setups": {
    "setup_A": {
      "type": "pullback", "risk_profile": "aggressive",
      "entry": "0.0000", "stop_loss": "0.0000", "tp1": "0.0000", "tp2": "0.0000", "tp3": "0.0000",
      "reliability": 0, "risk_reward": "1:X", "expiry": "YYYY-MM-DD HH:mm",
      "logic": ""
    },
    "setup_B": {
      "type": "confirmation", "risk_profile": "conservative",
      "entry": "0.0000", "stop_loss": "0.0000", "tp1": "0.0000", "tp2": "0.0000", "tp3": "0.0000",
      "reliability": 0, "risk_reward": "1:X", "expiry": "YYYY-MM-DD HH:mm",
      "logic": ""
    }
  },
  "invalidation_rules": { "bias_invalidation": "", "setup_invalidation": "" },
  "limitations": []
}"#;

/// Instruction sent alongside the chart image.
///
/// `local_time` is the user's wall clock (`YYYY-MM-DD HH:mm`); setup expiries
/// are requested in the same clock so they can be compared locally.
pub fn compose_instruction(language: Language, local_time: &str) -> String {
    format!(
        r#"# TRADE VISION - INSTITUTIONAL CHART READING ENGINE

## ROLE
You are an institutional market analysis engine specialised in liquidity detection
and ICT/SMC trade setups. You read the attached chart screenshot only.

## CONTEXT
Current local time of the user: {local_time}

## LIQUIDITY-BASED ENTRY RULE
1. If the bias is BUY, the entry MUST sit on a SELLSIDE liquidity zone (discount price
   where retail buyers' stops get triggered).
2. If the bias is SELL, the entry MUST sit on a BUYSIDE liquidity zone (premium price
   where retail sellers' stops get triggered).

## SETUPS
Provide exactly two setups built on that liquidity:
- setup_A (type "pullback", risk_profile "aggressive"): entry on the exact level of the
  opposing liquidity (sweep wick), tight stop just beyond the zone.
- setup_B (type "confirmation", risk_profile "conservative"): entry after the opposing
  liquidity was taken, on the first FVG or order block formed after the sweep.
Each setup has an expiry after which it is no longer valid, written as YYYY-MM-DD HH:mm
in the same clock as the current local time above.

## HARD CONSTRAINTS
1. Decimal precision: copy the exact price scale visible on the chart axis (e.g. 1.05043,
   2034.12). Never rescale, never change the order of magnitude. Prices are JSON strings.
2. risk_reward is estimated against TP2 and written as "1:X".
3. confidence and reliability are integers from 0 to 100.
4. Every textual field is written in {language}.
5. Output ONLY the JSON object below. No prose, no markdown, no code fences.

## OUTPUT FORMAT
{schema}
"#,
        local_time = local_time,
        language = language.prompt_name(),
        schema = OUTPUT_SCHEMA,
    )
}
