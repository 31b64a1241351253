use crate::{
    foundation::core::Timestamp,
    foundation::math::finite_or_zero,
    score::schema::{
        APEX_SUB_MAX, DIVISION_SPAN, DIVISION_SUB_MAX, DIVISIONS, TIER_SPAN, TierSchema,
        division_index,
    },
};

/// A score decoded back into its rank components.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedRank {
    /// Tier name from the decoding schema.
    pub tier: &'static str,
    /// Division token, absent for tiers without divisions.
    pub division: Option<&'static str>,
    /// Sub-score inside the division (or tier) band.
    pub sub_score: f64,
}

impl std::fmt::Display for DecodedRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sub = self.sub_score.floor();
        match self.division {
            Some(div) => write!(f, "{} {} {}LP", self.tier, div, sub),
            None => write!(f, "{} {}LP", self.tier, sub),
        }
    }
}

/// Encode a rank label plus sub-score into one ordered scalar.
///
/// The schema is chosen by the observation time `t`. Returns `None` for a blank label or a
/// tier that the schema does not know; a missing or unknown division resolves to the lowest.
pub fn encode(rank_label: &str, sub_score: f64, t: Timestamp) -> Option<f64> {
    encode_with(TierSchema::at(t), rank_label, sub_score)
}

pub fn encode_with(schema: TierSchema, rank_label: &str, sub_score: f64) -> Option<f64> {
    let mut parts = rank_label.split_whitespace();
    let tier_index = schema.tier_index(parts.next()?)?;
    let sub = finite_or_zero(sub_score);
    let base = tier_index as f64 * TIER_SPAN;

    if schema.has_divisions(tier_index) {
        let div = parts.next().and_then(division_index).unwrap_or(0);
        Some(base + div as f64 * DIVISION_SPAN + sub.clamp(0.0, DIVISION_SUB_MAX))
    } else {
        Some(base + sub.clamp(0.0, APEX_SUB_MAX))
    }
}

/// Decode a score with the schema in effect at `t`.
///
/// `t` is the time the score is *displayed* at, not the time it was observed. Scores encoded
/// before the schema cutoff and decoded after it can therefore land on a neighbouring tier
/// name.
pub fn decode(score: f64, t: Timestamp) -> DecodedRank {
    decode_with(TierSchema::at(t), score)
}

pub fn decode_with(schema: TierSchema, score: f64) -> DecodedRank {
    let score = finite_or_zero(score);
    let tier_index = ((score / TIER_SPAN).floor().max(0.0) as usize).min(schema.last_index());
    let tier = schema.tier_name(tier_index).unwrap_or("");
    let rem = score - tier_index as f64 * TIER_SPAN;

    if schema.has_divisions(tier_index) {
        let div = ((rem / DIVISION_SPAN).floor().max(0.0) as usize).min(DIVISIONS.len() - 1);
        let sub = (rem - div as f64 * DIVISION_SPAN).clamp(0.0, DIVISION_SUB_MAX);
        DecodedRank {
            tier,
            division: Some(DIVISIONS[div]),
            sub_score: sub,
        }
    } else {
        DecodedRank {
            tier,
            division: None,
            sub_score: rem.clamp(0.0, APEX_SUB_MAX),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/score/codec.rs"]
mod tests;
