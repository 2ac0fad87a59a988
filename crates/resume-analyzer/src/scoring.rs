//! Score Aggregator — pure, deterministic composite-score formulas.
//!
//! The weights are a contract with the test suite and with downstream
//! consumers; change them and historical scores stop being comparable.

const OVERALL_KEYWORD_WEIGHT: f64 = 0.35;
const OVERALL_GRAMMAR_WEIGHT: f64 = 0.25;
const OVERALL_FORMAT_WEIGHT: f64 = 0.25;
const OVERALL_QUANTITATIVE_WEIGHT: f64 = 0.15;

const ATS_KEYWORD_WEIGHT: f64 = 0.5;
const ATS_FORMAT_WEIGHT: f64 = 0.3;
const ATS_STRUCTURE_WEIGHT: f64 = 0.2;

fn weighted(value: u8, weight: f64) -> f64 {
    f64::from(value) * weight
}

fn finish(total: f64) -> u8 {
    total.clamp(0.0, 100.0).round() as u8
}

/// Composite resume quality: 0.35 keyword + 0.25 grammar + 0.25 format +
/// 0.15 quantitative.
pub fn overall_score(keyword: u8, grammar: u8, format: u8, quantitative: u8) -> u8 {
    finish(
        weighted(keyword, OVERALL_KEYWORD_WEIGHT)
            + weighted(grammar, OVERALL_GRAMMAR_WEIGHT)
            + weighted(format, OVERALL_FORMAT_WEIGHT)
            + weighted(quantitative, OVERALL_QUANTITATIVE_WEIGHT),
    )
}

/// Applicant-tracking-system compatibility: 0.5 keyword + 0.3 format +
/// 0.2 structure.
pub fn ats_score(keyword: u8, format: u8, structure: u8) -> u8 {
    finish(
        weighted(keyword, ATS_KEYWORD_WEIGHT)
            + weighted(format, ATS_FORMAT_WEIGHT)
            + weighted(structure, ATS_STRUCTURE_WEIGHT),
    )
}
