//! Grade text to a normalized difficulty in `[0, 1]`.
//!
//! Understands V-scale (`V0`..`V14`) and Fontainebleau (`5A`..`8C`) grades, a `soft`/`hard`
//! modifier worth 0.03 either way, and ranges such as `V3-V5` or `6A-6C`, which average their
//! ends.

use lazy_static::lazy_static;
use regex::Regex;

/// Difficulty assumed for text that names no known grade
pub const FALLBACK_DIFFICULTY: f64 = 0.15;

/// Shift applied by a `soft` or `hard` modifier
const MODIFIER_SHIFT: f64 = 0.03;

const V_SCALE: [(&str, f64); 15] = [
    ("V0", 0.05),
    ("V1", 0.10),
    ("V2", 0.15),
    ("V3", 0.25),
    ("V4", 0.35),
    ("V5", 0.45),
    ("V6", 0.55),
    ("V7", 0.60),
    ("V8", 0.70),
    ("V9", 0.78),
    ("V10", 0.85),
    ("V11", 0.92),
    ("V12", 0.96),
    ("V13", 0.98),
    ("V14", 1.00),
];

const FONT_SCALE: [(&str, f64); 20] = [
    ("5A", 0.10),
    ("5B", 0.15),
    ("5C", 0.20),
    ("6A", 0.30),
    ("6A+", 0.35),
    ("6B", 0.40),
    ("6B+", 0.45),
    ("6C", 0.50),
    ("6C+", 0.55),
    ("7A", 0.60),
    ("7A+", 0.65),
    ("7B", 0.70),
    ("7B+", 0.75),
    ("7C", 0.80),
    ("7C+", 0.85),
    ("8A", 0.90),
    ("8A+", 0.93),
    ("8B", 0.96),
    ("8B+", 0.98),
    ("8C", 1.00),
];

lazy_static! {
    static ref V_GRADE: Regex = Regex::new(r"^V(\d+)").unwrap();
    static ref RANGE: Regex = Regex::new(r"^(.+?)\s*[-–]\s*(.+)$").unwrap();
}

fn lookup(scale: &[(&str, f64)], grade: &str) -> Option<f64> {
    scale
        .iter()
        .find_map(|(name, value)| (*name == grade).then_some(*value))
}

/// A single upper-cased grade from either scale. V grades only need to lead the text.
fn grade_value(grade: &str) -> Option<f64> {
    let grade = grade.trim();
    V_GRADE
        .captures(grade)
        .and_then(|caps| lookup(&V_SCALE, &format!("V{}", &caps[1])))
        .or_else(|| lookup(&FONT_SCALE, grade))
}

/// Both ends looked up in either scale, recognized ends averaged
fn range_value(text: &str) -> Option<f64> {
    let caps = RANGE.captures(text)?;
    let values = [&caps[1], &caps[2]]
        .into_iter()
        .filter_map(grade_value)
        .collect::<Vec<_>>();
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

pub fn parse_difficulty(text: &str) -> f64 {
    let text = text.trim().to_uppercase();
    let soft = text.contains("SOFT");
    let hard = text.contains("HARD");
    let text = text.replace("SOFT", "").replace("HARD", "");
    let text = text.trim();

    let Some(base) = range_value(text).or_else(|| grade_value(text)) else {
        return FALLBACK_DIFFICULTY;
    };

    let mut value = base;
    if soft {
        value -= MODIFIER_SHIFT;
    }
    if hard {
        value += MODIFIER_SHIFT;
    }
    value.clamp(0., 1.)
}
