//! Movement style: the numeric knobs the fitness function reads, and a keyword parser turning free
//! text ("crimpy and technical", "dyno", ...) into them.

use serde::{Deserialize, Serialize};

/// Qualitative movement preferences, every field in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    /// 0 tiny holds, 1 big holds
    pub hold_size_preference: f64,
    /// 0 very close moves, 1 far
    pub avg_move_distance: f64,
    pub compression_level: f64,
    /// 0 slopers, 1 crimps
    pub crimpy_level: f64,
    pub footwork_technicality: f64,
    /// 0 static, 1 dyno
    pub dynamic_level: f64,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            hold_size_preference: 0.5,
            avg_move_distance: 0.5,
            compression_level: 0.,
            crimpy_level: 0.,
            footwork_technicality: 0.5,
            dynamic_level: 0.5,
        }
    }
}

type Adjust = fn(&mut StyleParams);

/// Keyword groups, applied in order; a later group overrides the fields an earlier one set
const KEYWORDS: [(&[&str], Adjust); 6] = [
    (&["crimp", "crimpy"], |p: &mut StyleParams| {
        p.crimpy_level = 0.9;
        p.hold_size_preference = 0.2;
    }),
    (&["sloper", "slopey"], |p: &mut StyleParams| {
        p.crimpy_level = 0.1;
        p.hold_size_preference = 0.8;
    }),
    (&["compression"], |p: &mut StyleParams| p.compression_level = 0.9),
    (&["dynamic", "dyno", "powerful"], |p: &mut StyleParams| {
        p.dynamic_level = 0.8;
        p.avg_move_distance = 0.7;
    }),
    (&["technical", "techy", "balance"], |p: &mut StyleParams| {
        p.footwork_technicality = 0.8;
        p.avg_move_distance = 0.3;
    }),
    (&["big moves", "reachy"], |p: &mut StyleParams| p.avg_move_distance = 0.9),
];

/// Case-insensitive substring match against known style keywords. Unrecognized text yields
/// [StyleParams::default].
pub fn parse_style(text: &str) -> StyleParams {
    let text = text.to_lowercase();
    let mut params = StyleParams::default();
    for (words, adjust) in KEYWORDS {
        if words.iter().any(|w| text.contains(w)) {
            adjust(&mut params);
        }
    }
    params
}
