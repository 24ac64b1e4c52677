use serde::Deserialize;

/// How strictly the elephant's two-step diagonal is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElephantRule {
    /// Both `|dx|` and `|dy|` must equal 2.
    #[default]
    Strict,
    /// Only `|dx| == 2` is checked, as in the legacy Android board.
    /// Allows moves such as `(2, 9) -> (4, 8)` whose "eye" is
    /// `((x0 + x1) / 2, (y0 + y1) / 2)` rounded down.
    Legacy,
}

/// Session options. The JS side may pass any subset of the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub elephant_rule: ElephantRule,
}

impl GameConfig {
    pub fn legacy() -> Self {
        Self {
            elephant_rule: ElephantRule::Legacy,
        }
    }
}
