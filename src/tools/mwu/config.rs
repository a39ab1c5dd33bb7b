use std::io::Read;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::{
    ExactMode,
    Method,
    Strategy,
};
use crate::error::{
    MwuError,
    MwuResult,
};
use crate::tools::mwu::exact::EXACT_MAX_TOTAL;
use crate::with_field_fn;

/// Settings of a [`RankSumTester`](crate::tools::mwu::RankSumTester) run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MwuConfig {
    pub strategy:        Strategy,
    pub exact_mode:      ExactMode,
    /// In [`Strategy::Auto`], both groups must be at most this large for the
    /// exact method to be used.
    pub exact_max_group: usize,
}

impl MwuConfig {
    with_field_fn!(strategy, Strategy);
    with_field_fn!(exact_mode, ExactMode);
    with_field_fn!(exact_max_group, usize);

    pub fn new(
        strategy: Strategy,
        exact_mode: ExactMode,
        exact_max_group: usize,
    ) -> Self {
        Self {
            strategy,
            exact_mode,
            exact_max_group,
        }
    }

    /// Reads a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Picks the method for a sample with group sizes `(n, m)` and
    /// `tie_blocks` blocks of tied values.
    pub fn select_method(
        &self,
        n: usize,
        m: usize,
        tie_blocks: usize,
    ) -> MwuResult<Method> {
        match self.strategy {
            Strategy::Auto => {
                if tie_blocks == 0
                    && n <= self.exact_max_group
                    && m <= self.exact_max_group
                    && n + m <= EXACT_MAX_TOTAL
                {
                    Ok(Method::Exact)
                }
                else {
                    Ok(Method::Normal)
                }
            },
            Strategy::Exact if tie_blocks > 0 => {
                Err(MwuError::TiedSample { blocks: tie_blocks })
            },
            Strategy::Exact => Ok(Method::Exact),
            Strategy::Normal => Ok(Method::Normal),
            Strategy::Uniform => Ok(Method::Uniform),
        }
    }
}

impl Default for MwuConfig {
    fn default() -> Self {
        Self {
            strategy:        Strategy::Auto,
            exact_mode:      ExactMode::Point,
            exact_max_group: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(5, 8, 0, Method::Exact)]
    #[case(8, 8, 0, Method::Exact)]
    #[case(9, 3, 0, Method::Normal)]
    #[case(3, 30, 0, Method::Normal)]
    #[case(5, 8, 1, Method::Normal)]
    fn test_auto_selection(
        #[case] n: usize,
        #[case] m: usize,
        #[case] tie_blocks: usize,
        #[case] expected: Method,
    ) {
        let config = MwuConfig::default();
        assert_eq!(config.select_method(n, m, tie_blocks).unwrap(), expected);
        // Selection does not depend on which group is asked about
        assert_eq!(config.select_method(m, n, tie_blocks).unwrap(), expected);
    }

    #[test]
    fn test_forced_selection() {
        let config = MwuConfig::default().with_strategy(Strategy::Exact);
        assert_eq!(config.select_method(40, 40, 0).unwrap(), Method::Exact);
        assert_eq!(
            config.select_method(4, 4, 2),
            Err(MwuError::TiedSample { blocks: 2 })
        );
        let config = config.with_strategy(Strategy::Uniform);
        assert_eq!(config.select_method(4, 4, 2).unwrap(), Method::Uniform);
    }

    #[test]
    fn test_from_json() {
        let config =
            MwuConfig::from_json(r#"{"strategy": "normal", "exact_max_group": 12}"#.as_bytes())
                .unwrap();
        assert_eq!(
            config,
            MwuConfig::new(Strategy::Normal, ExactMode::Point, 12)
        );
        assert_eq!(
            MwuConfig::from_json("{}".as_bytes()).unwrap(),
            MwuConfig::default()
        );
    }

    #[test]
    fn test_builder() {
        let config = MwuConfig::default()
            .with_exact_mode(ExactMode::Cumulative)
            .with_exact_max_group(4);
        assert_eq!(config.exact_mode, ExactMode::Cumulative);
        assert_eq!(config.exact_max_group, 4);
        assert_eq!(config.strategy, Strategy::Auto);
    }
}
